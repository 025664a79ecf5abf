//! Output sink selecting the report mode once per run.

use super::render::{cluster_lines, render_json};
use crate::{
    config::OutputFormat,
    core::domain::{
        error::VsphereResult,
        model::report::{ClusterReport, DatacenterReport},
    },
};
use std::io::Write;

/// Writes the report either as streamed text or as one JSON document.
///
/// In text mode every cluster is printed as soon as it is pushed. In JSON
/// mode clusters are accumulated and the document is written by `finish`.
pub struct ReportWriter<W: Write> {
    format: OutputFormat,
    out: W,
    report: DatacenterReport,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(format: OutputFormat, datacenter: impl Into<String>, out: W) -> Self {
        Self {
            format,
            out,
            report: DatacenterReport::new(datacenter),
        }
    }

    /// Announces the datacenter (text mode only).
    pub fn begin(&mut self) -> VsphereResult<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "Using datacenter: {}", self.report.datacenter)?;
        }
        Ok(())
    }

    /// Notes that the datacenter has no compute clusters.
    pub fn no_clusters(&mut self) -> VsphereResult<()> {
        if self.format == OutputFormat::Text {
            writeln!(self.out, "No clusters found in the selected datacenter.")?;
        }
        Ok(())
    }

    /// Adds one resolved cluster.
    pub fn push(&mut self, cluster: ClusterReport) -> VsphereResult<()> {
        match self.format {
            OutputFormat::Text => {
                for line in cluster_lines(&cluster) {
                    writeln!(self.out, "{}", line)?;
                }
            }
            OutputFormat::Json => self.report.push(cluster),
        }
        Ok(())
    }

    /// Writes the JSON document (JSON mode) and flushes the output.
    pub fn finish(&mut self) -> VsphereResult<()> {
        if self.format == OutputFormat::Json {
            let document = render_json(&self.report)?;
            writeln!(self.out, "{}", document)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Clusters accumulated so far (JSON mode).
    pub fn report(&self) -> &DatacenterReport {
        &self.report
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
