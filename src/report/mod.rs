//! Rendering of the report model as text or JSON.

pub mod render;
pub mod writer;

pub use render::{cluster_lines, datacenter_choice_lines, datastore_line, render_json};
pub use writer::ReportWriter;
