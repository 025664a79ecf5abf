//! Storage topology: datacenter selection, storage pod discovery and the
//! per-cluster classification of datastores.

pub mod discovery;
pub mod resolver;
pub mod survey;

pub use discovery::{discover_datastore_folders, discover_storage_pods, select_datacenter};
pub use resolver::resolve;
pub use survey::survey;
