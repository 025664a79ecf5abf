pub mod error;
pub mod inventory_client;
pub mod model;
pub mod value_object;
