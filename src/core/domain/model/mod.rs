pub mod fault;
pub mod inventory;
pub mod managed_object;
pub mod report;
pub mod vsphere_connection;
pub mod vsphere_session;
