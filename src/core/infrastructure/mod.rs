pub(crate) mod api_client;
mod vim_inventory;
