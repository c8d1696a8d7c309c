pub mod api_client;
pub mod stub_server;
