pub mod api;
pub mod config;
pub mod flows;
pub mod gateway;
pub mod ipc;
pub mod listview;
pub mod session;
pub mod status;
