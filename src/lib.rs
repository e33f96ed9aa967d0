pub mod app;
pub mod async_task;
pub mod cli;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod executor;
pub mod main_lib;
pub mod model;
pub mod proxy;
pub mod screenshot;
pub mod sort;
pub mod test_config;
pub mod theme;
pub mod ui;
