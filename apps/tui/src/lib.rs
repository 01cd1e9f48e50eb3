// Export our modules for use in the binary and tests
pub mod app;
pub mod cli;
pub mod config;
pub mod event;
pub mod logging;
pub mod pages;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use config::AppConfig;
