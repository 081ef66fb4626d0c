//! Terminal front end: wires the core state machine to the service client.
mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
