pub mod cli;
pub mod configuration;
pub mod connectors;
pub mod console;
pub mod forms;
pub mod models;
pub mod page;
pub mod telemetry;
