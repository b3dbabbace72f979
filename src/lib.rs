pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generators;
pub mod llm;
pub mod loader;
pub mod models;
pub mod output;
pub mod prompts;
pub mod server;
pub mod service;
pub mod telemetry;
pub mod validation;

pub use error::{PerfScriptError, Result};
