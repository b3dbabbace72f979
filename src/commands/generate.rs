//! Generate command implementation
//!
//! Runs the same pipeline as the HTTP API against a request file.

use super::build_service;
use crate::cli::GenerateMode;
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{LoadRequest, ScenarioRequest};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Execute the generate command
pub async fn execute_generate(config: AppConfig, request_path: &Path, mode: GenerateMode) -> Result<()> {
    let body = fs::read_to_string(request_path)?;
    println!(
        "{} Loaded request: {}",
        "✓".green(),
        request_path.display()
    );

    let service = build_service(config)?;

    let script = match mode {
        GenerateMode::Scenario => {
            let request: ScenarioRequest = serde_json::from_str(&body)?;
            println!("  Scenarios: {}", request.scenarios.len());
            service.generate_scenarios(&request).await?
        }
        GenerateMode::Load => {
            let request: LoadRequest = serde_json::from_str(&body)?;
            println!("  Load stages: {}", request.scenarios.len());
            service.generate_load(&request).await?
        }
    };

    println!(
        "{} Script generated: {}",
        "✓".green(),
        script.output_path.display().to_string().bright_white()
    );

    Ok(())
}
