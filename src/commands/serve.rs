use super::build_service;
use crate::config::AppConfig;
use crate::error::PerfScriptError;
use crate::{Result, server};
use colored::*;
use std::net::SocketAddr;

pub async fn execute_serve(config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let host = host.unwrap_or_else(|| config.host.clone());
    let port = port.unwrap_or(config.port);

    println!("{}", "Starting web server...".bright_blue());
    println!("  Provider: {}", config.llm.provider);
    println!("  Swagger base: {}", config.swagger_base_path.display());
    println!("  Output: {}", config.output.output_dir.display());
    if let Some(project) = &config.output.project_dir {
        println!("  k6 project: {}", project.display());
    }
    println!("  Listening: {}:{}", host, port);
    println!();

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|_| PerfScriptError::ConfigError(format!("Invalid listen address: {}:{}", host, port)))?;

    let service = build_service(config)?;
    server::start_server(addr, service).await
}
