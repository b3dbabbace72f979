use clap::Parser;
use perfscript::{
    Result,
    cli::{Cli, Commands},
    commands,
    config::AppConfig,
    telemetry::init_telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let _guard = init_telemetry()?;

    match cli.command {
        Commands::Serve { host, port } => {
            commands::execute_serve(AppConfig::from_env()?, host, port).await?;
        }
        Commands::Generate { request, mode } => {
            commands::execute_generate(AppConfig::from_env()?, &request, mode).await?;
        }
        Commands::Clean { dir, extensions } => {
            commands::execute_clean(&dir, &extensions)?;
        }
    }

    Ok(())
}
