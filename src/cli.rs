use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "perfscript")]
#[command(version)]
#[command(about = "Generate k6 and JMeter load-test scripts from Swagger documents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Listen address (defaults to HOST, then 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port number (defaults to PORT, then 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a script from a request file, without the HTTP server
    Generate {
        /// JSON request body (same shape as the HTTP API)
        #[arg(short, long)]
        request: PathBuf,

        /// Generation mode
        #[arg(short, long, default_value = "scenario")]
        mode: GenerateMode,
    },

    /// Strip Markdown code fences from generated files
    Clean {
        /// Directory to clean (recursively)
        dir: PathBuf,

        /// File extensions to clean (default: .js .ts .java .json)
        #[arg(short, long = "ext", num_args = 1..)]
        extensions: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GenerateMode {
    /// Multi-scenario request (`{config, scenarios}`)
    Scenario,
    /// Load request (`{commonFields, scenarios}`)
    Load,
}
