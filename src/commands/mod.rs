pub mod clean;
pub mod generate;
pub mod serve;

pub use clean::execute_clean;
pub use generate::execute_generate;
pub use serve::execute_serve;

use crate::config::AppConfig;
use crate::error::Result;
use crate::llm::create_chat_model;
use crate::loader::FsSwaggerSource;
use crate::service::GenerationService;
use std::sync::Arc;

/// Service wired to the configured model and the local filesystem
pub(crate) fn build_service(config: AppConfig) -> Result<GenerationService> {
    let chat = create_chat_model(&config.llm)?;
    Ok(GenerationService::new(config, chat, Arc::new(FsSwaggerSource)))
}
