#![allow(dead_code)]

use async_trait::async_trait;
use perfscript::config::AppConfig;
use perfscript::llm::{ChatModel, ChatResponse};
use perfscript::loader::{FsSwaggerSource, SwaggerSource};
use perfscript::service::GenerationService;
use perfscript::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const FENCED_K6: &str = "```javascript\nimport http from 'k6/http';\n\nexport function login() {\n  http.post(`${BASE_URL}/login`);\n}\n```\n";

/// Returns canned text and records every prompt it receives
pub struct MockChatModel {
    reply: Option<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockChatModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (system, prompt) of the last call
    pub fn last_prompt(&self) -> Option<(String, String)> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        Ok(ChatResponse {
            content: self.reply.clone(),
        })
    }
}

/// Filesystem source that counts loads per path
#[derive(Default)]
pub struct CountingSwaggerSource {
    loads: Mutex<Vec<PathBuf>>,
}

impl CountingSwaggerSource {
    pub fn loads(&self) -> Vec<PathBuf> {
        self.loads.lock().unwrap().clone()
    }
}

impl SwaggerSource for CountingSwaggerSource {
    fn load(&self, path: &Path) -> Result<Value> {
        self.loads.lock().unwrap().push(path.to_path_buf());
        FsSwaggerSource.load(path)
    }
}

/// Scratch workspace: `swagger/` holds the fixtures, `out/` receives artifacts
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let swagger = dir.path().join("swagger");
        std::fs::create_dir_all(&swagger).unwrap();
        for fixture in ["petstore.yaml", "petstore.json"] {
            std::fs::copy(
                Path::new("tests/fixtures").join(fixture),
                swagger.join(fixture),
            )
            .unwrap();
        }
        Self { dir }
    }

    pub fn swagger_dir(&self) -> PathBuf {
        self.dir.path().join("swagger")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn project_dir(&self) -> PathBuf {
        self.dir.path().join("projects").join("shop-perf")
    }

    /// Config pointing at this workspace, with extra overrides
    pub fn config(&self, extra: &[(&str, &str)]) -> AppConfig {
        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert(
            "SWAGGER_BASE_PATH".to_string(),
            self.swagger_dir().display().to_string(),
        );
        vars.insert(
            "OUTPUT_DIR".to_string(),
            self.output_dir().display().to_string(),
        );
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }
        AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    pub fn with_project(&self) -> AppConfig {
        let base = self.dir.path().join("projects").display().to_string();
        self.config(&[("PROJECT_BASE_PATH", &base), ("PROJECT_NAME", "shop-perf")])
    }
}

pub fn service(
    config: AppConfig,
    chat: Arc<MockChatModel>,
    swagger: Arc<CountingSwaggerSource>,
) -> GenerationService {
    GenerationService::new(config, chat, swagger)
}
