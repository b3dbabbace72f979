use crate::error::{PerfScriptError, Result};
use std::fmt;
use std::str::FromStr;

/// Supported load-testing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    K6,
    JMeter,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::K6 => "k6",
            Tool::JMeter => "jmeter",
        }
    }

    /// Parse an optional tool field from a request body
    pub fn from_request(tool: Option<&str>) -> Result<Self> {
        match tool {
            Some(name) => name.parse(),
            None => Err(PerfScriptError::UnsupportedTool("<none>".to_string())),
        }
    }
}

impl FromStr for Tool {
    type Err = PerfScriptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "k6" => Ok(Tool::K6),
            "jmeter" => Ok(Tool::JMeter),
            _ => Err(PerfScriptError::UnsupportedTool(s.to_string())),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generation mode: multi-scenario or single load profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Scenario,
    Load,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Scenario => "scenario",
            Mode::Load => "load",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target language of generated k6 scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum K6Language {
    #[default]
    JavaScript,
    TypeScript,
}

impl K6Language {
    pub fn name(&self) -> &'static str {
        match self {
            K6Language::JavaScript => "javascript",
            K6Language::TypeScript => "typescript",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            K6Language::JavaScript => "js",
            K6Language::TypeScript => "ts",
        }
    }
}

impl FromStr for K6Language {
    type Err = PerfScriptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "js" | "javascript" | "nodejs" => Ok(K6Language::JavaScript),
            "ts" | "typescript" => Ok(K6Language::TypeScript),
            _ => Err(PerfScriptError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for K6Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
