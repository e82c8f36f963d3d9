// Grader configuration
// Loaded once at startup and passed explicitly into every pipeline component

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/quizrun.json";

/// Interpreter used to execute injected artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command: "node".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraderConfig {
    /// Pattern whose first capture group is the function under test
    pub function_name_regex: String,
    /// Base directory submissions are resolved against
    pub input_dir: PathBuf,
    pub questions_dir: PathBuf,
    /// Where injected artifacts are written before execution
    pub scratch_dir: PathBuf,
    pub template_dir: PathBuf,
    pub template_file: String,
    /// Token in the template replaced by the call site
    pub placeholder: String,
    pub replace_all: bool,
    pub artifact_extension: String,
    pub runtime: RuntimeConfig,
    /// No timeout when unset: a hung candidate blocks the run
    pub timeout_ms: Option<u64>,
    /// Suffix artifact names with a UUID so runs sharing a function name don't collide
    pub unique_artifacts: bool,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            function_name_regex: r"function\s+([A-Za-z_$][\w$]*)\s*\(".to_string(),
            input_dir: PathBuf::from("input"),
            questions_dir: PathBuf::from("questions"),
            scratch_dir: PathBuf::from("submited"),
            template_dir: PathBuf::from("template"),
            template_file: "test.js".to_string(),
            placeholder: "__INJECT__".to_string(),
            replace_all: false,
            artifact_extension: "js".to_string(),
            runtime: RuntimeConfig::default(),
            timeout_ms: None,
            unique_artifacts: false,
        }
    }
}

impl GraderConfig {
    /// Load configuration from a JSON file, then apply env overrides
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            bail!("Grader config file not found: {}", config_path.display());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: GraderConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.with_env_overrides().validate()
    }

    /// Same as `load`, but a missing file yields the defaults
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load(config_path)
        } else {
            Self::default().with_env_overrides().validate()
        }
    }

    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(&self.template_file)
    }

    /// Submission paths are relative to `input_dir` unless absolute
    pub fn submission_path(&self, submission: &Path) -> PathBuf {
        self.input_dir.join(submission)
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("QUIZRUN_RUNTIME").ok(),
            std::env::var("QUIZRUN_SCRATCH_DIR").ok(),
        )
    }

    // Empty values are treated as unset
    fn with_overrides(mut self, runtime: Option<String>, scratch_dir: Option<String>) -> Self {
        if let Some(command) = runtime.filter(|c| !c.is_empty()) {
            self.runtime.command = command;
        }
        if let Some(dir) = scratch_dir.filter(|d| !d.is_empty()) {
            self.scratch_dir = PathBuf::from(dir);
        }
        self
    }

    fn validate(self) -> Result<Self> {
        if self.placeholder.is_empty() {
            bail!("placeholder must not be empty");
        }
        if self.runtime.command.is_empty() {
            bail!("runtime.command must not be empty");
        }
        if self.function_name_regex.is_empty() {
            bail!("function_name_regex must not be empty");
        }
        Ok(self)
    }
}
