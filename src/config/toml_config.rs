use crate::core::runner::{RunnerOptions, MAX_SCRIPT_DEPTH};
use crate::utils::error::{CollectionError, Result};
use crate::utils::validation::{
    collect_violations, validate_non_empty_string, validate_one_of, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Settings read from the optional TOML file. Every section and key may be
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub console: ConsoleConfig,
    pub script: ScriptConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub prompt: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "$ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// When absent, the user is asked the first time recursion happens.
    pub max_recursion_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub pretty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Settings for a session: the given file, or the defaults, checked with
    /// [`Validate`] before anything uses them.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CollectionError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CollectionError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            prompt: self.console.prompt.clone(),
            max_recursion_depth: self.script.max_recursion_depth,
        }
    }
}

impl Validate for AppConfig {
    fn violations(&self) -> Vec<String> {
        let mut checks = vec![
            validate_non_empty_string("console.prompt", &self.console.prompt),
            validate_one_of("log.level", &self.log.level, &LOG_LEVELS),
        ];
        if let Some(depth) = self.script.max_recursion_depth {
            checks.push(validate_range(
                "script.max_recursion_depth",
                depth,
                0,
                MAX_SCRIPT_DEPTH,
            ));
        }
        collect_violations(checks)
    }

    fn validate(&self) -> Result<()> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(CollectionError::ConfigValidationError {
                field: "config".to_string(),
                message: violations.join("; "),
            })
        }
    }
}
