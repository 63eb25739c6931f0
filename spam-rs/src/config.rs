//! Configuration for spam-rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FilterError, Result};

/// Main filter configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Naive Bayes parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Laplace smoothing constant
    #[serde(default = "default_laplace")]
    pub laplace: f64,
}

/// On-disk corpus layout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Manifest pairing each training file with its label
    #[serde(default = "default_truth_file")]
    pub truth_file: String,
    /// File the predictions are written to inside the test directory
    #[serde(default = "default_prediction_file")]
    pub prediction_file: String,
    /// Files whose name starts with this character are not messages
    #[serde(default = "default_control_marker")]
    pub control_marker: char,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluationConfig {
    /// How much worse a ham marked as spam is than a missed spam
    #[serde(default = "default_false_positive_weight")]
    pub false_positive_weight: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// One of "pretty", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_laplace() -> f64 {
    1.0
}

fn default_truth_file() -> String {
    "!truth.txt".to_string()
}

fn default_prediction_file() -> String {
    "!prediction.txt".to_string()
}

fn default_control_marker() -> char {
    '!'
}

fn default_false_positive_weight() -> f64 {
    10.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            laplace: default_laplace(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            truth_file: default_truth_file(),
            prediction_file: default_prediction_file(),
            control_marker: default_control_marker(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            false_positive_weight: default_false_positive_weight(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl FilterConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FilterError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| FilterError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.model.laplace.is_finite() || self.model.laplace <= 0.0 {
            return Err(FilterError::Config(format!(
                "laplace must be a positive number, got {}",
                self.model.laplace
            )));
        }

        if !self.evaluation.false_positive_weight.is_finite()
            || self.evaluation.false_positive_weight < 1.0
        {
            return Err(FilterError::Config(format!(
                "false_positive_weight must be at least 1, got {}",
                self.evaluation.false_positive_weight
            )));
        }

        for (name, file) in [
            ("truth_file", &self.corpus.truth_file),
            ("prediction_file", &self.corpus.prediction_file),
        ] {
            if !file.starts_with(self.corpus.control_marker) {
                return Err(FilterError::Config(format!(
                    "{} '{}' must start with the control marker '{}'",
                    name, file, self.corpus.control_marker
                )));
            }
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(FilterError::Config(format!("Unknown log format '{}'", other))),
        }
    }
}
