use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::CorpusConfig;
use crate::error::{FilterError, Result};
use crate::spam::Label;

use super::manifest::{parse_labels, parse_truth, render_predictions};

/// A corpus directory of plain-text messages
pub struct CorpusDir {
    base_path: PathBuf,
    config: CorpusConfig,
}

impl CorpusDir {
    pub fn new<P: Into<PathBuf>>(base_path: P, config: CorpusConfig) -> Self {
        Self {
            base_path: base_path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// Read and parse the truth manifest
    pub async fn read_truth(&self) -> Result<Vec<(String, Label)>> {
        let path = self.base_path.join(&self.config.truth_file);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FilterError::Corpus(format!(
                    "Training manifest {} missing",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let content = String::from_utf8(bytes).map_err(|_| {
            FilterError::Corpus(format!("Training manifest {} is not UTF-8", path.display()))
        })?;

        parse_truth(&content).map_err(|e| with_path(e, &path))
    }

    /// Read a message, or `None` if its bytes are not valid UTF-8
    pub async fn read_message(&self, name: &str) -> Result<Option<String>> {
        let bytes = fs::read(self.base_path.join(name)).await?;
        Ok(String::from_utf8(bytes).ok())
    }

    /// Read a message, replacing undecodable bytes
    pub async fn read_message_lossy(&self, name: &str) -> Result<String> {
        let bytes = fs::read(self.base_path.join(name)).await?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!("{} is not valid UTF-8, decoding lossily", name);
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }

    /// Names of the message files, sorted, control files excluded
    pub async fn message_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.base_path).await?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("Skipping file with non UTF-8 name {:?}", raw);
                    continue;
                }
            };

            if name.starts_with(self.config.control_marker) {
                debug!("Skipping control file {}", name);
                continue;
            }

            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    /// Write the prediction file, replacing any previous one
    pub async fn write_predictions(&self, predictions: &[(String, Label)]) -> Result<PathBuf> {
        let path = self.base_path.join(&self.config.prediction_file);
        let tmp_path = self
            .base_path
            .join(format!("{}.tmp", self.config.prediction_file));

        fs::write(&tmp_path, render_predictions(predictions)).await?;
        fs::rename(&tmp_path, &path).await?;

        info!(
            "Wrote {} predictions to {}",
            predictions.len(),
            path.display()
        );

        Ok(path)
    }

    /// Read back a prediction file
    pub async fn read_predictions(&self) -> Result<Vec<(String, Label)>> {
        let path = self.base_path.join(&self.config.prediction_file);
        let content = fs::read_to_string(&path).await?;
        parse_labels(&content).map_err(|e| with_path(e, &path))
    }
}

fn with_path(err: FilterError, path: &Path) -> FilterError {
    match err {
        FilterError::Corpus(msg) => FilterError::Corpus(format!("{}: {}", path.display(), msg)),
        other => other,
    }
}
