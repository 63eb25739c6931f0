//! Directory-level spam filter
//!
//! Trains from a labeled corpus directory and writes predictions for a
//! test directory. The sender blocklist is applied on top of the Bayes
//! decision by [`apply_address_override`].

use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{CorpusConfig, FilterConfig};
use crate::corpus::CorpusDir;
use crate::error::{FilterError, Result};

use super::model::{NaiveBayes, TrainedModel};
use super::tokenizer::{extract_address, split_lines};
use super::types::*;

/// Force SPAM when the sender is on the learned blocklist
pub fn apply_address_override(label: Label, address: Option<&str>, model: &TrainedModel) -> Label {
    match address {
        Some(address) if model.is_spam_address(address) => Label::Spam,
        _ => label,
    }
}

/// Spam filter driving training and prediction over corpus directories
pub struct SpamFilter {
    trainer: NaiveBayes,
    corpus: CorpusConfig,
    model: Option<TrainedModel>,
}

impl SpamFilter {
    /// Create an untrained filter
    pub fn new(config: &FilterConfig) -> Result<Self> {
        Ok(Self {
            trainer: NaiveBayes::new(config.model.laplace)?,
            corpus: config.corpus.clone(),
            model: None,
        })
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Get the trained model
    pub fn model(&self) -> Result<&TrainedModel> {
        self.model.as_ref().ok_or(FilterError::NotTrained)
    }

    /// Train from a corpus directory with a truth manifest.
    ///
    /// Documents that are not valid UTF-8 are skipped. The previous model,
    /// if any, is kept when training fails.
    pub async fn train<P: AsRef<Path>>(&mut self, dir: P) -> Result<TrainingStats> {
        let corpus = CorpusDir::new(dir.as_ref(), self.corpus.clone());
        let truth = corpus.read_truth().await?;
        info!(
            "Loading {} training documents from {}",
            truth.len(),
            corpus.path().display()
        );

        let mut documents = Vec::with_capacity(truth.len());
        let mut skipped = 0;
        for (name, label) in truth {
            match corpus.read_message(&name).await? {
                Some(text) => documents.push(LabeledDocument::from_text(&text, label)),
                None => {
                    warn!("Skipping {}: not valid UTF-8", name);
                    skipped += 1;
                }
            }
        }

        let mut model = self.trainer.train(&documents)?;
        model.set_skipped_documents(skipped);
        let stats = self.model.insert(model).stats().clone();

        info!(
            "Training complete: {} spam, {} ham, {} skipped, {} distinct tokens",
            stats.spam_documents, stats.ham_documents, stats.skipped_documents, stats.vocabulary_size
        );

        Ok(stats)
    }

    /// Train from already tokenized documents
    pub fn train_documents(&mut self, documents: &[LabeledDocument]) -> Result<&TrainedModel> {
        let model = self.trainer.train(documents)?;
        Ok(&*self.model.insert(model))
    }

    /// Label a raw message, applying the sender blocklist
    pub fn classify(&self, text: &str) -> Result<Label> {
        let model = self.model()?;
        let label = model.predict(text);
        let address = extract_address(split_lines(text));
        let label = apply_address_override(label, address.as_deref(), model);
        debug!("Classified message from {:?} as {}", address, label);
        Ok(label)
    }

    /// Membership query against the sender blocklist
    pub fn is_spam_address(&self, address: &str) -> Result<bool> {
        Ok(self.model()?.is_spam_address(address))
    }

    /// Classify every message in a directory and write the prediction file
    pub async fn test<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<(String, Label)>> {
        self.model()?;

        let corpus = CorpusDir::new(dir.as_ref(), self.corpus.clone());
        let names = corpus.message_names().await?;
        info!(
            "Classifying {} messages in {}",
            names.len(),
            corpus.path().display()
        );

        let mut predictions = Vec::with_capacity(names.len());
        for name in names {
            let text = corpus.read_message_lossy(&name).await?;
            let label = self.classify(&text)?;
            predictions.push((name, label));
        }

        corpus.write_predictions(&predictions).await?;
        Ok(predictions)
    }
}

impl Default for SpamFilter {
    fn default() -> Self {
        Self {
            trainer: NaiveBayes::default(),
            corpus: CorpusConfig::default(),
            model: None,
        }
    }
}
