//! Spam types and data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

use super::tokenizer::{extract_address, normalize, split_lines};

/// Classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Unsolicited message
    #[serde(rename = "SPAM")]
    Spam,
    /// Legitimate message
    #[serde(rename = "OK")]
    Ham,
}

impl Label {
    /// Token used in truth and prediction files
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Spam => "SPAM",
            Label::Ham => "OK",
        }
    }

    pub fn is_spam(&self) -> bool {
        matches!(self, Label::Spam)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SPAM" => Ok(Label::Spam),
            "OK" => Ok(Label::Ham),
            other => Err(FilterError::Corpus(format!("Unknown label '{}'", other))),
        }
    }
}

/// A training corpus entry
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledDocument {
    /// Sender taken from the first "From:" line, if any
    pub address: Option<String>,
    /// Normalized tokens in document order
    pub tokens: Vec<String>,
    pub label: Label,
}

impl LabeledDocument {
    pub fn new(address: Option<String>, tokens: Vec<String>, label: Label) -> Self {
        Self {
            address,
            tokens,
            label,
        }
    }

    /// Tokenize raw message text and pull out its sender
    pub fn from_text(text: &str, label: Label) -> Self {
        Self {
            address: extract_address(split_lines(text)),
            tokens: normalize(text),
            label,
        }
    }
}

/// Prior and smoothed word probabilities of one class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStatistics {
    /// Fraction of training documents in this class
    pub prior: f64,
    /// P(token | class) for every vocabulary token
    pub word_probs: HashMap<String, f64>,
}

impl ClassStatistics {
    /// Probability of a token, or `None` if it was never seen in training
    pub fn probability(&self, token: &str) -> Option<f64> {
        self.word_probs.get(token).copied()
    }

    /// Number of tokens covered by the mapping
    pub fn vocabulary_size(&self) -> usize {
        self.word_probs.len()
    }
}

/// Running log-likelihood of both classes for one message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BayesScores {
    pub spam: f64,
    pub ham: f64,
}

impl BayesScores {
    /// Ties go to ham
    pub fn label(&self) -> Label {
        if self.spam > self.ham {
            Label::Spam
        } else {
            Label::Ham
        }
    }
}

/// Summary of a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingStats {
    /// Documents listed as spam in the manifest
    pub spam_documents: usize,
    /// Documents listed as ham in the manifest
    pub ham_documents: usize,
    /// Listed documents that could not be decoded
    pub skipped_documents: usize,
    pub spam_tokens: usize,
    pub ham_tokens: usize,
    pub vocabulary_size: usize,
    /// Distinct senders in the blocklist
    pub spam_addresses: usize,
    pub spam_prior: f64,
    pub ham_prior: f64,
}
