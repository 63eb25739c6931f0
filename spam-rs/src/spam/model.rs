//! Naive Bayes training and scoring
//!
//! [`NaiveBayes`] is the untrained model: it only carries the smoothing
//! constant. Training consumes a labeled corpus and yields a
//! [`TrainedModel`], which is immutable and can be queried any number of
//! times. Retraining builds a fresh [`TrainedModel`]; nothing is updated
//! in place.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::error::{FilterError, Result};

use super::tokenizer::normalize;
use super::types::*;

/// Default Laplace smoothing constant
pub const DEFAULT_LAPLACE: f64 = 1.0;

/// Untrained Naive Bayes classifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaiveBayes {
    laplace: f64,
}

impl NaiveBayes {
    /// Create a classifier with the given Laplace constant.
    ///
    /// The constant must be finite and strictly positive.
    pub fn new(laplace: f64) -> Result<Self> {
        if !laplace.is_finite() || laplace <= 0.0 {
            return Err(FilterError::Config(format!(
                "laplace must be a positive number, got {}",
                laplace
            )));
        }
        Ok(Self { laplace })
    }

    pub fn laplace(&self) -> f64 {
        self.laplace
    }

    /// Train on a labeled corpus.
    ///
    /// Fails with [`FilterError::Corpus`] when the corpus is empty.
    pub fn train(&self, documents: &[LabeledDocument]) -> Result<TrainedModel> {
        if documents.is_empty() {
            return Err(FilterError::Corpus(
                "No labeled documents to train on".to_string(),
            ));
        }

        let mut spam = TokenCounts::default();
        let mut ham = TokenCounts::default();
        let mut spam_addresses = HashSet::new();

        for doc in documents {
            match doc.label {
                Label::Spam => {
                    spam.add(&doc.tokens);
                    if let Some(address) = &doc.address {
                        spam_addresses.insert(address.clone());
                    }
                }
                Label::Ham => ham.add(&doc.tokens),
            }
        }

        let vocabulary: HashSet<&str> = spam
            .frequencies
            .keys()
            .chain(ham.frequencies.keys())
            .copied()
            .collect();

        let total = documents.len() as f64;
        let spam_stats = ClassStatistics {
            prior: spam.documents as f64 / total,
            word_probs: spam.smoothed(&vocabulary, self.laplace),
        };
        let ham_stats = ClassStatistics {
            prior: ham.documents as f64 / total,
            word_probs: ham.smoothed(&vocabulary, self.laplace),
        };

        let stats = TrainingStats {
            spam_documents: spam.documents,
            ham_documents: ham.documents,
            skipped_documents: 0,
            spam_tokens: spam.total,
            ham_tokens: ham.total,
            vocabulary_size: vocabulary.len(),
            spam_addresses: spam_addresses.len(),
            spam_prior: spam_stats.prior,
            ham_prior: ham_stats.prior,
        };

        debug!(
            "Trained on {} documents, vocabulary of {} tokens",
            documents.len(),
            vocabulary.len()
        );

        Ok(TrainedModel {
            laplace: self.laplace,
            spam: spam_stats,
            ham: ham_stats,
            spam_addresses,
            stats,
        })
    }
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self {
            laplace: DEFAULT_LAPLACE,
        }
    }
}

/// Token frequencies of one class during training
#[derive(Default)]
struct TokenCounts<'a> {
    documents: usize,
    total: usize,
    frequencies: HashMap<&'a str, usize>,
}

impl<'a> TokenCounts<'a> {
    fn add(&mut self, tokens: &'a [String]) {
        self.documents += 1;
        self.total += tokens.len();
        for token in tokens {
            *self.frequencies.entry(token.as_str()).or_insert(0) += 1;
        }
    }

    /// (freq + a) / (total + a * |V|) for every vocabulary token
    fn smoothed(&self, vocabulary: &HashSet<&str>, laplace: f64) -> HashMap<String, f64> {
        let denominator = self.total as f64 + laplace * vocabulary.len() as f64;

        vocabulary
            .iter()
            .map(|&word| {
                let freq = self.frequencies.get(word).copied().unwrap_or(0) as f64;
                (word.to_string(), (freq + laplace) / denominator)
            })
            .collect()
    }
}

/// Trained, read-only Naive Bayes model
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    laplace: f64,
    spam: ClassStatistics,
    ham: ClassStatistics,
    spam_addresses: HashSet<String>,
    stats: TrainingStats,
}

impl TrainedModel {
    /// Score raw message text
    pub fn score(&self, text: &str) -> BayesScores {
        self.score_tokens(&normalize(text))
    }

    /// Sum log prior and per-token log likelihoods for both classes
    pub fn score_tokens(&self, tokens: &[String]) -> BayesScores {
        let mut scores = BayesScores {
            spam: log_probability(self.spam.prior),
            ham: log_probability(self.ham.prior),
        };

        for token in tokens {
            scores.spam += log_probability(self.token_probability(&self.spam, token));
            scores.ham += log_probability(self.token_probability(&self.ham, token));
        }

        scores
    }

    /// Bayes decision for a message, without the sender override
    pub fn predict(&self, text: &str) -> Label {
        self.score(text).label()
    }

    /// Whether a sender was seen on a spam training document
    pub fn is_spam_address(&self, address: &str) -> bool {
        self.spam_addresses.contains(address)
    }

    pub fn spam(&self) -> &ClassStatistics {
        &self.spam
    }

    pub fn ham(&self) -> &ClassStatistics {
        &self.ham
    }

    pub fn laplace(&self) -> f64 {
        self.laplace
    }

    pub fn spam_addresses(&self) -> impl Iterator<Item = &str> {
        self.spam_addresses.iter().map(String::as_str)
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Record documents the caller dropped before training
    pub(crate) fn set_skipped_documents(&mut self, skipped: usize) {
        self.stats.skipped_documents = skipped;
    }

    // Tokens never seen in training fall back to a / (|class vocabulary| + 1),
    // not the training-time denominator.
    fn token_probability(&self, class: &ClassStatistics, token: &str) -> f64 {
        class
            .probability(token)
            .unwrap_or_else(|| self.laplace / (class.vocabulary_size() as f64 + 1.0))
    }
}

/// Natural log, with ln(0) = -inf
fn log_probability(x: f64) -> f64 {
    if x > 0.0 {
        x.ln()
    } else {
        f64::NEG_INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn sample_corpus() -> Vec<LabeledDocument> {
        vec![
            LabeledDocument::new(
                Some("promo@spam.biz".to_string()),
                tokens(&["free", "money"]),
                Label::Spam,
            ),
            LabeledDocument::new(None, tokens(&["free", "money"]), Label::Spam),
            LabeledDocument::new(
                Some("a@b.com".to_string()),
                tokens(&["hello", "friend"]),
                Label::Ham,
            ),
        ]
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let result = NaiveBayes::default().train(&[]);
        assert!(matches!(result, Err(FilterError::Corpus(_))));
    }

    #[test]
    fn test_priors() {
        let model = NaiveBayes::default().train(&sample_corpus()).unwrap();
        assert!((model.spam().prior - 2.0 / 3.0).abs() < EPSILON);
        assert!((model.ham().prior - 1.0 / 3.0).abs() < EPSILON);
        assert!((model.spam().prior + model.ham().prior - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_laplace_probabilities() {
        let model = NaiveBayes::default().train(&sample_corpus()).unwrap();

        // spam: 4 tokens, vocabulary of 4 -> denominator 8
        assert!((model.spam().probability("free").unwrap() - 3.0 / 8.0).abs() < EPSILON);
        assert!((model.spam().probability("hello").unwrap() - 1.0 / 8.0).abs() < EPSILON);

        // ham: 2 tokens, vocabulary of 4 -> denominator 6
        assert!((model.ham().probability("hello").unwrap() - 2.0 / 6.0).abs() < EPSILON);
        assert!((model.ham().probability("money").unwrap() - 1.0 / 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_probabilities_cover_vocabulary_and_are_positive() {
        let model = NaiveBayes::default().train(&sample_corpus()).unwrap();
        assert_eq!(model.spam().vocabulary_size(), 4);
        assert_eq!(model.ham().vocabulary_size(), 4);

        for class in [model.spam(), model.ham()] {
            for p in class.word_probs.values() {
                assert!(*p > 0.0 && *p <= 1.0);
            }
        }
    }

    #[test]
    fn test_custom_laplace() {
        let model = NaiveBayes::new(0.5).unwrap().train(&sample_corpus()).unwrap();
        // (2 + 0.5) / (4 + 0.5 * 4)
        assert!((model.spam().probability("free").unwrap() - 2.5 / 6.0).abs() < EPSILON);
        assert_eq!(model.laplace(), 0.5);
    }

    #[test]
    fn test_rejects_invalid_laplace() {
        for laplace in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(NaiveBayes::new(laplace), Err(FilterError::Config(_))));
        }
        assert_eq!(NaiveBayes::new(2.0).unwrap().laplace(), 2.0);
        assert_eq!(NaiveBayes::default().laplace(), DEFAULT_LAPLACE);
    }

    #[test]
    fn test_predict_scenario() {
        let model = NaiveBayes::default().train(&sample_corpus()).unwrap();
        assert_eq!(model.predict("free money"), Label::Spam);
        assert_eq!(model.predict("hello friend"), Label::Ham);
        // Empty message falls back to the larger prior
        assert_eq!(model.predict(""), Label::Spam);
        assert_eq!(model.predict("?!..."), Label::Spam);
    }

    #[test]
    fn test_unseen_tokens_use_fallback() {
        let model = NaiveBayes::default().train(&sample_corpus()).unwrap();
        let scores = model.score("zebra quantum");

        // a / (|vocabulary| + 1) = 1/5 for both classes
        let expected_spam = (2.0f64 / 3.0).ln() + 2.0 * (1.0f64 / 5.0).ln();
        let expected_ham = (1.0f64 / 3.0).ln() + 2.0 * (1.0f64 / 5.0).ln();
        assert!((scores.spam - expected_spam).abs() < EPSILON);
        assert!((scores.ham - expected_ham).abs() < EPSILON);
        assert_eq!(scores.label(), Label::Spam);
    }

    #[test]
    fn test_zero_prior_class_never_predicted() {
        let corpus = vec![LabeledDocument::new(None, tokens(&["hello"]), Label::Ham)];
        let model = NaiveBayes::default().train(&corpus).unwrap();

        assert_eq!(model.spam().prior, 0.0);
        assert_eq!(model.score("anything").spam, f64::NEG_INFINITY);
        assert_eq!(model.predict("free money"), Label::Ham);
    }

    #[test]
    fn test_only_spam_class() {
        let corpus = vec![LabeledDocument::new(None, tokens(&["buy"]), Label::Spam)];
        let model = NaiveBayes::default().train(&corpus).unwrap();
        assert_eq!(model.predict("hello"), Label::Spam);
        assert_eq!(model.predict(""), Label::Spam);
    }

    #[test]
    fn test_spam_addresses_collected_from_spam_only() {
        let model = NaiveBayes::default().train(&sample_corpus()).unwrap();
        assert!(model.is_spam_address("promo@spam.biz"));
        assert!(!model.is_spam_address("a@b.com"));
        assert_eq!(model.spam_addresses().count(), 1);
    }

    #[test]
    fn test_duplicate_addresses_deduplicated() {
        let mut corpus = sample_corpus();
        corpus.push(LabeledDocument::new(
            Some("promo@spam.biz".to_string()),
            tokens(&["win"]),
            Label::Spam,
        ));
        let model = NaiveBayes::default().train(&corpus).unwrap();
        assert_eq!(model.stats().spam_addresses, 1);
        assert!(model.is_spam_address("promo@spam.biz"));
    }

    #[test]
    fn test_training_is_deterministic() {
        let trainer = NaiveBayes::default();
        let first = trainer.train(&sample_corpus()).unwrap();
        let second = trainer.train(&sample_corpus()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let model = NaiveBayes::default().train(&sample_corpus()).unwrap();
        let first = model.predict("free hello money");
        for _ in 0..10 {
            assert_eq!(model.predict("free hello money"), first);
        }
    }

    #[test]
    fn test_stats() {
        let model = NaiveBayes::default().train(&sample_corpus()).unwrap();
        let stats = model.stats();
        assert_eq!(stats.spam_documents, 2);
        assert_eq!(stats.ham_documents, 1);
        assert_eq!(stats.spam_tokens, 4);
        assert_eq!(stats.ham_tokens, 2);
        assert_eq!(stats.vocabulary_size, 4);
        assert_eq!(stats.skipped_documents, 0);
    }

    #[test]
    fn test_log_probability() {
        assert_eq!(log_probability(0.0), f64::NEG_INFINITY);
        assert_eq!(log_probability(1.0), 0.0);
        assert!((log_probability(std::f64::consts::E) - 1.0).abs() < EPSILON);
    }
}
