//! spam-rs: Naive Bayes spam filter
//!
//! Labels email messages as SPAM or OK using word frequencies learned from
//! a labeled corpus, with a blocklist of sender addresses seen in spam.
//!
//! # Features
//!
//! - **Tokenizer**: lowercase alphanumeric tokens, sender extraction from "From:" lines
//! - **Model**: Laplace-smoothed Naive Bayes scored by summed log-likelihood
//! - **Blocklist**: senders of spam training messages are always classified as spam
//! - **Corpus I/O**: truth manifests, prediction files, quality evaluation
//!
//! # Example
//!
//! ```no_run
//! use spam_rs::{FilterConfig, SpamFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FilterConfig::default();
//!     let mut filter = SpamFilter::new(&config)?;
//!
//!     filter.train("corpus/train").await?;
//!     filter.test("corpus/test").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`spam`]: Tokenizer, Naive Bayes model and filter
//! - [`corpus`]: Corpus directories and manifest format
//! - [`evaluation`]: Confusion matrix and quality score

pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod spam;

// Re-export commonly used types
pub use config::FilterConfig;
pub use error::{FilterError, Result};
pub use spam::{Label, NaiveBayes, SpamFilter, TrainedModel};
