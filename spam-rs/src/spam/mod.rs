//! Spam classification module
//!
//! Naive Bayes scoring over word frequencies, plus a blocklist of sender
//! addresses learned from spam training documents.

pub mod filter;
pub mod model;
pub mod tokenizer;
pub mod types;

pub use filter::{apply_address_override, SpamFilter};
pub use model::{NaiveBayes, TrainedModel, DEFAULT_LAPLACE};
pub use tokenizer::{extract_address, normalize, split_lines};
pub use types::*;
