//! Corpus directories on disk
//!
//! A corpus is a flat directory of plain-text messages. Files whose name
//! starts with the control marker (`!` by default) hold metadata: the
//! truth manifest of a training corpus and the predictions written for a
//! test corpus.

pub mod directory;
pub mod manifest;

pub use directory::CorpusDir;
pub use manifest::{parse_labels, parse_truth, render_predictions};
