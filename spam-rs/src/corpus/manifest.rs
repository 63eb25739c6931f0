//! Label manifest format
//!
//! One `<filename> <label>` pair per line, whitespace separated, with
//! labels `SPAM` or `OK`. Truth and prediction files share the format.

use crate::error::{FilterError, Result};
use crate::spam::Label;

/// Parse a label listing. Blank lines are ignored.
pub fn parse_labels(content: &str) -> Result<Vec<(String, Label)>> {
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => continue,
            [name, label] => {
                let label = label.parse::<Label>().map_err(|_| {
                    FilterError::Corpus(format!("line {}: unknown label '{}'", idx + 1, label))
                })?;
                entries.push((name.to_string(), label));
            }
            _ => {
                return Err(FilterError::Corpus(format!(
                    "line {}: expected '<filename> <label>', got '{}'",
                    idx + 1,
                    line.trim()
                )));
            }
        }
    }

    Ok(entries)
}

/// Parse a training manifest, which must list at least one document
pub fn parse_truth(content: &str) -> Result<Vec<(String, Label)>> {
    let entries = parse_labels(content)?;
    if entries.is_empty() {
        return Err(FilterError::Corpus("Training manifest is empty".to_string()));
    }
    Ok(entries)
}

/// Render predictions, one line per file in the given order
pub fn render_predictions(predictions: &[(String, Label)]) -> String {
    let mut out = String::new();
    for (name, label) in predictions {
        out.push_str(name);
        out.push(' ');
        out.push_str(label.as_str());
        out.push('\n');
    }
    out
}
