//! Prediction quality against a truth manifest

use serde::Serialize;
use std::collections::HashMap;

use crate::spam::Label;

/// Confusion matrix with SPAM as the positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Confusion {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl Confusion {
    /// Compare predictions with the truth.
    ///
    /// Truth entries without a prediction are not counted.
    pub fn compare(truth: &[(String, Label)], predictions: &[(String, Label)]) -> Self {
        let predicted: HashMap<&str, Label> = predictions
            .iter()
            .map(|(name, label)| (name.as_str(), *label))
            .collect();

        let mut confusion = Self::default();
        for (name, actual) in truth {
            if let Some(&prediction) = predicted.get(name.as_str()) {
                confusion.record(*actual, prediction);
            }
        }
        confusion
    }

    pub fn record(&mut self, actual: Label, predicted: Label) {
        match (actual, predicted) {
            (Label::Spam, Label::Spam) => self.true_positives += 1,
            (Label::Ham, Label::Spam) => self.false_positives += 1,
            (Label::Ham, Label::Ham) => self.true_negatives += 1,
            (Label::Spam, Label::Ham) => self.false_negatives += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        (self.true_positives + self.true_negatives) as f64 / self.total() as f64
    }

    /// Accuracy where each false positive weighs `fp_weight` errors
    pub fn quality(&self, fp_weight: f64) -> f64 {
        let correct = (self.true_positives + self.true_negatives) as f64;
        let denominator = correct
            + fp_weight * self.false_positives as f64
            + self.false_negatives as f64;

        if denominator == 0.0 {
            0.0
        } else {
            correct / denominator
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(items: &[(&str, Label)]) -> Vec<(String, Label)> {
        items.iter().map(|(n, l)| (n.to_string(), *l)).collect()
    }

    #[test]
    fn test_compare() {
        let truth = entries(&[
            ("a", Label::Spam),
            ("b", Label::Spam),
            ("c", Label::Ham),
            ("d", Label::Ham),
            ("e", Label::Ham),
        ]);
        let predictions = entries(&[
            ("a", Label::Spam),
            ("b", Label::Ham),
            ("c", Label::Spam),
            ("d", Label::Ham),
        ]);

        let confusion = Confusion::compare(&truth, &predictions);
        assert_eq!(
            confusion,
            Confusion {
                true_positives: 1,
                false_positives: 1,
                true_negatives: 1,
                false_negatives: 1,
            }
        );
        assert_eq!(confusion.total(), 4);
        assert!((confusion.accuracy() - 0.5).abs() < 1e-12);
        // 2 / (2 + 10 + 1)
        assert!((confusion.quality(10.0) - 2.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_predictions() {
        let truth = entries(&[("a", Label::Spam), ("b", Label::Ham)]);
        let confusion = Confusion::compare(&truth, &truth);
        assert_eq!(confusion.accuracy(), 1.0);
        assert_eq!(confusion.quality(10.0), 1.0);
    }

    #[test]
    fn test_empty_comparison() {
        let confusion = Confusion::compare(&[], &[]);
        assert_eq!(confusion.total(), 0);
        assert_eq!(confusion.accuracy(), 0.0);
        assert_eq!(confusion.quality(10.0), 0.0);
    }
}
