//! Character-level accuracy of a prediction against ground truth.
//!
//! Spaces are ignored on both sides. Errors are positional mismatches over the
//! shared prefix plus the length difference, so a prediction with a missing
//! or extra glyph is penalized for it even when the prefix matches.

use serde::{Deserialize, Serialize};

use crate::recognizer::Token;

/// Comparison summary of one prediction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Positional mismatches plus `|predicted_len - truth_len|`.
    pub errors: usize,
    /// `100 * (1 - errors / max(predicted_len, truth_len))`.
    pub accuracy: f64,
    pub predicted_len: usize,
    pub truth_len: usize,
    /// Levenshtein distance over the same space-stripped sequences.
    pub edit_distance: usize,
}

impl Score {
    /// Fraction of erroneous positions, `0.0` when both sides are empty.
    pub fn error_rate(&self) -> f64 {
        let total = self.predicted_len.max(self.truth_len);
        if total == 0 {
            0.0
        } else {
            self.errors as f64 / total as f64
        }
    }
}

/// Score predicted text against `truth`.
pub fn score(predicted: &str, truth: &str) -> Score {
    let pred = strip_spaces(predicted.chars());
    let truth = strip_spaces(truth.chars());
    score_symbols(&pred, &truth)
}

/// Score a token sequence against `truth`.
pub fn score_tokens(tokens: &[Token], truth: &str) -> Score {
    let pred = strip_spaces(tokens.iter().map(Token::as_char));
    let truth = strip_spaces(truth.chars());
    score_symbols(&pred, &truth)
}

/// Levenshtein distance between two symbol sequences.
pub fn edit_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (diag + cost).min(above + 1).min(row[j] + 1);
            diag = above;
        }
    }
    row[b.len()]
}

fn strip_spaces(chars: impl Iterator<Item = char>) -> Vec<char> {
    chars.filter(|c| !c.is_whitespace()).collect()
}

fn score_symbols(pred: &[char], truth: &[char]) -> Score {
    let mismatches = pred.iter().zip(truth).filter(|(p, t)| p != t).count();
    let errors = mismatches + pred.len().abs_diff(truth.len());

    let mut s = Score {
        errors,
        accuracy: 100.0,
        predicted_len: pred.len(),
        truth_len: truth.len(),
        edit_distance: edit_distance(pred, truth),
    };
    s.accuracy = 100.0 * (1.0 - s.error_rate());
    log::debug!(
        "score: {} errors over {} symbols, accuracy {:.2}%",
        s.errors,
        s.predicted_len.max(s.truth_len),
        s.accuracy
    );
    s
}
