use mkhedruli_core::BoundingBox;
use serde::{Deserialize, Serialize};

/// One element of a prediction: a recognized glyph or an inserted word break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    Glyph(char),
    Space,
}

impl Token {
    #[inline]
    pub fn as_char(&self) -> char {
        match self {
            Token::Glyph(c) => *c,
            Token::Space => ' ',
        }
    }

    #[inline]
    pub fn is_space(&self) -> bool {
        matches!(self, Token::Space)
    }
}

/// A template label with its similarity `1 / (1 + distance)` to the query.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub label: char,
    pub similarity: f64,
    /// Euclidean distance in scaled feature space.
    pub distance: f64,
}

/// Ranked hypotheses for one segment, best first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecognition {
    pub bbox: BoundingBox,
    pub hypotheses: Vec<Hypothesis>,
}

impl SegmentRecognition {
    /// Top-ranked hypothesis.
    pub fn best(&self) -> Option<&Hypothesis> {
        self.hypotheses.first()
    }
}

/// Result of recognizing one phrase image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    /// Labels and word breaks in reading order.
    pub tokens: Vec<Token>,
    /// One entry per segment, left to right.
    pub segments: Vec<SegmentRecognition>,
}

impl Recognition {
    /// Prediction rendered as text, word breaks as `' '`.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::as_char).collect()
    }

    /// Predicted glyph labels without word breaks.
    pub fn labels(&self) -> Vec<char> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                Token::Glyph(c) => Some(*c),
                Token::Space => None,
            })
            .collect()
    }

    /// Segment boxes in reading order.
    pub fn boxes(&self) -> Vec<BoundingBox> {
        self.segments.iter().map(|s| s.bbox).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_renders_spaces() {
        let rec = Recognition {
            tokens: vec![Token::Glyph('ა'), Token::Space, Token::Glyph('ბ')],
            segments: Vec::new(),
        };
        assert_eq!(rec.text(), "ა ბ");
        assert_eq!(rec.labels(), vec!['ა', 'ბ']);
    }
}
