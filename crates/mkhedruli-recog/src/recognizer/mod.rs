//! Phrase recognition pipeline.
//!
//! Binarize the phrase, cut it into glyph boxes with projection profiles,
//! featurize every box the same way the templates were featurized, and rank
//! the templates by similarity. Word breaks come from horizontal gaps.

mod params;
mod pipeline;
mod result;

pub use params::RecognizerParams;
pub use pipeline::Recognizer;
pub use result::{Hypothesis, Recognition, SegmentRecognition, Token};
