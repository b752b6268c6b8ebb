use mkhedruli_core::{DEFAULT_CANONICAL_SIZE, DEFAULT_THRESHOLD};
use mkhedruli_features::FeatureParams;
use mkhedruli_segment::SegmentParams;
use serde::{Deserialize, Serialize};

/// Configuration shared by template building and recognition.
///
/// Templates and queries must be featurized with the same `threshold`,
/// `canonical_size` and `features`, otherwise their vectors are not comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerParams {
    /// Intensities strictly below this are ink.
    pub threshold: u8,
    /// Side of the canonical glyph bitmap.
    pub canonical_size: usize,
    /// Projection-profile segmentation settings.
    pub segment: SegmentParams,
    /// Feature extraction settings.
    pub features: FeatureParams,
    /// A space is inserted when `x0 - previous_x1` exceeds this many pixels.
    pub space_threshold: usize,
}

impl Default for RecognizerParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            canonical_size: DEFAULT_CANONICAL_SIZE,
            segment: SegmentParams::default(),
            features: FeatureParams::default(),
            space_threshold: 20,
        }
    }
}

impl RecognizerParams {
    /// True when glyph vectors built with `self` and `other` are comparable.
    pub fn same_featurization(&self, other: &RecognizerParams) -> bool {
        self.threshold == other.threshold
            && self.canonical_size == other.canonical_size
            && self.features == other.features
    }
}
