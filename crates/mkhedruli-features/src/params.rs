use serde::{Deserialize, Serialize};

/// Where the aspect-ratio feature is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatioSource {
    /// `height / width` of the foreground box before normalization.
    #[default]
    Source,
    /// `height / width` of the normalized bitmap (always 1 for square output).
    Normalized,
}

/// Feature extraction settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureParams {
    pub aspect_ratio: AspectRatioSource,
}
