use serde::{Deserialize, Serialize};

/// Parameters for projection-profile segmentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentParams {
    /// A column/row counts as inked only when its foreground sum is strictly
    /// greater than this value.
    pub empty_thresh: u32,
}

impl Default for SegmentParams {
    fn default() -> Self {
        Self { empty_thresh: 1 }
    }
}
