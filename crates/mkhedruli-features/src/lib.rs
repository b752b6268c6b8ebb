//! Fixed-length shape descriptors for normalized glyphs.
//!
//! Each glyph maps to a 10-element [`FeatureVector`]:
//! pixel mass, centroid, second central moments, density, aspect ratio and
//! the first two Hu invariants of the largest outer contour. Contours are
//! traced with `imageproc`; contour moments are integrated over the traced
//! polygon so the invariants match the classic contour-moment definition.

mod contour;
mod extract;
mod moments;
mod params;

pub use contour::{bitmap_to_mask, external_contours, largest_external_contour};
pub use extract::{extract_features, FeatureVector, FEATURE_LEN, FEATURE_NAMES};
pub use moments::{hu_invariants, CentralMoments, PolygonMoments};
pub use params::{AspectRatioSource, FeatureParams};
