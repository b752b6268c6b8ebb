//! Projection-profile segmentation of phrase bitmaps.
//!
//! ## Quickstart
//!
//! ```
//! use mkhedruli_core::{Bitmap, BoundingBox};
//! use mkhedruli_segment::{segment_by_profiles, SegmentParams};
//!
//! let mut phrase = Bitmap::zeros(40, 20);
//! phrase.fill_rect(BoundingBox::new(2, 4, 9, 15), true);
//! phrase.fill_rect(BoundingBox::new(20, 4, 30, 15), true);
//!
//! let boxes = segment_by_profiles(&phrase, &SegmentParams::default());
//! assert_eq!(boxes.len(), 2);
//! ```
//!
//! Algorithm:
//! 1. Sum foreground pixels per column (vertical profile).
//! 2. Runs of columns above `empty_thresh` become character spans.
//! 3. Within each span, the first/last row above `empty_thresh` bound the glyph.
//!
//! This is a 1-D decomposition, not connected components: glyphs that touch
//! horizontally merge into one span, and a detached mark above a glyph is
//! folded into the same span's box.

mod params;
mod profile;

pub use params::SegmentParams;
pub use profile::{
    column_spans, horizontal_profile, segment_by_profiles, vertical_profile, ColumnSpan,
};
