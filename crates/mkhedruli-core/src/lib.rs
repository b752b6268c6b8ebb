//! Core types for Mkhedruli glyph recognition.
//!
//! This crate holds the pixel-level building blocks shared by every stage:
//! grayscale buffers, binary bitmaps with bounding boxes, the fixed-threshold
//! binarizer and the crop-pad-resample glyph normalizer. It does *not* decode
//! image files; callers wrap their own buffers in [`GrayImageView`].

mod bitmap;
mod image;
mod logger;
mod normalize;

pub use bitmap::{binarize, Bitmap, BoundingBox, DEFAULT_THRESHOLD};
pub use image::{GrayImage, GrayImageView, ImageError};
pub use normalize::{
    normalize, pad_to_square, resize_nearest, NormalizedGlyph, DEFAULT_CANONICAL_SIZE,
};

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, LOG_ENV};

pub use logger::init_with_level;
