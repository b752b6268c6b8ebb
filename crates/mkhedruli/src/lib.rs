//! High-level facade crate for the `mkhedruli-*` workspace.
//!
//! This crate provides:
//! - re-exports of the stage crates (pixels, segmentation, features, recognition)
//! - (feature-gated) file helpers that decode images with the `image` crate,
//!   build a template library from a directory of `<symbol>.bmp` files, run a
//!   full recognition pass from an [`recog::OcrConfig`] and render reference
//!   glyphs from a TrueType font.
//!
//! ## Quickstart
//!
//! ```no_run
//! use mkhedruli::ocr;
//! use mkhedruli::recog::{OcrConfig, Recognizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = OcrConfig::default();
//! let library = ocr::load_template_library(&cfg.reference_dir, &cfg.symbols(), &cfg.params)?;
//!
//! let phrase = ocr::load_gray(&cfg.phrase_path)?;
//! let recognition = Recognizer::new(&library, cfg.params).recognize(&ocr::gray_view(&phrase));
//! println!("{}", recognition.text());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `mkhedruli::core`: grayscale views, bitmaps, binarization, normalization, logging.
//! - `mkhedruli::segment`: projection-profile glyph segmentation.
//! - `mkhedruli::features`: ten-dimensional glyph descriptor.
//! - `mkhedruli::recog`: template library, recognizer, scoring, config and reports.
//! - `mkhedruli::ocr` (feature `image`): file-level helpers and the end-to-end run.
//! - `mkhedruli::render` (feature `image`): reference alphabet rendering.

pub use mkhedruli_core as core;
pub use mkhedruli_features as features;
pub use mkhedruli_recog as recog;
pub use mkhedruli_segment as segment;

pub use mkhedruli_recog::{
    OcrConfig, Recognition, Recognizer, RecognizerParams, Score, TemplateLibrary, Token,
};

#[cfg(feature = "image")]
pub mod ocr;
#[cfg(feature = "image")]
pub mod render;
