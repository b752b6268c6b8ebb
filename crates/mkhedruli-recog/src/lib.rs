//! Template library, nearest-neighbor recognizer and scoring for Mkhedruli OCR.
//!
//! ## Quickstart
//!
//! ```
//! use mkhedruli_core::{Bitmap, BoundingBox};
//! use mkhedruli_recog::{Recognizer, RecognizerParams, TemplateLibrary};
//!
//! let params = RecognizerParams::default();
//!
//! let mut square = Bitmap::zeros(16, 16);
//! square.fill_rect(BoundingBox::new(3, 3, 12, 12), true);
//! let mut bar = Bitmap::zeros(16, 16);
//! bar.fill_rect(BoundingBox::new(6, 1, 9, 14), true);
//!
//! let (sq, br) = (square.to_gray(), bar.to_gray());
//! let library =
//!     TemplateLibrary::build(&['o', 'l'], [('o', sq.view()), ('l', br.view())], &params)
//!         .expect("templates");
//!
//! let recognition = Recognizer::new(&library, params).recognize_bitmap(&bar);
//! assert_eq!(recognition.text(), "l");
//! ```
//!
//! Templates and queries share one featurization path
//! (binarize, normalize, extract) and one [`Scaler`] fit over the templates.

pub mod alphabet;
mod glyph;
pub mod io;
mod library;
pub mod recognizer;
mod scaler;
pub mod score;

pub use alphabet::{alphabet_symbols, GEORGIAN_ALPHABET};
pub use glyph::{featurize_bitmap, featurize_image};
pub use io::{IoError, OcrConfig, RecognitionReport};
pub use library::{LibraryError, TemplateEntry, TemplateLibrary};
pub use recognizer::{
    Hypothesis, Recognition, Recognizer, RecognizerParams, SegmentRecognition, Token,
};
pub use scaler::{Scaler, STD_EPSILON};
pub use score::{edit_distance, score, score_tokens, Score};
