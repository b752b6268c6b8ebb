//! Shared glyph path: binarize -> normalize -> extract.

use mkhedruli_core::{binarize, normalize, Bitmap, GrayImageView};
use mkhedruli_features::{extract_features, FeatureVector};

use crate::RecognizerParams;

/// Features of a bitmap glyph (normalization included).
pub fn featurize_bitmap(bmp: &Bitmap, params: &RecognizerParams) -> FeatureVector {
    let glyph = normalize(bmp, params.canonical_size);
    if glyph.is_blank() {
        log::warn!(
            "blank {}x{} glyph, using zero feature vector",
            bmp.width,
            bmp.height
        );
    }
    extract_features(&glyph, &params.features)
}

/// Features of a grayscale glyph image.
pub fn featurize_image(img: &GrayImageView<'_>, params: &RecognizerParams) -> FeatureVector {
    featurize_bitmap(&binarize(img, params.threshold), params)
}
