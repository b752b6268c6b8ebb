use mkhedruli_core::{binarize, Bitmap, BoundingBox, GrayImageView};
use mkhedruli_features::FeatureVector;
use mkhedruli_segment::segment_by_profiles;

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{Hypothesis, Recognition, RecognizerParams, SegmentRecognition, Token};
use crate::glyph::featurize_bitmap;
use crate::library::TemplateLibrary;

/// Nearest-template recognizer over a shared, read-only library.
#[derive(Clone, Debug)]
pub struct Recognizer<'l> {
    library: &'l TemplateLibrary,
    params: RecognizerParams,
}

impl<'l> Recognizer<'l> {
    /// Create a recognizer.
    ///
    /// Query glyphs are featurized with `params`; a mismatch with the
    /// library's featurization settings is logged but not rejected.
    pub fn new(library: &'l TemplateLibrary, params: RecognizerParams) -> Self {
        if !params.same_featurization(library.params()) {
            log::warn!(
                "recognizer featurization {:?} differs from template library {:?}",
                params,
                library.params()
            );
        }
        Self { library, params }
    }

    /// Recognizer using the library's own parameters.
    pub fn with_library_params(library: &'l TemplateLibrary) -> Self {
        Self {
            library,
            params: *library.params(),
        }
    }

    #[inline]
    pub fn library(&self) -> &TemplateLibrary {
        self.library
    }

    #[inline]
    pub fn params(&self) -> &RecognizerParams {
        &self.params
    }

    /// Recognize a grayscale phrase image.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn recognize(&self, image: &GrayImageView<'_>) -> Recognition {
        let bmp = binarize(image, self.params.threshold);
        self.recognize_bitmap(&bmp)
    }

    /// Recognize an already binarized phrase.
    pub fn recognize_bitmap(&self, bmp: &Bitmap) -> Recognition {
        let mut boxes = segment_by_profiles(bmp, &self.params.segment);
        boxes.sort_by_key(|b| b.x0);
        if boxes.is_empty() {
            log::info!("no glyph segments found, empty prediction");
            return Recognition::default();
        }

        let mut tokens = Vec::with_capacity(boxes.len() * 2);
        let mut segments = Vec::with_capacity(boxes.len());
        let mut prev: Option<BoundingBox> = None;

        for bbox in boxes {
            if let Some(p) = prev {
                if is_word_break(p, bbox, self.params.space_threshold) {
                    tokens.push(Token::Space);
                }
            }

            let hypotheses = self.classify(&featurize_bitmap(&bmp.crop(bbox), &self.params));
            match hypotheses.first() {
                Some(best) => {
                    log::debug!(
                        "segment x={}..{} -> '{}' (similarity {:.4})",
                        bbox.x0,
                        bbox.x1,
                        best.label,
                        best.similarity
                    );
                    tokens.push(Token::Glyph(best.label));
                }
                None => log::warn!("empty template library, segment x={} skipped", bbox.x0),
            }

            segments.push(SegmentRecognition { bbox, hypotheses });
            prev = Some(bbox);
        }

        let rec = Recognition { tokens, segments };
        log::info!(
            "recognized {} segments: \"{}\"",
            rec.segments.len(),
            rec.text()
        );
        rec
    }

    /// Rank all templates for one raw (unscaled) glyph vector.
    pub fn classify(&self, features: &FeatureVector) -> Vec<Hypothesis> {
        self.library.rank(features)
    }
}

/// Gap rule between consecutive segments sorted by `x0`.
fn is_word_break(prev: BoundingBox, next: BoundingBox, space_threshold: usize) -> bool {
    next.x0.saturating_sub(prev.x1) > space_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_break_requires_gap_above_threshold() {
        let a = BoundingBox::new(0, 0, 10, 10);
        assert!(!is_word_break(a, BoundingBox::new(30, 0, 40, 10), 20));
        assert!(is_word_break(a, BoundingBox::new(31, 0, 40, 10), 20));
        // Overlapping boxes never break.
        assert!(!is_word_break(a, BoundingBox::new(5, 0, 40, 10), 0));
    }

    #[test]
    fn blank_phrase_gives_empty_prediction() {
        let lib = TemplateLibrary::from_features(
            vec![('a', FeatureVector::zeros())],
            &RecognizerParams::default(),
        )
        .expect("library");
        let rec = Recognizer::with_library_params(&lib).recognize_bitmap(&Bitmap::zeros(50, 20));
        assert!(rec.is_empty());
        assert!(rec.tokens.is_empty());
        assert_eq!(rec.text(), "");
    }
}
