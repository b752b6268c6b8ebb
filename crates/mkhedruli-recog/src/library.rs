//! Reference templates: one scaled feature vector per alphabet symbol.

use std::collections::{HashMap, HashSet};

use mkhedruli_core::GrayImageView;
use mkhedruli_features::FeatureVector;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::glyph::featurize_image;
use crate::recognizer::{Hypothesis, RecognizerParams};
use crate::scaler::Scaler;

/// Errors raised while assembling a template library.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    #[error("alphabet is empty")]
    EmptyAlphabet,
    #[error("no reference glyph for symbol '{label}'")]
    MissingTemplate { label: char },
    #[error("symbol '{label}' appears more than once")]
    DuplicateLabel { label: char },
    #[error("reference glyph '{label}' is not in the alphabet")]
    UnknownLabel { label: char },
}

/// One symbol with its scaled reference vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub label: char,
    pub features: FeatureVector,
}

/// Immutable template set plus the scaler fit over it.
///
/// Only constructed through [`TemplateLibrary::build`] and
/// [`TemplateLibrary::from_features`], so it always holds at least one entry
/// with unique labels. It serializes for reports but is not deserializable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateLibrary {
    entries: Vec<TemplateEntry>,
    scaler: Scaler,
    params: RecognizerParams,
}

impl TemplateLibrary {
    /// Build from one grayscale reference image per alphabet symbol.
    ///
    /// Every symbol of `alphabet` needs exactly one reference; entries keep
    /// alphabet order, which is also the tie-break order when ranking.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(alphabet, references, params), fields(symbols = alphabet.len()))
    )]
    pub fn build<'a, I>(
        alphabet: &[char],
        references: I,
        params: &RecognizerParams,
    ) -> Result<Self, LibraryError>
    where
        I: IntoIterator<Item = (char, GrayImageView<'a>)>,
    {
        let known = check_alphabet(alphabet)?;

        let mut features: HashMap<char, FeatureVector> = HashMap::new();
        for (label, img) in references {
            if !known.contains(&label) {
                return Err(LibraryError::UnknownLabel { label });
            }
            if features.insert(label, featurize_image(&img, params)).is_some() {
                return Err(LibraryError::DuplicateLabel { label });
            }
        }

        let ordered = alphabet
            .iter()
            .map(|&label| {
                features
                    .remove(&label)
                    .map(|f| (label, f))
                    .ok_or(LibraryError::MissingTemplate { label })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_features(ordered, params)
    }

    /// Build from precomputed raw (unscaled) vectors, in iteration order.
    pub fn from_features(
        raw: Vec<(char, FeatureVector)>,
        params: &RecognizerParams,
    ) -> Result<Self, LibraryError> {
        let labels: Vec<char> = raw.iter().map(|(label, _)| *label).collect();
        check_alphabet(&labels)?;

        let vectors: Vec<FeatureVector> = raw.iter().map(|(_, f)| *f).collect();
        let scaler = Scaler::fit(&vectors).ok_or(LibraryError::EmptyAlphabet)?;
        let entries = raw
            .into_iter()
            .map(|(label, f)| TemplateEntry {
                label,
                features: scaler.transform(&f),
            })
            .collect::<Vec<_>>();

        log::info!("template library ready: {} symbols", entries.len());
        Ok(Self {
            entries,
            scaler,
            params: *params,
        })
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    /// Parameters the templates were featurized with.
    pub fn params(&self) -> &RecognizerParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Symbols in template order.
    pub fn labels(&self) -> Vec<char> {
        self.entries.iter().map(|e| e.label).collect()
    }

    /// Rank all templates against a raw query vector, most similar first.
    ///
    /// The sort is stable, so equal distances keep template order.
    pub fn rank(&self, raw: &FeatureVector) -> Vec<Hypothesis> {
        let query = self.scaler.transform(raw);
        let mut ranked: Vec<Hypothesis> = self
            .entries
            .iter()
            .map(|e| {
                let distance = (e.features - query).norm();
                Hypothesis {
                    label: e.label,
                    similarity: 1.0 / (1.0 + distance),
                    distance,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        ranked
    }
}

fn check_alphabet(alphabet: &[char]) -> Result<HashSet<char>, LibraryError> {
    if alphabet.is_empty() {
        return Err(LibraryError::EmptyAlphabet);
    }
    let mut seen = HashSet::with_capacity(alphabet.len());
    for &label in alphabet {
        if !seen.insert(label) {
            return Err(LibraryError::DuplicateLabel { label });
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mkhedruli_core::{Bitmap, BoundingBox, GrayImage};

    fn block(w: usize, h: usize) -> GrayImage {
        let mut bmp = Bitmap::zeros(w + 4, h + 4);
        bmp.fill_rect(BoundingBox::new(2, 2, w + 1, h + 1), true);
        bmp.to_gray()
    }

    fn raw(first: f64) -> FeatureVector {
        let mut v = FeatureVector::zeros();
        v[0] = first;
        v
    }

    #[test]
    fn build_orders_entries_by_alphabet() {
        let params = RecognizerParams::default();
        let tall = block(4, 12);
        let wide = block(12, 4);
        let lib = TemplateLibrary::build(
            &['x', 'y'],
            [('y', wide.view()), ('x', tall.view())],
            &params,
        )
        .expect("library");
        assert_eq!(lib.labels(), vec!['x', 'y']);
        assert_eq!(lib.len(), 2);
    }

    #[test]
    fn missing_reference_is_fatal() {
        let img = block(5, 5);
        let err = TemplateLibrary::build(
            &['a', 'b'],
            [('a', img.view())],
            &RecognizerParams::default(),
        )
        .unwrap_err();
        assert_eq!(err, LibraryError::MissingTemplate { label: 'b' });
    }

    #[test]
    fn duplicate_and_unknown_labels_are_rejected() {
        let img = block(5, 5);
        let params = RecognizerParams::default();
        assert_eq!(
            TemplateLibrary::build(&['a', 'a'], [('a', img.view())], &params).unwrap_err(),
            LibraryError::DuplicateLabel { label: 'a' }
        );
        assert_eq!(
            TemplateLibrary::build(&['a'], [('a', img.view()), ('a', img.view())], &params)
                .unwrap_err(),
            LibraryError::DuplicateLabel { label: 'a' }
        );
        assert_eq!(
            TemplateLibrary::build(&['a'], [('z', img.view())], &params).unwrap_err(),
            LibraryError::UnknownLabel { label: 'z' }
        );
        assert_eq!(
            TemplateLibrary::build(&[], std::iter::empty(), &params).unwrap_err(),
            LibraryError::EmptyAlphabet
        );
    }

    #[test]
    fn from_features_validates_labels() {
        let params = RecognizerParams::default();
        assert_eq!(
            TemplateLibrary::from_features(Vec::new(), &params).unwrap_err(),
            LibraryError::EmptyAlphabet
        );
        assert_eq!(
            TemplateLibrary::from_features(vec![('a', raw(1.0)), ('a', raw(2.0))], &params)
                .unwrap_err(),
            LibraryError::DuplicateLabel { label: 'a' }
        );
    }

    #[test]
    fn every_query_gets_a_full_ranking() {
        let lib = TemplateLibrary::from_features(
            vec![('p', raw(1.0)), ('q', raw(3.0))],
            &RecognizerParams::default(),
        )
        .expect("library");
        assert!(!lib.is_empty());
        assert_eq!(lib.rank(&raw(-50.0)).len(), 2);
    }

    #[test]
    fn rank_breaks_ties_by_template_order() {
        let params = RecognizerParams::default();
        let lib = TemplateLibrary::from_features(
            vec![('p', raw(1.0)), ('q', raw(3.0)), ('r', raw(1.0))],
            &params,
        )
        .expect("library");

        let ranked = lib.rank(&raw(1.0));
        let labels: Vec<char> = ranked.iter().map(|h| h.label).collect();
        assert_eq!(labels, vec!['p', 'r', 'q']);
        assert_eq!(ranked[0].similarity, 1.0);
        assert_eq!(ranked[0].distance, 0.0);
        assert!(ranked[2].similarity < ranked[1].similarity);
    }
}
