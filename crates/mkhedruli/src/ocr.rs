//! File-level helpers: image decoding, template directories, annotated output
//! and the full recognition run driven by an [`OcrConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::core::{BoundingBox, GrayImageView};
use crate::recog::{
    io::{write_hypotheses, write_prediction},
    score_tokens, IoError, LibraryError, OcrConfig, RecognitionReport, Recognizer,
    RecognizerParams, TemplateLibrary,
};

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum OcrError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("failed to access {path}: {source}")]
    Fs {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("font has no visible ink for symbol '{symbol}'")]
    EmptyGlyph { symbol: char },
}

/// Segment boxes are drawn in this color.
pub const SEGMENT_BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Decode any image the `image` crate supports and convert it to 8-bit luma.
pub fn load_gray(path: impl AsRef<Path>) -> Result<GrayImage, OcrError> {
    let img = image::open(path.as_ref())?;
    Ok(img.to_luma8())
}

/// Convert an `image::GrayImage` into the lightweight `mkhedruli-core` view type.
pub fn gray_view(img: &GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Path of the reference image for `symbol` inside `dir`.
pub fn template_path(dir: impl AsRef<Path>, symbol: char) -> PathBuf {
    dir.as_ref().join(format!("{symbol}.bmp"))
}

/// Build a template library from `<dir>/<symbol>.bmp` for every alphabet symbol.
///
/// A missing file is reported as [`LibraryError::MissingTemplate`].
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(dir, alphabet, params), fields(dir = %dir.as_ref().display()))
)]
pub fn load_template_library(
    dir: impl AsRef<Path>,
    alphabet: &[char],
    params: &RecognizerParams,
) -> Result<TemplateLibrary, OcrError> {
    let mut images = Vec::with_capacity(alphabet.len());
    for &symbol in alphabet {
        let path = template_path(&dir, symbol);
        if !path.is_file() {
            log::error!("missing reference glyph {}", path.display());
            return Err(LibraryError::MissingTemplate { label: symbol }.into());
        }
        log::debug!("loading reference glyph {}", path.display());
        images.push((symbol, load_gray(&path)?));
    }

    let library = TemplateLibrary::build(
        alphabet,
        images.iter().map(|(symbol, img)| (*symbol, gray_view(img))),
        params,
    )?;
    Ok(library)
}

/// Copy of `img` in RGB with a 1-px hollow rectangle around every box.
pub fn annotate_segments(img: &GrayImage, boxes: &[BoundingBox]) -> RgbImage {
    let mut out = DynamicImage::ImageLuma8(img.clone()).to_rgb8();
    for b in boxes {
        let rect = Rect::at(b.x0 as i32, b.y0 as i32).of_size(b.width() as u32, b.height() as u32);
        draw_hollow_rect_mut(&mut out, rect, SEGMENT_BOX_COLOR);
    }
    out
}

/// Run the full pipeline for `cfg` and write every output file.
///
/// Writes `hypotheses.txt`, `best_prediction.txt`, `phrase_segmented.bmp` and
/// `report.json` into `cfg.output_dir` (created if missing).
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(cfg), fields(phrase = %cfg.phrase_path.display()))
)]
pub fn run(cfg: &OcrConfig) -> Result<RecognitionReport, OcrError> {
    let library = load_template_library(&cfg.reference_dir, &cfg.symbols(), &cfg.params)?;
    log::info!(
        "loaded {} reference glyphs from {}",
        library.len(),
        cfg.reference_dir.display()
    );

    let phrase = load_gray(&cfg.phrase_path)?;
    let recognition = Recognizer::new(&library, cfg.params).recognize(&gray_view(&phrase));

    let truth = cfg.ground_truth.as_deref();
    let score = truth.map(|t| score_tokens(&recognition.tokens, t));

    fs::create_dir_all(&cfg.output_dir).map_err(|source| OcrError::Fs {
        path: cfg.output_dir.clone(),
        source,
    })?;
    write_hypotheses(cfg.hypotheses_path(), &recognition)?;
    write_prediction(cfg.prediction_path(), &recognition)?;
    annotate_segments(&phrase, &recognition.boxes()).save(cfg.annotated_path())?;

    let report = RecognitionReport::new(
        cfg.phrase_path.clone(),
        &recognition,
        truth,
        score,
        cfg.params,
    );
    report.write_json(cfg.report_path())?;
    log::info!("wrote results to {}", cfg.output_dir.display());
    Ok(report)
}
