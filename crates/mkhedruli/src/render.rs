//! Reference alphabet rendering from a TrueType font.
//!
//! Each symbol is drawn black on white at the largest pixel size that fits a
//! square canvas, then cropped to its ink with a small margin and saved as
//! `<symbol>.bmp`, the layout [`crate::ocr::load_template_library`] reads.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale};
use image::{imageops, GrayImage, Luma};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::core::{binarize, DEFAULT_THRESHOLD};
use crate::ocr::{gray_view, template_path, OcrError};

/// Default side of the square drawing canvas.
pub const DEFAULT_CANVAS_SIZE: u32 = 512;

/// Margin kept around the ink box when cropping.
pub const INK_PADDING: u32 = 2;

/// Load a TrueType/OpenType font from disk.
pub fn load_font(path: impl AsRef<Path>) -> Result<FontVec, OcrError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| OcrError::Fs {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(FontVec::try_from_vec(data)?)
}

/// Largest integer pixel size at which `text` fits a `canvas × canvas` square.
pub fn max_font_size(font: &impl Font, text: &str, canvas: u32) -> u32 {
    let (mut lo, mut hi) = (1, canvas.max(1));
    let mut best = 1;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let (w, h) = text_size(PxScale::from(mid as f32), font, text);
        if w <= canvas && h <= canvas {
            best = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }
    best
}

/// Crop `img` to its dark pixels plus `pad` on every side (clipped to the image).
///
/// Returns `None` when the image has no ink.
pub fn crop_to_ink(img: &GrayImage, pad: u32) -> Option<GrayImage> {
    let bbox = binarize(&gray_view(img), DEFAULT_THRESHOLD).bounding_box()?;
    let pad = pad as usize;
    let x0 = bbox.x0.saturating_sub(pad);
    let y0 = bbox.y0.saturating_sub(pad);
    let x1 = (bbox.x1 + pad).min(img.width() as usize - 1);
    let y1 = (bbox.y1 + pad).min(img.height() as usize - 1);
    Some(
        imageops::crop_imm(
            img,
            x0 as u32,
            y0 as u32,
            (x1 - x0 + 1) as u32,
            (y1 - y0 + 1) as u32,
        )
        .to_image(),
    )
}

/// Render one symbol, centered and as large as the canvas allows, cropped to ink.
pub fn render_glyph(font: &impl Font, symbol: char, canvas: u32) -> Result<GrayImage, OcrError> {
    let text = symbol.to_string();
    let size = max_font_size(font, &text, canvas);
    let scale = PxScale::from(size as f32);
    let (w, h) = text_size(scale, font, &text);

    let mut img = GrayImage::from_pixel(canvas, canvas, Luma([255]));
    let x = (canvas.saturating_sub(w) / 2) as i32;
    let y = (canvas.saturating_sub(h) / 2) as i32;
    draw_text_mut(&mut img, Luma([0]), x, y, scale, font, &text);
    log::debug!("'{symbol}' rendered at {size}px ({w}x{h})");

    crop_to_ink(&img, INK_PADDING).ok_or(OcrError::EmptyGlyph { symbol })
}

/// Render every symbol to `<output_dir>/<symbol>.bmp`; returns the written paths.
pub fn render_alphabet(
    font: &impl Font,
    alphabet: &[char],
    output_dir: impl AsRef<Path>,
    canvas: u32,
) -> Result<Vec<PathBuf>, OcrError> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).map_err(|source| OcrError::Fs {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(alphabet.len());
    for &symbol in alphabet {
        let glyph = render_glyph(font, symbol, canvas)?;
        let path = template_path(output_dir, symbol);
        glyph.save(&path)?;
        written.push(path);
    }
    log::info!(
        "rendered {} glyphs into {}",
        written.len(),
        output_dir.display()
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_keeps_padding_inside_the_image() {
        let mut img = GrayImage::from_pixel(20, 10, Luma([255]));
        for y in 3..=6 {
            for x in 5..=9 {
                img.put_pixel(x, y, Luma([10]));
            }
        }
        let crop = crop_to_ink(&img, INK_PADDING).expect("ink");
        assert_eq!(crop.dimensions(), (9, 8));
        assert_eq!(crop.get_pixel(2, 2), &Luma([10]));
        assert_eq!(crop.get_pixel(0, 0), &Luma([255]));
    }

    #[test]
    fn crop_clips_padding_at_the_border() {
        let mut img = GrayImage::from_pixel(6, 6, Luma([255]));
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(5, 1, Luma([0]));
        let crop = crop_to_ink(&img, INK_PADDING).expect("ink");
        assert_eq!(crop.dimensions(), (6, 4));
    }

    #[test]
    fn blank_image_has_nothing_to_crop() {
        let img = GrayImage::from_pixel(6, 6, Luma([200]));
        assert!(crop_to_ink(&img, INK_PADDING).is_none());
    }

    #[test]
    fn unreadable_font_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not a font").expect("write");
        assert!(matches!(load_font(&path), Err(OcrError::Font(_))));
        assert!(matches!(
            load_font(dir.path().join("absent.ttf")),
            Err(OcrError::Fs { .. })
        ));
    }
}
