//! Crop-pad-resample normalization of glyph bitmaps to a canonical square.
//!
//! The foreground is cropped to its bounding box, centered on a square canvas
//! (top/left bias on odd padding), resampled with nearest-neighbor sampling
//! and re-thresholded, so every glyph ends up as a crisp `size × size` bitmap.

use crate::bitmap::{binarize, Bitmap, BoundingBox, DEFAULT_THRESHOLD};
use crate::image::GrayImage;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Default canonical glyph side in pixels.
pub const DEFAULT_CANONICAL_SIZE: usize = 64;

/// A canonical glyph plus the foreground box it was cut from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedGlyph {
    pub bitmap: Bitmap,
    /// Foreground box in the source bitmap; `None` when the source was blank.
    pub source_box: Option<BoundingBox>,
}

impl NormalizedGlyph {
    #[inline]
    pub fn size(&self) -> usize {
        self.bitmap.width
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.source_box.is_none()
    }
}

/// Normalize `src` to a `size × size` glyph.
///
/// A blank source yields an all-background glyph with no source box.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(src), fields(width = src.width, height = src.height))
)]
pub fn normalize(src: &Bitmap, size: usize) -> NormalizedGlyph {
    let Some(bbox) = src.bounding_box() else {
        return NormalizedGlyph {
            bitmap: Bitmap::zeros(size, size),
            source_box: None,
        };
    };

    let crop = src.crop(bbox);
    let canvas = pad_to_square(&crop);
    let resampled = resize_nearest(&canvas.to_gray(), size, size);
    let bitmap = binarize(&resampled.view(), DEFAULT_THRESHOLD);

    NormalizedGlyph {
        bitmap,
        source_box: Some(bbox),
    }
}

/// Center `crop` on a zero canvas whose side is `max(width, height)`.
pub fn pad_to_square(crop: &Bitmap) -> Bitmap {
    let side = crop.width.max(crop.height);
    let y_off = (side - crop.height) / 2;
    let x_off = (side - crop.width) / 2;

    let mut canvas = Bitmap::zeros(side, side);
    for y in 0..crop.height {
        let src_row = y * crop.width;
        let dst_row = (y + y_off) * side + x_off;
        canvas.data[dst_row..dst_row + crop.width]
            .copy_from_slice(&crop.data[src_row..src_row + crop.width]);
    }
    canvas
}

/// Nearest-neighbor resize sampling source pixel centers.
pub fn resize_nearest(src: &GrayImage, width: usize, height: usize) -> GrayImage {
    if src.width == 0 || src.height == 0 {
        return GrayImage::filled(width, height, 255);
    }

    let x_map: Vec<usize> = (0..width)
        .map(|x| nearest_source_index(x, width, src.width))
        .collect();

    let mut out = GrayImage::filled(width, height, 255);
    for y in 0..height {
        let sy = nearest_source_index(y, height, src.height);
        let src_row = &src.data[sy * src.width..(sy + 1) * src.width];
        let dst_row = &mut out.data[y * width..(y + 1) * width];
        for (dst, &sx) in dst_row.iter_mut().zip(&x_map) {
            *dst = src_row[sx];
        }
    }
    out
}

#[inline]
fn nearest_source_index(dst: usize, dst_len: usize, src_len: usize) -> usize {
    let scale = src_len as f64 / dst_len as f64;
    let s = ((dst as f64 + 0.5) * scale).floor() as usize;
    s.min(src_len - 1)
}
