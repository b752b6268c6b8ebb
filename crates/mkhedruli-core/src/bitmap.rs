//! Binary foreground/background grids and their bounding boxes.

use serde::{Deserialize, Serialize};

use crate::image::{GrayImage, GrayImageView};

/// Default ink threshold: intensities strictly below it are foreground.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Inclusive pixel rectangle `[x0, x1] × [y0, y1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl BoundingBox {
    /// Build a box from inclusive corners, reordering them if needed.
    pub fn new(x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.x1 - self.x0 + 1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y1 - self.y0 + 1
    }

    /// `height / width` of the box.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.height() as f64 / self.width() as f64
    }
}

/// Row-major binary image; `true` marks foreground (ink).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<bool>,
}

impl Bitmap {
    /// All-background bitmap.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x]
    }

    /// Set `(x, y)`; writes outside the bitmap are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// Fill the inclusive rectangle `bbox` (clipped to the bitmap) with `value`.
    pub fn fill_rect(&mut self, bbox: BoundingBox, value: bool) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        for y in bbox.y0..=bbox.y1.min(self.height.saturating_sub(1)) {
            for x in bbox.x0..=bbox.x1.min(self.width.saturating_sub(1)) {
                self.data[y * self.width + x] = value;
            }
        }
    }

    /// Number of foreground pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// Iterate `(x, y)` of foreground pixels in row-major order.
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(move |(idx, _)| (idx % w, idx / w))
    }

    /// Tight box around the foreground, or `None` for a blank bitmap.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        for (x, y) in self.foreground() {
            bbox = Some(match bbox {
                None => BoundingBox {
                    x0: x,
                    y0: y,
                    x1: x,
                    y1: y,
                },
                Some(b) => BoundingBox {
                    x0: b.x0.min(x),
                    y0: b.y0.min(y),
                    x1: b.x1.max(x),
                    y1: b.y1.max(y),
                },
            });
        }
        bbox
    }

    /// Copy out the inclusive rectangle `bbox`, clipped to the bitmap.
    pub fn crop(&self, bbox: BoundingBox) -> Bitmap {
        if self.width == 0 || self.height == 0 || bbox.x0 >= self.width || bbox.y0 >= self.height
        {
            return Bitmap::zeros(0, 0);
        }
        let x1 = bbox.x1.min(self.width - 1);
        let y1 = bbox.y1.min(self.height - 1);
        let w = x1 - bbox.x0 + 1;
        let h = y1 - bbox.y0 + 1;
        let mut data = Vec::with_capacity(w * h);
        for y in bbox.y0..=y1 {
            let row = y * self.width;
            data.extend_from_slice(&self.data[row + bbox.x0..=row + x1]);
        }
        Bitmap {
            width: w,
            height: h,
            data,
        }
    }

    /// Render as dark ink (0) on white paper (255).
    pub fn to_gray(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .map(|&v| if v { 0 } else { 255 })
                .collect(),
        }
    }
}

/// Threshold a grayscale image: a pixel is foreground iff `intensity < threshold`.
///
/// Zero-area input produces a zero-area bitmap of the same shape.
pub fn binarize(src: &GrayImageView<'_>, threshold: u8) -> Bitmap {
    if src.is_empty() {
        return Bitmap::zeros(src.width, src.height);
    }
    Bitmap {
        width: src.width,
        height: src.height,
        data: src.data.iter().map(|&v| v < threshold).collect(),
    }
}
