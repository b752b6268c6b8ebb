//! Projection profiles and the span scan built on top of them.

use mkhedruli_core::{Bitmap, BoundingBox};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::SegmentParams;

/// Inclusive column range `[x0, x1]` holding ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpan {
    pub x0: usize,
    pub x1: usize,
}

/// Foreground count per column.
pub fn vertical_profile(bmp: &Bitmap) -> Vec<u32> {
    let mut profile = vec![0u32; bmp.width];
    for row in bmp.data.chunks_exact(bmp.width.max(1)) {
        for (acc, &v) in profile.iter_mut().zip(row) {
            *acc += v as u32;
        }
    }
    profile
}

/// Foreground count per row, restricted to columns `x0..=x1`.
pub fn horizontal_profile(bmp: &Bitmap, x0: usize, x1: usize) -> Vec<u32> {
    if bmp.width == 0 || x0 >= bmp.width {
        return vec![0; bmp.height];
    }
    let x1 = x1.min(bmp.width - 1);
    bmp.data
        .chunks_exact(bmp.width)
        .map(|row| row[x0..=x1].iter().filter(|&&v| v).count() as u32)
        .collect()
}

/// Scan a profile left to right and return runs whose value exceeds `empty_thresh`.
///
/// A run still open at the end of the profile is closed at the last index.
pub fn column_spans(profile: &[u32], empty_thresh: u32) -> Vec<ColumnSpan> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (x, &v) in profile.iter().enumerate() {
        match (start, v > empty_thresh) {
            (None, true) => start = Some(x),
            (Some(x0), false) => {
                spans.push(ColumnSpan { x0, x1: x - 1 });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(x0) = start {
        spans.push(ColumnSpan {
            x0,
            x1: profile.len() - 1,
        });
    }
    spans
}

/// Split a phrase bitmap into glyph boxes using vertical then horizontal profiles.
///
/// Boxes come back ordered by `x0`. Spans whose restricted row profile never
/// exceeds the threshold are dropped.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(bmp, params), fields(width = bmp.width, height = bmp.height))
)]
pub fn segment_by_profiles(bmp: &Bitmap, params: &SegmentParams) -> Vec<BoundingBox> {
    if bmp.width == 0 || bmp.height == 0 {
        return Vec::new();
    }

    let spans = column_spans(&vertical_profile(bmp), params.empty_thresh);
    let mut boxes = Vec::with_capacity(spans.len());

    for span in &spans {
        let rows = horizontal_profile(bmp, span.x0, span.x1);
        let mut inked = rows
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > params.empty_thresh)
            .map(|(y, _)| y);
        let Some(y0) = inked.next() else {
            log::debug!(
                "dropping span x={}..={}: no row above threshold",
                span.x0,
                span.x1
            );
            continue;
        };
        let y1 = inked.last().unwrap_or(y0);
        boxes.push(BoundingBox {
            x0: span.x0,
            y0,
            x1: span.x1,
            y1,
        });
    }

    log::debug!("segmented {} spans into {} boxes", spans.len(), boxes.len());
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(height: usize, width: usize, cols: &[(usize, usize)], rows: (usize, usize)) -> Bitmap {
        let mut bmp = Bitmap::zeros(width, height);
        for &(x0, x1) in cols {
            bmp.fill_rect(BoundingBox::new(x0, rows.0, x1, rows.1), true);
        }
        bmp
    }

    #[test]
    fn blank_bitmap_has_no_segments() {
        let bmp = Bitmap::zeros(50, 20);
        assert!(segment_by_profiles(&bmp, &SegmentParams::default()).is_empty());
    }

    #[test]
    fn three_blocks_give_three_boxes() {
        // Widths 10, 12, 10 separated by 5-pixel gaps on a 100 px tall canvas.
        let bmp = blocks(100, 60, &[(3, 12), (18, 29), (35, 44)], (20, 79));
        let boxes = segment_by_profiles(&bmp, &SegmentParams::default());
        assert_eq!(boxes.len(), 3);
        assert_eq!(boxes[0], BoundingBox::new(3, 20, 12, 79));
        assert_eq!(boxes[1], BoundingBox::new(18, 20, 29, 79));
        assert_eq!(boxes[2], BoundingBox::new(35, 20, 44, 79));
        assert!(boxes.windows(2).all(|w| w[0].x0 < w[1].x0));
    }

    #[test]
    fn span_touching_right_edge_is_closed() {
        let bmp = blocks(10, 12, &[(8, 11)], (2, 7));
        let boxes = segment_by_profiles(&bmp, &SegmentParams::default());
        assert_eq!(boxes, vec![BoundingBox::new(8, 2, 11, 7)]);
    }

    #[test]
    fn sparse_columns_count_as_empty() {
        // A one-pixel-tall stroke never exceeds the default threshold of 1.
        let mut bmp = Bitmap::zeros(20, 10);
        bmp.fill_rect(BoundingBox::new(2, 4, 15, 4), true);
        assert!(segment_by_profiles(&bmp, &SegmentParams::default()).is_empty());

        let boxes = segment_by_profiles(&bmp, &SegmentParams { empty_thresh: 0 });
        assert_eq!(boxes, vec![BoundingBox::new(2, 4, 15, 4)]);
    }

    #[test]
    fn span_without_dense_row_is_dropped() {
        // Two columns with two pixels each, but on distinct rows: the column
        // profile passes, each row holds a single pixel and fails.
        let mut bmp = Bitmap::zeros(6, 6);
        bmp.set(2, 0, true);
        bmp.set(2, 2, true);
        bmp.set(3, 4, true);
        bmp.set(3, 5, true);
        let profile = vertical_profile(&bmp);
        assert_eq!(column_spans(&profile, 1), vec![ColumnSpan { x0: 2, x1: 3 }]);
        assert!(segment_by_profiles(&bmp, &SegmentParams::default()).is_empty());
    }

    #[test]
    fn profiles_sum_foreground() {
        let bmp = blocks(4, 5, &[(1, 2)], (0, 2));
        assert_eq!(vertical_profile(&bmp), vec![0, 3, 3, 0, 0]);
        assert_eq!(horizontal_profile(&bmp, 0, 4), vec![2, 2, 2, 0]);
        assert_eq!(horizontal_profile(&bmp, 2, 9), vec![1, 1, 1, 0]);
    }
}
