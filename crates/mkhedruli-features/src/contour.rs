//! Outer-border tracing on top of `imageproc::contours`.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use mkhedruli_core::Bitmap;

use crate::moments::PolygonMoments;

/// Render a bitmap as a mask with foreground at 255 (the contour tracer's
/// convention), framed by a 1-px background border.
///
/// The tracer only opens an outer border at a pixel whose left neighbor is
/// background, so ink on column 0 needs the frame to be traced.
pub fn bitmap_to_mask(bmp: &Bitmap) -> GrayImage {
    GrayImage::from_fn(bmp.width as u32 + 2, bmp.height as u32 + 2, |x, y| {
        let ink = x > 0 && y > 0 && bmp.get(x as usize - 1, y as usize - 1);
        Luma([if ink { 255 } else { 0 }])
    })
}

/// Vertex lists of all top-level outer borders (holes and nested shapes
/// excluded), in bitmap coordinates.
pub fn external_contours(bmp: &Bitmap) -> Vec<Vec<[f64; 2]>> {
    if bmp.width == 0 || bmp.height == 0 {
        return Vec::new();
    }
    let mask = bitmap_to_mask(bmp);
    find_contours::<i32>(&mask)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            c.points
                .iter()
                .map(|p| [(p.x - 1) as f64, (p.y - 1) as f64])
                .collect()
        })
        .collect()
}

/// The outer border enclosing the largest area, with its moments.
///
/// Ties keep the first border in tracing order (raster order of the start pixel).
pub fn largest_external_contour(bmp: &Bitmap) -> Option<(Vec<[f64; 2]>, PolygonMoments)> {
    let mut best: Option<(Vec<[f64; 2]>, PolygonMoments)> = None;
    for points in external_contours(bmp) {
        let m = PolygonMoments::from_polygon(&points);
        let better = best
            .as_ref()
            .map(|(_, prev)| m.area() > prev.area())
            .unwrap_or(true);
        if better {
            best = Some((points, m));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use mkhedruli_core::BoundingBox;

    #[test]
    fn blank_bitmap_has_no_contour() {
        assert!(largest_external_contour(&Bitmap::zeros(8, 8)).is_none());
    }

    #[test]
    fn ring_has_a_single_external_border() {
        let mut bmp = Bitmap::zeros(20, 20);
        bmp.fill_rect(BoundingBox::new(2, 2, 17, 17), true);
        bmp.fill_rect(BoundingBox::new(6, 6, 13, 13), false);
        let contours = external_contours(&bmp);
        assert_eq!(contours.len(), 1);
    }

    #[test]
    fn largest_of_two_blobs_wins() {
        let mut bmp = Bitmap::zeros(30, 12);
        bmp.fill_rect(BoundingBox::new(1, 1, 4, 4), true);
        bmp.fill_rect(BoundingBox::new(10, 1, 25, 10), true);
        let (_, m) = largest_external_contour(&bmp).expect("contour");
        // Border through pixel centers of a 16×10 block spans 15×9.
        assert!((m.area() - 135.0).abs() < 1e-9);
    }

    #[test]
    fn glyph_touching_the_border_is_traced() {
        let mut bmp = Bitmap::zeros(6, 6);
        bmp.fill_rect(BoundingBox::new(0, 0, 5, 5), true);
        let (points, m) = largest_external_contour(&bmp).expect("contour");
        assert!((m.area() - 25.0).abs() < 1e-9);
        assert!(points.contains(&[0.0, 0.0]));
        assert!(points.contains(&[5.0, 5.0]));
    }

    #[test]
    fn ink_on_the_left_column_keeps_its_outer_border() {
        // A wide bar spanning the full width next to a small blob.
        let mut bmp = Bitmap::zeros(12, 12);
        bmp.fill_rect(BoundingBox::new(0, 4, 11, 7), true);
        bmp.fill_rect(BoundingBox::new(9, 0, 10, 1), true);
        let contours = external_contours(&bmp);
        assert_eq!(contours.len(), 2);
        let (_, m) = largest_external_contour(&bmp).expect("contour");
        assert!((m.area() - 33.0).abs() < 1e-9);
    }

    #[test]
    fn mask_is_framed_by_background() {
        let mut bmp = Bitmap::zeros(3, 2);
        bmp.fill_rect(BoundingBox::new(0, 0, 2, 1), true);
        let mask = bitmap_to_mask(&bmp);
        assert_eq!(mask.dimensions(), (5, 4));
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
        assert_eq!(mask.get_pixel(1, 1).0[0], 255);
        assert_eq!(mask.get_pixel(4, 3).0[0], 0);
    }
}
