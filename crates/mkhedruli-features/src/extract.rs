use mkhedruli_core::NormalizedGlyph;
use nalgebra::SVector;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::contour::largest_external_contour;
use crate::moments::hu_invariants;
use crate::params::{AspectRatioSource, FeatureParams};

/// Number of scalar features per glyph.
pub const FEATURE_LEN: usize = 10;

/// Ordered glyph descriptor, see [`FEATURE_NAMES`].
pub type FeatureVector = SVector<f64, FEATURE_LEN>;

/// Feature names in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_LEN] = [
    "mass",
    "centroid_x",
    "centroid_y",
    "mu_xx",
    "mu_yy",
    "mu_xy",
    "density",
    "aspect_ratio",
    "hu1",
    "hu2",
];

/// Compute the descriptor of a normalized glyph.
///
/// A blank glyph maps to the zero vector.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "trace", skip(glyph, params), fields(size = glyph.size()))
)]
pub fn extract_features(glyph: &NormalizedGlyph, params: &FeatureParams) -> FeatureVector {
    let bmp = &glyph.bitmap;
    let mass = bmp.count_foreground();
    if mass == 0 {
        return FeatureVector::zeros();
    }

    let n = mass as f64;
    let (sum_x, sum_y) = bmp
        .foreground()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x as f64, sy + y as f64));
    let x_c = sum_x / n;
    let y_c = sum_y / n;

    let (mut xx, mut yy, mut xy) = (0.0, 0.0, 0.0);
    for (x, y) in bmp.foreground() {
        let dx = x as f64 - x_c;
        let dy = y as f64 - y_c;
        xx += dx * dx;
        yy += dy * dy;
        xy += dx * dy;
    }

    let density = n / (bmp.width * bmp.height) as f64;
    let aspect_ratio = match params.aspect_ratio {
        AspectRatioSource::Source => glyph.source_box.map(|b| b.aspect_ratio()).unwrap_or(0.0),
        AspectRatioSource::Normalized => bmp.height as f64 / bmp.width as f64,
    };

    let [hu1, hu2] = match largest_external_contour(bmp) {
        Some((_, m)) => hu_invariants(&m),
        None => {
            log::debug!("glyph with {mass} ink pixels has no outer contour");
            [0.0; 2]
        }
    };

    FeatureVector::from([
        n,
        x_c,
        y_c,
        xx / n,
        yy / n,
        xy / n,
        density,
        aspect_ratio,
        hu1,
        hu2,
    ])
}
