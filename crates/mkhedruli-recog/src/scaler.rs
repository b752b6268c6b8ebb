//! Per-dimension standardization fit over the template set.

use mkhedruli_features::FeatureVector;
use serde::{Deserialize, Serialize};

/// Deviations at or below this are treated as constant features (scale 1).
pub const STD_EPSILON: f64 = 10.0 * f64::EPSILON;

/// Affine `(x - mean) / scale` transform, fit once and then read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    mean: FeatureVector,
    scale: FeatureVector,
}

impl Scaler {
    /// Fit mean and population standard deviation per dimension.
    ///
    /// Returns `None` for an empty sample set.
    pub fn fit(samples: &[FeatureVector]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples
            .iter()
            .fold(FeatureVector::zeros(), |acc, v| acc + v)
            / n;
        let var = samples.iter().fold(FeatureVector::zeros(), |acc, v| {
            let d = v - mean;
            acc + d.component_mul(&d)
        }) / n;
        let scale = var.map(|v| {
            let std = v.sqrt();
            if std <= STD_EPSILON {
                1.0
            } else {
                std
            }
        });
        Some(Self { mean, scale })
    }

    pub fn transform(&self, v: &FeatureVector) -> FeatureVector {
        (v - self.mean).component_div(&self.scale)
    }

    pub fn mean(&self) -> &FeatureVector {
        &self.mean
    }

    pub fn scale(&self) -> &FeatureVector {
        &self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vec_with(first: f64, second: f64) -> FeatureVector {
        let mut v = FeatureVector::repeat(5.0);
        v[0] = first;
        v[1] = second;
        v
    }

    #[test]
    fn fit_standardizes_each_dimension() {
        let samples = [vec_with(1.0, 10.0), vec_with(3.0, 30.0)];
        let scaler = Scaler::fit(&samples).expect("non-empty");
        assert_relative_eq!(scaler.mean()[0], 2.0);
        assert_relative_eq!(scaler.scale()[0], 1.0);
        assert_relative_eq!(scaler.scale()[1], 10.0);

        let t = scaler.transform(&samples[0]);
        assert_relative_eq!(t[0], -1.0);
        assert_relative_eq!(t[1], -1.0);
    }

    #[test]
    fn constant_dimension_keeps_unit_scale() {
        let samples = [vec_with(1.0, 2.0), vec_with(3.0, 4.0)];
        let scaler = Scaler::fit(&samples).expect("non-empty");
        assert_eq!(scaler.scale()[5], 1.0);
        assert_eq!(scaler.transform(&samples[0])[5], 0.0);
    }

    #[test]
    fn empty_fit_is_none() {
        assert!(Scaler::fit(&[]).is_none());
    }
}
