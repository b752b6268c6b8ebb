//! Polygon moments (Green's theorem) and Hu invariants.

/// Raw moments up to order two of a closed polygon.
///
/// Orientation is normalized so `m00` (the enclosed area) is non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolygonMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m11: f64,
    pub m02: f64,
}

/// Central moments of order two.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentralMoments {
    pub mu20: f64,
    pub mu11: f64,
    pub mu02: f64,
}

impl PolygonMoments {
    /// Integrate over the polygon through its vertex list (implicitly closed).
    pub fn from_polygon(points: &[[f64; 2]]) -> Self {
        if points.len() < 3 {
            return Self::default();
        }

        let mut m = Self::default();
        for (i, &[x0, y0]) in points.iter().enumerate() {
            let [x1, y1] = points[(i + 1) % points.len()];
            let a = x0 * y1 - x1 * y0;
            m.m00 += a;
            m.m10 += a * (x0 + x1);
            m.m01 += a * (y0 + y1);
            m.m20 += a * (x0 * x0 + x0 * x1 + x1 * x1);
            m.m02 += a * (y0 * y0 + y0 * y1 + y1 * y1);
            m.m11 += a * (2.0 * x0 * y0 + x0 * y1 + x1 * y0 + 2.0 * x1 * y1);
        }
        m.m00 /= 2.0;
        m.m10 /= 6.0;
        m.m01 /= 6.0;
        m.m20 /= 12.0;
        m.m02 /= 12.0;
        m.m11 /= 24.0;

        if m.m00 < 0.0 {
            m = Self {
                m00: -m.m00,
                m10: -m.m10,
                m01: -m.m01,
                m20: -m.m20,
                m11: -m.m11,
                m02: -m.m02,
            };
        }
        m
    }

    /// Absolute enclosed area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.m00
    }

    /// Central moments, or `None` for a zero-area polygon.
    pub fn central(&self) -> Option<CentralMoments> {
        if self.m00.abs() <= f64::EPSILON {
            return None;
        }
        let xc = self.m10 / self.m00;
        let yc = self.m01 / self.m00;
        Some(CentralMoments {
            mu20: self.m20 - xc * self.m10,
            mu11: self.m11 - xc * self.m01,
            mu02: self.m02 - yc * self.m01,
        })
    }
}

/// First two Hu invariants; zero for a degenerate polygon.
///
/// `hu1 = η20 + η02`, `hu2 = (η20 − η02)² + 4 η11²`, with
/// `ηpq = μpq / m00²` for second-order moments.
pub fn hu_invariants(m: &PolygonMoments) -> [f64; 2] {
    let Some(c) = m.central() else {
        return [0.0; 2];
    };
    let norm = m.m00 * m.m00;
    let n20 = c.mu20 / norm;
    let n02 = c.mu02 / norm;
    let n11 = c.mu11 / norm;

    let hu1 = n20 + n02;
    let hu2 = (n20 - n02).powi(2) + 4.0 * n11 * n11;
    [hu1, hu2]
}
