use serde::{Deserialize, Serialize};

use crate::point::{Coordinate, Point};

/// Distance used to decide neighborhood membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Straight-line (L2) distance.
    #[default]
    Euclidean,
    /// Taxicab (L1) distance, `|dx| + |dy|`.
    Manhattan,
}

impl Metric {
    /// Whether `b` lies within `eps` of `a`, boundary included.
    ///
    /// Integer coordinates are compared exactly. Floating-point coordinates
    /// compare squared distances in `f64` to avoid a square root.
    #[inline]
    pub fn within<T: Coordinate>(self, a: Point<T>, b: Point<T>, eps: f64) -> bool {
        match (a.x.exact_abs_diff(b.x), a.y.exact_abs_diff(b.y)) {
            (Some(dx), Some(dy)) => self.within_integer(dx, dy, eps),
            _ => self.within_float(a.to_f64(), b.to_f64(), eps),
        }
    }

    #[inline]
    fn within_float(self, a: [f64; 2], b: [f64; 2], eps: f64) -> bool {
        let dx = a[0] - b[0];
        let dy = a[1] - b[1];
        match self {
            Metric::Euclidean => dx * dx + dy * dy <= eps * eps,
            Metric::Manhattan => dx.abs() + dy.abs() <= eps,
        }
    }

    /// `dx` and `dy` are below 2^32, so the L1 sum is exact in `f64` and the
    /// squared L2 sum is exact in `u128`.
    #[inline]
    fn within_integer(self, dx: u64, dy: u64, eps: f64) -> bool {
        match self {
            Metric::Euclidean => {
                let squared = u128::from(dx) * u128::from(dx) + u128::from(dy) * u128::from(dy);
                squared_at_most(squared, eps)
            }
            Metric::Manhattan => (dx + dy) as f64 <= eps,
        }
    }
}

/// Exact `squared <= eps * eps` for `squared < 2^104` and a positive, finite `eps`.
fn squared_at_most(squared: u128, eps: f64) -> bool {
    if squared == 0 {
        return true;
    }

    // eps == mantissa * 2^exponent, exactly.
    let bits = eps.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = u128::from(bits & ((1u64 << 52) - 1));
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u128 << 52), biased - 1075)
    };

    // eps >= 2^52, so eps^2 >= 2^104.
    if exponent >= 0 {
        return true;
    }

    // squared <= mantissa^2 * 2^(2 * exponent)  <=>  squared << (-2 * exponent) <= mantissa^2
    let shift = (-2 * exponent) as u32;
    if shift >= 128 || squared.leading_zeros() < shift {
        return false;
    }
    (squared << shift) <= mantissa * mantissa
}
