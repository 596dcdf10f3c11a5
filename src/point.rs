//! Points and point sets.
//!
//! Coordinates may be floating-point or integer pixel positions. Every supported
//! coordinate type widens to `f64` without loss. Integer coordinates also expose
//! exact differences, so distance tests on pixels never round.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A scalar that can be used as a point coordinate.
pub trait Coordinate: Copy + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// Widen to `f64`. Exact for every implementor in this crate.
    fn to_f64(self) -> f64;

    /// Whether the value is usable for distance computations.
    fn is_finite(self) -> bool;

    /// `|self - other|` computed exactly, for integer types only.
    ///
    /// Floating-point coordinates return `None` and are compared in `f64`.
    fn exact_abs_diff(self, _other: Self) -> Option<u64> {
        None
    }
}

impl Coordinate for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl Coordinate for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

macro_rules! integer_coordinate {
    ($($t:ty),*) => {
        $(
            impl Coordinate for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    f64::from(self)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    true
                }

                #[inline]
                fn exact_abs_diff(self, other: Self) -> Option<u64> {
                    Some(u64::from(self.abs_diff(other)))
                }
            }
        )*
    };
}

integer_coordinate!(u32, i32);

/// A 2-D point. Its identity is its position in the owning [`PointSet`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T: Coordinate> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Both coordinates widened to `f64`.
    #[inline]
    pub fn to_f64(self) -> [f64; 2] {
        [self.x.to_f64(), self.y.to_f64()]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<T: Coordinate> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// An ordered, immutable sequence of points indexed `0..len`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointSet<T = f64> {
    points: Vec<Point<T>>,
}

impl<T: Coordinate> PointSet<T> {
    pub fn new(points: Vec<Point<T>>) -> Self {
        Self { points }
    }

    /// Build a point set from `(x, y)` pairs.
    pub fn from_xy<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, T)>,
    {
        pairs.into_iter().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Point<T>> {
        self.points.get(index)
    }

    pub fn as_slice(&self) -> &[Point<T>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point<T>> {
        self.points.iter()
    }

    /// Fails with [`Error::InvalidInput`] naming the first point with a NaN or
    /// infinite coordinate.
    pub fn check_finite(&self) -> Result<()> {
        match self.points.iter().position(|p| !p.is_finite()) {
            Some(index) => Err(Error::InvalidInput { index }),
            None => Ok(()),
        }
    }

    /// Axis-aligned bounding box as `([min_x, min_y], [max_x, max_y])`.
    ///
    /// Returns `None` for an empty set.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut iter = self.points.iter().map(|p| p.to_f64());
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), [x, y]| {
            ([lo[0].min(x), lo[1].min(y)], [hi[0].max(x), hi[1].max(y)])
        }))
    }
}

impl<T> Index<usize> for PointSet<T> {
    type Output = Point<T>;

    fn index(&self, index: usize) -> &Point<T> {
        &self.points[index]
    }
}

impl<T: Coordinate> From<Vec<Point<T>>> for PointSet<T> {
    fn from(points: Vec<Point<T>>) -> Self {
        Self::new(points)
    }
}

impl<T: Coordinate> FromIterator<(T, T)> for PointSet<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(Point::from).collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a PointSet<T> {
    type Item = &'a Point<T>;
    type IntoIter = std::slice::Iter<'a, Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
