//! Fixed-radius neighbor search.
//!
//! DBSCAN spends nearly all of its time answering one question: which points lie
//! within `eps` of point `i`? [`NeighborIndex`] is that question as a trait, so
//! the clusterer never cares how it is answered.
//!
//! ## Implementations
//!
//! - [`LinearScan`]: compares against every point. O(N) per query, no setup.
//! - [`GridIndex`]: buckets points into square cells. With a cell side of `eps`
//!   a query only inspects the 3x3 block of cells around the query point, which
//!   keeps a whole clustering run close to O(N) for evenly spread data.
//!
//! Both return the same neighbor lists, in ascending index order, with the
//! query point itself included.

mod grid;
mod linear;
mod metric;

pub use grid::GridIndex;
pub use linear::LinearScan;
pub use metric::Metric;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Point count from which [`IndexKind::Auto`] switches to a grid.
pub const AUTO_GRID_THRESHOLD: usize = 1024;

/// Answers fixed-radius neighborhood queries over an indexed point set.
pub trait NeighborIndex {
    /// Number of indexed points.
    fn len(&self) -> usize;

    /// Whether the index holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the contents of `out` with every point within `eps` of
    /// `point_idx` (boundary and the point itself included), sorted ascending.
    fn query_into(&self, point_idx: usize, eps: f64, out: &mut Vec<usize>) -> Result<()>;

    /// Allocating form of [`NeighborIndex::query_into`].
    fn query(&self, point_idx: usize, eps: f64) -> Result<Vec<usize>> {
        let mut out = Vec::new();
        self.query_into(point_idx, eps, &mut out)?;
        Ok(out)
    }
}

/// Which [`NeighborIndex`] a clustering run builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// [`LinearScan`].
    Linear,
    /// [`GridIndex`] with a cell side of `eps`.
    Grid,
    /// Linear below [`AUTO_GRID_THRESHOLD`] points, grid from there on.
    #[default]
    Auto,
}

impl IndexKind {
    /// Resolve `Auto` for a point set of `n` points.
    pub fn resolve(self, n: usize) -> IndexKind {
        match self {
            IndexKind::Auto if n >= AUTO_GRID_THRESHOLD => IndexKind::Grid,
            IndexKind::Auto => IndexKind::Linear,
            kind => kind,
        }
    }
}

/// Fails with [`Error::InvalidRadius`] unless `eps` is positive and finite.
pub(crate) fn check_radius(eps: f64) -> Result<()> {
    if eps > 0.0 && eps.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidRadius { eps })
    }
}

pub(crate) fn check_point(point_idx: usize, len: usize) -> Result<()> {
    if point_idx < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange {
            index: point_idx,
            len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_radius() {
        assert!(check_radius(0.1).is_ok());
        assert_eq!(check_radius(0.0), Err(Error::InvalidRadius { eps: 0.0 }));
        assert!(check_radius(-1.0).is_err());
        assert!(check_radius(f64::NAN).is_err());
        assert!(check_radius(f64::INFINITY).is_err());
    }

    #[test]
    fn test_auto_resolution() {
        assert_eq!(IndexKind::Auto.resolve(10), IndexKind::Linear);
        assert_eq!(IndexKind::Auto.resolve(AUTO_GRID_THRESHOLD), IndexKind::Grid);
        assert_eq!(IndexKind::Linear.resolve(1_000_000), IndexKind::Linear);
        assert_eq!(IndexKind::Grid.resolve(0), IndexKind::Grid);
    }
}
