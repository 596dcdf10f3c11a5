use super::{check_point, check_radius, Metric, NeighborIndex};
use crate::error::Result;
use crate::point::{Coordinate, PointSet};

/// Brute-force neighbor search: every query scans the whole point set.
#[derive(Debug, Clone)]
pub struct LinearScan<'a, T> {
    points: &'a PointSet<T>,
    metric: Metric,
}

impl<'a, T: Coordinate> LinearScan<'a, T> {
    /// Index `points` under `metric`.
    ///
    /// Fails with [`crate::Error::InvalidInput`] if any coordinate is NaN or infinite.
    pub fn new(points: &'a PointSet<T>, metric: Metric) -> Result<Self> {
        points.check_finite()?;
        Ok(Self { points, metric })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }
}

impl<T: Coordinate> NeighborIndex for LinearScan<'_, T> {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn query_into(&self, point_idx: usize, eps: f64, out: &mut Vec<usize>) -> Result<()> {
        check_radius(eps)?;
        check_point(point_idx, self.points.len())?;

        out.clear();
        let center = self.points[point_idx];
        out.extend(
            self.points
                .iter()
                .enumerate()
                .filter(|&(_, &other)| self.metric.within(center, other, eps))
                .map(|(idx, _)| idx),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_query_includes_self_and_boundary() {
        let points = PointSet::from_xy([(0.0, 0.0), (1.0, 0.0), (0.0, 2.0), (1.0, 1.0)]);
        let index = LinearScan::new(&points, Metric::Euclidean).unwrap();

        assert_eq!(index.query(0, 1.0).unwrap(), vec![0, 1]);
        assert_eq!(index.query(2, 0.5).unwrap(), vec![2]);
        assert_eq!(index.query(3, 1.0).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_query_is_repeatable() {
        let points = PointSet::from_xy((0..20).map(|i| (f64::from(i % 5), f64::from(i / 5))));
        let index = LinearScan::new(&points, Metric::Euclidean).unwrap();

        let first = index.query(7, 1.5).unwrap();
        let mut buf = vec![99, 98];
        index.query_into(7, 1.5, &mut buf).unwrap();
        assert_eq!(first, buf);
    }

    #[test]
    fn test_manhattan_metric() {
        let points = PointSet::from_xy([(0u32, 0u32), (1, 1), (2, 0)]);
        let index = LinearScan::new(&points, Metric::Manhattan).unwrap();
        assert_eq!(index.query(0, 2.0).unwrap(), vec![0, 1, 2]);
        assert_eq!(index.query(0, 1.5).unwrap(), vec![0]);
    }

    #[test]
    fn test_integer_extremes_are_exact() {
        let step = 1u32 << 30;
        let points = PointSet::from_xy([(0u32, 0u32), (step, 1), (step, 0), (u32::MAX, 0)]);
        let index = LinearScan::new(&points, Metric::Euclidean).unwrap();

        let eps = f64::from(step);
        assert_eq!(index.query(0, eps).unwrap(), vec![0, 2]);
        assert_eq!(index.query(1, eps).unwrap(), vec![1, 2]);
        assert_eq!(index.query(3, f64::from(u32::MAX)).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_queries() {
        let points = PointSet::from_xy([(0.0, 0.0)]);
        let index = LinearScan::new(&points, Metric::Euclidean).unwrap();

        assert_eq!(index.query(0, 0.0), Err(Error::InvalidRadius { eps: 0.0 }));
        assert!(index.query(0, -2.0).is_err());
        assert_eq!(
            index.query(1, 1.0),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_rejects_non_finite_points() {
        let points = PointSet::from_xy([(0.0, 0.0), (f64::NAN, 1.0)]);
        assert_eq!(
            LinearScan::new(&points, Metric::Euclidean).err(),
            Some(Error::InvalidInput { index: 1 })
        );
    }
}
