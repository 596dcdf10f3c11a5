use super::label::Label;
use crate::error::Result;
use crate::point::{Coordinate, PointSet};

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Cluster `points` and return one label per input point.
    fn fit_predict<T: Coordinate>(&self, points: &PointSet<T>) -> Result<Vec<Label>>;

    /// Like [`Clustering::fit_predict`], with noise as `None`.
    fn fit_predict_with_noise<T: Coordinate>(
        &self,
        points: &PointSet<T>,
    ) -> Result<Vec<Option<usize>>> {
        Ok(self
            .fit_predict(points)?
            .into_iter()
            .map(Label::cluster)
            .collect())
    }
}
