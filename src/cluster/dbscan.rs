//! DBSCAN: Density-Based Spatial Clustering of Applications with Noise.
//!
//! # The Algorithm (Ester et al., 1996)
//!
//! A point is *core* when its eps-neighborhood, itself included, holds at least
//! `min_pts` points. Clusters are the connected components of core points
//! (two core points are connected when within `eps` of each other), plus every
//! non-core point that lies within `eps` of one of those core points.
//!
//! - **Core point**: inclusive neighborhood size >= `min_pts`.
//! - **Border point**: not core, but within `eps` of a core point.
//! - **Noise point**: neither.
//!
//! ## Region growing
//!
//! Points are visited in input order. An unvisited point with a sparse
//! neighborhood is provisionally marked noise. An unvisited core point opens the
//! next cluster id and seeds a work-list with its neighbors. Popping a point from
//! the work-list claims it for the cluster; if it had never been visited it is
//! queried in turn and, when core, its neighbors join the work-list. Points that
//! were provisionally noise are claimed as border points and not expanded.
//!
//! A point enters the work-list at most once per run, so expansion always
//! terminates and never recurses.
//!
//! ## Label transitions
//!
//! `Unvisited -> Noise`, `Unvisited -> Cluster(k)` and `Noise -> Cluster(k)` are
//! the only transitions. A clustered point is never relabeled, so a border point
//! reachable from two clusters keeps the id of the cluster discovered first.
//!
//! ## Complexity
//!
//! - **Time**: one neighbor query per point. O(n²) with [`LinearScan`], close to
//!   O(n) with [`GridIndex`] on evenly spread data.
//! - **Space**: O(n) for labels and flags, plus the index.
//!
//! ## References
//!
//! Ester et al. (1996). "A Density-Based Algorithm for Discovering Clusters
//! in Large Spatial Databases with Noise." KDD-96.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::label::{ClusterResult, Label};
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::index::{check_radius, GridIndex, IndexKind, LinearScan, Metric, NeighborIndex};
use crate::point::{Coordinate, PointSet};

/// Parameters of a DBSCAN run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbscanParams {
    /// Neighborhood radius (inclusive). Must be positive and finite.
    pub eps: f64,
    /// Minimum inclusive neighborhood size for a core point. Must be at least 1.
    pub min_pts: usize,
    /// Distance used for neighborhoods.
    pub metric: Metric,
    /// Neighbor index built by [`Dbscan::fit`].
    pub index: IndexKind,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 0.5,
            min_pts: 5,
            metric: Metric::default(),
            index: IndexKind::default(),
        }
    }
}

impl DbscanParams {
    /// Fails if `eps` is not a positive finite number or `min_pts` is zero.
    pub fn validate(&self) -> Result<()> {
        check_radius(self.eps)?;
        if self.min_pts == 0 {
            return Err(Error::InvalidParameters {
                name: "min_pts",
                message: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// DBSCAN clustering algorithm.
#[derive(Debug, Clone, Default)]
pub struct Dbscan {
    params: DbscanParams,
}

impl Dbscan {
    /// Create a new DBSCAN clusterer.
    ///
    /// # Arguments
    ///
    /// * `eps` - Maximum distance between two points to be neighbors.
    /// * `min_pts` - Minimum neighborhood size, counting the point itself.
    ///
    /// # Typical Values
    ///
    /// - `eps`: the knee of a sorted k-distance plot, with k = `min_pts - 1`.
    /// - `min_pts`: 4 is the usual choice for 2-D data. `1` makes every point core.
    pub fn new(eps: f64, min_pts: usize) -> Self {
        Self {
            params: DbscanParams {
                eps,
                min_pts,
                ..DbscanParams::default()
            },
        }
    }

    /// Create a clusterer from a full parameter set, e.g. one read from config.
    pub fn from_params(params: DbscanParams) -> Self {
        Self { params }
    }

    /// The parameters [`Dbscan::fit`] will run with.
    pub fn params(&self) -> &DbscanParams {
        &self.params
    }

    /// Set eps (neighborhood radius).
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.params.eps = eps;
        self
    }

    /// Set minimum points for core classification.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.params.min_pts = min_pts;
        self
    }

    /// Set the distance used for neighborhoods.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.params.metric = metric;
        self
    }

    /// Set the neighbor index built by [`Dbscan::fit`].
    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.params.index = index;
        self
    }

    /// Cluster `points` with the configured metric and neighbor index.
    ///
    /// An empty point set yields an empty result. Parameters are checked before
    /// anything else, and non-finite coordinates are rejected while the index is
    /// built, so a failed run never produces partial labels.
    pub fn fit<T: Coordinate>(&self, points: &PointSet<T>) -> Result<ClusterResult> {
        self.params.validate()?;
        if points.is_empty() {
            debug!("empty point set, nothing to cluster");
            return Ok(ClusterResult::default());
        }
        check_len(points.len())?;

        let DbscanParams {
            eps, metric, index, ..
        } = self.params;
        let kind = index.resolve(points.len());
        debug!(index = ?kind, ?metric, "building neighbor index");
        match kind {
            IndexKind::Grid => self.fit_with_index(&GridIndex::new(points, eps, metric)?),
            IndexKind::Linear | IndexKind::Auto => {
                self.fit_with_index(&LinearScan::new(points, metric)?)
            }
        }
    }

    /// Cluster the points behind an already built neighbor index.
    pub fn fit_with_index<I>(&self, index: &I) -> Result<ClusterResult>
    where
        I: NeighborIndex + ?Sized,
    {
        self.params.validate()?;
        let n = index.len();
        check_len(n)?;

        let DbscanParams { eps, min_pts, .. } = self.params;
        debug!(points = n, eps, min_pts, "dbscan run started");

        let mut labels = vec![Label::Unvisited; n];
        let mut core = vec![false; n];
        // Set when a point is pushed on the work-list (or seeds a cluster). Every
        // clustered point has it, so it doubles as the "already claimed" check.
        let mut queued = vec![false; n];
        let mut neighbors: Vec<usize> = Vec::new();
        let mut to_process: Vec<usize> = Vec::new();
        let mut cluster_id: u32 = 0;

        for point_idx in 0..n {
            if labels[point_idx] != Label::Unvisited {
                continue;
            }

            index.query_into(point_idx, eps, &mut neighbors)?;
            if neighbors.len() < min_pts {
                // Provisional: may become a border point of a later cluster.
                labels[point_idx] = Label::Noise;
                continue;
            }

            let cluster = Label::Cluster(cluster_id);
            labels[point_idx] = cluster;
            core[point_idx] = true;
            queued[point_idx] = true;
            enqueue(&neighbors, &mut queued, &mut to_process);

            let mut size = 1usize;
            while let Some(idx) = to_process.pop() {
                let previous = labels[idx];
                labels[idx] = cluster;
                size += 1;

                // Former noise is a border point: claimed, never expanded.
                if previous != Label::Unvisited {
                    continue;
                }

                index.query_into(idx, eps, &mut neighbors)?;
                if neighbors.len() >= min_pts {
                    core[idx] = true;
                    enqueue(&neighbors, &mut queued, &mut to_process);
                }
            }

            trace!(cluster = cluster_id, seed = point_idx, size, "cluster expanded");
            cluster_id += 1;
        }

        let result = ClusterResult::new(labels, core, cluster_id as usize);
        debug!(
            clusters = result.num_clusters(),
            noise = result.noise_count(),
            "dbscan run finished"
        );
        Ok(result)
    }
}

fn enqueue(neighbors: &[usize], queued: &mut [bool], to_process: &mut Vec<usize>) {
    for &idx in neighbors {
        if !queued[idx] {
            queued[idx] = true;
            to_process.push(idx);
        }
    }
}

fn check_len(n: usize) -> Result<()> {
    if n > i32::MAX as usize {
        return Err(Error::TooManyPoints { len: n });
    }
    Ok(())
}

impl Clustering for Dbscan {
    fn fit_predict<T: Coordinate>(&self, points: &PointSet<T>) -> Result<Vec<Label>> {
        self.fit(points).map(ClusterResult::into_labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn ids(result: &ClusterResult) -> Vec<i32> {
        result.to_i32_labels()
    }

    #[test]
    fn test_dbscan_two_clusters() {
        let points = PointSet::from_xy([
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (50.0, 50.0),
            (50.0, 51.0),
            (51.0, 50.0),
            (51.0, 51.0),
        ]);

        let result = Dbscan::new(2.0, 3).fit(&points).unwrap();

        assert_eq!(ids(&result), vec![0, 0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(result.num_clusters(), 2);
        assert_eq!(result.noise_count(), 0);
    }

    #[test]
    fn test_dbscan_with_noise() {
        let points = PointSet::from_xy([
            // Cluster 1
            (0.0, 0.0),
            (0.1, 0.0),
            (0.0, 0.1),
            (0.1, 0.1),
            // Outlier
            (100.0, 100.0),
            // Cluster 2
            (5.0, 5.0),
            (5.1, 5.0),
            (5.0, 5.1),
            (5.1, 5.1),
        ]);

        let dbscan = Dbscan::new(0.3, 3);
        let result = dbscan.fit(&points).unwrap();
        assert_eq!(ids(&result), vec![0, 0, 0, 0, -1, 1, 1, 1, 1]);

        let labels = dbscan.fit_predict_with_noise(&points).unwrap();
        assert_eq!(
            labels,
            vec![Some(0), Some(0), Some(0), Some(0), None, Some(1), Some(1), Some(1), Some(1)]
        );
    }

    #[test]
    fn test_dbscan_single_point() {
        let points = PointSet::from_xy([(0.0, 0.0)]);
        let result = Dbscan::new(1.0, 1).fit(&points).unwrap();
        assert_eq!(result.labels(), &[Label::Cluster(0)]);
        assert!(result.is_core(0));
    }

    #[test]
    fn test_dbscan_all_noise() {
        let points = PointSet::from_xy([(0.0, 0.0), (100.0, 100.0)]);
        let result = Dbscan::new(1.0, 2).fit(&points).unwrap();
        assert_eq!(result.labels(), &[Label::Noise, Label::Noise]);
        assert_eq!(result.num_clusters(), 0);
        assert!(result.core_indices().is_empty());
    }

    #[test]
    fn test_min_pts_one_makes_every_point_core() {
        let points = PointSet::from_xy([(0.0, 0.0), (10.0, 0.0), (0.5, 0.0)]);
        let result = Dbscan::new(1.0, 1).fit(&points).unwrap();
        assert_eq!(ids(&result), vec![0, 1, 0]);
        assert_eq!(result.core_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_noise_upgraded_to_border() {
        // Point 0 is visited first and looks sparse; point 1 is core and claims it.
        let points = PointSet::from_xy([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.5, 0.5)]);
        let result = Dbscan::new(1.0, 3).fit(&points).unwrap();

        assert_eq!(ids(&result), vec![0, 0, 0, 0]);
        assert!(!result.is_core(0));
        assert_eq!(result.core_indices(), vec![1, 2, 3]);
    }

    #[test]
    fn test_border_point_keeps_first_cluster() {
        // Point 0 sits between two clusters that each have a single core point.
        let points = PointSet::from_xy([
            (1.0, 0.0),
            (0.0, 0.0),
            (-0.5, 0.0),
            (-1.0, 0.0),
            (2.0, 0.0),
            (2.5, 0.0),
            (3.0, 0.0),
        ]);
        let result = Dbscan::new(1.0, 4).fit(&points).unwrap();

        assert_eq!(ids(&result), vec![0, 0, 0, 0, 1, 1, 1]);
        assert_eq!(result.core_indices(), vec![1, 4]);
    }

    #[test]
    fn test_dbscan_chain() {
        // Chain of points; expansion must follow it through every core point.
        let points = PointSet::from_xy((0..10).map(|i| (f64::from(i) * 0.3, 0.0)));
        let result = Dbscan::new(0.5, 2).fit(&points).unwrap();
        assert_eq!(ids(&result), vec![0; 10]);
        assert_eq!(result.num_clusters(), 1);
    }

    #[test]
    fn test_dbscan_empty() {
        let points = PointSet::<f64>::default();
        let result = Dbscan::new(0.5, 3).fit(&points).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.num_clusters(), 0);
    }

    #[test]
    fn test_dbscan_invalid_params() {
        let points = PointSet::from_xy([(0.0, 0.0)]);

        assert_eq!(
            Dbscan::new(0.0, 3).fit(&points),
            Err(Error::InvalidRadius { eps: 0.0 })
        );
        assert!(Dbscan::new(-1.0, 3).fit(&points).is_err());
        assert!(Dbscan::new(f64::NAN, 3).fit(&points).is_err());
        assert_eq!(
            Dbscan::new(0.5, 0).fit(&points),
            Err(Error::InvalidParameters {
                name: "min_pts",
                message: "must be at least 1",
            })
        );

        // Parameters are validated even when there is nothing to cluster.
        assert!(Dbscan::new(0.0, 3).fit(&PointSet::<f64>::default()).is_err());
    }

    #[test]
    fn test_dbscan_rejects_non_finite() {
        let points = PointSet::from_xy([(0.0, 0.0), (0.1, 0.0), (f64::INFINITY, 0.0)]);
        for kind in [IndexKind::Linear, IndexKind::Grid] {
            assert_eq!(
                Dbscan::new(1.0, 2).with_index(kind).fit(&points),
                Err(Error::InvalidInput { index: 2 })
            );
        }
    }

    #[test]
    fn test_integer_pixels() {
        let points = PointSet::from_xy([
            (10u32, 10u32),
            (11, 10),
            (10, 11),
            (4_000_000_000, 4_000_000_000),
            (4_000_000_001, 4_000_000_000),
            (4_000_000_000, 4_000_000_001),
            (2_000_000_000, 7),
        ]);
        let result = Dbscan::new(1.0, 3).fit(&points).unwrap();
        assert_eq!(ids(&result), vec![0, 0, 0, 1, 1, 1, -1]);
    }

    #[test]
    fn test_integer_radius_boundary_is_exact() {
        // The pair is sqrt(2^60 + 1) apart, just beyond eps = 2^30.
        let points = PointSet::from_xy([(0u32, 0u32), (1 << 30, 1)]);
        for index in [IndexKind::Linear, IndexKind::Grid] {
            let result = Dbscan::new(f64::from(1u32 << 30), 2)
                .with_index(index)
                .fit(&points)
                .unwrap();
            assert_eq!(ids(&result), vec![-1, -1], "{index:?}");
        }
    }

    #[test]
    fn test_manhattan_metric() {
        // Diagonal neighbors are sqrt(2) apart in L2 but 2 apart in L1.
        let points = PointSet::from_xy([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);

        let l2 = Dbscan::new(1.5, 2).fit(&points).unwrap();
        assert_eq!(l2.num_clusters(), 1);

        let l1 = Dbscan::new(1.5, 2)
            .with_metric(Metric::Manhattan)
            .fit(&points)
            .unwrap();
        assert_eq!(l1.num_clusters(), 0);
    }

    #[test]
    fn test_grid_and_linear_agree() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pairs: Vec<(f64, f64)> = Vec::new();
        for center in [(0.0, 0.0), (8.0, 3.0), (-6.0, 7.0)] {
            for _ in 0..150 {
                pairs.push((
                    center.0 + rng.random_range(-2.0..2.0),
                    center.1 + rng.random_range(-2.0..2.0),
                ));
            }
        }
        for _ in 0..60 {
            pairs.push((rng.random_range(-15.0..15.0), rng.random_range(-15.0..15.0)));
        }
        let points = PointSet::from_xy(pairs);

        let linear = Dbscan::new(0.6, 4)
            .with_index(IndexKind::Linear)
            .fit(&points)
            .unwrap();
        let grid = Dbscan::new(0.6, 4)
            .with_index(IndexKind::Grid)
            .fit(&points)
            .unwrap();

        assert_eq!(linear, grid);
        assert!(linear.num_clusters() >= 3);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut rng = StdRng::seed_from_u64(3);
        let points = PointSet::from_xy(
            (0..300).map(|_| (rng.random_range(0.0..20.0), rng.random_range(0.0..20.0))),
        );

        let dbscan = Dbscan::new(1.2, 4);
        let first = dbscan.fit(&points).unwrap();
        let second = dbscan.fit(&points).unwrap();
        assert_eq!(first.to_i32_labels(), second.to_i32_labels());
    }

    #[test]
    fn test_params_from_config() {
        let params: DbscanParams =
            serde_json::from_str(r#"{ "eps": 2.0, "min_pts": 3, "index": "grid" }"#).unwrap();
        assert_eq!(params.metric, Metric::Euclidean);
        assert_eq!(params.index, IndexKind::Grid);

        let dbscan = Dbscan::from_params(params);
        assert_eq!(dbscan.params().eps, 2.0);

        let defaults: DbscanParams = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, DbscanParams::default());
    }

    #[test]
    fn test_fit_with_custom_index() {
        let points = PointSet::from_xy([(0.0, 0.0), (0.2, 0.0), (0.4, 0.0), (9.0, 9.0)]);
        let index = GridIndex::new(&points, 5.0, Metric::Euclidean).unwrap();
        let result = Dbscan::new(0.25, 2).fit_with_index(&index).unwrap();
        assert_eq!(ids(&result), vec![0, 0, 0, -1]);
    }
}
