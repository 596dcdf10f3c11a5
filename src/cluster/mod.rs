//! Density-based clustering of 2-D points.
//!
//! ## Why density
//!
//! Centroid methods (k-means) assume roughly round clusters and need the
//! cluster count up front. Density clustering instead grows clusters through
//! regions where points are packed closely, so clusters can take any shape,
//! their number falls out of the data, and isolated points are reported as
//! noise rather than forced into the nearest group.
//!
//! ## DBSCAN
//!
//! Two parameters drive everything:
//!
//! - `eps`: neighborhood radius (inclusive).
//! - `min_pts`: how many points, counting itself, a point needs within `eps`
//!   to be a core point.
//!
//! See [`Dbscan`] for the region-growing procedure and its label rules.
//!
//! ## Results
//!
//! A run yields a [`ClusterResult`] holding one [`Label`] per input point
//! (`Noise` or `Cluster(id)`, ids numbered in discovery order from 0) and the
//! core-point flags. [`ClusterResult::to_i32_labels`] gives the flat encoding
//! with `-1` for noise, and [`evaluate`] scores such a labeling against a
//! reference one.
//!
//! ## Usage
//!
//! ```rust
//! use dbscan2d::cluster::{Clustering, Dbscan, Label};
//! use dbscan2d::PointSet;
//!
//! let points = PointSet::from_xy([
//!     (0.0, 0.0),
//!     (0.1, 0.1),
//!     (10.0, 10.0),
//!     (10.1, 10.1),
//!     (50.0, 0.0),
//! ]);
//!
//! let result = Dbscan::new(0.5, 2).fit(&points).unwrap();
//! assert_eq!(result.to_i32_labels(), vec![0, 0, 1, 1, -1]);
//!
//! // Noise as `None`.
//! let labels = Dbscan::new(0.5, 2).fit_predict_with_noise(&points).unwrap();
//! assert_eq!(labels[4], None);
//! assert_eq!(result.labels()[2], Label::Cluster(1));
//! ```

mod compare;
mod dbscan;
mod label;
mod traits;

pub use compare::{count_clusters, count_noise, evaluate, LabelComparison};
pub use dbscan::{Dbscan, DbscanParams};
pub use label::{ClusterResult, Label, NOISE};
pub use traits::Clustering;
