//! Density-based clustering of 2-D points.
//!
//! `dbscan2d` labels every point of an in-memory point set as a member of a
//! cluster or as noise, following DBSCAN's density-reachability rules.
//!
//! - [`point`]: coordinates (`f64`, `f32`, `u32`, `i32`), points and point sets
//! - [`index`]: fixed-radius neighbor search (linear scan, uniform grid)
//! - [`cluster`]: the DBSCAN clusterer, its results, and labeling comparison
//!
//! The crate logs through `tracing` and never installs a subscriber.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod index;
pub mod point;

pub use cluster::{ClusterResult, Clustering, Dbscan, DbscanParams, Label, NOISE};
pub use error::{Error, Result};
pub use index::{GridIndex, IndexKind, LinearScan, Metric, NeighborIndex};
pub use point::{Coordinate, Point, PointSet};
