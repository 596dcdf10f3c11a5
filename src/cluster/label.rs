use serde::{Deserialize, Serialize};

/// Integer label written for noise points in the flat `i32` encoding.
pub const NOISE: i32 = -1;

/// Cluster assignment of a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Not yet looked at. Never present in a finished [`ClusterResult`].
    Unvisited,
    /// Not density-reachable from any core point.
    Noise,
    /// Member of the cluster with this id. Ids start at 0 and follow discovery order.
    Cluster(u32),
}

impl Label {
    pub fn is_noise(self) -> bool {
        self == Label::Noise
    }

    /// Cluster id, if any.
    pub fn cluster(self) -> Option<usize> {
        match self {
            Label::Cluster(id) => Some(id as usize),
            _ => None,
        }
    }

    /// Flat encoding: [`NOISE`] for noise, the cluster id otherwise.
    ///
    /// `Unvisited` also maps to [`NOISE`]; it only exists mid-run.
    pub fn as_i32(self) -> i32 {
        match self {
            // Ids are bounded by the point count, which `Dbscan::fit` caps at i32::MAX.
            Label::Cluster(id) => id as i32,
            Label::Noise | Label::Unvisited => NOISE,
        }
    }
}

/// Output of a clustering run: one terminal label per input point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClusterResult {
    labels: Vec<Label>,
    core: Vec<bool>,
    num_clusters: usize,
}

impl ClusterResult {
    pub(crate) fn new(labels: Vec<Label>, core: Vec<bool>, num_clusters: usize) -> Self {
        debug_assert_eq!(labels.len(), core.len());
        debug_assert!(!labels.contains(&Label::Unvisited));
        Self {
            labels,
            core,
            num_clusters,
        }
    }

    /// Labels, indexed like the input point set.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<Label> {
        self.labels
    }

    /// Labels in the flat `i32` encoding (`-1` = noise), indexed like the input.
    pub fn to_i32_labels(&self) -> Vec<i32> {
        self.labels.iter().map(|l| l.as_i32()).collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|l| l.is_noise()).count()
    }

    /// Whether point `idx` is a core point. `false` for out-of-range indices.
    pub fn is_core(&self, idx: usize) -> bool {
        self.core.get(idx).copied().unwrap_or(false)
    }

    /// Indices of all core points, ascending.
    pub fn core_indices(&self) -> Vec<usize> {
        self.core
            .iter()
            .enumerate()
            .filter_map(|(idx, &core)| core.then_some(idx))
            .collect()
    }

    /// Number of points per cluster, indexed by cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_clusters];
        for id in self.labels.iter().filter_map(|l| l.cluster()) {
            sizes[id] += 1;
        }
        sizes
    }

    /// Member indices per cluster, indexed by cluster id.
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut members = vec![Vec::new(); self.num_clusters];
        for (idx, id) in self
            .labels
            .iter()
            .enumerate()
            .filter_map(|(idx, l)| l.cluster().map(|id| (idx, id)))
        {
            members[id].push(idx);
        }
        members
    }
}
