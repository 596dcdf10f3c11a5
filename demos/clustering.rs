//! DBSCAN on a small 2D dataset, with both neighbor indexes.
//!
//! Run with `RUST_LOG=dbscan2d=trace` to see the per-cluster log lines.

use dbscan2d::cluster::evaluate;
use dbscan2d::{Dbscan, IndexKind, Label, PointSet};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three well-separated clusters in 2D plus two stray points.
    let points = PointSet::from_xy([
        // Cluster A (near origin)
        (0.0, 0.0),
        (0.1, 0.2),
        (0.2, 0.1),
        (-0.1, 0.1),
        // Cluster B (near (5, 5))
        (5.0, 5.0),
        (5.1, 4.9),
        (4.9, 5.1),
        (5.2, 5.2),
        // Stray points
        (2.5, 2.5),
        (20.0, -3.0),
        // Cluster C (near (10, 0))
        (10.0, 0.0),
        (10.1, 0.1),
        (9.9, -0.1),
        (10.2, 0.2),
    ]);

    // --- DBSCAN (eps=0.5, min_pts=3), linear scan ---
    let linear = Dbscan::new(0.5, 3)
        .with_index(IndexKind::Linear)
        .fit(&points)
        .unwrap();
    println!("=== DBSCAN (eps=0.5, min_pts=3, linear scan) ===");
    for (i, (label, p)) in linear.labels().iter().zip(points.iter()).enumerate() {
        let tag = match label {
            Label::Cluster(id) => format!("cluster {id}"),
            _ => "NOISE".to_string(),
        };
        let kind = if linear.is_core(i) { "core" } else { "" };
        println!("  point {:2} ({:5.1}, {:5.1}) => {} {}", i, p.x, p.y, tag, kind);
    }
    println!(
        "  {} clusters, {} noise, sizes {:?}",
        linear.num_clusters(),
        linear.noise_count(),
        linear.cluster_sizes()
    );

    // --- Same run on a grid index ---
    let grid = Dbscan::new(0.5, 3)
        .with_index(IndexKind::Grid)
        .fit(&points)
        .unwrap();
    let cmp = evaluate(&grid.to_i32_labels(), &linear.to_i32_labels()).unwrap();
    println!("\n=== Grid index vs linear scan ===");
    println!(
        "  adjusted rand {:.3}, remapped accuracy {:.3}, passed: {}",
        cmp.adjusted_rand,
        cmp.remapped_accuracy,
        cmp.passed()
    );
}
