use super::{check_point, check_radius, Metric, NeighborIndex};
use crate::error::Result;
use crate::point::{Coordinate, PointSet};

type CellKey = (i64, i64);

/// Uniform grid over the bounding box of a point set.
///
/// Occupied cells are kept as a sorted key list with CSR-style offsets into a
/// point-index array grouped by cell, so memory is proportional to the number
/// of points rather than the area of the bounding box.
#[derive(Debug, Clone)]
pub struct GridIndex<'a, T> {
    points: &'a PointSet<T>,
    metric: Metric,
    cell_size: f64,
    origin: [f64; 2],
    /// Occupied cells, ascending.
    keys: Vec<CellKey>,
    /// `ordered[offsets[c]..offsets[c + 1]]` are the points of cell `keys[c]`.
    offsets: Vec<usize>,
    ordered: Vec<usize>,
}

impl<'a, T: Coordinate> GridIndex<'a, T> {
    /// Bucket `points` into square cells of side `cell_size`.
    ///
    /// Any positive cell size gives correct answers; queries are cheapest when
    /// it equals the radius they will be asked for.
    pub fn new(points: &'a PointSet<T>, cell_size: f64, metric: Metric) -> Result<Self> {
        check_radius(cell_size)?;
        points.check_finite()?;

        let origin = points.bounds().map_or([0.0, 0.0], |(lo, _)| lo);
        let cells: Vec<CellKey> = points
            .iter()
            .map(|p| cell_key(p.to_f64(), origin, cell_size))
            .collect();

        // Stable sort keeps point indices ascending within a cell.
        let mut ordered: Vec<usize> = (0..points.len()).collect();
        ordered.sort_by_key(|&idx| cells[idx]);

        let mut keys: Vec<CellKey> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();
        for (pos, &idx) in ordered.iter().enumerate() {
            if keys.last() != Some(&cells[idx]) {
                keys.push(cells[idx]);
                offsets.push(pos);
            }
        }
        offsets.push(ordered.len());

        Ok(Self {
            points,
            metric,
            cell_size,
            origin,
            keys,
            offsets,
            ordered,
        })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    fn cell_points(&self, cell: usize) -> &[usize] {
        &self.ordered[self.offsets[cell]..self.offsets[cell + 1]]
    }
}

#[inline]
fn cell_key(p: [f64; 2], origin: [f64; 2], cell_size: f64) -> CellKey {
    (
        ((p[0] - origin[0]) / cell_size).floor() as i64,
        ((p[1] - origin[1]) / cell_size).floor() as i64,
    )
}

impl<T: Coordinate> NeighborIndex for GridIndex<'_, T> {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn query_into(&self, point_idx: usize, eps: f64, out: &mut Vec<usize>) -> Result<()> {
        check_radius(eps)?;
        check_point(point_idx, self.points.len())?;

        out.clear();
        let center = self.points[point_idx];
        let metric = self.metric;
        let [cx, cy] = center.to_f64();
        let (x0, y0) = cell_key([cx - eps, cy - eps], self.origin, self.cell_size);
        let (x1, y1) = cell_key([cx + eps, cy + eps], self.origin, self.cell_size);

        // The cell function is monotone, so every point whose coordinates lie in
        // the query square falls in the [x0, x1] x [y0, y1] block.
        let block = (x1 as f64 - x0 as f64 + 1.0) * (y1 as f64 - y0 as f64 + 1.0);
        if block >= self.keys.len() as f64 {
            out.extend(
                self.points
                    .iter()
                    .enumerate()
                    .filter(|&(_, &other)| metric.within(center, other, eps))
                    .map(|(idx, _)| idx),
            );
            return Ok(());
        }

        for col in x0..=x1 {
            let start = self.keys.partition_point(|&key| key < (col, y0));
            for (cell, &key) in self.keys.iter().enumerate().skip(start) {
                if key > (col, y1) {
                    break;
                }
                out.extend(
                    self.cell_points(cell)
                        .iter()
                        .copied()
                        .filter(|&idx| metric.within(center, self.points[idx], eps)),
                );
            }
        }
        out.sort_unstable();
        Ok(())
    }
}
