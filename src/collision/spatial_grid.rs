// Uniform spatial hash used as the broad phase of the collision manager.

use std::collections::HashMap;

use crate::collision::AABB;
use crate::error::{PhysicsError, PhysicsResult};
use crate::math::vec2::Vec2;
use crate::shapes::Shape;

/// Integer cell coordinate `(col, row)`.
pub type CellKey = (i32, i32);

/// An unbounded uniform grid mapping cell coordinates to the colliders whose
/// AABB overlaps the cell.
///
/// Entries are plain indices into the caller's collider list. The buckets are
/// kept between ticks and only emptied by [`SpatialGrid::clear`], so a
/// steady-state simulation does not reallocate them.
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    inv_cell_size: f64, // 1.0 / cell_size, cached for performance
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    /// Creates a new SpatialGrid.
    ///
    /// # Arguments
    /// * `cell_size` - The width/height of each grid cell. Must be positive.
    pub fn new(cell_size: f64) -> PhysicsResult<Self> {
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(PhysicsError::InvalidCellSize(cell_size));
        }
        log::debug!("creating spatial grid: cell_size={}", cell_size);
        Ok(SpatialGrid {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    // --- Helper Methods ---

    /// Converts world coordinates to grid cell indices (col, row).
    #[inline]
    fn get_cell_indices(&self, point: Vec2) -> CellKey {
        // `as` saturates at the i32 range for far-away or non-finite points
        let col = (point.x * self.inv_cell_size).floor() as i32;
        let row = (point.y * self.inv_cell_size).floor() as i32;
        (col, row)
    }

    fn insert_aabb(&mut self, index: usize, aabb: &AABB) {
        let (min_col, min_row) = self.get_cell_indices(aabb.min);
        let (max_col, max_row) = self.get_cell_indices(aabb.max);
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                self.cells.entry((col, row)).or_default().push(index);
            }
        }
    }

    // --- Public API Methods ---

    /// Empties every bucket, keeping their allocations.
    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    /// Inserts a collider's shape into every cell its AABB overlaps.
    ///
    /// Groups are flattened: each member is inserted on its own under the
    /// group's index, so a long composite wall does not occupy the cells of
    /// its whole bounding box.
    ///
    /// # Arguments
    /// * `index` - The collider's index in the caller's collider list.
    /// * `shape` - The collider's current geometry.
    pub fn insert(&mut self, index: usize, shape: &Shape) {
        match shape {
            Shape::Group(group) => {
                for child in group.children() {
                    self.insert(index, child);
                }
            }
            other => {
                if let Some(aabb) = other.aabb() {
                    self.insert_aabb(index, &aabb);
                }
            }
        }
    }

    /// Collects every entry in the 3x3 block of cells around the cell that
    /// holds `shape.position()`, without duplicates, into `out`.
    ///
    /// Colliders whose buckets lie two or more cells away are not returned
    /// even if their AABB overlaps the query shape.
    pub fn query_neighbors_into(&self, shape: &Shape, out: &mut Vec<usize>) {
        out.clear();
        let (col, row) = self.get_cell_indices(shape.position());
        for d_row in -1..=1 {
            for d_col in -1..=1 {
                let key = (col.saturating_add(d_col), row.saturating_add(d_row));
                if let Some(bucket) = self.cells.get(&key) {
                    for &index in bucket {
                        if !out.contains(&index) {
                            out.push(index);
                        }
                    }
                }
            }
        }
    }

    /// Allocating convenience wrapper over [`SpatialGrid::query_neighbors_into`].
    pub fn query_neighbors(&self, shape: &Shape) -> Vec<usize> {
        let mut out = Vec::new();
        self.query_neighbors_into(shape, &mut out);
        out
    }

    /// Occupied cells and their entries, for debug visualization.
    pub fn cells(&self) -> impl Iterator<Item = (CellKey, &[usize])> + '_ {
        self.cells
            .iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(key, bucket)| (*key, bucket.as_slice()))
    }

    /// Number of non-empty cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.values().filter(|bucket| !bucket.is_empty()).count()
    }
}
