//! 3D DDA grid traversal.
//!
//! Implements "A Fast Voxel Traversal Algorithm for Ray Tracing"
//! (Amanatides, Woo): cells are visited in order of entry distance along
//! the ray, each step crossing exactly one cell face.

use std::iter::FusedIterator;

use log::trace;

use crate::grid::{CellCoord, GridDims};
use crate::Ray;

/// Iterator over the cells a ray passes through, in ray order.
///
/// Yields nothing for rays that never enter the grid. Stops at the first
/// step that leaves it.
#[derive(Debug, Clone)]
pub struct VoxelWalk {
    dims: GridDims,
    cell: CellCoord,
    step: [i64; 3],
    /// Ray distance (grid units) to the next face crossing per axis.
    t_max: [f64; 3],
    /// Ray distance (grid units) to cross one whole cell per axis.
    t_delta: [f64; 3],
}

impl VoxelWalk {
    /// Start a walk for `ray` through the grid described by `dims`.
    pub fn new(dims: &GridDims, ray: &Ray) -> Self {
        let fixed = ray.with_fixed_direction();

        let start = if dims.bounds.contains_point(&fixed.origin) {
            fixed.origin
        } else {
            match fixed.intersect_aabb(&dims.bounds) {
                Some((t_enter, _)) => fixed.at(t_enter),
                None => {
                    trace!("ray from {:?} misses grid bounds", ray.origin);
                    return Self::exhausted(dims);
                }
            }
        };

        let cell = dims.clamp_cell(dims.cell_of(&start));
        let local = dims.to_grid_local(&start);

        let mut step = [0i64; 3];
        let mut t_max = [0.0f64; 3];
        let mut t_delta = [0.0f64; 3];
        for axis in 0..3 {
            let d = fixed.direction[axis];
            t_delta[axis] = 1.0 / d.abs();
            // Distance to the face of the current cell in the direction of travel.
            let (s, gap) = if d > 0.0 {
                (1, cell[axis] as f64 + 1.0 - local[axis])
            } else {
                (-1, local[axis] - cell[axis] as f64)
            };
            step[axis] = s;
            t_max[axis] = gap.max(0.0) * t_delta[axis];
        }

        Self {
            dims: *dims,
            cell: [cell[0] as i64, cell[1] as i64, cell[2] as i64],
            step,
            t_max,
            t_delta,
        }
    }

    fn exhausted(dims: &GridDims) -> Self {
        Self {
            dims: *dims,
            cell: [-1, -1, -1],
            step: [0; 3],
            t_max: [f64::INFINITY; 3],
            t_delta: [f64::INFINITY; 3],
        }
    }

    /// Axis whose next face crossing comes first.
    ///
    /// Fixed two-level comparison: x against y first, then the winner
    /// against z. Ties go to the later axis of each comparison.
    fn next_axis(&self) -> usize {
        let t = &self.t_max;
        if t[0] < t[1] {
            if t[0] < t[2] {
                0
            } else {
                2
            }
        } else if t[1] < t[2] {
            1
        } else {
            2
        }
    }
}

impl Iterator for VoxelWalk {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if !self.dims.contains_cell(self.cell) {
            return None;
        }
        let current = [
            self.cell[0] as usize,
            self.cell[1] as usize,
            self.cell[2] as usize,
        ];
        let axis = self.next_axis();
        self.cell[axis] += self.step[axis];
        self.t_max[axis] += self.t_delta[axis];
        Some(current)
    }
}

impl FusedIterator for VoxelWalk {}
