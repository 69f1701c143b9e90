//! Grid dimensioning: world box, cell size and per-axis cell counts.

use voxgrid_math::{axis_name, is_finite, snap_down, snap_up, Point3, Vec3};
use voxgrid_mesh::{Aabb3, Triangle};

use crate::settings::{CellSizing, SceneSettings};
use crate::{GridError, Result};

/// Integer cell coordinate that may lie outside the grid.
pub type CellCoord = [i64; 3];

/// Size and placement of a uniform grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDims {
    /// World box, snapped to multiples of `cell_size`.
    pub bounds: Aabb3,
    /// Edge length of every cell.
    pub cell_size: f64,
    /// Number of cells along x, y and z.
    pub counts: [usize; 3],
}

impl GridDims {
    /// Size a grid around `triangles` and `anchor`.
    ///
    /// The anchor is included in the bounds so that rays cast from it (a
    /// camera position, typically) start inside the grid.
    pub fn compute(
        anchor: &Point3,
        triangles: &[Triangle],
        settings: &SceneSettings,
    ) -> Result<Self> {
        settings.validate()?;
        if triangles.is_empty() {
            return Err(GridError::EmptyMesh);
        }
        if !is_finite(anchor) {
            return Err(GridError::NonFiniteAnchor);
        }

        let mut raw = Aabb3::new(*anchor, *anchor);
        for (index, tri) in triangles.iter().enumerate() {
            if !tri.is_finite() {
                return Err(GridError::NonFiniteVertex { index });
            }
            for v in &tri.v {
                raw.include_point(v);
            }
        }

        let extent = raw.extent();
        let axis = match settings.sizing {
            CellSizing::ReferenceX => 0,
            CellSizing::LongestAxis => extent.imax(),
        };
        let reference = extent[axis];
        let cell_size = reference / settings.cells_on_axis as f64;
        if !(reference > 0.0 && cell_size > 0.0 && cell_size.is_finite()) {
            return Err(GridError::DegenerateExtent {
                axis: axis_name(axis),
                extent: reference,
            });
        }

        let bounds = Aabb3::new(snap_down(&raw.min, cell_size), snap_up(&raw.max, cell_size));
        let scaled: Vec3 = bounds.extent() / cell_size;

        let mut counts = [1usize; 3];
        let mut requested: u128 = 1;
        for (i, count) in counts.iter_mut().enumerate() {
            let n = scaled[i].round().max(1.0);
            requested = requested.saturating_mul(n as u128);
            if requested > settings.max_voxels as u128 {
                return Err(GridError::TooManyVoxels {
                    requested,
                    limit: settings.max_voxels,
                });
            }
            *count = n as usize;
        }

        Ok(Self {
            bounds,
            cell_size,
            counts,
        })
    }

    /// Total number of cells.
    pub fn voxel_count(&self) -> usize {
        self.counts.iter().product()
    }

    /// Express a world point in grid units: `(p - min) / cell_size`.
    pub fn to_grid_local(&self, p: &Point3) -> Vec3 {
        (p - self.bounds.min) / self.cell_size
    }

    /// Cell containing `p`, without clamping to the grid.
    pub fn cell_of(&self, p: &Point3) -> CellCoord {
        let local = self.to_grid_local(p);
        [
            local.x.floor() as i64,
            local.y.floor() as i64,
            local.z.floor() as i64,
        ]
    }

    /// True if `cell` addresses a voxel of this grid.
    pub fn contains_cell(&self, cell: CellCoord) -> bool {
        cell.iter()
            .zip(self.counts)
            .all(|(&c, n)| c >= 0 && (c as u64) < n as u64)
    }

    /// Clamp a cell coordinate into `[0, n - 1]` on every axis.
    pub fn clamp_cell(&self, cell: CellCoord) -> [usize; 3] {
        let mut out = [0usize; 3];
        for i in 0..3 {
            out[i] = cell[i].clamp(0, self.counts[i] as i64 - 1) as usize;
        }
        out
    }

    /// World-space box of a cell.
    pub fn cell_bounds(&self, cell: [usize; 3]) -> Aabb3 {
        let lo = Vec3::new(cell[0] as f64, cell[1] as f64, cell[2] as f64) * self.cell_size;
        let min = self.bounds.min + lo;
        let max = min + Vec3::repeat(self.cell_size);
        Aabb3::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube_mesh() -> Vec<Triangle> {
        vec![
            Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            Triangle::from_arrays([1.0, 1.0, 1.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0]),
        ]
    }

    #[test]
    fn test_cubic_mesh_four_cells() {
        let dims = GridDims::compute(
            &Point3::new(0.5, 0.5, 0.5),
            &unit_cube_mesh(),
            &SceneSettings::with_cells(4),
        )
        .unwrap();
        assert_eq!(dims.counts, [4, 4, 4]);
        assert!((dims.cell_size - 0.25).abs() < 1e-12);
        assert_eq!(dims.bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(dims.bounds.max, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(dims.voxel_count(), 64);
    }

    #[test]
    fn test_anchor_extends_bounds() {
        let dims = GridDims::compute(
            &Point3::new(-1.0, 0.5, 0.5),
            &unit_cube_mesh(),
            &SceneSettings::with_cells(4),
        )
        .unwrap();
        // x extent 2 over 4 cells
        assert!((dims.cell_size - 0.5).abs() < 1e-12);
        assert_eq!(dims.counts, [4, 2, 2]);
        assert!(dims.bounds.contains_point(&Point3::new(-1.0, 0.5, 0.5)));
    }

    #[test]
    fn test_snapping_to_lattice() {
        let tris = vec![Triangle::from_arrays(
            [0.3, 0.1, 0.0],
            [2.3, 0.1, 0.0],
            [0.3, 1.1, 0.7],
        )];
        let dims =
            GridDims::compute(&Point3::new(0.3, 0.1, 0.0), &tris, &SceneSettings::with_cells(4))
                .unwrap();
        assert!((dims.cell_size - 0.5).abs() < 1e-12);
        assert!(dims.bounds.min.x.abs() < 1e-12);
        assert!((dims.bounds.max.x - 2.5).abs() < 1e-12);
        assert!((dims.bounds.max.y - 1.5).abs() < 1e-12);
        assert!((dims.bounds.max.z - 1.0).abs() < 1e-12);
        assert_eq!(dims.counts, [5, 3, 2]);
    }

    #[test]
    fn test_x_reference_gives_non_x_axes_more_cells() {
        let tris = vec![Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 4.0, 0.0],
        )];
        let dims = GridDims::compute(&Point3::origin(), &tris, &SceneSettings::with_cells(2))
            .unwrap();
        assert_eq!(dims.counts, [2, 8, 1]);

        let settings = SceneSettings {
            sizing: CellSizing::LongestAxis,
            ..SceneSettings::with_cells(2)
        };
        let dims = GridDims::compute(&Point3::origin(), &tris, &settings).unwrap();
        assert!((dims.cell_size - 2.0).abs() < 1e-12);
        assert_eq!(dims.counts, [1, 2, 1]);
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let err = GridDims::compute(&Point3::origin(), &[], &SceneSettings::default());
        assert!(matches!(err, Err(GridError::EmptyMesh)));
    }

    #[test]
    fn test_zero_x_extent_rejected() {
        let tris = vec![Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        )];
        let err = GridDims::compute(&Point3::origin(), &tris, &SceneSettings::default());
        assert!(matches!(
            err,
            Err(GridError::DegenerateExtent { axis: 'x', .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut tris = unit_cube_mesh();
        tris[1].v[2].z = f64::INFINITY;
        let err = GridDims::compute(&Point3::origin(), &tris, &SceneSettings::default());
        assert!(matches!(err, Err(GridError::NonFiniteVertex { index: 1 })));

        let err = GridDims::compute(
            &Point3::new(f64::NAN, 0.0, 0.0),
            &unit_cube_mesh(),
            &SceneSettings::default(),
        );
        assert!(matches!(err, Err(GridError::NonFiniteAnchor)));
    }

    #[test]
    fn test_voxel_limit() {
        let settings = SceneSettings {
            max_voxels: 100,
            ..SceneSettings::with_cells(8)
        };
        let err = GridDims::compute(&Point3::origin(), &unit_cube_mesh(), &settings);
        assert!(matches!(
            err,
            Err(GridError::TooManyVoxels { limit: 100, .. })
        ));
    }

    #[test]
    fn test_cell_mapping() {
        let dims = GridDims::compute(
            &Point3::origin(),
            &unit_cube_mesh(),
            &SceneSettings::with_cells(4),
        )
        .unwrap();
        assert_eq!(dims.cell_of(&Point3::new(0.3, 0.0, 0.99)), [1, 0, 3]);
        assert_eq!(dims.cell_of(&Point3::new(1.0, 1.0, 1.0)), [4, 4, 4]);
        assert_eq!(dims.cell_of(&Point3::new(-0.1, 0.5, 0.5)), [-1, 2, 2]);
        assert!(!dims.contains_cell([4, 0, 0]));
        assert!(!dims.contains_cell([-1, 0, 0]));
        assert!(dims.contains_cell([3, 3, 3]));
        assert_eq!(dims.clamp_cell([4, -2, 1]), [3, 0, 1]);

        let b = dims.cell_bounds([1, 2, 3]);
        assert!((b.min.x - 0.25).abs() < 1e-12);
        assert!((b.max.y - 0.75).abs() < 1e-12);
        assert!((b.max.z - 1.0).abs() < 1e-12);
    }
}
