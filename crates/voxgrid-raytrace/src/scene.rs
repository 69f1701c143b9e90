//! Uniform-grid acceleration structure over a triangle mesh.

use log::{debug, warn};
use voxgrid_math::Point3;
use voxgrid_mesh::{Aabb3, Triangle};

use crate::grid::{CellCoord, GridDims};
use crate::intersect::closest_hit;
use crate::settings::SceneSettings;
use crate::traverse::VoxelWalk;
use crate::voxel::{GridStats, Voxel, VoxelStore};
use crate::{Ray, RayHit, Result};

/// A triangle mesh binned into a uniform voxel grid.
///
/// Owns its triangles. Immutable once built, so a `&Scene` can be shared
/// across threads for concurrent queries.
#[derive(Debug, Clone)]
pub struct Scene {
    dims: GridDims,
    voxels: VoxelStore,
    triangles: Vec<Triangle>,
}

impl Scene {
    /// Size a grid around `triangles` and `anchor` and bin every triangle.
    ///
    /// Each triangle index goes into every cell its bounding box overlaps.
    pub fn build(anchor: Point3, triangles: Vec<Triangle>, settings: &SceneSettings) -> Result<Self> {
        let dims = GridDims::compute(&anchor, &triangles, settings)?;
        let mut voxels = VoxelStore::try_new(dims.counts)?;

        for (index, tri) in triangles.iter().enumerate() {
            let aabb = tri.aabb();
            let lo = dims.clamp_cell(dims.cell_of(&aabb.min));
            let hi = dims.clamp_cell(dims.cell_of(&aabb.max));
            for z in lo[2]..=hi[2] {
                for y in lo[1]..=hi[1] {
                    for x in lo[0]..=hi[0] {
                        let inserted = voxels.insert([x, y, z], index);
                        debug_assert!(inserted, "clamped cell outside grid");
                    }
                }
            }
        }

        let scene = Self {
            dims,
            voxels,
            triangles,
        };

        let stats = scene.stats();
        debug!(
            "built {}x{}x{} grid, cell size {:.6}, {} triangles, {} refs ({} empty voxels, max {} and mean {:.2} per occupied voxel)",
            dims.counts[0],
            dims.counts[1],
            dims.counts[2],
            dims.cell_size,
            scene.triangles.len(),
            stats.references,
            stats.empty_voxels,
            stats.max_per_voxel,
            stats.mean_per_occupied(),
        );
        if stats.voxels > settings.max_voxels / 4 {
            warn!(
                "grid uses {} of {} allowed voxels; consider fewer cells",
                stats.voxels, settings.max_voxels
            );
        }

        Ok(scene)
    }

    /// Build with default settings and `cells_on_x` cells along x.
    pub fn with_cells(anchor: Point3, triangles: Vec<Triangle>, cells_on_x: usize) -> Result<Self> {
        Self::build(anchor, triangles, &SceneSettings::with_cells(cells_on_x))
    }

    /// Cast a ray and return the first hit in traversal order.
    ///
    /// Cells are visited in ray order and the first cell whose triangles
    /// produce any hit decides the result; within that cell the nearest
    /// hit wins. Later cells are never examined once a hit is found.
    pub fn cast_ray(&self, ray: &Ray) -> Option<RayHit> {
        self.walk(ray)
            .find_map(|cell| self.resolve_voxel(cell, ray))
    }

    /// Nearest hit among the triangles binned into `cell`.
    ///
    /// `None` if nothing in the cell is hit or `cell` is outside the grid.
    pub fn resolve_voxel(&self, cell: [usize; 3], ray: &Ray) -> Option<RayHit> {
        let voxel = self.voxels.get(cell)?;
        closest_hit(
            ray,
            voxel.triangles().iter().map(|&i| (i, &self.triangles[i])),
        )
    }

    /// Cells `ray` visits, in order.
    pub fn walk(&self, ray: &Ray) -> VoxelWalk {
        VoxelWalk::new(&self.dims, ray)
    }

    /// Grid dimensions.
    pub fn dims(&self) -> &GridDims {
        &self.dims
    }

    /// Edge length of every cell.
    pub fn cell_size(&self) -> f64 {
        self.dims.cell_size
    }

    /// Number of cells along x, y and z.
    pub fn counts(&self) -> [usize; 3] {
        self.dims.counts
    }

    /// Grid-aligned world box.
    pub fn bounds(&self) -> &Aabb3 {
        &self.dims.bounds
    }

    /// Triangles the scene was built from, in their original order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Voxel store.
    pub fn voxels(&self) -> &VoxelStore {
        &self.voxels
    }

    /// Voxel at `cell`, or `None` outside the grid.
    pub fn voxel(&self, cell: [usize; 3]) -> Option<&Voxel> {
        self.voxels.get(cell)
    }

    /// Cell containing `point`, unclamped.
    pub fn cell_of(&self, point: &Point3) -> CellCoord {
        self.dims.cell_of(point)
    }

    /// World-space box of a cell.
    pub fn cell_bounds(&self, cell: [usize; 3]) -> Aabb3 {
        self.dims.cell_bounds(cell)
    }

    /// Occupancy summary.
    pub fn stats(&self) -> GridStats {
        self.voxels.stats()
    }

    /// Release the voxel storage and return the triangles.
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }
}
