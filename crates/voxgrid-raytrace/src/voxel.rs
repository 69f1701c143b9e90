//! Dense voxel storage.
//!
//! One contiguous array of voxels laid out row-major with x fastest:
//! cell `(x, y, z)` lives at `z * nx * ny + y * nx + x`.

use crate::Result;

/// Flat index of `cell` in a grid with `counts` cells per axis.
#[inline]
pub fn linear_index(cell: [usize; 3], counts: [usize; 3]) -> usize {
    cell[2] * counts[0] * counts[1] + cell[1] * counts[0] + cell[0]
}

/// Inverse of [`linear_index`].
#[inline]
pub fn cell_from_index(index: usize, counts: [usize; 3]) -> [usize; 3] {
    let layer = counts[0] * counts[1];
    [index % counts[0], (index % layer) / counts[0], index / layer]
}

/// Triangle indices binned into one grid cell.
///
/// Append-only. Indices are positions in the owning scene's triangle
/// array; order follows insertion and duplicates are not filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Voxel {
    triangles: Vec<usize>,
}

impl Voxel {
    /// Append a triangle index.
    ///
    /// Capacity starts at zero, becomes 2 on the first push and doubles
    /// whenever a push would overflow it.
    pub fn push(&mut self, triangle: usize) {
        if self.triangles.len() == self.triangles.capacity() {
            let additional = self.triangles.capacity().max(2);
            self.triangles.reserve_exact(additional);
        }
        self.triangles.push(triangle);
    }

    /// Stored triangle indices.
    pub fn triangles(&self) -> &[usize] {
        &self.triangles
    }

    /// Number of stored indices.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True if no triangle overlaps this cell.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Allocated slots.
    pub fn capacity(&self) -> usize {
        self.triangles.capacity()
    }
}

/// Occupancy summary of a [`VoxelStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridStats {
    /// Number of cells.
    pub voxels: usize,
    /// Cells holding no triangle.
    pub empty_voxels: usize,
    /// Sum of all per-cell index counts.
    pub references: usize,
    /// Largest per-cell index count.
    pub max_per_voxel: usize,
}

impl GridStats {
    /// Mean index count over non-empty cells.
    pub fn mean_per_occupied(&self) -> f64 {
        let occupied = self.voxels - self.empty_voxels;
        if occupied == 0 {
            0.0
        } else {
            self.references as f64 / occupied as f64
        }
    }
}

/// Dense 3D array of voxels.
#[derive(Debug, Clone)]
pub struct VoxelStore {
    counts: [usize; 3],
    voxels: Vec<Voxel>,
}

impl VoxelStore {
    /// Allocate `nx * ny * nz` empty voxels.
    ///
    /// The array reservation is fallible; growing individual voxels is not.
    pub fn try_new(counts: [usize; 3]) -> Result<Self> {
        let len = counts.iter().product();
        let mut voxels = Vec::new();
        voxels.try_reserve_exact(len)?;
        voxels.resize_with(len, Voxel::default);
        Ok(Self { counts, voxels })
    }

    /// Cells per axis.
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Number of voxels.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// True for a store with no cells.
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    fn index_of(&self, cell: [usize; 3]) -> Option<usize> {
        let in_range = cell.iter().zip(self.counts).all(|(&c, n)| c < n);
        in_range.then(|| linear_index(cell, self.counts))
    }

    /// Voxel at `cell`, or `None` outside the grid.
    pub fn get(&self, cell: [usize; 3]) -> Option<&Voxel> {
        self.index_of(cell).map(|i| &self.voxels[i])
    }

    /// Append `triangle` to the voxel at `cell`.
    ///
    /// Cells outside the grid are ignored and reported as `false`.
    pub(crate) fn insert(&mut self, cell: [usize; 3], triangle: usize) -> bool {
        match self.index_of(cell) {
            Some(i) => {
                self.voxels[i].push(triangle);
                true
            }
            None => false,
        }
    }

    /// All voxels in flat index order.
    pub fn as_slice(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Voxels paired with their cell coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = ([usize; 3], &Voxel)> + '_ {
        let counts = self.counts;
        self.voxels
            .iter()
            .enumerate()
            .map(move |(i, v)| (cell_from_index(i, counts), v))
    }

    /// Occupancy summary.
    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats {
            voxels: self.voxels.len(),
            ..GridStats::default()
        };
        for voxel in &self.voxels {
            if voxel.is_empty() {
                stats.empty_voxels += 1;
            }
            stats.references += voxel.len();
            stats.max_per_voxel = stats.max_per_voxel.max(voxel.len());
        }
        stats
    }
}
