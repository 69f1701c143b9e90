#![warn(missing_docs)]

//! Uniform-grid ray tracing over triangle meshes.
//!
//! Space is split into a grid of equal cells, each listing the triangles
//! whose bounding box overlaps it. A ray walks the grid cell by cell with a
//! 3D DDA and stops at the first cell that yields a hit, so only triangles
//! near the ray are ever tested.
//!
//! # Architecture
//!
//! - [`GridDims`] - world box, cell size and cell counts
//! - [`VoxelStore`] - dense array of per-cell triangle index lists
//! - [`Scene`] - binned mesh; [`Scene::cast_ray`] answers queries
//! - [`VoxelWalk`] - Amanatides–Woo traversal over cell coordinates
//! - [`intersect`] - ray-triangle intersection
//!
//! # Example
//!
//! ```
//! use voxgrid_math::{Point3, Vec3};
//! use voxgrid_mesh::Triangle;
//! use voxgrid_raytrace::{Ray, Scene};
//!
//! let tris = vec![Triangle::from_arrays(
//!     [0.0, 0.0, 0.0],
//!     [4.0, 0.0, 0.0],
//!     [0.0, 4.0, 0.0],
//! )];
//! let camera = Point3::new(1.0, 1.0, 4.0);
//! let scene = Scene::with_cells(camera, tris, 4).unwrap();
//!
//! let ray = Ray::new(camera, Vec3::new(0.0, 0.0, -1.0));
//! let hit = scene.cast_ray(&ray).unwrap();
//! assert_eq!(hit.triangle, 0);
//! assert!((hit.t() - 4.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod grid;
pub mod intersect;
mod ray;
mod scene;
pub mod settings;
pub mod traverse;
pub mod voxel;

pub use error::{GridError, Result};
pub use grid::GridDims;
pub use intersect::TriangleHit;
pub use ray::{Ray, RayHit};
pub use scene::Scene;
pub use settings::{CellSizing, SceneSettings};
pub use traverse::VoxelWalk;
pub use voxel::{linear_index, GridStats, Voxel, VoxelStore};
