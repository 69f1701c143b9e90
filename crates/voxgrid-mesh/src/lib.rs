#![warn(missing_docs)]

//! Triangle mesh primitives for the voxgrid ray tracer.
//!
//! - [`Triangle`] - three vertices, with bounding box and barycentric helpers
//! - [`Aabb3`] - axis-aligned bounding box

mod aabb;
mod triangle;

pub use aabb::Aabb3;
pub use triangle::{triangles_from_indexed, Triangle};
