//! Triangle primitive.

use voxgrid_math::{is_finite, Point3, Vec3};

use crate::Aabb3;

/// A triangle given by its three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex positions.
    pub v: [Point3; 3],
}

impl Triangle {
    /// Create a new triangle from vertices.
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> Self {
        Self { v: [v0, v1, v2] }
    }

    /// Create from raw `[x, y, z]` arrays.
    pub fn from_arrays(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> Self {
        Self::new(Point3::from(v0), Point3::from(v1), Point3::from(v2))
    }

    /// Bounding box of the three vertices.
    pub fn aabb(&self) -> Aabb3 {
        Aabb3::from_points(&self.v)
    }

    /// First edge, `v1 - v0`.
    pub fn edge1(&self) -> Vec3 {
        self.v[1] - self.v[0]
    }

    /// Second edge, `v2 - v0`.
    pub fn edge2(&self) -> Vec3 {
        self.v[2] - self.v[0]
    }

    /// True if every vertex coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.v.iter().all(is_finite)
    }
}

/// Build triangles from a vertex array and flat index triples.
///
/// Trailing indices that do not form a full triple are ignored.
pub fn triangles_from_indexed(vertices: &[[f64; 3]], indices: &[u32]) -> Vec<Triangle> {
    indices
        .chunks_exact(3)
        .map(|c| {
            Triangle::from_arrays(
                vertices[c[0] as usize],
                vertices[c[1] as usize],
                vertices[c[2] as usize],
            )
        })
        .collect()
}
