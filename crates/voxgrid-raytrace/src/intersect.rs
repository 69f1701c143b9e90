//! Ray-triangle intersection (Möller–Trumbore).

use voxgrid_math::Tolerance;
use voxgrid_mesh::Triangle;

use crate::{Ray, RayHit};

/// Determinants below this are treated as a ray parallel to the triangle.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Result of a ray-triangle intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Parameter along the ray.
    pub t: f64,
    /// Barycentric weight of the second vertex.
    pub u: f64,
    /// Barycentric weight of the third vertex.
    pub v: f64,
}

impl TriangleHit {
    /// All three barycentric weights, `[1 - u - v, u, v]`.
    pub fn barycentric(&self) -> [f64; 3] {
        [1.0 - self.u - self.v, self.u, self.v]
    }
}

/// Intersect a ray with a triangle.
///
/// Returns `Some(hit)` if the ray crosses the triangle (edges included) at a
/// strictly positive t, or `None` if it is parallel, misses, or hits behind
/// the origin.
pub fn intersect_triangle(ray: &Ray, tri: &Triangle) -> Option<TriangleHit> {
    let e1 = tri.edge1();
    let e2 = tri.edge2();
    let p = ray.direction.cross(&e2);
    let det = e1.dot(&p);

    // Ray is parallel to the triangle plane
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - tri.v[0];
    let u = s.dot(&p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&e1);
    let v = ray.direction.dot(&q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(&q) * inv_det;
    if t <= Tolerance::DEFAULT.linear {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Nearest hit among `candidates`, given as `(index, triangle)` pairs.
///
/// Ties keep the first candidate seen.
pub fn closest_hit<'a>(
    ray: &Ray,
    candidates: impl IntoIterator<Item = (usize, &'a Triangle)>,
) -> Option<RayHit> {
    let mut closest: Option<RayHit> = None;
    for (index, tri) in candidates {
        if let Some(hit) = intersect_triangle(ray, tri) {
            if closest.map_or(true, |c| hit.t < c.hit.t) {
                closest = Some(RayHit::new(index, hit));
            }
        }
    }
    closest
}

/// Test every triangle without acceleration.
pub fn brute_force(ray: &Ray, triangles: &[Triangle]) -> Option<RayHit> {
    closest_hit(ray, triangles.iter().enumerate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use voxgrid_math::{Point3, Vec3};

    fn xy_triangle(z: f64) -> Triangle {
        Triangle::from_arrays([0.0, 0.0, z], [1.0, 0.0, z], [0.0, 1.0, z])
    }

    #[test]
    fn test_hit_barycentric() {
        let tri = xy_triangle(0.0);
        let ray = Ray::new(Point3::new(0.25, 0.5, 2.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = intersect_triangle(&ray, &tri).unwrap();
        assert_relative_eq!(hit.t, 2.0, epsilon = 1e-12);
        assert_relative_eq!(hit.u, 0.25, epsilon = 1e-12);
        assert_relative_eq!(hit.v, 0.5, epsilon = 1e-12);
        let p = tri.v[0] + hit.u * tri.edge1() + hit.v * tri.edge2();
        assert!((p - ray.at(hit.t)).norm() < 1e-12);
        let [w, _, _] = hit.barycentric();
        assert_relative_eq!(w, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_hit_scaled_direction() {
        let tri = xy_triangle(0.0);
        let ray = Ray::new(Point3::new(0.25, 0.25, 2.0), Vec3::new(0.0, 0.0, -4.0));
        let hit = intersect_triangle(&ray, &tri).unwrap();
        assert_relative_eq!(hit.t, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_miss_outside() {
        let tri = xy_triangle(0.0);
        let ray = Ray::new(Point3::new(0.8, 0.8, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(intersect_triangle(&ray, &tri).is_none());
    }

    #[test]
    fn test_miss_parallel() {
        let tri = xy_triangle(0.0);
        let ray = Ray::new(Point3::new(-1.0, 0.2, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(intersect_triangle(&ray, &tri).is_none());
    }

    #[test]
    fn test_miss_behind() {
        let tri = xy_triangle(0.0);
        let ray = Ray::new(Point3::new(0.2, 0.2, 2.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(intersect_triangle(&ray, &tri).is_none());
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let tris = [xy_triangle(0.0), xy_triangle(1.0), xy_triangle(-1.0)];
        let ray = Ray::new(Point3::new(0.2, 0.2, 3.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = brute_force(&ray, &tris).unwrap();
        assert_eq!(hit.triangle, 1);
        assert_relative_eq!(hit.t(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_hit_tie_keeps_first() {
        let tris = [xy_triangle(0.0), xy_triangle(0.0)];
        let ray = Ray::new(Point3::new(0.2, 0.2, 3.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(brute_force(&ray, &tris).unwrap().triangle, 0);
    }
}
