//! Ray representation and basic ray-geometry tests.

use voxgrid_math::{fix_near_zero, Point3, Tolerance, Vec3};
use voxgrid_mesh::Aabb3;

use crate::intersect::TriangleHit;

/// A ray in 3D space defined by origin and direction.
///
/// The direction is kept as given: it need not be unit length, and hit
/// distances are measured in multiples of it.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray.
    pub direction: Vec3,
    /// Precomputed reciprocal of direction components for fast AABB tests.
    inv_direction: Vec3,
    /// Sign of direction components (0 if positive, 1 if negative).
    sign: [usize; 3],
}

impl Ray {
    /// Create a new ray from origin and direction.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        let inv = direction.map(|c| 1.0 / c);
        let sign = [
            if inv.x < 0.0 { 1 } else { 0 },
            if inv.y < 0.0 { 1 } else { 0 },
            if inv.z < 0.0 { 1 } else { 0 },
        ];
        Self {
            origin,
            direction,
            inv_direction: inv,
            sign,
        }
    }

    /// Ray through `target` starting at `origin`.
    pub fn towards(origin: Point3, target: Point3) -> Self {
        Self::new(origin, target - origin)
    }

    /// Copy of this ray for grid walking.
    ///
    /// The direction is scaled so its largest component has magnitude 1,
    /// then components below the direction tolerance are replaced by a
    /// signed epsilon so no reciprocal is infinite. The scaling keeps tiny
    /// but valid directions on their own axis. Parameters along the copy are
    /// not comparable with parameters along `self`.
    pub fn with_fixed_direction(&self) -> Self {
        let scale = self.direction.amax();
        let direction = if scale > 0.0 && scale.is_finite() {
            self.direction / scale
        } else {
            self.direction
        };
        Self::new(
            self.origin,
            fix_near_zero(&direction, Tolerance::DEFAULT.direction),
        )
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// Test ray-AABB intersection using the slab method.
    ///
    /// Returns `Some((t_min, t_max))` if the ray intersects the box,
    /// where `t_min` and `t_max` are the entry and exit parameters.
    /// Returns `None` if no intersection.
    ///
    /// Zero direction components produce infinite slabs; use
    /// [`with_fixed_direction`](Self::with_fixed_direction) first when the
    /// origin may sit exactly on a slab plane.
    #[inline]
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<(f64, f64)> {
        let bounds = [aabb.min, aabb.max];

        let tx1 = (bounds[self.sign[0]].x - self.origin.x) * self.inv_direction.x;
        let tx2 = (bounds[1 - self.sign[0]].x - self.origin.x) * self.inv_direction.x;

        let mut t_min = tx1;
        let mut t_max = tx2;

        let ty1 = (bounds[self.sign[1]].y - self.origin.y) * self.inv_direction.y;
        let ty2 = (bounds[1 - self.sign[1]].y - self.origin.y) * self.inv_direction.y;

        t_min = t_min.max(ty1);
        t_max = t_max.min(ty2);

        let tz1 = (bounds[self.sign[2]].z - self.origin.z) * self.inv_direction.z;
        let tz2 = (bounds[1 - self.sign[2]].z - self.origin.z) * self.inv_direction.z;

        t_min = t_min.max(tz1);
        t_max = t_max.min(tz2);

        if t_max >= t_min && t_max >= 0.0 {
            Some((t_min.max(0.0), t_max))
        } else {
            None
        }
    }
}

/// Result of casting a ray into a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Index of the hit triangle in the scene's triangle array.
    pub triangle: usize,
    /// Hit distance and barycentric coordinates.
    pub hit: TriangleHit,
}

impl RayHit {
    /// Create a new ray hit.
    pub fn new(triangle: usize, hit: TriangleHit) -> Self {
        Self { triangle, hit }
    }

    /// Parameter along the ray where the intersection occurs.
    pub fn t(&self) -> f64 {
        self.hit.t
    }
}
