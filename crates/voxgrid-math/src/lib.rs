#![warn(missing_docs)]

//! Math types for the voxgrid ray tracer.
//!
//! Thin wrappers around nalgebra providing the point and vector aliases
//! used across the workspace, tolerance constants, and the componentwise
//! helpers grid code needs (snapping to a lattice, fixing near-zero
//! direction components).

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
    /// Smallest magnitude a ray direction component may have before
    /// traversal replaces it with a signed epsilon.
    pub direction: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 linear, 1e-8 direction).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        direction: 1e-8,
    };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Replace every component of `v` whose magnitude is below `eps` with a
/// signed `eps`. Exactly zero (of either sign) becomes `+eps`.
pub fn fix_near_zero(v: &Vec3, eps: f64) -> Vec3 {
    v.map(|c| {
        if c.abs() >= eps {
            c
        } else if c < 0.0 {
            -eps
        } else {
            eps
        }
    })
}

/// Componentwise floor.
pub fn floor3(v: &Vec3) -> Vec3 {
    v.map(f64::floor)
}

/// Componentwise ceiling.
pub fn ceil3(v: &Vec3) -> Vec3 {
    v.map(f64::ceil)
}

/// Snap a point down to the nearest multiple of `step` on every axis.
pub fn snap_down(p: &Point3, step: f64) -> Point3 {
    Point3::from(floor3(&(p.coords / step)) * step)
}

/// Snap a point up to the nearest multiple of `step` on every axis.
pub fn snap_up(p: &Point3, step: f64) -> Point3 {
    Point3::from(ceil3(&(p.coords / step)) * step)
}

/// Check that every component of a point is finite.
pub fn is_finite(p: &Point3) -> bool {
    p.x.is_finite() && p.y.is_finite() && p.z.is_finite()
}

/// Name of an axis index, for diagnostics.
pub fn axis_name(axis: usize) -> char {
    match axis {
        0 => 'x',
        1 => 'y',
        _ => 'z',
    }
}
