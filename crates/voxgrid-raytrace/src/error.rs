//! Error types for grid construction.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while building a [`Scene`](crate::Scene).
#[derive(Error, Debug)]
pub enum GridError {
    /// Mesh has no triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A triangle vertex has a NaN or infinite coordinate.
    #[error("non-finite vertex coordinate in triangle {index}")]
    NonFiniteVertex {
        /// Offending triangle.
        index: usize,
    },

    /// The anchor point has a NaN or infinite coordinate.
    #[error("non-finite anchor point")]
    NonFiniteAnchor,

    /// The reference extent used to size cells is not strictly positive.
    #[error("degenerate bounding box: {axis} extent is {extent}")]
    DegenerateExtent {
        /// Axis the cell size is derived from.
        axis: char,
        /// Extent of the raw bounding box along that axis.
        extent: f64,
    },

    /// Invalid scene settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings document could not be parsed.
    #[error("settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),

    /// The grid would exceed the configured voxel limit.
    #[error("grid needs {requested} voxels, limit is {limit}")]
    TooManyVoxels {
        /// Voxel count the dimensions call for.
        requested: u128,
        /// Configured `max_voxels`.
        limit: usize,
    },

    /// The voxel array could not be allocated.
    #[error("voxel allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
