//! Grid construction settings.

use serde::{Deserialize, Serialize};

use crate::{GridError, Result};

/// How the uniform cell edge length is derived from the mesh bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellSizing {
    /// `x extent / cells_on_axis`. Cells are cubes of that edge on every
    /// axis, so meshes that are not x-dominant get more cells along y or z.
    #[default]
    ReferenceX,
    /// `longest extent / cells_on_axis`. Changes the cell size for meshes
    /// whose longest axis is not x.
    LongestAxis,
}

/// Parameters for [`Scene::build`](crate::Scene::build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Number of cells along the reference axis.
    pub cells_on_axis: usize,
    /// Cell sizing policy.
    pub sizing: CellSizing,
    /// Upper bound on `nx * ny * nz`.
    pub max_voxels: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            cells_on_axis: 32,
            sizing: CellSizing::ReferenceX,
            max_voxels: 1 << 24,
        }
    }
}

impl SceneSettings {
    /// Default settings with a given cell count on the reference axis.
    pub fn with_cells(cells_on_axis: usize) -> Self {
        Self {
            cells_on_axis,
            ..Self::default()
        }
    }

    /// Parse settings from a JSON document and validate them.
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.cells_on_axis == 0 {
            return Err(GridError::InvalidSettings(
                "cells_on_axis must be at least 1".into(),
            ));
        }
        if self.max_voxels == 0 {
            return Err(GridError::InvalidSettings(
                "max_voxels must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(SceneSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_cells_rejected() {
        let err = SceneSettings::with_cells(0).validate().unwrap_err();
        assert!(matches!(err, GridError::InvalidSettings(_)));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = SceneSettings::from_json(r#"{ "cells_on_axis": 8 }"#).unwrap();
        assert_eq!(settings.cells_on_axis, 8);
        assert_eq!(settings.sizing, CellSizing::ReferenceX);
        assert_eq!(settings.max_voxels, SceneSettings::default().max_voxels);
    }

    #[test]
    fn test_from_json_sizing() {
        let settings = SceneSettings::from_json(r#"{ "sizing": "longest_axis" }"#).unwrap();
        assert_eq!(settings.sizing, CellSizing::LongestAxis);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            SceneSettings::from_json("{ not json"),
            Err(GridError::SettingsParse(_))
        ));
        assert!(matches!(
            SceneSettings::from_json(r#"{ "max_voxels": 0 }"#),
            Err(GridError::InvalidSettings(_))
        ));
    }
}
