// Control settings loaded from TOML
use bevy::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

use crate::constants::*;
use crate::formation::{FormationKind, FormationParams};

pub const CONFIG_FILE: &str = "unit-control.toml";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open config file:\n{0}")]
    OpenFile(#[source] io::Error),

    #[error("Failed to read config file:\n{0}")]
    ReadFile(#[source] io::Error),

    #[error("Failed to deserialize config:\n{0}")]
    Deserialize(#[from] toml::de::Error),
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub spacing: f32,
    /// Per-kind spacing, keyed by formation name
    pub spacing_overrides: BTreeMap<String, f32>,
    pub outer_radius: f32,
    pub inner_radius: f32,
    pub random_radius: f32,
    /// 0 draws a fresh seed for every move order
    pub random_seed: u64,
    pub default_formation: String,
    pub unit_speed: f32,
    pub unit_extent: f32,
    pub demo_unit_rows: usize,
    pub demo_unit_columns: usize,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            spacing: FORMATION_SPACING,
            spacing_overrides: BTreeMap::new(),
            outer_radius: CRESCENT_OUTER_RADIUS,
            inner_radius: CRESCENT_INNER_RADIUS,
            random_radius: RANDOM_FORMATION_RADIUS,
            random_seed: 0,
            default_formation: DEFAULT_FORMATION.name().to_string(),
            unit_speed: UNIT_SPEED,
            unit_extent: UNIT_EXTENT,
            demo_unit_rows: DEMO_UNIT_ROWS,
            demo_unit_columns: DEMO_UNIT_COLUMNS,
        }
    }
}

impl ControlConfig {
    /// Load from `path`. A missing file is not an error and yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = fs::File::open(path.as_ref());

        if file
            .as_ref()
            .is_err_and(|e| e.kind() == io::ErrorKind::NotFound)
        {
            return Ok(Self::default());
        }

        let mut file = file.map_err(LoadError::OpenFile)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(LoadError::ReadFile)?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(contents)?)
    }

    /// Formation picked at startup. Unknown names fall back to the default kind.
    pub fn initial_formation(&self) -> FormationKind {
        FormationKind::from_name(&self.default_formation).unwrap_or_else(|| {
            warn!(
                "Unknown default_formation '{}', using {}",
                self.default_formation,
                DEFAULT_FORMATION.name()
            );
            DEFAULT_FORMATION
        })
    }

    pub fn spacing_for(&self, kind: FormationKind) -> f32 {
        self.spacing_overrides
            .get(kind.name())
            .copied()
            .unwrap_or(self.spacing)
    }

    pub fn formation_params(&self) -> FormationParams {
        FormationParams {
            outer_radius: self.outer_radius,
            inner_radius: self.inner_radius,
            random_radius: self.random_radius,
            seed: self.random_seed,
        }
    }
}
