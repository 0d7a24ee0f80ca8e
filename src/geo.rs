// Terrain and population lookups are external collaborators. The impact
// calculator only sees these traits; implementations may be backed by a
// tile service, a raster dataset, or a test stub, and may fail or return
// partial data.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainType {
    Ocean,
    Coastal,
    Sedimentary,
    Crystalline,
    Ice,
}

impl TerrainType {
    /// Crater-size enhancement factor relative to the reference land
    /// target of the Collins scaling law.
    pub fn crater_enhancement(&self) -> f64 {
        match self {
            TerrainType::Ocean => 1.25,
            TerrainType::Coastal => 1.1,
            TerrainType::Sedimentary => 1.1,
            TerrainType::Crystalline => 0.85,
            TerrainType::Ice => 1.15,
        }
    }

    /// Whether an impact here can raise a tsunami.
    pub fn is_coastal_or_water(&self) -> bool {
        matches!(self, TerrainType::Ocean | TerrainType::Coastal)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainInfo {
    pub terrain_type: TerrainType,
    pub elevation_m: f64,
    pub is_water: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationInfo {
    pub density_per_km2: f64,
    pub nearest_city: Option<String>,
}

pub trait TerrainLookup {
    fn lookup_terrain(&self, lat: f64, lng: f64) -> Result<TerrainInfo>;
}

pub trait PopulationLookup {
    fn lookup_population(&self, lat: f64, lng: f64) -> Result<PopulationInfo>;
}
