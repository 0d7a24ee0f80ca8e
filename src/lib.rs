// Defense Grid - Asteroid impact simulation and planetary defense core
//
// Two independent numerical components over plain data: an orbital
// propagator (heuristic elements + Kepler solver) and an impact physics
// calculator (empirical scaling laws), plus the NASA NeoWs client that
// feeds them and the deflection/scenario helpers around them.

pub mod api_client;
pub mod constants;
pub mod deflection;
pub mod error;
pub mod geo;
pub mod impact;
pub mod propagator;
pub mod scenarios;
pub mod vector;

pub use api_client::{NeoCache, NeoRecord, NeoWsClient};
pub use error::{Error, Result};
pub use geo::{PopulationInfo, PopulationLookup, TerrainInfo, TerrainLookup, TerrainType};
pub use impact::{
    atmospheric_effects, classify_severity, crater_size, crater_size_at, kinetic_energy,
    seismic_effects, simulate, tsunami_effects, ImpactParameters, ImpactResults, Severity,
};
pub use propagator::{
    closest_approach, derive_elements, derive_elements_for, earth_position, state_at, trajectory,
    CloseApproachSample, ClosestApproach, OrbitalElements, OrbitalState,
};
pub use vector::Vector3;
