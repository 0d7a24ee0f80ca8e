// Deflection mission planning. Three strategies with first-order physics:
// kinetic impactor (momentum transfer with enhancement factor β),
// gravity tractor (station-keeping spacecraft tug), and laser ablation
// (photon-pressure-scale thrust from vaporized regolith).

use serde::{Deserialize, Serialize};

use crate::constants::{C, G, SECONDS_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    KineticImpactor,
    GravityTractor,
    LaserAblation,
}

/// Mission request: how much lead time exists and how heavy the target is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflectionRequest {
    pub strategy: Strategy,
    pub time_available_days: f64,
    pub asteroid_mass_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflectionOutcome {
    /// Achievable velocity change (m/s)
    pub delta_v_m_s: f64,
    /// Probability the mission succeeds in the available time (0-1)
    pub success_probability: f64,
    pub required_missions: u32,
}

/// Catalog entry describing a strategy to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyProfile {
    pub strategy: Strategy,
    pub name: &'static str,
    pub description: &'static str,
    pub effectiveness: f64,
    pub min_time_required_days: f64,
    pub technology_readiness: &'static str,
    pub example: &'static str,
}

// Kinetic impactor reference mission: DART-class spacecraft.
const IMPACTOR_MASS_KG: f64 = 1000.0;
const IMPACTOR_VELOCITY_M_S: f64 = 10_000.0;
const MOMENTUM_ENHANCEMENT_BETA: f64 = 2.0;

// Gravity tractor reference mission.
const TRACTOR_MASS_KG: f64 = 20_000.0;
const TRACTOR_STANDOFF_M: f64 = 100.0;

// Laser ablation reference mission.
const LASER_POWER_W: f64 = 100_000.0;
const LASER_EFFICIENCY: f64 = 0.1;

/// Plan a deflection mission for the requested strategy.
pub fn plan(request: &DeflectionRequest) -> DeflectionOutcome {
    match request.strategy {
        Strategy::KineticImpactor => plan_kinetic_impactor(request),
        Strategy::GravityTractor => plan_gravity_tractor(request),
        Strategy::LaserAblation => plan_laser_ablation(request),
    }
}

/// Momentum transfer: Δv = β·m_i·v_i / m_asteroid.
fn plan_kinetic_impactor(request: &DeflectionRequest) -> DeflectionOutcome {
    let delta_v =
        MOMENTUM_ENHANCEMENT_BETA * IMPACTOR_MASS_KG * IMPACTOR_VELOCITY_M_S
            / request.asteroid_mass_kg;

    let days_needed = 180.0;
    let success = (request.time_available_days / days_needed).min(1.0) * 0.85;

    let required = (request.asteroid_mass_kg / (IMPACTOR_MASS_KG * 100.0)) as u32;

    DeflectionOutcome {
        delta_v_m_s: delta_v,
        success_probability: success,
        required_missions: required.max(1),
    }
}

/// Gravitational tug: a = G·m_sc / d², accumulated over the mission.
fn plan_gravity_tractor(request: &DeflectionRequest) -> DeflectionOutcome {
    let acceleration = G * TRACTOR_MASS_KG / (TRACTOR_STANDOFF_M * TRACTOR_STANDOFF_M);
    let delta_v = acceleration * request.time_available_days * SECONDS_PER_DAY;

    let days_needed = 365.0;
    let success = (request.time_available_days / days_needed).min(1.0) * 0.95;

    DeflectionOutcome {
        delta_v_m_s: delta_v,
        success_probability: success,
        required_missions: 1,
    }
}

/// Ablation thrust ≈ P·η / c, accumulated over the mission.
fn plan_laser_ablation(request: &DeflectionRequest) -> DeflectionOutcome {
    let thrust = LASER_POWER_W * LASER_EFFICIENCY / C;
    let delta_v =
        thrust * request.time_available_days * SECONDS_PER_DAY / request.asteroid_mass_kg;

    let days_needed = 270.0;
    let success = (request.time_available_days / days_needed).min(1.0) * 0.70;

    let required = (request.asteroid_mass_kg / 1e9) as u32;

    DeflectionOutcome {
        delta_v_m_s: delta_v,
        success_probability: success,
        required_missions: required.max(1),
    }
}

/// All available strategies with presentation metadata.
pub fn strategies() -> Vec<StrategyProfile> {
    vec![
        StrategyProfile {
            strategy: Strategy::KineticImpactor,
            name: "Kinetic Impactor",
            description: "Ram the asteroid with a spacecraft to change its velocity vector",
            effectiveness: 0.8,
            min_time_required_days: 180.0,
            technology_readiness: "proven",
            example: "NASA DART mission (2022)",
        },
        StrategyProfile {
            strategy: Strategy::GravityTractor,
            name: "Gravity Tractor",
            description: "Use spacecraft's gravitational pull to slowly alter orbit",
            effectiveness: 0.9,
            min_time_required_days: 365.0,
            technology_readiness: "theoretical",
            example: "None (proposed concept)",
        },
        StrategyProfile {
            strategy: Strategy::LaserAblation,
            name: "Laser Ablation",
            description: "Vaporize surface material with laser to create thrust",
            effectiveness: 0.7,
            min_time_required_days: 270.0,
            technology_readiness: "experimental",
            example: "DE-STAR concept",
        },
    ]
}
