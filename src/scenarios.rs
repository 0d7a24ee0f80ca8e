// Named impact scenarios: historical events and hypothetical benchmarks
// the presentation layer offers as one-click presets.

use serde::Serialize;

use crate::constants::asteroid_density;
use crate::impact::ImpactParameters;

/// Hiroshima yield in megatons TNT (~15 kilotons).
const HIROSHIMA_MEGATONS: f64 = 0.015;

#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub name: &'static str,
    pub diameter_m: f64,
    pub velocity_km_s: f64,
    pub angle_deg: f64,
    pub description: &'static str,
}

impl Scenario {
    /// Turn the preset into simulation parameters at the given site.
    /// Density defaults to the rubble-pile average.
    pub fn to_parameters(&self, lat: f64, lng: f64, is_water_impact: bool) -> ImpactParameters {
        ImpactParameters {
            size_m: self.diameter_m,
            density_kg_m3: asteroid_density::DEFAULT,
            velocity_km_s: self.velocity_km_s,
            impact_angle_deg: self.angle_deg,
            lat,
            lng,
            is_water_impact,
        }
    }
}

/// All built-in presets, smallest first.
pub fn presets() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "Chelyabinsk (2013)",
            diameter_m: 20.0,
            velocity_km_s: 19.16,
            angle_deg: 18.0,
            description: "Similar to the 2013 Russian fireball",
        },
        Scenario {
            name: "Tunguska (1908)",
            diameter_m: 50.0,
            velocity_km_s: 15.0,
            angle_deg: 45.0,
            description: "Similar to the 1908 Siberian event",
        },
        Scenario {
            name: "City Killer",
            diameter_m: 100.0,
            velocity_km_s: 20.0,
            angle_deg: 45.0,
            description: "Hypothetical urban impact scenario",
        },
        Scenario {
            name: "Regional Devastator",
            diameter_m: 500.0,
            velocity_km_s: 25.0,
            angle_deg: 45.0,
            description: "Major regional impact",
        },
        Scenario {
            name: "Chicxulub-class",
            diameter_m: 10_000.0,
            velocity_km_s: 20.0,
            angle_deg: 60.0,
            description: "Similar to the dinosaur extinction event",
        },
    ]
}

/// Express an energy in multiples of the Hiroshima bomb.
pub fn hiroshima_equivalent(energy_mt: f64) -> f64 {
    energy_mt / HIROSHIMA_MEGATONS
}
