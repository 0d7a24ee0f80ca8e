// Impact physics calculator. Empirical scaling laws over a single set of
// immutable parameters:
// - Collins et al. (2005) crater scaling
// - Gutenberg-Richter seismic magnitude with a 1e-4 coupling efficiency
// - Nuclear-effects style power laws for fireball, thermal, overpressure
//
// All functions are synchronous and referentially transparent. Terrain and
// population lookups may fail; `simulate` then produces a partial result
// rather than aborting.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::warn;

use crate::constants::TNT_JOULES_PER_MEGATON;
use crate::geo::{PopulationInfo, PopulationLookup, TerrainInfo, TerrainLookup};

/// Immutable input for a single simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactParameters {
    /// Asteroid diameter (m)
    pub size_m: f64,
    /// Bulk density (kg/m³)
    pub density_kg_m3: f64,
    /// Impact velocity (km/s)
    pub velocity_km_s: f64,
    /// Entry angle from horizontal (degrees)
    pub impact_angle_deg: f64,
    /// Impact site latitude
    pub lat: f64,
    /// Impact site longitude
    pub lng: f64,
    /// Whether the site is open water
    pub is_water_impact: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpactEnergy {
    pub joules: f64,
    pub megatons_tnt: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CraterDimensions {
    pub diameter_m: f64,
    pub depth_m: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeismicEffects {
    pub magnitude: f64,
    pub radius_km: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TsunamiEffects {
    pub wave_height_m: f64,
    pub affected_radius_km: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtmosphericEffects {
    pub fireball_radius_km: f64,
    pub thermal_radiation_km: f64,
    pub overpressure_radius_km: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Casualties {
    pub estimated_deaths: u64,
    pub affected_population: u64,
}

/// Severity classes over fixed energy thresholds (megatons TNT).
/// Thresholds are exclusive on the upper bound: exactly 0.001 MT is Local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Minimal,
    Local,
    CityWide,
    Regional,
    Continental,
    GlobalClimate,
    MassExtinction,
}

/// One result set per simulation invocation; replaced, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactResults {
    pub energy: ImpactEnergy,
    pub crater: CraterDimensions,
    pub seismic: SeismicEffects,
    pub tsunami: Option<TsunamiEffects>,
    pub atmospheric: AtmosphericEffects,
    pub severity: Severity,
    pub damage_radius_km: f64,
    pub casualties: Casualties,
    pub terrain: Option<TerrainInfo>,
    pub population: Option<PopulationInfo>,
}

/// Kinetic energy from spherical mass and impact speed.
pub fn kinetic_energy(params: &ImpactParameters) -> ImpactEnergy {
    let radius = params.size_m.max(0.0) / 2.0;
    let volume = (4.0 / 3.0) * PI * radius.powi(3);
    let mass = volume * params.density_kg_m3.max(0.0);
    let velocity_m_s = params.velocity_km_s.max(0.0) * 1000.0;

    let joules = 0.5 * mass * velocity_m_s * velocity_m_s;

    ImpactEnergy {
        joules,
        megatons_tnt: joules / TNT_JOULES_PER_MEGATON,
    }
}

/// Collins et al. land-impact crater scaling, adjusted by a terrain
/// enhancement factor. Depth follows the simple-crater 1:5 ratio.
pub fn crater_size(energy_mt: f64, terrain_enhancement: f64) -> CraterDimensions {
    if energy_mt <= 0.0 {
        return CraterDimensions {
            diameter_m: 0.0,
            depth_m: 0.0,
        };
    }

    let diameter_m = 1.161 * energy_mt.powf(0.22) * 1000.0 * terrain_enhancement.max(0.0);

    CraterDimensions {
        diameter_m,
        depth_m: diameter_m / 5.0,
    }
}

/// Terrain-aware crater sizing: asks the lookup for the site's enhancement
/// factor, falling back to the bare scaling law when the lookup fails.
pub fn crater_size_at(
    energy_mt: f64,
    terrain: &dyn TerrainLookup,
    lat: f64,
    lng: f64,
) -> CraterDimensions {
    let enhancement = match terrain.lookup_terrain(lat, lng) {
        Ok(info) => info.terrain_type.crater_enhancement(),
        Err(e) => {
            warn!(lat, lng, error = %e, "terrain lookup failed, using default crater scaling");
            1.0
        }
    };
    crater_size(energy_mt, enhancement)
}

/// Richter magnitude and felt radius from the seismically coupled share of
/// the impact energy.
pub fn seismic_effects(energy_joules: f64) -> SeismicEffects {
    // ~0.01% of the impact energy couples into seismic waves.
    let seismic_energy = energy_joules * 1e-4;

    if seismic_energy <= 0.0 {
        return SeismicEffects {
            magnitude: 0.0,
            radius_km: 0.0,
        };
    }

    let magnitude = ((2.0 / 3.0) * (seismic_energy.log10() - 4.8)).min(12.0);
    let radius_km = (10.0_f64.powf((magnitude - 3.0) * 0.5) * 10.0).min(1500.0);

    SeismicEffects {
        magnitude,
        radius_km,
    }
}

/// Tsunami wave height and reach. Present only for water or coastal
/// impacts; land impacts return `None`.
pub fn tsunami_effects(energy_mt: f64, is_water_or_coastal: bool) -> Option<TsunamiEffects> {
    if !is_water_or_coastal || energy_mt <= 0.0 {
        return None;
    }

    Some(TsunamiEffects {
        wave_height_m: ((energy_mt / 1000.0).powf(0.25) * 10.0).min(500.0),
        affected_radius_km: (energy_mt.sqrt() * 15.0).min(10_000.0),
    })
}

/// Fireball, third-degree-burn thermal radius, and 5 psi overpressure
/// radius, all in km.
pub fn atmospheric_effects(energy_mt: f64) -> AtmosphericEffects {
    if energy_mt <= 0.0 {
        return AtmosphericEffects {
            fireball_radius_km: 0.0,
            thermal_radiation_km: 0.0,
            overpressure_radius_km: 0.0,
        };
    }

    AtmosphericEffects {
        fireball_radius_km: energy_mt.powf(0.4) * 0.28,
        thermal_radiation_km: energy_mt.powf(0.33) * 1.2,
        overpressure_radius_km: 0.28 * energy_mt.powf(1.0 / 3.0),
    }
}

/// Classify impact severity from energy in megatons TNT.
pub fn classify_severity(energy_mt: f64) -> Severity {
    if energy_mt < 0.001 {
        Severity::Minimal
    } else if energy_mt < 0.1 {
        Severity::Local
    } else if energy_mt < 10.0 {
        Severity::CityWide
    } else if energy_mt < 1000.0 {
        Severity::Regional
    } else if energy_mt < 100_000.0 {
        Severity::Continental
    } else if energy_mt < 1e8 {
        Severity::GlobalClimate
    } else {
        Severity::MassExtinction
    }
}

/// Ground damage radius used by the casualty heuristic (km).
fn damage_radius_km(energy_mt: f64) -> f64 {
    if energy_mt <= 0.0 {
        0.0
    } else {
        energy_mt.sqrt() * 5.0
    }
}

/// Flat-density casualty heuristic: 1000 people per km² inside the damage
/// radius, 10% fatality rate.
fn estimate_casualties(damage_radius_km: f64) -> Casualties {
    let affected = (damage_radius_km * damage_radius_km * PI * 1000.0).max(0.0);
    Casualties {
        estimated_deaths: (affected * 0.10) as u64,
        affected_population: affected as u64,
    }
}

/// Run the full impact simulation. Terrain and population lookups are
/// consulted for annotations and tsunami/crater adjustments; when either
/// fails the corresponding fields are left absent and the rest of the
/// result is still computed.
pub fn simulate(
    params: &ImpactParameters,
    terrain_lookup: &dyn TerrainLookup,
    population_lookup: &dyn PopulationLookup,
) -> ImpactResults {
    let energy = kinetic_energy(params);

    let terrain = match terrain_lookup.lookup_terrain(params.lat, params.lng) {
        Ok(info) => Some(info),
        Err(e) => {
            warn!(lat = params.lat, lng = params.lng, error = %e, "terrain lookup unavailable");
            None
        }
    };

    let population = match population_lookup.lookup_population(params.lat, params.lng) {
        Ok(info) => Some(info),
        Err(e) => {
            warn!(lat = params.lat, lng = params.lng, error = %e, "population lookup unavailable");
            None
        }
    };

    let enhancement = terrain
        .as_ref()
        .map(|t| t.terrain_type.crater_enhancement())
        .unwrap_or(1.0);

    let water_or_coastal = params.is_water_impact
        || terrain
            .as_ref()
            .map(|t| t.is_water || t.terrain_type.is_coastal_or_water())
            .unwrap_or(false);

    let damage_radius = damage_radius_km(energy.megatons_tnt);

    ImpactResults {
        energy,
        crater: crater_size(energy.megatons_tnt, enhancement),
        seismic: seismic_effects(energy.joules),
        tsunami: tsunami_effects(energy.megatons_tnt, water_or_coastal),
        atmospheric: atmospheric_effects(energy.megatons_tnt),
        severity: classify_severity(energy.megatons_tnt),
        damage_radius_km: damage_radius,
        casualties: estimate_casualties(damage_radius),
        terrain,
        population,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geo::TerrainType;

    struct FixedTerrain(TerrainInfo);

    impl TerrainLookup for FixedTerrain {
        fn lookup_terrain(&self, _lat: f64, _lng: f64) -> crate::error::Result<TerrainInfo> {
            Ok(self.0.clone())
        }
    }

    struct FixedPopulation(PopulationInfo);

    impl PopulationLookup for FixedPopulation {
        fn lookup_population(
            &self,
            _lat: f64,
            _lng: f64,
        ) -> crate::error::Result<PopulationInfo> {
            Ok(self.0.clone())
        }
    }

    struct FailingLookup;

    impl TerrainLookup for FailingLookup {
        fn lookup_terrain(&self, lat: f64, lng: f64) -> crate::error::Result<TerrainInfo> {
            Err(Error::LookupFailed {
                lat,
                lng,
                reason: "offline".to_string(),
            })
        }
    }

    impl PopulationLookup for FailingLookup {
        fn lookup_population(&self, lat: f64, lng: f64) -> crate::error::Result<PopulationInfo> {
            Err(Error::LookupFailed {
                lat,
                lng,
                reason: "offline".to_string(),
            })
        }
    }

    fn city_killer() -> ImpactParameters {
        ImpactParameters {
            size_m: 100.0,
            density_kg_m3: 3000.0,
            velocity_km_s: 20.0,
            impact_angle_deg: 45.0,
            lat: 40.7128,
            lng: -74.0060,
            is_water_impact: false,
        }
    }

    fn rel_close(actual: f64, expected: f64, tol: f64) -> bool {
        (actual / expected - 1.0).abs() < tol
    }

    #[test]
    fn test_city_killer_reference_values() {
        let params = city_killer();
        let energy = kinetic_energy(&params);

        // mass = (4/3)π·50³·3000 ≈ 1.5708e9 kg, E = ½mv² ≈ 3.1416e17 J
        assert!(rel_close(energy.joules, 3.14159e17, 1e-4));
        assert!(rel_close(energy.megatons_tnt, 75.085, 1e-3));

        let crater = crater_size(energy.megatons_tnt, 1.0);
        assert!(rel_close(crater.diameter_m, 3002.0, 1e-3));
        assert!(rel_close(crater.depth_m, crater.diameter_m / 5.0, 1e-12));

        let seismic = seismic_effects(energy.joules);
        assert!(rel_close(seismic.magnitude, 5.7981, 1e-3));
        assert!(rel_close(seismic.radius_km, 250.6, 1e-2));
    }

    #[test]
    fn test_energy_monotonic_in_size_and_velocity() {
        let base = city_killer();
        let e0 = kinetic_energy(&base).joules;

        let mut bigger = base.clone();
        bigger.size_m = 150.0;
        assert!(kinetic_energy(&bigger).joules > e0);

        let mut faster = base.clone();
        faster.velocity_km_s = 30.0;
        assert!(kinetic_energy(&faster).joules > e0);
    }

    #[test]
    fn test_crater_scaling_exponent() {
        let d1 = crater_size(50.0, 1.0).diameter_m;
        let d2 = crater_size(100.0, 1.0).diameter_m;
        assert!(rel_close(d2 / d1, 2.0_f64.powf(0.22), 1e-9));
    }

    #[test]
    fn test_severity_boundaries_exclusive_upper() {
        assert_eq!(classify_severity(0.0009999), Severity::Minimal);
        assert_eq!(classify_severity(0.001), Severity::Local);
        assert_eq!(classify_severity(0.0011), Severity::Local);
        assert_eq!(classify_severity(0.1), Severity::CityWide);
        assert_eq!(classify_severity(10.0), Severity::Regional);
        assert_eq!(classify_severity(1000.0), Severity::Continental);
        assert_eq!(classify_severity(100_000.0), Severity::GlobalClimate);
        assert_eq!(classify_severity(1e8), Severity::MassExtinction);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Minimal < Severity::Local);
        assert!(Severity::GlobalClimate < Severity::MassExtinction);
    }

    #[test]
    fn test_zero_energy_yields_zero_results() {
        let mut params = city_killer();
        params.size_m = 0.0;
        let energy = kinetic_energy(&params);
        assert_eq!(energy.joules, 0.0);

        let crater = crater_size(energy.megatons_tnt, 1.0);
        assert_eq!(crater.diameter_m, 0.0);

        let seismic = seismic_effects(energy.joules);
        assert_eq!(seismic.magnitude, 0.0);
        assert_eq!(seismic.radius_km, 0.0);

        let atmo = atmospheric_effects(energy.megatons_tnt);
        assert_eq!(atmo.fireball_radius_km, 0.0);
    }

    #[test]
    fn test_tsunami_absent_on_dry_land() {
        assert!(tsunami_effects(75.0, false).is_none());

        let terrain = FixedTerrain(TerrainInfo {
            terrain_type: TerrainType::Crystalline,
            elevation_m: 410.0,
            is_water: false,
        });
        let population = FixedPopulation(PopulationInfo {
            density_per_km2: 20.0,
            nearest_city: None,
        });
        let results = simulate(&city_killer(), &terrain, &population);
        assert!(results.tsunami.is_none());
    }

    #[test]
    fn test_tsunami_present_for_water_impact() {
        let wave = tsunami_effects(75.0, true).unwrap();
        assert!(wave.wave_height_m > 0.0 && wave.wave_height_m <= 500.0);
        assert!(wave.affected_radius_km > 0.0 && wave.affected_radius_km <= 10_000.0);

        // Physical caps at absurd energies.
        let capped = tsunami_effects(1e12, true).unwrap();
        assert_eq!(capped.wave_height_m, 500.0);
        assert_eq!(capped.affected_radius_km, 10_000.0);
    }

    #[test]
    fn test_terrain_coastal_overrides_water_flag() {
        let terrain = FixedTerrain(TerrainInfo {
            terrain_type: TerrainType::Coastal,
            elevation_m: 2.0,
            is_water: false,
        });
        let population = FixedPopulation(PopulationInfo {
            density_per_km2: 5000.0,
            nearest_city: Some("Lisbon".to_string()),
        });

        let mut params = city_killer();
        params.is_water_impact = false;
        let results = simulate(&params, &terrain, &population);
        assert!(results.tsunami.is_some());
        assert_eq!(
            results.population.as_ref().unwrap().nearest_city.as_deref(),
            Some("Lisbon")
        );
    }

    #[test]
    fn test_simulate_degrades_on_lookup_failure() {
        let results = simulate(&city_killer(), &FailingLookup, &FailingLookup);

        assert!(results.terrain.is_none());
        assert!(results.population.is_none());
        // Everything computable is still computed.
        assert!(results.energy.joules > 0.0);
        assert!(results.crater.diameter_m > 0.0);
        assert!(results.seismic.magnitude > 0.0);
        assert!(results.casualties.affected_population > 0);
    }

    #[test]
    fn test_casualty_heuristic() {
        // damage radius = sqrt(MT)·5; affected = πr²·1000; deaths = 10%.
        let results = simulate(&city_killer(), &FailingLookup, &FailingLookup);
        let mt = results.energy.megatons_tnt;
        let r = mt.sqrt() * 5.0;
        let affected = r * r * std::f64::consts::PI * 1000.0;

        assert!(rel_close(results.damage_radius_km, r, 1e-12));
        assert_eq!(results.casualties.affected_population, affected as u64);
        assert_eq!(results.casualties.estimated_deaths, (affected * 0.10) as u64);
    }

    #[test]
    fn test_crater_size_at_uses_terrain_enhancement() {
        let hard_rock = FixedTerrain(TerrainInfo {
            terrain_type: TerrainType::Crystalline,
            elevation_m: 300.0,
            is_water: false,
        });
        let with_terrain = crater_size_at(75.0, &hard_rock, 0.0, 0.0);
        let reference = crater_size(75.0, 1.0);
        assert!(with_terrain.diameter_m < reference.diameter_m);

        // Lookup failure falls back to the bare law.
        let fallback = crater_size_at(75.0, &FailingLookup, 0.0, 0.0);
        assert!(rel_close(fallback.diameter_m, reference.diameter_m, 1e-12));
    }
}
