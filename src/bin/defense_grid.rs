// Defense Grid demo: fetch the upcoming NeoWs feed, derive orbits for each
// object, report the nearest approach over the next year, and run a sample
// impact simulation for the largest hazardous object.

use chrono::{Duration, Utc};
use tracing::{info, warn};

use defense_grid::{
    classify_severity, closest_approach, derive_elements_for, simulate, Error, ImpactParameters,
    NeoWsClient, PopulationInfo, PopulationLookup, Result, TerrainInfo, TerrainLookup,
};

/// Offline lookups for the demo: no tile service wired in, so the
/// simulation exercises its graceful-degradation path.
struct OfflineLookup;

impl TerrainLookup for OfflineLookup {
    fn lookup_terrain(&self, lat: f64, lng: f64) -> Result<TerrainInfo> {
        Err(Error::LookupFailed {
            lat,
            lng,
            reason: "no terrain service configured".to_string(),
        })
    }
}

impl PopulationLookup for OfflineLookup {
    fn lookup_population(&self, lat: f64, lng: f64) -> Result<PopulationInfo> {
        Err(Error::LookupFailed {
            lat,
            lng,
            reason: "no population service configured".to_string(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "defense_grid=info".into()),
        )
        .init();

    let client = NeoWsClient::from_env()?;

    let today = Utc::now().date_naive();
    let start = today.format("%Y-%m-%d").to_string();
    let end = (today + Duration::days(7)).format("%Y-%m-%d").to_string();

    info!(%start, %end, "fetching NeoWs feed");
    let records = client.fetch_feed(&start, &end).await?;
    info!(count = records.len(), "objects received");

    let now = Utc::now();
    for record in &records {
        let elements = match derive_elements_for(&record.id, &record.close_approaches) {
            Ok(elements) => elements,
            Err(e) => {
                warn!(id = %record.id, error = %e, "no orbit available, skipping");
                continue;
            }
        };

        let approach = closest_approach(&elements, now, now + Duration::days(365));
        println!(
            "{:<24} a={:.2} AU e={:.2} i={:.1}°  nearest {:.3e} km on {}",
            record.name,
            elements.semi_major_axis_au,
            elements.eccentricity,
            elements.inclination_deg,
            approach.distance_km,
            approach.date.format("%Y-%m-%d"),
        );
    }

    // Impact simulation for the largest hazardous object, aimed at a
    // reference mid-ocean site.
    if let Some(worst) = records
        .iter()
        .filter(|r| r.is_potentially_hazardous)
        .max_by(|a, b| a.estimated_diameter_m.total_cmp(&b.estimated_diameter_m))
    {
        let velocity = worst
            .close_approaches
            .first()
            .map(|ca| ca.relative_velocity_km_s)
            .unwrap_or(20.0);

        let params = ImpactParameters {
            size_m: worst.estimated_diameter_m,
            density_kg_m3: worst.estimated_density_kg_m3,
            velocity_km_s: velocity,
            impact_angle_deg: 45.0,
            lat: 0.0,
            lng: -30.0,
            is_water_impact: true,
        };

        let results = simulate(&params, &OfflineLookup, &OfflineLookup);
        println!(
            "\nWorst case: {} ({:.0} m) -> {:.1} MT, {:?}, crater {:.0} m, Mw {:.1}",
            worst.name,
            worst.estimated_diameter_m,
            results.energy.megatons_tnt,
            classify_severity(results.energy.megatons_tnt),
            results.crater.diameter_m,
            results.seismic.magnitude,
        );
        if let Some(tsunami) = results.tsunami {
            println!(
                "Tsunami: {:.0} m waves out to {:.0} km",
                tsunami.wave_height_m, tsunami.affected_radius_km
            );
        }
    }

    Ok(())
}
