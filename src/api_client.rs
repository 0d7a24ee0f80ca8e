// NASA NeoWs API client. Fetches near-Earth-object records and reduces
// the stringly-typed payloads to the close-approach samples the orbit
// derivation needs.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::constants::asteroid_density;
use crate::error::{Error, Result};
use crate::propagator::CloseApproachSample;

const NEOWS_BASE_URL: &str = "https://api.nasa.gov/neo/rest/v1";

// =============================================================================
// API RESPONSE TYPES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoWsFeedResponse {
    pub element_count: Option<i32>,
    pub near_earth_objects: Option<HashMap<String, Vec<NeoObject>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoWsBrowseResponse {
    pub page: Option<PageInfo>,
    pub near_earth_objects: Vec<NeoObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub size: i32,
    pub total_elements: i32,
    pub total_pages: i32,
    pub number: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoObject {
    pub id: String,
    pub name: String,
    pub absolute_magnitude_h: Option<f64>,
    pub estimated_diameter: Option<EstimatedDiameter>,
    pub is_potentially_hazardous_asteroid: Option<bool>,
    pub close_approach_data: Option<Vec<CloseApproachData>>,
    pub orbital_data: Option<OrbitalData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: Option<DiameterRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproachData {
    pub close_approach_date: Option<String>,
    pub epoch_date_close_approach: Option<i64>,
    pub relative_velocity: Option<RelativeVelocity>,
    pub miss_distance: Option<MissDistance>,
    pub orbiting_body: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_second: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissDistance {
    pub kilometers: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitalData {
    pub orbit_class: Option<OrbitClass>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitClass {
    pub orbit_class_type: Option<String>,
}

// =============================================================================
// PROCESSED RECORDS
// =============================================================================

/// A NeoWs object reduced to what the simulators consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    pub estimated_diameter_m: f64,
    pub estimated_density_kg_m3: f64,
    pub estimated_mass_kg: f64,
    pub is_potentially_hazardous: bool,
    pub absolute_magnitude: f64,
    pub orbit_class: String,
    pub close_approaches: Vec<CloseApproachSample>,
}

/// Estimate asteroid density based on spectral/orbit class.
/// References: Carry (2012), DeMeo & Carry (2013)
fn estimate_density(orbit_class: &str) -> f64 {
    match orbit_class.to_uppercase().as_str() {
        // NEA orbital classes carry no spectral information
        "AMO" | "APO" | "ATE" | "IEO" => asteroid_density::DEFAULT,

        s if s.contains('C') => asteroid_density::C_TYPE,
        s if s.contains('S') => asteroid_density::S_TYPE,
        s if s.contains('M') => asteroid_density::M_TYPE,

        _ => asteroid_density::DEFAULT,
    }
}

/// Mass from spherical volume and class-estimated density.
fn estimate_mass(diameter_m: f64, density: f64) -> f64 {
    let radius = diameter_m / 2.0;
    let volume = (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3);
    density * volume
}

fn parse_approach_date(data: &CloseApproachData) -> Option<DateTime<Utc>> {
    if let Some(epoch_ms) = data.epoch_date_close_approach {
        return Utc.timestamp_millis_opt(epoch_ms).single();
    }
    data.close_approach_date
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

impl NeoObject {
    /// Reduce the raw API object to a [`NeoRecord`]. Returns `None` when
    /// the payload is missing everything the simulators need.
    pub fn to_record(&self) -> Option<NeoRecord> {
        let diameter = self
            .estimated_diameter
            .as_ref()
            .and_then(|d| d.meters.as_ref())
            .map(|m| (m.estimated_diameter_min + m.estimated_diameter_max) / 2.0)?;

        let orbit_class = self
            .orbital_data
            .as_ref()
            .and_then(|o| o.orbit_class.as_ref())
            .and_then(|c| c.orbit_class_type.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        let density = estimate_density(&orbit_class);

        let close_approaches = self
            .close_approach_data
            .as_ref()
            .map(|approaches| {
                approaches
                    .iter()
                    .filter(|ca| ca.orbiting_body.as_deref().unwrap_or("Earth") == "Earth")
                    .filter_map(|ca| {
                        Some(CloseApproachSample {
                            date: parse_approach_date(ca)?,
                            relative_velocity_km_s: ca
                                .relative_velocity
                                .as_ref()
                                .and_then(|v| v.kilometers_per_second.as_ref())
                                .and_then(|s| s.parse().ok())?,
                            miss_distance_km: ca
                                .miss_distance
                                .as_ref()
                                .and_then(|m| m.kilometers.as_ref())
                                .and_then(|s| s.parse().ok())?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(NeoRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            estimated_diameter_m: diameter,
            estimated_density_kg_m3: density,
            estimated_mass_kg: estimate_mass(diameter, density),
            is_potentially_hazardous: self.is_potentially_hazardous_asteroid.unwrap_or(false),
            absolute_magnitude: self.absolute_magnitude_h.unwrap_or(0.0),
            orbit_class,
            close_approaches,
        })
    }
}

// =============================================================================
// API CLIENT
// =============================================================================

pub struct NeoWsClient {
    api_key: String,
    client: reqwest::Client,
}

impl NeoWsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from `NASA_API_KEY` in the environment (a `.env`
    /// file is honored).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let api_key = std::env::var("NASA_API_KEY").map_err(|_| Error::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "NeoWs request");
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::ApiStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Fetch NEOs that approach Earth in a date range (inclusive).
    pub async fn fetch_feed(&self, start_date: &str, end_date: &str) -> Result<Vec<NeoRecord>> {
        let url = format!(
            "{}/feed?start_date={}&end_date={}&api_key={}",
            NEOWS_BASE_URL, start_date, end_date, self.api_key
        );

        let data: NeoWsFeedResponse = self.get_json(&url).await?;

        let mut records = Vec::new();
        if let Some(neo_map) = data.near_earth_objects {
            for (_date, neos) in neo_map {
                for neo in neos {
                    match neo.to_record() {
                        Some(record) => records.push(record),
                        None => warn!(id = %neo.id, "skipping NEO with unusable payload"),
                    }
                }
            }
        }

        Ok(records)
    }

    /// Browse all NEOs with pagination. Returns the records and the total
    /// page count.
    pub async fn browse(&self, page: i32, size: i32) -> Result<(Vec<NeoRecord>, i32)> {
        let url = format!(
            "{}/neo/browse?page={}&size={}&api_key={}",
            NEOWS_BASE_URL, page, size, self.api_key
        );

        let data: NeoWsBrowseResponse = self.get_json(&url).await?;

        let total_pages = data.page.map(|p| p.total_pages).unwrap_or(1);
        let records = data
            .near_earth_objects
            .iter()
            .filter_map(NeoObject::to_record)
            .collect();

        Ok((records, total_pages))
    }

    /// Fetch a specific NEO by id.
    pub async fn fetch_neo(&self, neo_id: &str) -> Result<NeoRecord> {
        let url = format!("{}/neo/{}?api_key={}", NEOWS_BASE_URL, neo_id, self.api_key);

        let neo: NeoObject = self.get_json(&url).await?;
        neo.to_record()
            .ok_or_else(|| Error::InsufficientData(neo_id.to_string()))
    }
}

// =============================================================================
// FETCH CACHE
// =============================================================================

use parking_lot::RwLock;
use std::time::{Duration, Instant};

/// In-memory cache for fetched records so UI refreshes do not re-hit the
/// NASA rate limit.
pub struct NeoCache {
    records: RwLock<Vec<NeoRecord>>,
    last_fetch: RwLock<Option<Instant>>,
    ttl: Duration,
}

impl NeoCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            last_fetch: RwLock::new(None),
            ttl,
        }
    }

    pub fn get(&self) -> Option<Vec<NeoRecord>> {
        let last = (*self.last_fetch.read())?;
        if last.elapsed() < self.ttl {
            Some(self.records.read().clone())
        } else {
            None
        }
    }

    pub fn set(&self, records: Vec<NeoRecord>) {
        *self.records.write() = records;
        *self.last_fetch.write() = Some(Instant::now());
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for NeoCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(3600))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_NEO: &str = r#"{
        "id": "3542519",
        "name": "(2010 PK9)",
        "absolute_magnitude_h": 21.87,
        "is_potentially_hazardous_asteroid": true,
        "estimated_diameter": {
            "meters": {
                "estimated_diameter_min": 110.8,
                "estimated_diameter_max": 247.8
            }
        },
        "close_approach_data": [
            {
                "close_approach_date": "2024-06-01",
                "epoch_date_close_approach": 1717200000000,
                "relative_velocity": { "kilometers_per_second": "18.1277" },
                "miss_distance": { "kilometers": "4190457.5" },
                "orbiting_body": "Earth"
            },
            {
                "close_approach_date": "2031-02-11",
                "relative_velocity": { "kilometers_per_second": "12.02" },
                "miss_distance": { "kilometers": "9100000.1" },
                "orbiting_body": "Venus"
            }
        ],
        "orbital_data": {
            "orbit_class": { "orbit_class_type": "APO" }
        }
    }"#;

    #[test]
    fn test_neo_payload_parsing() {
        let neo: NeoObject = serde_json::from_str(SAMPLE_NEO).unwrap();
        let record = neo.to_record().unwrap();

        assert_eq!(record.id, "3542519");
        assert!(record.is_potentially_hazardous);
        assert!((record.estimated_diameter_m - 179.3).abs() < 0.1);
        assert_eq!(record.estimated_density_kg_m3, asteroid_density::DEFAULT);
        assert!(record.estimated_mass_kg > 0.0);

        // Only the Earth approach survives.
        assert_eq!(record.close_approaches.len(), 1);
        let approach = &record.close_approaches[0];
        assert!((approach.relative_velocity_km_s - 18.1277).abs() < 1e-9);
        assert!((approach.miss_distance_km - 4_190_457.5).abs() < 1e-6);
    }

    #[test]
    fn test_neo_without_diameter_is_rejected() {
        let neo: NeoObject = serde_json::from_str(r#"{"id": "1", "name": "bare"}"#).unwrap();
        assert!(neo.to_record().is_none());
    }

    #[test]
    fn test_density_by_orbit_class() {
        assert_eq!(estimate_density("APO"), asteroid_density::DEFAULT);
        assert_eq!(estimate_density("C"), asteroid_density::C_TYPE);
        assert_eq!(estimate_density("S"), asteroid_density::S_TYPE);
        assert_eq!(estimate_density("M"), asteroid_density::M_TYPE);
        assert_eq!(estimate_density("weird"), asteroid_density::DEFAULT);
    }

    #[test]
    fn test_cache_expiry() {
        let cache = NeoCache::new(Duration::from_secs(0));
        assert!(cache.get().is_none());

        let neo: NeoObject = serde_json::from_str(SAMPLE_NEO).unwrap();
        cache.set(vec![neo.to_record().unwrap()]);
        assert_eq!(cache.len(), 1);
        // Zero TTL: immediately stale.
        assert!(cache.get().is_none());

        let fresh = NeoCache::default();
        let neo: NeoObject = serde_json::from_str(SAMPLE_NEO).unwrap();
        fresh.set(vec![neo.to_record().unwrap()]);
        assert_eq!(fresh.get().unwrap().len(), 1);
    }
}
