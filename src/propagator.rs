// Orbital propagator: heuristic element derivation from a single
// close-approach observation, Kepler's equation, and heliocentric state
// computation.
//
// The derived elements are an estimate, not a fitted orbit. Three of the
// six elements come from a seeded random source because a single radar
// sample cannot constrain them.

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::constants::{
    AU, AU_KM, DAYS_PER_YEAR, EARTH_MEAN_LONGITUDE_J2000_DEG, EARTH_MEAN_MOTION_DEG_PER_DAY,
    EARTH_ORBITAL_SPEED_KM_S, MU_SUN,
};
use crate::error::{Error, Result};
use crate::vector::{deg_to_rad, normalize_degrees, rad_to_deg, Vector3};

// Clamps for the derivation heuristic. Extreme observed velocities would
// otherwise produce hyperbolic or degenerate orbits.
const SEMI_MAJOR_AXIS_RANGE_AU: (f64, f64) = (0.5, 5.0);
const ECCENTRICITY_RANGE: (f64, f64) = (0.01, 0.95);
const INCLINATION_RANGE_DEG: (f64, f64) = (0.1, 35.0);

/// A single close-approach observation, the only input available for
/// orbit estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproachSample {
    pub date: DateTime<Utc>,
    pub relative_velocity_km_s: f64,
    pub miss_distance_km: f64,
}

/// Heliocentric Keplerian elements. Angles in degrees, distances in AU.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub ascending_node_deg: f64,
    pub argument_periapsis_deg: f64,
    pub mean_anomaly_deg: f64,
    pub epoch: DateTime<Utc>,
}

impl OrbitalElements {
    /// Orbital period in days via Kepler's third law. Always rederived
    /// from the semi-major axis, never stored.
    pub fn period_days(&self) -> f64 {
        self.semi_major_axis_au.powf(1.5) * DAYS_PER_YEAR
    }

    /// Mean motion in degrees per day.
    pub fn mean_motion_deg_per_day(&self) -> f64 {
        360.0 / self.period_days()
    }
}

/// Instantaneous heliocentric state derived from elements and a timestamp.
/// Never cached; recomputed for every (elements, time) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitalState {
    /// Heliocentric position (AU)
    pub position: Vector3,
    /// Heliocentric velocity (km/s)
    pub velocity: Vector3,
    pub true_anomaly_deg: f64,
    pub radius_au: f64,
    pub speed_km_s: f64,
}

/// Result of a brute-force closest-approach search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosestApproach {
    pub date: DateTime<Utc>,
    pub distance_km: f64,
    pub asteroid_position: Vector3,
    pub earth_position: Vector3,
}

/// Estimate orbital elements from the first close-approach sample.
///
/// Semi-major axis comes from a vis-viva approximation at 1 AU,
/// eccentricity from miss distance and approach speed, inclination from a
/// velocity-correlated heuristic plus a random spread. Node, argument of
/// periapsis and mean anomaly are drawn uniformly from [0°, 360°) since a
/// single sample cannot constrain them.
///
/// Fails with `InsufficientData` when no sample exists.
pub fn derive_elements<R: Rng>(
    object_id: &str,
    samples: &[CloseApproachSample],
    rng: &mut R,
) -> Result<OrbitalElements> {
    let sample = samples
        .first()
        .ok_or_else(|| Error::InsufficientData(object_id.to_string()))?;

    let v_rel = sample.relative_velocity_km_s.max(0.0);

    // Rough heliocentric speed at ~1 AU: the relative velocity added in
    // quadrature to Earth's own orbital speed.
    let v_helio =
        (v_rel * v_rel + EARTH_ORBITAL_SPEED_KM_S * EARTH_ORBITAL_SPEED_KM_S).sqrt();

    // Vis-viva at r = 1 AU: a = 1 / (2 - (v/v_circ)²), in AU.
    let ratio = v_helio / EARTH_ORBITAL_SPEED_KM_S;
    let denom = 2.0 - ratio * ratio;
    let semi_major_axis_au = if denom > 1e-6 {
        (1.0 / denom).clamp(SEMI_MAJOR_AXIS_RANGE_AU.0, SEMI_MAJOR_AXIS_RANGE_AU.1)
    } else {
        // Hyperbolic from the heuristic's point of view; pin to the outer edge.
        SEMI_MAJOR_AXIS_RANGE_AU.1
    };

    let miss_au = sample.miss_distance_km.max(0.0) / AU_KM;
    let eccentricity = (0.05 + v_rel / 100.0 + miss_au * 0.5)
        .clamp(ECCENTRICITY_RANGE.0, ECCENTRICITY_RANGE.1);

    let inclination_deg = (v_rel / 30.0 * 15.0 + rng.gen_range(0.0..10.0))
        .clamp(INCLINATION_RANGE_DEG.0, INCLINATION_RANGE_DEG.1);

    Ok(OrbitalElements {
        semi_major_axis_au,
        eccentricity,
        inclination_deg,
        ascending_node_deg: rng.gen_range(0.0..360.0),
        argument_periapsis_deg: rng.gen_range(0.0..360.0),
        mean_anomaly_deg: rng.gen_range(0.0..360.0),
        epoch: sample.date,
    })
}

/// Like [`derive_elements`], but seeds the random source from a hash of the
/// object id so the same object gets the same (arbitrary) orbit across
/// sessions.
pub fn derive_elements_for(
    object_id: &str,
    samples: &[CloseApproachSample],
) -> Result<OrbitalElements> {
    let mut hasher = DefaultHasher::new();
    object_id.hash(&mut hasher);
    let mut rng = StdRng::seed_from_u64(hasher.finish());
    derive_elements(object_id, samples, &mut rng)
}

/// Solve Kepler's equation M = E - e*sin(E) using Newton-Raphson.
/// Radians in, radians out. Fixed 10 iterations or convergence at 1e-12.
fn solve_kepler_equation(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut e_anom = mean_anomaly; // Initial guess
    let tolerance = 1e-12;
    let max_iterations = 10;

    for _ in 0..max_iterations {
        let f = e_anom - eccentricity * e_anom.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * e_anom.cos();
        let delta = f / f_prime;
        e_anom -= delta;

        if delta.abs() < tolerance {
            break;
        }
    }

    e_anom
}

/// Precomputed sin/cos products of the standard orbital Euler rotation
/// (perifocal -> heliocentric).
struct RotationCoefficients {
    r11: f64,
    r12: f64,
    r21: f64,
    r22: f64,
    r31: f64,
    r32: f64,
}

impl RotationCoefficients {
    fn from_elements(elements: &OrbitalElements) -> Self {
        let cos_omega = deg_to_rad(elements.ascending_node_deg).cos();
        let sin_omega = deg_to_rad(elements.ascending_node_deg).sin();
        let cos_w = deg_to_rad(elements.argument_periapsis_deg).cos();
        let sin_w = deg_to_rad(elements.argument_periapsis_deg).sin();
        let cos_i = deg_to_rad(elements.inclination_deg).cos();
        let sin_i = deg_to_rad(elements.inclination_deg).sin();

        Self {
            r11: cos_omega * cos_w - sin_omega * sin_w * cos_i,
            r12: -cos_omega * sin_w - sin_omega * cos_w * cos_i,
            r21: sin_omega * cos_w + cos_omega * sin_w * cos_i,
            r22: -sin_omega * sin_w + cos_omega * cos_w * cos_i,
            r31: sin_w * sin_i,
            r32: cos_w * sin_i,
        }
    }

    fn apply(&self, x: f64, y: f64) -> Vector3 {
        Vector3::new(
            self.r11 * x + self.r12 * y,
            self.r21 * x + self.r22 * y,
            self.r31 * x + self.r32 * y,
        )
    }
}

/// Heliocentric position for a given true anomaly (degrees), in AU.
fn position_at_true_anomaly(elements: &OrbitalElements, true_anomaly_deg: f64) -> Vector3 {
    let a = elements.semi_major_axis_au;
    let e = elements.eccentricity;
    let nu = deg_to_rad(true_anomaly_deg);
    let r = a * (1.0 - e * e) / (1.0 + e * nu.cos());

    let rot = RotationCoefficients::from_elements(elements);
    rot.apply(r * nu.cos(), r * nu.sin())
}

/// Compute the heliocentric state at `time`.
pub fn state_at(elements: &OrbitalElements, time: DateTime<Utc>) -> OrbitalState {
    let days_since_epoch =
        (time - elements.epoch).num_milliseconds() as f64 / 86_400_000.0;

    let mean_anomaly_deg = normalize_degrees(
        elements.mean_anomaly_deg + elements.mean_motion_deg_per_day() * days_since_epoch,
    );
    let mean_anomaly = deg_to_rad(mean_anomaly_deg);

    let e = elements.eccentricity;
    let a = elements.semi_major_axis_au;

    let eccentric_anomaly = solve_kepler_equation(mean_anomaly, e);

    // True anomaly via the half-angle atan2 form.
    let true_anomaly = 2.0
        * ((1.0 + e).sqrt() * (eccentric_anomaly / 2.0).sin())
            .atan2((1.0 - e).sqrt() * (eccentric_anomaly / 2.0).cos());

    let cos_nu = true_anomaly.cos();
    let sin_nu = true_anomaly.sin();
    let r = a * (1.0 - e * e) / (1.0 + e * cos_nu);

    let rot = RotationCoefficients::from_elements(elements);
    let position = rot.apply(r * cos_nu, r * sin_nu);

    // Vis-viva speed in m/s: r and a are in AU, MU_SUN in SI.
    let speed_m_s = (MU_SUN / AU * (2.0 / r - 1.0 / a)).max(0.0).sqrt();
    let speed_km_s = speed_m_s / 1000.0;

    // Perifocal velocity direction, rotated with the same coefficients.
    let v_dir = rot.apply(-sin_nu, e + cos_nu).normalize();
    let velocity = v_dir.scale(speed_km_s);

    OrbitalState {
        position,
        velocity,
        true_anomaly_deg: normalize_degrees(rad_to_deg(true_anomaly)),
        radius_au: r,
        speed_km_s,
    }
}

/// Sample the full orbit at `num_points` true anomalies, uniformly spaced
/// over 360°. Returns a fixed-size ordered sequence of heliocentric
/// positions in AU.
pub fn trajectory(elements: &OrbitalElements, num_points: usize) -> Vec<Vector3> {
    (0..num_points)
        .map(|i| position_at_true_anomaly(elements, 360.0 * i as f64 / num_points as f64))
        .collect()
}

/// Earth's heliocentric position as a unit-circle approximation: mean
/// longitude linear in days since J2000, radius fixed at 1 AU.
pub fn earth_position(time: DateTime<Utc>) -> Vector3 {
    let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let days = (time - j2000).num_milliseconds() as f64 / 86_400_000.0;

    let mean_longitude = deg_to_rad(normalize_degrees(
        EARTH_MEAN_LONGITUDE_J2000_DEG + EARTH_MEAN_MOTION_DEG_PER_DAY * days,
    ));

    Vector3::new(mean_longitude.cos(), mean_longitude.sin(), 0.0)
}

/// Brute-force closest-approach search over a date range, at most 1000
/// samples. Resolution is bounded by the step count; no bisection
/// refinement.
pub fn closest_approach(
    elements: &OrbitalElements,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ClosestApproach {
    let total_days = (end - start).num_days().max(1);
    let steps = (total_days as usize).min(1000);
    let step_ms = (end - start).num_milliseconds() / steps as i64;

    let mut best = ClosestApproach {
        date: start,
        distance_km: f64::MAX,
        asteroid_position: Vector3::zero(),
        earth_position: Vector3::zero(),
    };

    for i in 0..=steps {
        let t = start + chrono::Duration::milliseconds(step_ms * i as i64);
        let asteroid = state_at(elements, t).position;
        let earth = earth_position(t);
        let distance_au = asteroid.distance(&earth);

        if distance_au * AU_KM < best.distance_km {
            best = ClosestApproach {
                date: t,
                distance_km: distance_au * AU_KM,
                asteroid_position: asteroid,
                earth_position: earth,
            };
        }
    }

    best
}
