// Physical constants shared by the orbital propagator and the impact
// calculator. Kept in one place so the two never drift apart.

/// Astronomical Unit in meters
pub const AU: f64 = 1.495978707e11;

/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 1.495978707e8;

/// Sun's gravitational parameter μ = G * M_sun (m³/s²)
pub const MU_SUN: f64 = 1.32712440018e20;

/// Earth's gravitational parameter μ = G * M_earth (m³/s²)
pub const MU_EARTH: f64 = 3.986004418e14;

/// Gravitational constant (m³/(kg·s²))
pub const G: f64 = 6.67430e-11;

/// Earth's mean radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean heliocentric orbital speed (km/s)
pub const EARTH_ORBITAL_SPEED_KM_S: f64 = 29.78;

/// Mean solar days per Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Joules per kiloton of TNT
pub const TNT_JOULES_PER_KILOTON: f64 = 4.184e9;

/// Joules per megaton of TNT
pub const TNT_JOULES_PER_MEGATON: f64 = TNT_JOULES_PER_KILOTON * 1e6;

/// Speed of light (m/s)
pub const C: f64 = 299_792_458.0;

/// Earth's mean longitude at the J2000 epoch (degrees)
pub const EARTH_MEAN_LONGITUDE_J2000_DEG: f64 = 100.46435;

/// Earth's mean motion (degrees per day)
pub const EARTH_MEAN_MOTION_DEG_PER_DAY: f64 = 0.985_609_1;

/// Asteroid density by spectral type (kg/m³)
/// References: Carry (2012), DeMeo & Carry (2013)
pub mod asteroid_density {
    pub const C_TYPE: f64 = 1700.0; // Carbonaceous
    pub const S_TYPE: f64 = 2700.0; // Silicaceous
    pub const M_TYPE: f64 = 4000.0; // Metallic
    pub const DEFAULT: f64 = 2000.0; // Rubble pile average
}
