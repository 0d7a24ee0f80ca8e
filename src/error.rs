// Error taxonomy. Missing observational data is a hard failure the caller
// must skip; lookup failures degrade to partial results and never surface
// through `simulate`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No close-approach observation exists, so no orbit can be derived.
    #[error("insufficient data: no close-approach sample for object {0}")]
    InsufficientData(String),

    /// A terrain or population lookup could not answer for the given site.
    #[error("lookup failed for ({lat}, {lng}): {reason}")]
    LookupFailed { lat: f64, lng: f64, reason: String },

    #[error("NASA API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("NASA API returned status {0}")]
    ApiStatus(reqwest::StatusCode),

    #[error("failed to parse NeoWs payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("NASA API key not configured (set NASA_API_KEY)")]
    MissingApiKey,
}

pub type Result<T> = std::result::Result<T, Error>;
