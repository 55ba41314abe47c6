//! Structured errors for the two pipeline stages.
//!
//! Every failure mode carries its own variant with a stable human-readable
//! message. Nothing here prints; rendering (console text vs JSON payload)
//! is the orchestrator's job.

use thiserror::Error;

/// Failures while resolving a ZIP code against the offline dataset.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Could not initialize geocoder: {0}")]
    GeocoderInit(String),

    #[error("Error querying postal code {zip}: {detail}")]
    Query { zip: String, detail: String },

    /// The ZIP is unknown, or its dataset row has unusable coordinates.
    #[error("No valid geographic information found for ZIP code: {0}")]
    NoGeoData(String),
}

/// Failures while fetching the forecast from the NWS API.
///
/// The gridpoint (points) hop and the forecast-document hop each get their
/// own transport/status/decode variants so the message always names the
/// failing hop.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A coordinate string that does not parse as a decimal number.
    #[error("Unexpected error fetching points: invalid coordinate '{0}'")]
    BadCoordinate(String),

    #[error("Request error fetching points: {0}")]
    PointsRequest(#[source] reqwest::Error),

    #[error("HTTP error fetching points (Status: {0})")]
    PointsStatus(u16),

    #[error("Error: Could not decode JSON from points endpoint.")]
    PointsDecode(#[source] serde_json::Error),

    /// Well-formed points JSON without `properties.forecast`. The raw body
    /// is kept so interactive mode can dump it for diagnosis.
    #[error("Error: Could not find the forecast URL in the NWS points data.")]
    MissingForecastUrl { raw_body: String },

    #[error("Request error fetching forecast: {0}")]
    ForecastRequest(#[source] reqwest::Error),

    #[error("HTTP error fetching forecast (Status: {0})")]
    ForecastStatus(u16),

    #[error("Error: Could not decode JSON from forecast endpoint.")]
    ForecastDecode(#[source] serde_json::Error),
}
