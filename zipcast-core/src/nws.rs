//! Two-hop forecast fetch against the National Weather Service API.
//!
//! Hop one resolves coordinates to a gridpoint document
//! (`/points/{lat},{lon}`) and extracts `properties.forecast`, a URL. Hop
//! two fetches that URL and extracts `properties.periods`. Both calls carry
//! the identifying `User-Agent` the service requires and share one bounded
//! timeout. No retries: a failed call fails the invocation.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::ForecastError;
use crate::model::ForecastPeriod;
use crate::report::Reporter;

const NWS_BASE_URL: &str = "https://api.weather.gov";

#[derive(Debug, Clone)]
pub struct NwsClient {
    http: Client,
    base_url: String,
}

impl NwsClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, NWS_BASE_URL)
    }

    /// Like [`NwsClient::new`] but pointed at a different points endpoint.
    /// Tests use this to target a local mock server.
    pub fn with_base_url(config: &Config, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .context("Failed to build HTTP client for the NWS API")?;

        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Fetch the forecast periods for the given coordinates, in the order
    /// the API returns them.
    ///
    /// The coordinates arrive as the resolver's decimal strings and are
    /// narrowed to four decimal places for the points URL, which is the
    /// resolution the NWS gridpoint lookup expects.
    pub async fn fetch_forecast(
        &self,
        latitude: &str,
        longitude: &str,
        reporter: &dyn Reporter,
    ) -> Result<Vec<ForecastPeriod>, ForecastError> {
        let lat: f64 = latitude
            .parse()
            .map_err(|_| ForecastError::BadCoordinate(latitude.to_string()))?;
        let lon: f64 = longitude
            .parse()
            .map_err(|_| ForecastError::BadCoordinate(longitude.to_string()))?;

        let points_url = format!("{}/points/{lat:.4},{lon:.4}", self.base_url);
        reporter.note(&format!("Fetching gridpoint data from: {points_url}"));

        let response = self
            .http
            .get(&points_url)
            .send()
            .await
            .map_err(ForecastError::PointsRequest)?;

        let status = response.status();
        let body = response.text().await.map_err(ForecastError::PointsRequest)?;

        if !status.is_success() {
            return Err(ForecastError::PointsStatus(status.as_u16()));
        }

        let points: PointsResponse =
            serde_json::from_str(&body).map_err(ForecastError::PointsDecode)?;

        let forecast_url = points
            .properties
            .and_then(|p| p.forecast)
            .ok_or(ForecastError::MissingForecastUrl { raw_body: body })?;

        reporter.note(&format!("Fetching actual forecast from: {forecast_url}"));

        let response = self
            .http
            .get(&forecast_url)
            .send()
            .await
            .map_err(ForecastError::ForecastRequest)?;

        let status = response.status();
        let body = response.text().await.map_err(ForecastError::ForecastRequest)?;

        if !status.is_success() {
            return Err(ForecastError::ForecastStatus(status.as_u16()));
        }

        let document: ForecastResponse =
            serde_json::from_str(&body).map_err(ForecastError::ForecastDecode)?;

        let periods = document.properties.map(|p| p.periods).unwrap_or_default();

        Ok(periods.into_iter().map(RawPeriod::into_period).collect())
    }
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: Option<PointsProperties>,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    forecast: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: Option<ForecastProperties>,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    #[serde(default)]
    periods: Vec<RawPeriod>,
}

/// A forecast period as the API sends it, before defaulting.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPeriod {
    name: Option<String>,
    temperature: Option<i64>,
    temperature_unit: Option<String>,
    wind_speed: Option<String>,
    wind_direction: Option<String>,
    short_forecast: Option<String>,
    probability_of_precipitation: Option<RawPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct RawPrecipitation {
    value: Option<serde_json::Number>,
}

impl RawPeriod {
    /// Project into the display model. The API omits or nulls fields freely;
    /// the output never does.
    fn into_period(self) -> ForecastPeriod {
        let chance_of_precipitation = match self.probability_of_precipitation.and_then(|p| p.value)
        {
            Some(value) => format!("{value}%"),
            None => "0%".to_string(),
        };

        ForecastPeriod {
            name: self.name.unwrap_or_else(|| "N/A".to_string()),
            temperature: self.temperature.unwrap_or(0),
            temperature_unit: self.temperature_unit.unwrap_or_else(|| "F".to_string()),
            wind_speed: self.wind_speed.unwrap_or_else(|| "N/A".to_string()),
            wind_direction: self.wind_direction.unwrap_or_else(|| "N/A".to_string()),
            short_forecast: self.short_forecast.unwrap_or_else(|| "N/A".to_string()),
            chance_of_precipitation,
        }
    }
}
