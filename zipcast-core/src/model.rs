use serde::{Deserialize, Serialize};

/// One named forecast segment (e.g. "Tonight"), normalized for display.
///
/// Field names serialize in PascalCase to match the payload contract the
/// calling front-end already parses. Every field is always present: missing
/// upstream values are defaulted during projection, never passed through as
/// null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastPeriod {
    pub name: String,
    pub temperature: i64,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub short_forecast: String,
    pub chance_of_precipitation: String,
}

/// The single JSON document emitted in front-end (non-interactive) mode.
///
/// Built up incrementally over one invocation: location fields after the
/// resolver succeeds, periods after the fetch succeeds, `error_message` on
/// the first failure. `forecast_periods` is always a list, possibly empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputPayload {
    pub location_name: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub error_message: Option<String>,
    pub forecast_periods: Vec<ForecastPeriod>,
}
