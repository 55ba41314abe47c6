use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use zipcast_core::{
    Config, ConsoleReporter, ForecastError, LocateError, NwsClient, OutputPayload, Reporter,
    SilentReporter, resolve_zip,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "zipcast", version, about = "ZIP-code weather forecast from the NWS")]
pub struct Cli {
    /// US ZIP code. When given, the process prints exactly one JSON document
    /// on stdout (for a calling front-end) instead of interactive text.
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// Interactive: progress and results as human-readable console text.
    Console,
    /// Front-end invocation: one JSON payload line, nothing else, on stdout.
    Json,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let (zip, mode) = match self.zip {
            Some(zip) => (zip, OutputMode::Json),
            None => (prompt_zip()?, OutputMode::Console),
        };

        let reporter: &dyn Reporter = match mode {
            OutputMode::Console => &ConsoleReporter,
            OutputMode::Json => &SilentReporter,
        };

        let config = Config::load().context("Failed to load configuration")?;
        let client = NwsClient::new(&config)?;

        let (payload, ok) = gather(&zip, &client, reporter).await;

        match mode {
            OutputMode::Json => {
                let line = serde_json::to_string(&payload)
                    .context("Failed to serialize output payload")?;
                println!("{line}");
            }
            OutputMode::Console => render_console(&payload),
        }

        Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
    }
}

/// Run the two-stage pipeline and build the payload.
///
/// The resolver stage short-circuits the fetch: a ZIP that cannot be
/// resolved never produces a network call. Returns the payload plus whether
/// the whole invocation succeeded.
async fn gather(zip: &str, client: &NwsClient, reporter: &dyn Reporter) -> (OutputPayload, bool) {
    let mut payload = OutputPayload::default();

    let location = match resolve_zip(zip, reporter) {
        Ok(location) => location,
        Err(err) => {
            if matches!(err, LocateError::NoGeoData(_)) {
                reporter.note(
                    "This might be an invalid ZIP code or not available in the database for the US.",
                );
            }
            payload.error_message = Some(err.to_string());
            return (payload, false);
        }
    };

    payload.location_name = Some(location.display_name.clone());
    payload.latitude = Some(location.latitude.clone());
    payload.longitude = Some(location.longitude.clone());

    match client.fetch_forecast(&location.latitude, &location.longitude, reporter).await {
        Ok(periods) => payload.forecast_periods = periods,
        Err(err) => {
            if let ForecastError::MissingForecastUrl { raw_body } = &err {
                reporter.note("Raw points data received:");
                reporter.note(raw_body);
            }
            payload.error_message =
                Some(join_errors(payload.error_message.take(), &err.to_string()));
            return (payload, false);
        }
    }

    (payload, true)
}

/// Join stage errors so a later failure never masks an earlier one.
fn join_errors(previous: Option<String>, current: &str) -> String {
    match previous {
        Some(previous) => format!("{previous}; {current}"),
        None => current.to_string(),
    }
}

fn prompt_zip() -> Result<String> {
    let zip = inquire::Text::new("Please enter the US ZIP code:")
        .prompt()
        .context("Failed to read ZIP code from the prompt")?;

    Ok(zip.trim().to_string())
}

/// Human-readable rendering for interactive mode: at most the first four
/// periods, or a fallback line when there is nothing to show.
fn render_console(payload: &OutputPayload) {
    if let Some(error) = &payload.error_message {
        println!("\nError: {error}");
    }

    if !payload.forecast_periods.is_empty() {
        println!("\n--- Weather Forecast ---");
        for period in payload.forecast_periods.iter().take(4) {
            println!("\n>> {}:", period.name);
            println!("   Temperature: {}°{}", period.temperature, period.temperature_unit);
            println!("   Chance of Precipitation: {}", period.chance_of_precipitation);
            println!("   Wind: {} {}", period.wind_speed, period.wind_direction);
            println!("   Forecast: {}", period.short_forecast);
        }
    } else if payload.error_message.is_none() {
        println!("\nCould not retrieve the weather forecast details.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> NwsClient {
        NwsClient::with_base_url(&Config::default(), &server.uri())
            .expect("client must build against the mock server")
    }

    #[tokio::test]
    async fn invalid_zip_short_circuits_before_any_fetch() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let (payload, ok) = gather("00000", &client, &SilentReporter).await;

        assert!(!ok);
        assert!(payload.location_name.is_none());
        assert!(payload.latitude.is_none());
        assert!(payload.longitude.is_none());
        assert!(payload.forecast_periods.is_empty());

        let message = payload.error_message.expect("error message must be set");
        assert!(message.contains("00000"));

        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn valid_zip_produces_a_complete_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/points/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": { "forecast": format!("{}/forecast", server.uri()) }
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": {
                    "periods": [
                        {
                            "name": "Today",
                            "temperature": 72,
                            "temperatureUnit": "F",
                            "windSpeed": "10 mph",
                            "windDirection": "NW",
                            "shortForecast": "Sunny",
                            "probabilityOfPrecipitation": { "value": null }
                        }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let (payload, ok) = gather("20500", &client, &SilentReporter).await;

        assert!(ok);
        assert!(payload.location_name.is_some());
        assert!(payload.latitude.is_some());
        assert!(payload.longitude.is_some());
        assert!(payload.error_message.is_none());
        assert_eq!(payload.forecast_periods.len(), 1);
        assert_eq!(payload.forecast_periods[0].chance_of_precipitation, "0%");

        // The emitted line is what a calling front-end parses back.
        let line = serde_json::to_string(&payload).expect("payload must serialize");
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("line must parse");
        assert_eq!(parsed["ForecastPeriods"][0]["Name"], "Today");
        assert!(parsed["ErrorMessage"].is_null());
    }

    #[tokio::test]
    async fn fetch_failure_keeps_resolved_location_in_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let (payload, ok) = gather("20500", &client, &SilentReporter).await;

        assert!(!ok);
        assert!(payload.latitude.is_some());
        assert!(payload.longitude.is_some());
        assert!(payload.forecast_periods.is_empty());

        let message = payload.error_message.expect("error message must be set");
        assert!(message.contains("404"));
    }

    #[test]
    fn error_joining_never_masks_the_earlier_stage() {
        assert_eq!(join_errors(None, "fetch failed"), "fetch failed");
        assert_eq!(
            join_errors(Some("lookup failed".to_string()), "fetch failed"),
            "lookup failed; fetch failed"
        );
    }

    #[test]
    fn zip_argument_is_optional() {
        let cli = Cli::try_parse_from(["zipcast", "20500"]).expect("zip arg must parse");
        assert_eq!(cli.zip.as_deref(), Some("20500"));

        let cli = Cli::try_parse_from(["zipcast"]).expect("bare invocation must parse");
        assert!(cli.zip.is_none());
    }
}
