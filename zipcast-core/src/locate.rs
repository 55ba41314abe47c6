//! Offline ZIP-code → coordinates resolution.
//!
//! Backed by the `zipcodes` crate's embedded US dataset, so no network call
//! is involved. `filter_by` is used instead of `zipcodes::matching` to keep
//! the crate's debug printing off stdout, which front-end mode reserves for
//! the payload line.

use zipcodes::Zipcode;

use crate::error::LocateError;
use crate::report::Reporter;

/// A successfully resolved location.
///
/// Latitude and longitude are the dataset's own decimal strings, passed
/// through untouched rather than re-formatted from a float. By construction
/// they are either both present (this struct exists) or neither is (the
/// resolver returned an error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub latitude: String,
    pub longitude: String,
    pub display_name: String,
}

/// Resolve a US ZIP code against the offline dataset.
///
/// A ZIP with no dataset row, or a row whose coordinates do not parse as
/// finite decimals, is an error. A missing city or state is not: the city
/// falls back to `"N/A"` and an empty state is dropped from the display
/// name. Coordinates are load-bearing, names are cosmetic.
pub fn resolve_zip(zip: &str, reporter: &dyn Reporter) -> Result<ResolvedLocation, LocateError> {
    // Materializing the dataset up front keeps "the dataset is broken" and
    // "this ZIP query failed" as separate failures, like a geocoder that is
    // constructed before it is queried.
    let dataset = zipcodes::filter_by(vec![|_: &Zipcode| true], None)
        .map_err(|e| LocateError::GeocoderInit(format!("{e:?}")))?;

    reporter.note(&format!("\nQuerying information for ZIP code: {zip}..."));

    let matches = zipcodes::filter_by(vec![|z: &Zipcode| z.zip_code == zip], Some(dataset))
        .map_err(|e| LocateError::Query { zip: zip.to_string(), detail: format!("{e:?}") })?;

    let Some(entry) = matches.first() else {
        return Err(LocateError::NoGeoData(zip.to_string()));
    };

    if !is_finite_decimal(&entry.lat) || !is_finite_decimal(&entry.long) {
        return Err(LocateError::NoGeoData(zip.to_string()));
    }

    let display_name = format_display_name(&entry.city, &entry.state);

    reporter.note(&format!("\nLocation Information Found: {display_name}"));
    reporter.note(&format!(
        "Proceeding with Latitude: {}, Longitude: {} for weather lookup.",
        entry.lat, entry.long
    ));

    Ok(ResolvedLocation {
        latitude: entry.lat.clone(),
        longitude: entry.long.clone(),
        display_name,
    })
}

fn is_finite_decimal(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(f64::is_finite)
}

/// `"Springfield", "IL"` → `"Springfield, IL"`; an empty state leaves no
/// trailing comma, and an empty city becomes `"N/A"`.
fn format_display_name(city: &str, state: &str) -> String {
    let place = if city.is_empty() { "N/A" } else { city };

    if state.is_empty() { place.to_string() } else { format!("{place}, {state}") }
}
