// geocode.rs
use crate::config::GEOCODER_URL;
use crate::scraper::ScrapeError;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Sentinel tract for listings the geocoder could not place. Join-based
/// reports exclude it explicitly (`tract_id != 0`) rather than relying on
/// it matching no tract row.
pub const UNKNOWN_TRACT: i64 = 0;

// Census coordinates->geographies responses nest the tract id several
// levels down; any level may be absent when the service errors out.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    result: Option<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geographies: Option<Geographies>,
}

#[derive(Debug, Deserialize)]
struct Geographies {
    #[serde(rename = "Census Tracts")]
    census_tracts: Option<Vec<CensusTract>>,
}

#[derive(Debug, Deserialize)]
struct CensusTract {
    #[serde(rename = "TRACT")]
    tract: Option<String>,
}

fn extract_tract(body: &GeocodeResponse) -> Option<i64> {
    body.result
        .as_ref()?
        .geographies
        .as_ref()?
        .census_tracts
        .as_ref()?
        .first()?
        .tract
        .as_ref()?
        .trim()
        .parse()
        .ok()
}

pub struct TractLocator {
    client: Client,
}

impl TractLocator {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Resolve coordinates to a census tract. Every failure mode - network
    /// error, timeout, non-2xx, or a response without a tract - collapses to
    /// the unknown sentinel; a bad lookup never aborts the batch.
    pub fn tract_for(&self, latitude: f64, longitude: f64) -> i64 {
        match self.try_tract_for(latitude, longitude) {
            Ok(Some(tract)) => tract,
            Ok(None) => UNKNOWN_TRACT,
            Err(e) => {
                eprintln!("⚠️ Geocoding ({latitude}, {longitude}) failed: {e}");
                UNKNOWN_TRACT
            }
        }
    }

    fn try_tract_for(&self, latitude: f64, longitude: f64) -> Result<Option<i64>, ScrapeError> {
        let resp = self
            .client
            .get(GEOCODER_URL)
            .query(&[
                ("x", longitude.to_string()),
                ("y", latitude.to_string()),
                ("benchmark", "Public_AR_Current".to_string()),
                ("vintage", "Current_Current".to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16(), GEOCODER_URL.to_string()));
        }

        let body: GeocodeResponse = resp
            .json()
            .map_err(|e| ScrapeError::JsonParse(e.to_string()))?;

        Ok(extract_tract(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tract_from_a_full_response() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{
                "result": {
                    "geographies": {
                        "Census Tracts": [
                            {"TRACT": "101110", "GEOID": "06037101110"}
                        ]
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(extract_tract(&body), Some(101110));
    }

    #[test]
    fn error_shaped_body_yields_no_tract() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{"errors": ["benchmark required"], "status": "400"}"#,
        )
        .unwrap();
        assert_eq!(extract_tract(&body), None);

        let body: GeocodeResponse = serde_json::from_str(
            r#"{"result": {"geographies": {"Census Tracts": []}}}"#,
        )
        .unwrap();
        assert_eq!(extract_tract(&body), None);
    }

    #[test]
    fn non_numeric_tract_yields_no_tract() {
        let body: GeocodeResponse = serde_json::from_str(
            r#"{"result": {"geographies": {"Census Tracts": [{"TRACT": "n/a"}]}}}"#,
        )
        .unwrap();
        assert_eq!(extract_tract(&body), None);
    }
}
