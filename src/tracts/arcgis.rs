use crate::config;
use crate::scraper::ScrapeError;
use reqwest::blocking::Client;
use serde::Deserialize;

/// The boundary/employment snapshot is a single census year.
pub const SNAPSHOT_YEAR: i64 = 2015;

#[derive(Debug, Deserialize)]
struct FeatureQueryResponse {
    features: Option<Vec<Feature>>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    attributes: TractAttributes,
}

#[derive(Debug, Deserialize)]
struct TractAttributes {
    #[serde(rename = "FIPS")]
    fips: Option<String>,
    #[serde(rename = "POPULATION")]
    population: Option<f64>,
    #[serde(rename = "SQMI")]
    sqmi: Option<f64>,
    #[serde(rename = "UNEMPRT_CY")]
    unemployment_rate: Option<f64>,
}

/// Per-tract geographic and employment figures, keyed by the tract-local
/// FIPS portion. Joined onto both remote series during the merge.
#[derive(Debug, Clone)]
pub struct TractSnapshot {
    pub fips_hood: i64,
    pub fips_county: i64,
    pub population: Option<i64>,
    pub sqmi: Option<f64>,
    pub unemployment_rate: Option<f64>,
}

pub fn fetch_snapshot(client: &Client) -> Result<Vec<TractSnapshot>, ScrapeError> {
    let url = config::arcgis_tracts_url()?;
    let resp = client
        .get(&url)
        .send()
        .map_err(|e| ScrapeError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::Status(status.as_u16(), url));
    }

    let body: FeatureQueryResponse = resp
        .json()
        .map_err(|e| ScrapeError::JsonParse(e.to_string()))?;

    let features = body
        .features
        .ok_or_else(|| ScrapeError::UnexpectedShape("features missing".to_string()))?;

    Ok(features
        .into_iter()
        .filter_map(|f| snapshot_from_attributes(f.attributes))
        .collect())
}

fn snapshot_from_attributes(attrs: TractAttributes) -> Option<TractSnapshot> {
    let (fips_county, fips_hood) = split_fips(attrs.fips.as_deref()?)?;
    Some(TractSnapshot {
        fips_hood,
        fips_county,
        population: attrs.population.map(|p| p.round() as i64),
        sqmi: attrs.sqmi,
        unemployment_rate: attrs.unemployment_rate,
    })
}

/// Split an 11-digit FIPS string into its county and tract-local portions:
/// "06037101110" -> (603, 101110).
pub fn split_fips(fips: &str) -> Option<(i64, i64)> {
    if fips.len() < 6 {
        return None;
    }
    let county = fips.get(..4)?.trim().parse().ok()?;
    let hood = fips.get(5..)?.trim().parse().ok()?;
    Some((county, hood))
}
