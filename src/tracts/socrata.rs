use crate::config::{
    SocrataCredentials, HOMELESS_DATASET, HOMELESS_ROW_LIMIT, RENT_DATASET, RENT_ROW_LIMIT,
    SOCRATA_HOST,
};
use crate::scraper::ScrapeError;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// The homelessness dataset carries one row per tract per variable; only
/// this variable's rows are the counts we union into the tract table.
pub const TOTAL_HOMELESS_VARIABLE: &str = "Total Homeless Population";

// Socrata serves every cell as a string; numerics are parsed downstream.

#[derive(Debug, Deserialize)]
pub struct RentRow {
    pub tract_number: Option<String>,
    /// Display name, "Census Tract N, County, State".
    pub tract: Option<String>,
    pub neighborhood: Option<String>,
    pub amount: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HomelessRow {
    pub tractnumber: Option<String>,
    pub neighborhood: Option<String>,
    pub year: Option<String>,
    pub variable: Option<String>,
    pub count: Option<String>,
}

pub struct SocrataClient {
    client: Client,
    creds: SocrataCredentials,
}

impl SocrataClient {
    pub fn new(creds: SocrataCredentials) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(Self { client, creds })
    }

    fn fetch_rows<T: DeserializeOwned>(
        &self,
        dataset: &str,
        limit: u32,
    ) -> Result<Vec<T>, ScrapeError> {
        let url = format!("https://{SOCRATA_HOST}/resource/{dataset}.json");

        let resp = self
            .client
            .get(&url)
            .query(&[("$limit", limit.to_string())])
            .header("X-App-Token", self.creds.app_token.as_str())
            .basic_auth(&self.creds.username, Some(&self.creds.password))
            .send()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16(), url));
        }

        resp.json().map_err(|e| ScrapeError::JsonParse(e.to_string()))
    }

    pub fn fetch_rent_series(&self) -> Result<Vec<RentRow>, ScrapeError> {
        self.fetch_rows(RENT_DATASET, RENT_ROW_LIMIT)
    }

    pub fn fetch_homeless_series(&self) -> Result<Vec<HomelessRow>, ScrapeError> {
        let rows: Vec<HomelessRow> = self.fetch_rows(HOMELESS_DATASET, HOMELESS_ROW_LIMIT)?;
        Ok(rows
            .into_iter()
            .filter(|r| r.variable.as_deref() == Some(TOTAL_HOMELESS_VARIABLE))
            .collect())
    }
}
