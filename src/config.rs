// config.rs
use crate::scraper::ScrapeError;
use url::Url;

/// File-backed store and report byproducts all land under `data/`.
pub const OUT_DIR: &str = "data";
pub const DB_PATH: &str = "data/la_apartments.db";
pub const SCHEMA_PATH: &str = "sql/schema.sql";

pub const SEARCH_BASE_URL: &str = "https://losangeles.craigslist.org/search/apa";
pub const GEOCODER_URL: &str =
    "https://geocoding.geo.census.gov/geocoder/geographies/coordinates";

// 2015 tract boundaries enriched with population/employment figures,
// filtered to Los Angeles County (expected 2301 tracts).
const ARCGIS_TRACTS_BASE_URL: &str = "https://services5.arcgis.com/7nsPwEMP38bSkCjy/arcgis/rest/services/Enriched%20United%20States%20Tract%20Boundaries%202015/FeatureServer/0/query";

pub const SOCRATA_HOST: &str = "usc.data.socrata.com";
/// Rent Price (LA), 2010-2016, one row per tract per year.
pub const RENT_DATASET: &str = "4a97-v5tx";
pub const RENT_ROW_LIMIT: u32 = 17_000;
/// Homelessness (LA), 2017-2018, one row per tract per variable per year.
pub const HOMELESS_DATASET: &str = "e7n7-i6jm";
pub const HOMELESS_ROW_LIMIT: u32 = 13_000;

/// Apartment search filters. The defaults look for Los Angeles apartments
/// with a picture, posted today, renting for $1800-2800 within 3 miles of
/// zip 90036 (Pan Pacific Park), most recent first.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub sort: String,
    pub bundle_duplicates: bool,
    pub has_pic: bool,
    pub min_price: u32,
    pub max_price: u32,
    pub postal: String,
    pub posted_today: bool,
    pub search_distance: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            sort: "date".to_string(),
            bundle_duplicates: true,
            has_pic: true,
            min_price: 1800,
            max_price: 2800,
            postal: "90036".to_string(),
            posted_today: true,
            search_distance: 3,
        }
    }
}

fn flag(b: bool) -> String {
    if b { "1" } else { "0" }.to_string()
}

impl SearchCriteria {
    pub fn search_url(&self) -> Result<String, ScrapeError> {
        let url = Url::parse_with_params(
            SEARCH_BASE_URL,
            [
                ("sort", self.sort.clone()),
                ("availabilityMode", "0".to_string()),
                ("bundleDuplicates", flag(self.bundle_duplicates)),
                ("hasPic", flag(self.has_pic)),
                ("max_price", self.max_price.to_string()),
                ("min_price", self.min_price.to_string()),
                ("postal", self.postal.clone()),
                ("postedToday", flag(self.posted_today)),
                ("search_distance", self.search_distance.to_string()),
            ],
        )
        .map_err(|e| ScrapeError::Config(e.to_string()))?;
        Ok(url.into())
    }
}

pub fn arcgis_tracts_url() -> Result<String, ScrapeError> {
    let url = Url::parse_with_params(
        ARCGIS_TRACTS_BASE_URL,
        [
            ("where", "COUNTY = 'LOS ANGELES'"),
            ("outFields", "*"),
            ("outSR", "4326"),
            ("resultType", "standard"),
            ("f", "json"),
        ],
    )
    .map_err(|e| ScrapeError::Config(e.to_string()))?;
    Ok(url.into())
}

/// Credentials for the authenticated open-data API.
pub struct SocrataCredentials {
    pub app_token: String,
    pub username: String,
    pub password: String,
}

impl SocrataCredentials {
    pub fn from_env() -> Result<Self, ScrapeError> {
        let var = |name: &str| {
            std::env::var(name)
                .map_err(|_| ScrapeError::Config(format!("{name} environment variable not set")))
        };
        Ok(Self {
            app_token: var("SOCRATA_APP_TOKEN")?,
            username: var("SOCRATA_USERNAME")?,
            password: var("SOCRATA_PASSWORD")?,
        })
    }
}
