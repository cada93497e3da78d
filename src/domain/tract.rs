// src/domain/tract.rs

/// One tract-year row, unioned from the rent and homelessness series.
/// Fields a source dataset does not carry stay `None` and persist as NULL.
#[derive(Debug, PartialEq, Clone)]
pub struct TractRecord {
    pub fips_hood: i64,
    pub neighborhood: String,
    pub avg_rent: Option<i64>,
    pub year: i64,
    pub county: String,
    pub state: String,
    pub sqmi: Option<f64>,
    pub fips_county: i64,
    pub population: Option<i64>,
    pub unemployment_rate: Option<f64>,
    pub homeless_persons: Option<i64>,
}
