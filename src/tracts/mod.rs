pub mod arcgis;
pub mod socrata;

use crate::config::SocrataCredentials;
use crate::db::connection::Database;
use crate::db::tracts::replace_tracts;
use crate::domain::tract::TractRecord;
use crate::errors::AppError;
use crate::scraper::ScrapeError;
use arcgis::TractSnapshot;
use reqwest::blocking::Client;
use socrata::{HomelessRow, RentRow, SocrataClient};
use std::collections::HashMap;
use std::time::Duration;

/// County portion of the FIPS code shared by every row; the whole store
/// covers Los Angeles County only.
pub const LA_COUNTY_FIPS: i64 = 603;

const LA_COUNTY_NAME: &str = "Los Angeles County";
const LA_STATE_NAME: &str = "California";

/// Full tract ingestion: boundary/employment snapshot, rent series,
/// homelessness series, merged and unioned, then the tract table replaced.
pub fn run_tract_ingest(db: &Database) -> Result<usize, AppError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(|e| ScrapeError::Network(e.to_string()))?;

    let snapshot = arcgis::fetch_snapshot(&client)?;
    eprintln!("✅ Tract snapshot: {} rows", snapshot.len());

    let socrata = SocrataClient::new(SocrataCredentials::from_env()?)?;
    let rent = socrata.fetch_rent_series()?;
    eprintln!("✅ Rent series: {} rows", rent.len());
    let homeless = socrata.fetch_homeless_series()?;
    eprintln!("✅ Homelessness series: {} rows", homeless.len());

    let records = merge_series(&snapshot, rent, homeless);
    let rows = replace_tracts(db, &records)?;
    eprintln!("🏁 Tract ingest complete");
    Ok(rows)
}

/// Enrich both series with snapshot fields by tract key, then union them.
/// Rent rows missing either a rent amount or a snapshot land area are
/// dropped; homelessness rows keep going without an area.
pub fn merge_series(
    snapshot: &[TractSnapshot],
    rent: Vec<RentRow>,
    homeless: Vec<HomelessRow>,
) -> Vec<TractRecord> {
    let by_hood: HashMap<i64, &TractSnapshot> =
        snapshot.iter().map(|s| (s.fips_hood, s)).collect();

    let mut records = Vec::new();

    for row in rent {
        let Some(fips_hood) = row.tract_number.as_deref().and_then(parse_int) else {
            continue;
        };
        let Some(year) = row.year.as_deref().and_then(parse_int) else {
            continue;
        };
        let Some(avg_rent) = row.amount.as_deref().and_then(parse_int) else {
            continue;
        };
        let Some(sqmi) = by_hood.get(&fips_hood).and_then(|s| s.sqmi) else {
            continue;
        };

        let (county, state) = split_tract_name(row.tract.as_deref());

        // Population and unemployment only exist for the snapshot's year.
        let (population, unemployment_rate) = if year == arcgis::SNAPSHOT_YEAR {
            by_hood
                .get(&fips_hood)
                .map(|s| (s.population, s.unemployment_rate))
                .unwrap_or((None, None))
        } else {
            (None, None)
        };

        records.push(TractRecord {
            fips_hood,
            neighborhood: row.neighborhood.unwrap_or_default(),
            avg_rent: Some(avg_rent),
            year,
            county,
            state,
            sqmi: Some(sqmi),
            fips_county: LA_COUNTY_FIPS,
            population,
            unemployment_rate,
            homeless_persons: None,
        });
    }

    for row in homeless {
        let Some(fips_hood) = row.tractnumber.as_deref().and_then(parse_int) else {
            continue;
        };
        let Some(year) = row.year.as_deref().and_then(parse_int) else {
            continue;
        };
        let Some(count) = row.count.as_deref().and_then(parse_int) else {
            continue;
        };

        records.push(TractRecord {
            fips_hood,
            neighborhood: row.neighborhood.unwrap_or_default(),
            avg_rent: None,
            year,
            county: LA_COUNTY_NAME.to_string(),
            state: LA_STATE_NAME.to_string(),
            sqmi: by_hood.get(&fips_hood).and_then(|s| s.sqmi),
            fips_county: LA_COUNTY_FIPS,
            population: None,
            unemployment_rate: None,
            homeless_persons: Some(count),
        });
    }

    records
}

/// "Census Tract 1011.10, Los Angeles County, California" -> (county, state)
fn split_tract_name(name: Option<&str>) -> (String, String) {
    let mut parts = name.unwrap_or_default().splitn(3, ',');
    parts.next(); // display name, already carried by tract_number
    let county = parts.next().map(str::trim).unwrap_or_default().to_string();
    let state = parts.next().map(str::trim).unwrap_or_default().to_string();
    (county, state)
}

/// Socrata numerics arrive as strings, occasionally with a decimal tail.
fn parse_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().map(|v| v.round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<TractSnapshot> {
        vec![
            TractSnapshot {
                fips_hood: 101110,
                fips_county: LA_COUNTY_FIPS,
                population: Some(4580),
                sqmi: Some(0.41),
                unemployment_rate: Some(7.2),
            },
            TractSnapshot {
                fips_hood: 207500,
                fips_county: LA_COUNTY_FIPS,
                population: Some(3200),
                sqmi: None,
                unemployment_rate: None,
            },
        ]
    }

    fn rent_row(tract: &str, amount: Option<&str>, year: &str) -> RentRow {
        RentRow {
            tract_number: Some(tract.to_string()),
            tract: Some(format!(
                "Census Tract {tract}, Los Angeles County, California"
            )),
            neighborhood: Some("Fairfax".to_string()),
            amount: amount.map(str::to_string),
            year: Some(year.to_string()),
        }
    }

    fn homeless_row(tract: &str, count: &str, year: &str) -> HomelessRow {
        HomelessRow {
            tractnumber: Some(tract.to_string()),
            neighborhood: Some("Fairfax".to_string()),
            year: Some(year.to_string()),
            variable: Some(socrata::TOTAL_HOMELESS_VARIABLE.to_string()),
            count: Some(count.to_string()),
        }
    }

    #[test]
    fn unions_both_series() {
        let records = merge_series(
            &snapshot(),
            vec![rent_row("101110", Some("1500"), "2016")],
            vec![homeless_row("101110", "120", "2018")],
        );

        assert_eq!(records.len(), 2);

        let rent = &records[0];
        assert_eq!(rent.fips_hood, 101110);
        assert_eq!(rent.avg_rent, Some(1500));
        assert_eq!(rent.sqmi, Some(0.41));
        assert_eq!(rent.county, "Los Angeles County");
        assert_eq!(rent.state, "California");
        assert_eq!(rent.homeless_persons, None);

        let homeless = &records[1];
        assert_eq!(homeless.avg_rent, None);
        assert_eq!(homeless.homeless_persons, Some(120));
        assert_eq!(homeless.sqmi, Some(0.41));
    }

    #[test]
    fn snapshot_fields_attach_only_to_the_snapshot_year() {
        let records = merge_series(
            &snapshot(),
            vec![
                rent_row("101110", Some("1400"), "2015"),
                rent_row("101110", Some("1500"), "2016"),
            ],
            vec![],
        );

        assert_eq!(records[0].population, Some(4580));
        assert_eq!(records[0].unemployment_rate, Some(7.2));
        assert_eq!(records[1].population, None);
        assert_eq!(records[1].unemployment_rate, None);
    }

    #[test]
    fn rent_rows_missing_rent_or_area_are_dropped() {
        let records = merge_series(
            &snapshot(),
            vec![
                rent_row("101110", None, "2016"),      // no rent amount
                rent_row("207500", Some("1"), "2016"), // tract with no land area
                rent_row("999999", Some("2"), "2016"), // tract not in snapshot
            ],
            vec![],
        );
        assert!(records.is_empty());
    }

    #[test]
    fn homeless_rows_survive_without_an_area() {
        let records = merge_series(&snapshot(), vec![], vec![homeless_row("999999", "50", "2017")]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sqmi, None);
        assert_eq!(records[0].homeless_persons, Some(50));
    }

    #[test]
    fn socrata_numbers_parse_with_decimal_tails() {
        assert_eq!(parse_int("1500"), Some(1500));
        assert_eq!(parse_int("1500.0"), Some(1500));
        assert_eq!(parse_int(" 12 "), Some(12));
        assert_eq!(parse_int("n/a"), None);
    }

    #[test]
    fn tract_display_names_split_into_county_and_state() {
        let (county, state) =
            split_tract_name(Some("Census Tract 1011.10, Los Angeles County, California"));
        assert_eq!(county, "Los Angeles County");
        assert_eq!(state, "California");

        let (county, state) = split_tract_name(Some("Census Tract 1011.10"));
        assert_eq!(county, "");
        assert_eq!(state, "");
    }
}
