use crate::db::connection::{init_db, Database};
use crate::domain::listing::Listing;
use crate::domain::tract::TractRecord;
use chrono::Utc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh throwaway database under the system temp dir, initialized from the
/// production schema.
pub fn init_test_db(tag: &str) -> Database {
    let db = empty_test_db(tag);
    init_db(&db, "sql/schema.sql").expect("Failed to initialize test DB");
    db
}

/// A database path with no schema applied at all.
pub fn empty_test_db(tag: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "la_apartments_{tag}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    Database::new(path)
}

pub fn sample_listing(posting_id: i64, price: i64, sq_feet: i64, tract_id: i64) -> Listing {
    Listing {
        posting_id,
        created: "2019-11-30T12:34:56-0800".to_string(),
        observed_at: Utc::now().naive_utc(),
        name: format!("Listing {posting_id}"),
        price,
        bedrooms: "2BR".to_string(),
        bathrooms: "1Ba".to_string(),
        sq_feet,
        latitude: 34.0722,
        longitude: -118.3612,
        tract_id,
        url: format!("https://example.org/apa/{posting_id}.html"),
    }
}

pub fn sample_tract(
    fips_hood: i64,
    year: i64,
    avg_rent: Option<i64>,
    homeless_persons: Option<i64>,
    sqmi: Option<f64>,
) -> TractRecord {
    TractRecord {
        fips_hood,
        neighborhood: "Fairfax".to_string(),
        avg_rent,
        year,
        county: "Los Angeles County".to_string(),
        state: "California".to_string(),
        sqmi,
        fips_county: 603,
        population: None,
        unemployment_rate: None,
        homeless_persons,
    }
}
