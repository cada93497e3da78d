use crate::config::SearchCriteria;
use crate::db::connection::{init_db, Database};
use crate::errors::AppError;
use std::fs;

mod config;
mod db;
mod domain;
mod errors;
mod geocode;
mod reports;
mod scraper;
mod tracts;

#[cfg(test)]
mod tests;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let outcome = match args.get(1).map(String::as_str) {
        Some("remote") => run_remote(),
        Some("local") => run_local(),
        Some(other) => {
            println!(
                "Unknown data source '{other}'. Please pass 'remote' or 'local'. \
                 EX: la_apartments remote"
            );
            std::process::exit(1);
        }
        None => {
            println!(
                "Too few arguments: expected a data source argument (remote or local). \
                 EX: la_apartments remote"
            );
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

/// Re-source everything: tract data first (it is the join target),
/// then the listing scrape, then the full report battery.
fn run_remote() -> Result<(), AppError> {
    fs::create_dir_all(config::OUT_DIR)?;

    let db = Database::new(config::DB_PATH);
    init_db(&db, config::SCHEMA_PATH)?;

    println!("Building the tract table. Please wait...");
    let rows = tracts::run_tract_ingest(&db)?;
    println!("✅ tract table replaced ({rows} rows)");

    println!("Scraping apartment listings. Please wait...");
    let rows = scraper::run_listing_ingest(&db, &SearchCriteria::default())?;
    println!("✅ apartment table replaced ({rows} rows)");

    reports::run_reports(&db)
}

/// Report against whatever the store already holds.
fn run_local() -> Result<(), AppError> {
    fs::create_dir_all(config::OUT_DIR)?;

    let db = Database::new(config::DB_PATH);
    reports::run_reports(&db)
}
