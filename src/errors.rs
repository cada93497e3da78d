// errors.rs
use std::fmt;

use crate::scraper::ScrapeError;

/// Errors originating from the database, report, or export layers.
/// Network/parse failures during ingestion live in `ScrapeError` and are
/// wrapped here when they cross into the pipeline orchestration.
#[derive(Debug)]
pub enum AppError {
    Db(String),
    MissingTable(&'static str),
    Scrape(String),
    Io(String),
    Export(String),
    Plot(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(msg) => write!(f, "Database error: {msg}"),
            AppError::MissingTable(name) => write!(
                f,
                "The {name} table doesn't exist. You must first source the data remotely."
            ),
            AppError::Scrape(msg) => write!(f, "Scrape error: {msg}"),
            AppError::Io(msg) => write!(f, "IO error: {msg}"),
            AppError::Export(msg) => write!(f, "Export error: {msg}"),
            AppError::Plot(msg) => write!(f, "Plot error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e.to_string())
    }
}

impl From<ScrapeError> for AppError {
    fn from(e: ScrapeError) -> Self {
        AppError::Scrape(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Export(e.to_string())
    }
}
