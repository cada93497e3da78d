pub mod datasets;
pub mod exports;
pub mod plots;
pub mod queries;

use crate::db::connection::Database;
use crate::errors::AppError;

/// The whole report battery: terminal tables, then the CSV exports and
/// scatterplots built from the shared datasets. Fails up front if either
/// table is missing.
pub fn run_reports(db: &Database) -> Result<(), AppError> {
    queries::run_all(db)?;

    let price_rows = datasets::price_sqfeet_rows(db)?;
    let homeless_rows = datasets::price_homeless_rows(db)?;
    let deal_rows = datasets::label_deals(datasets::value_rows(db)?);

    exports::write_all(&price_rows, &homeless_rows, &deal_rows)?;
    plots::render_all(&price_rows, &homeless_rows, &deal_rows)?;

    Ok(())
}
