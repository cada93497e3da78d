use crate::db::connection::Database;
use crate::domain::listing::Listing;
use crate::errors::AppError;
use rusqlite::params;

/// Replace the apartment table's contents with this run's listings.
/// Delete and inserts share one transaction so readers never observe a
/// half-written table; the row count after a run is the run's row count.
pub fn replace_apartments(db: &Database, listings: &[Listing]) -> Result<usize, AppError> {
    db.with_conn(|conn| {
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM apartment", [])?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO apartment (
                    posting_id, created_at, observed_at, name, price,
                    bedrooms, bathrooms, sq_feet, latitude, longitude,
                    tract_id, url
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
            )?;

            for listing in listings {
                stmt.execute(params![
                    listing.posting_id,
                    listing.created,
                    listing.observed_at,
                    listing.name,
                    listing.price,
                    listing.bedrooms,
                    listing.bathrooms,
                    listing.sq_feet,
                    listing.latitude,
                    listing.longitude,
                    listing.tract_id,
                    listing.url,
                ])?;
            }
        }
        tx.commit()?;

        Ok(listings.len())
    })
}
