use crate::db::connection::Database;
use crate::domain::tract::TractRecord;
use crate::errors::AppError;
use chrono::Utc;
use rusqlite::params;

/// Replace the tract table's contents with the freshly merged series,
/// all inside one transaction.
pub fn replace_tracts(db: &Database, records: &[TractRecord]) -> Result<usize, AppError> {
    let observed_at = Utc::now().naive_utc();

    db.with_conn(|conn| {
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM tract", [])?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO tract (
                    observed_at, fips_hood, neighborhood, avg_rent, year,
                    county, state, sqmi, fips_county, population,
                    unemployment_rate, homeless_persons
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                "#,
            )?;

            for record in records {
                stmt.execute(params![
                    observed_at,
                    record.fips_hood,
                    record.neighborhood,
                    record.avg_rent,
                    record.year,
                    record.county,
                    record.state,
                    record.sqmi,
                    record.fips_county,
                    record.population,
                    record.unemployment_rate,
                    record.homeless_persons,
                ])?;
            }
        }
        tx.commit()?;

        Ok(records.len())
    })
}
