// Shared row shapes behind the scatterplots and CSV exports, plus the
// derived metrics and the median-threshold deal labeling.

use crate::db::connection::Database;
use crate::errors::AppError;
use serde::Serialize;
use std::fmt;

/// price / floor area, rounded to cents.
pub fn price_per_sqfoot(price: i64, sq_feet: i64) -> f64 {
    (price as f64 / sq_feet as f64 * 100.0).round() / 100.0
}

/// homeless persons / land area, rounded to a whole count.
pub fn homeless_per_sqmi(persons: i64, sqmi: f64) -> f64 {
    (persons as f64 / sqmi).round()
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceSqFeetRow {
    pub id: i64,
    pub bedrooms: String,
    pub bathrooms: String,
    pub price: i64,
    pub sq_feet: i64,
    pub price_per_sqfoot: f64,
    pub url: String,
}

/// Apartments under 3000 sqft, the price-vs-area scatter sample.
pub fn price_sqfeet_rows(db: &Database) -> Result<Vec<PriceSqFeetRow>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, bedrooms, bathrooms, price, sq_feet, url
            FROM apartment
            WHERE sq_feet < 3000
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PriceSqFeetRow {
                id: row.get(0)?,
                bedrooms: row.get(1)?,
                bathrooms: row.get(2)?,
                price: row.get(3)?,
                sq_feet: row.get(4)?,
                price_per_sqfoot: 0.0,
                url: row.get(5)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            let mut row = row?;
            row.price_per_sqfoot = price_per_sqfoot(row.price, row.sq_feet);
            out.push(row);
        }
        Ok(out)
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceHomelessRow {
    pub id: i64,
    pub bedrooms: String,
    pub price: i64,
    pub tract_id: i64,
    pub neighborhood: String,
    pub year: i64,
    pub homeless_per_sqmi: f64,
}

/// Apartments joined to their 2018 tract's homelessness density.
pub fn price_homeless_rows(db: &Database) -> Result<Vec<PriceHomelessRow>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            r#"
            SELECT a.id, a.bedrooms, a.price, t.fips_hood, t.neighborhood,
                   t.year, t.homeless_persons, t.sqmi
            FROM apartment a
            JOIN tract t ON a.tract_id = t.fips_hood
            WHERE t.year = 2018 AND a.tract_id != 0
              AND t.homeless_persons > 0 AND t.sqmi IS NOT NULL
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let persons: i64 = row.get(6)?;
            let sqmi: f64 = row.get(7)?;
            Ok(PriceHomelessRow {
                id: row.get(0)?,
                bedrooms: row.get(1)?,
                price: row.get(2)?,
                tract_id: row.get(3)?,
                neighborhood: row.get(4)?,
                year: row.get(5)?,
                homeless_per_sqmi: homeless_per_sqmi(persons, sqmi),
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ValueRow {
    pub id: i64,
    pub tract_id: i64,
    pub neighborhood: String,
    pub year: i64,
    pub bedrooms: String,
    pub price: i64,
    pub sq_feet: i64,
    pub price_per_sqfoot: f64,
    pub homeless_persons: i64,
    pub sqmi: f64,
    pub homeless_per_sqmi: f64,
    pub url: String,
}

/// The combined value sample: both derived metrics per apartment, with the
/// same outlier cuts the plots use (area under 3000 sqft, under $20/sqft).
pub fn value_rows(db: &Database) -> Result<Vec<ValueRow>, AppError> {
    let rows = db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            r#"
            SELECT a.id, a.tract_id, t.neighborhood, t.year, a.bedrooms,
                   a.price, a.sq_feet, t.homeless_persons, t.sqmi, a.url
            FROM apartment a
            JOIN tract t ON a.tract_id = t.fips_hood
            WHERE t.year = 2018 AND a.tract_id != 0 AND a.sq_feet < 3000
              AND t.homeless_persons IS NOT NULL AND t.sqmi IS NOT NULL
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let price: i64 = row.get(5)?;
            let sq_feet: i64 = row.get(6)?;
            let homeless_persons: i64 = row.get(7)?;
            let sqmi: f64 = row.get(8)?;
            Ok(ValueRow {
                id: row.get(0)?,
                tract_id: row.get(1)?,
                neighborhood: row.get(2)?,
                year: row.get(3)?,
                bedrooms: row.get(4)?,
                price,
                sq_feet,
                price_per_sqfoot: price_per_sqfoot(price, sq_feet),
                homeless_persons,
                sqmi,
                homeless_per_sqmi: homeless_per_sqmi(homeless_persons, sqmi),
                url: row.get(9)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    })?;

    Ok(rows
        .into_iter()
        .filter(|r| r.price_per_sqfoot < 20.0)
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DealLabel {
    Both,
    One,
    None,
}

impl fmt::Display for DealLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealLabel::Both => write!(f, "Both"),
            DealLabel::One => write!(f, "One"),
            DealLabel::None => write!(f, "None"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DealRow {
    pub id: i64,
    pub tract_id: i64,
    pub neighborhood: String,
    pub year: i64,
    pub bedrooms: String,
    pub price: i64,
    pub sq_feet: i64,
    pub price_per_sqfoot: f64,
    pub homeless_persons: i64,
    pub sqmi: f64,
    pub homeless_per_sqmi: f64,
    pub low_price_per_sqfoot: u8,
    pub low_homeless_per_sqmi: u8,
    pub deal: DealLabel,
    pub url: String,
}

/// Label each apartment against the sample medians: `Both` when price per
/// square foot and homeless density are both at or below their medians,
/// `None` when both exceed them, `One` otherwise.
pub fn label_deals(rows: Vec<ValueRow>) -> Vec<DealRow> {
    let ppsf_median = median(&rows.iter().map(|r| r.price_per_sqfoot).collect::<Vec<_>>());
    let hpsm_median = median(&rows.iter().map(|r| r.homeless_per_sqmi).collect::<Vec<_>>());
    let (Some(ppsf_median), Some(hpsm_median)) = (ppsf_median, hpsm_median) else {
        return Vec::new();
    };

    rows.into_iter()
        .map(|r| {
            let low_ppsf = r.price_per_sqfoot <= ppsf_median;
            let low_hpsm = r.homeless_per_sqmi <= hpsm_median;
            let deal = match (low_ppsf, low_hpsm) {
                (true, true) => DealLabel::Both,
                (false, false) => DealLabel::None,
                _ => DealLabel::One,
            };
            DealRow {
                id: r.id,
                tract_id: r.tract_id,
                neighborhood: r.neighborhood,
                year: r.year,
                bedrooms: r.bedrooms,
                price: r.price,
                sq_feet: r.sq_feet,
                price_per_sqfoot: r.price_per_sqfoot,
                homeless_persons: r.homeless_persons,
                sqmi: r.sqmi,
                homeless_per_sqmi: r.homeless_per_sqmi,
                low_price_per_sqfoot: low_ppsf as u8,
                low_homeless_per_sqmi: low_hpsm as u8,
                deal,
                url: r.url,
            }
        })
        .collect()
}

/// Sample median, interpolating between the middle pair for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    })
}
