use crate::db::connection::{table_exists, Database};
use crate::errors::AppError;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use rusqlite::types::ValueRef;

/// Check both tables exist before touching either. A missing table means
/// the data was never sourced; nothing below should run.
pub fn ensure_tables(db: &Database) -> Result<(), AppError> {
    db.with_conn(|conn| {
        for table in ["tract", "apartment"] {
            if !table_exists(conn, table)? {
                return Err(AppError::MissingTable(table));
            }
        }
        Ok(())
    })
}

struct Report {
    title: &'static str,
    headers: &'static [&'static str],
    sql: &'static str,
}

pub(crate) const SQL_SMALLEST_APARTMENTS: &str = r#"
    SELECT posting_id, sq_feet, price, bedrooms, bathrooms
    FROM apartment
    ORDER BY sq_feet ASC
    LIMIT 5
"#;

pub(crate) const SQL_HIGHEST_RENT_TRACTS: &str = r#"
    SELECT fips_hood, neighborhood, year, avg_rent, sqmi, population
    FROM tract
    WHERE year = 2015
    ORDER BY avg_rent DESC
    LIMIT 5
"#;

pub(crate) const SQL_MOST_HOMELESS_TRACTS: &str = r#"
    SELECT year, fips_hood, neighborhood, homeless_persons
    FROM tract
    WHERE year = 2018
    ORDER BY homeless_persons DESC
    LIMIT 5
"#;

pub(crate) const SQL_BEST_VALUE_APARTMENTS: &str = r#"
    SELECT t.neighborhood, v.price_per_sqfoot, v.price, v.sq_feet,
           v.bedrooms, v.bathrooms, v.url
    FROM (
        SELECT tract_id, bedrooms, bathrooms, price, sq_feet,
               round(CAST(price AS REAL) / sq_feet, 2) AS price_per_sqfoot, url
        FROM apartment
        WHERE tract_id != 0
    ) v
    JOIN tract t ON v.tract_id = t.fips_hood
    WHERE t.year = 2016
    ORDER BY v.price_per_sqfoot ASC
    LIMIT 5
"#;

pub(crate) const SQL_LEAST_HOMELESS_NEARBY: &str = r#"
    SELECT a.id, a.bedrooms, a.price, t.fips_hood, t.neighborhood,
           t.year, t.homeless_persons
    FROM apartment a
    JOIN tract t ON a.tract_id = t.fips_hood
    WHERE t.year = 2018 AND a.tract_id != 0
    ORDER BY t.homeless_persons ASC
    LIMIT 5
"#;

pub(crate) const SQL_MOST_HOMELESS_NEARBY: &str = r#"
    SELECT a.id, a.bedrooms, a.price, t.fips_hood, t.neighborhood,
           t.year, t.homeless_persons
    FROM apartment a
    JOIN tract t ON a.tract_id = t.fips_hood
    WHERE t.year = 2018 AND a.tract_id != 0
    ORDER BY t.homeless_persons DESC
    LIMIT 5
"#;

pub(crate) const SQL_HOLLYWOOD_LEAST_DENSE: &str = r#"
    SELECT fips_hood, neighborhood, year, homeless_persons, sqmi,
           round(homeless_persons / sqmi, 0) AS homeless_per_sqmi
    FROM tract
    WHERE year = 2018 AND neighborhood = 'Hollywood'
      AND homeless_persons > 0 AND sqmi IS NOT NULL
    ORDER BY homeless_per_sqmi ASC
    LIMIT 5
"#;

pub(crate) const SQL_LEAST_DENSE_NEARBY: &str = r#"
    SELECT a.id, a.bedrooms, a.price, t.fips_hood, t.neighborhood, t.year,
           round(t.homeless_persons / t.sqmi, 0) AS homeless_per_sqmi
    FROM apartment a
    JOIN tract t ON a.tract_id = t.fips_hood
    WHERE t.year = 2018 AND a.tract_id != 0
      AND t.homeless_persons > 0 AND t.sqmi IS NOT NULL
    ORDER BY homeless_per_sqmi ASC
    LIMIT 5
"#;

const REPORTS: &[Report] = &[
    Report {
        title: "Top 5 Smallest Apartments:",
        headers: &["posting_id", "sq_feet", "price", "bedrooms", "bathrooms"],
        sql: SQL_SMALLEST_APARTMENTS,
    },
    Report {
        title: "Top 5 Most Expensive Census Tracts (2015):",
        headers: &["tract", "neighborhood", "year", "avg_rent", "sqmi", "population"],
        sql: SQL_HIGHEST_RENT_TRACTS,
    },
    Report {
        title: "Top 5 Tracts With the Most Homeless Persons (2018):",
        headers: &["year", "tract", "neighborhood", "homeless_persons"],
        sql: SQL_MOST_HOMELESS_TRACTS,
    },
    Report {
        title: "Top 5 Best Value Per Square Foot Apartments:",
        headers: &[
            "neighborhood",
            "price_per_sqfoot",
            "price",
            "sq_feet",
            "bedrooms",
            "bathrooms",
            "url",
        ],
        sql: SQL_BEST_VALUE_APARTMENTS,
    },
    Report {
        title: "Top 5 Apartments With the Least Homeless Persons Nearby (2018):",
        headers: &["apt_id", "bedrooms", "price", "tract", "neighborhood", "year", "homeless_persons"],
        sql: SQL_LEAST_HOMELESS_NEARBY,
    },
    Report {
        title: "Top 5 Apartments With the Most Homeless Persons Nearby (2018):",
        headers: &["apt_id", "bedrooms", "price", "tract", "neighborhood", "year", "homeless_persons"],
        sql: SQL_MOST_HOMELESS_NEARBY,
    },
    Report {
        title: "Tracts in Hollywood With the Least Homeless per Square Mile (2018):",
        headers: &["tract", "neighborhood", "year", "homeless_persons", "sqmi", "homeless_per_sqmi"],
        sql: SQL_HOLLYWOOD_LEAST_DENSE,
    },
    Report {
        title: "Apartments in Tracts With the Least Homeless per Square Mile (2018):",
        headers: &["apt_id", "bedrooms", "price", "tract", "neighborhood", "year", "homeless_per_sqmi"],
        sql: SQL_LEAST_DENSE_NEARBY,
    },
];

/// The fixed query battery, printed as terminal tables.
pub fn run_all(db: &Database) -> Result<(), AppError> {
    ensure_tables(db)?;

    println!("tract table rows: {}", scalar(db, "SELECT COUNT(*) FROM tract")?);
    println!(
        "apartment table rows: {}",
        scalar(db, "SELECT COUNT(*) FROM apartment")?
    );

    for report in REPORTS {
        let rows = run_query(db, report.sql)?;
        print_table(report.title, report.headers, rows);
    }

    Ok(())
}

fn scalar(db: &Database, sql: &str) -> Result<String, AppError> {
    let rows = run_query(db, sql)?;
    Ok(rows
        .first()
        .and_then(|r| r.first())
        .cloned()
        .unwrap_or_default())
}

/// Run a read-only query, stringifying every cell for display.
pub(crate) fn run_query(db: &Database, sql: &str) -> Result<Vec<Vec<String>>, AppError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(sql)?;
        let ncols = stmt.column_count();
        let mut rows = stmt.query([])?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(ncols);
            for i in 0..ncols {
                record.push(fmt_value(row.get_ref(i)?));
            }
            out.push(record);
        }
        Ok(out)
    })
}

fn fmt_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => format!("{r}"),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(_) => "<blob>".to_string(),
    }
}

fn print_table(title: &str, headers: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row);
    }
    println!("{title}");
    println!("{table}");
}
