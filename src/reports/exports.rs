use crate::config::OUT_DIR;
use crate::errors::AppError;
use crate::reports::datasets::{DealRow, PriceHomelessRow, PriceSqFeetRow};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Write the three scatter datasets out as CSV next to the store.
pub fn write_all(
    price_rows: &[PriceSqFeetRow],
    homeless_rows: &[PriceHomelessRow],
    deal_rows: &[DealRow],
) -> Result<(), AppError> {
    write_csv(&out_path("scatterplot_bed_bath_sqfeet.csv"), price_rows)?;
    write_csv(&out_path("scatterplot_homeless_per_sqmi.csv"), homeless_rows)?;
    write_csv(&out_path("apartment_deals.csv"), deal_rows)?;
    Ok(())
}

fn out_path(name: &str) -> PathBuf {
    Path::new(OUT_DIR).join(name)
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    eprintln!("✅ Wrote {}", path.display());
    Ok(())
}
