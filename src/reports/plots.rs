use crate::config::OUT_DIR;
use crate::errors::AppError;
use crate::reports::datasets::{DealLabel, DealRow, PriceHomelessRow, PriceSqFeetRow};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

const PLOT_TITLE: &str = "Apartments Within 3 Miles of Pan Pacific Park";
const PLOT_SIZE: (u32, u32) = (1000, 700);
const POINT_SIZE: i32 = 4;

const BEDROOM_SERIES: &[(&str, RGBColor)] =
    &[("0BR", BLUE), ("1BR", GREEN), ("2BR", RED), ("3BR", MAGENTA)];

const DEAL_SERIES: &[(DealLabel, RGBColor)] = &[
    (DealLabel::None, RED),
    (DealLabel::One, BLUE),
    (DealLabel::Both, GREEN),
];

/// Render the three scatterplots as PNGs next to the store.
pub fn render_all(
    price_rows: &[PriceSqFeetRow],
    homeless_rows: &[PriceHomelessRow],
    deal_rows: &[DealRow],
) -> Result<(), AppError> {
    price_vs_sqfeet(price_rows)?;
    homeless_vs_price(homeless_rows)?;
    homeless_vs_value(deal_rows)?;
    Ok(())
}

fn plot_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Plot(e.to_string())
}

fn out_path(name: &str) -> PathBuf {
    Path::new(OUT_DIR).join(name)
}

fn padded_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.05
    } else {
        1.0
    }
}

/// Price (x) against floor area (y), one series per bedroom count.
fn price_vs_sqfeet(rows: &[PriceSqFeetRow]) -> Result<(), AppError> {
    let path = out_path("scatter_price_sqfeet.png");
    if rows.is_empty() {
        eprintln!("⚠️ No rows for {}, skipping plot", path.display());
        return Ok(());
    }

    let root = BitMapBackend::new(&path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let x_max = padded_max(rows.iter().map(|r| r.price as f64));
    let y_max = padded_max(rows.iter().map(|r| r.sq_feet as f64));

    let mut chart = ChartBuilder::on(&root)
        .caption(PLOT_TITLE, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Price")
        .y_desc("Square Feet")
        .draw()
        .map_err(plot_err)?;

    for (label, color) in BEDROOM_SERIES {
        let points = rows
            .iter()
            .filter(|r| r.bedrooms == *label)
            .map(|r| Circle::new((r.price as f64, r.sq_feet as f64), POINT_SIZE, color.filled()));
        chart
            .draw_series(points)
            .map_err(plot_err)?
            .label(*label)
            .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    eprintln!("✅ Wrote {}", path.display());
    Ok(())
}

/// Neighborhood homeless density (x) against listing price (y).
fn homeless_vs_price(rows: &[PriceHomelessRow]) -> Result<(), AppError> {
    let path = out_path("scatter_homeless_price.png");
    if rows.is_empty() {
        eprintln!("⚠️ No rows for {}, skipping plot", path.display());
        return Ok(());
    }

    let root = BitMapBackend::new(&path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let x_max = padded_max(rows.iter().map(|r| r.homeless_per_sqmi));
    let y_max = padded_max(rows.iter().map(|r| r.price as f64));

    let mut chart = ChartBuilder::on(&root)
        .caption(PLOT_TITLE, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Homeless Persons per Square Mile")
        .y_desc("Price")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(rows.iter().map(|r| {
            Circle::new((r.homeless_per_sqmi, r.price as f64), POINT_SIZE, BLUE.filled())
        }))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    eprintln!("✅ Wrote {}", path.display());
    Ok(())
}

/// Homeless density (x) against price per square foot (y), one series per
/// deal label.
fn homeless_vs_value(rows: &[DealRow]) -> Result<(), AppError> {
    let path = out_path("scatter_deals.png");
    if rows.is_empty() {
        eprintln!("⚠️ No rows for {}, skipping plot", path.display());
        return Ok(());
    }

    let root = BitMapBackend::new(&path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let x_max = padded_max(rows.iter().map(|r| r.homeless_per_sqmi));
    let y_max = padded_max(rows.iter().map(|r| r.price_per_sqfoot));

    let mut chart = ChartBuilder::on(&root)
        .caption(PLOT_TITLE, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Homeless Persons per Square Mile")
        .y_desc("Price per Square Foot")
        .draw()
        .map_err(plot_err)?;

    for (deal, color) in DEAL_SERIES {
        let points = rows.iter().filter(|r| r.deal == *deal).map(|r| {
            Circle::new(
                (r.homeless_per_sqmi, r.price_per_sqfoot),
                POINT_SIZE,
                color.filled(),
            )
        });
        chart
            .draw_series(points)
            .map_err(plot_err)?
            .label(deal.to_string())
            .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    eprintln!("✅ Wrote {}", path.display());
    Ok(())
}
