//! Static Dashboard Export
//! Renders the four dashboard panels into one 2x2 PNG with plotters. The
//! exported image mirrors the interactive window: two bar charts on top,
//! the monthly trend and the revenue pie below.

use crate::charts::DashboardData;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;
use thiserror::Error as ThisError;

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 1000;

const STATE_BAR: RGBColor = RGBColor(231, 76, 60);
const SIZE_BAR: RGBColor = RGBColor(155, 89, 182);
const TREND_LINE: RGBColor = RGBColor(46, 204, 113);
const PIE_DELAYED: RGBColor = RGBColor(239, 85, 59);
const PIE_ONTIME: RGBColor = RGBColor(99, 110, 250);

#[derive(ThisError, Debug)]
#[error("chart rendering failed: {0}")]
pub struct ExportError(String);

/// Render the full dashboard image to `path`.
pub fn export_dashboard(data: &DashboardData, path: &Path) -> Result<(), ExportError> {
    draw(data, path).map_err(|e| ExportError(e.to_string()))
}

fn draw(data: &DashboardData, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Olist Logistics Intelligence Dashboard", ("sans-serif", 28))?;

    let panels = root.split_evenly((2, 2));
    draw_bars(
        &panels[0],
        "Average Delivery Delay by State (Days)",
        &data.state_delays,
        STATE_BAR,
    )?;
    draw_bars(
        &panels[1],
        "Logistics Bottleneck: Package Size vs Delay",
        &data.size_delays,
        SIZE_BAR,
    )?;
    draw_trend(
        &panels[2],
        "Historical Performance Trend (Monthly)",
        &data.monthly_trend,
    )?;
    draw_pie(
        &panels[3],
        "Revenue Distribution: Delivery Status",
        &data.revenue_split,
    )?;

    root.present()?;
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
    data: &[(String, f64)],
    color: RGBColor,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    if data.is_empty() {
        return Ok(());
    }
    let y_max = data.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(0.0..data.len() as f64, 0.0..(y_max * 1.1).max(1.0))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(data.len().min(28))
        .x_label_formatter(&|x| {
            let idx = *x as usize;
            data.get(idx).map(|(k, _)| k.clone()).unwrap_or_default()
        })
        .y_desc("avg delay (days)")
        .draw()?;

    chart.draw_series(data.iter().enumerate().map(|(i, (_, v))| {
        Rectangle::new(
            [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, *v)],
            color.mix(0.85).filled(),
        )
    }))?;

    Ok(())
}

fn draw_trend<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
    data: &[(String, f64)],
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    if data.is_empty() {
        return Ok(());
    }
    let y_max = data.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let y_min = data.iter().map(|(_, v)| *v).fold(0.0_f64, f64::min);

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(
            0.0..(data.len().max(2) - 1) as f64,
            (y_min - 1.0)..(y_max + 1.0),
        )?;

    chart
        .configure_mesh()
        .x_labels(data.len().min(12))
        .x_label_formatter(&|x| {
            let idx = x.round() as usize;
            data.get(idx).map(|(k, _)| k.clone()).unwrap_or_default()
        })
        .y_desc("avg delay (days)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        data.iter().enumerate().map(|(i, (_, v))| (i as f64, *v)),
        TREND_LINE.stroke_width(3),
    ))?;
    chart.draw_series(
        data.iter()
            .enumerate()
            .map(|(i, (_, v))| Circle::new((i as f64, *v), 4, TREND_LINE.filled())),
    )?;

    Ok(())
}

fn draw_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    title: &str,
    data: &[(String, f64)],
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let total: f64 = data.iter().map(|(_, v)| *v).sum();
    if total <= 0.0 {
        return Ok(());
    }

    let area = area.titled(title, ("sans-serif", 18))?;
    let (w, h) = area.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let radius = f64::from(w.min(h)) * 0.32;

    let sizes: Vec<f64> = data.iter().map(|(_, v)| *v).collect();
    let colors: Vec<RGBColor> = data
        .iter()
        .map(|(label, _)| {
            if label.starts_with("Delayed") {
                PIE_DELAYED
            } else {
                PIE_ONTIME
            }
        })
        .collect();
    let labels: Vec<String> = data
        .iter()
        .map(|(label, v)| format!("{label} ({:.1}%)", v / total * 100.0))
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 16).into_font().color(&BLACK));
    area.draw(&pie)?;

    Ok(())
}
