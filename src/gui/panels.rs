//! Dashboard Panels
//! The individual chart panels: bar and line charts via egui_plot, the
//! revenue pie drawn directly with the egui painter.

use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Stroke};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

pub const STATE_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const SIZE_COLOR: Color32 = Color32::from_rgb(155, 89, 182); // Purple
const TREND_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green
const PIE_DELAYED: Color32 = Color32::from_rgb(239, 85, 59);
const PIE_ONTIME: Color32 = Color32::from_rgb(99, 110, 250);

const TITLE_HEIGHT: f32 = 28.0;

/// Vertical bar chart over labeled categories.
pub fn bar_panel(
    ui: &mut egui::Ui,
    id: &str,
    title: &str,
    data: &[(String, f64)],
    color: Color32,
    size: egui::Vec2,
) {
    ui.vertical(|ui| {
        ui.label(RichText::new(title).size(14.0).strong());

        let labels: Vec<String> = data.iter().map(|(k, _)| k.clone()).collect();
        let bars: Vec<Bar> = data
            .iter()
            .enumerate()
            .map(|(i, (_, v))| Bar::new(i as f64, *v).width(0.7))
            .collect();

        Plot::new(id.to_string())
            .width(size.x)
            .height(size.y - TITLE_HEIGHT)
            .allow_scroll(false)
            .y_axis_label("avg delay (days)")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 0.01 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color));
            });
    });
}

/// Monthly trend line with point markers.
pub fn trend_panel(
    ui: &mut egui::Ui,
    id: &str,
    title: &str,
    data: &[(String, f64)],
    size: egui::Vec2,
) {
    ui.vertical(|ui| {
        ui.label(RichText::new(title).size(14.0).strong());

        let labels: Vec<String> = data.iter().map(|(k, _)| k.clone()).collect();
        let points: Vec<[f64; 2]> = data
            .iter()
            .enumerate()
            .map(|(i, (_, v))| [i as f64, *v])
            .collect();

        Plot::new(id.to_string())
            .width(size.x)
            .height(size.y - TITLE_HEIGHT)
            .allow_scroll(false)
            .y_axis_label("avg delay (days)")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 0.01 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(TREND_COLOR)
                        .width(3.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(TREND_COLOR),
                );
            });
    });
}

/// Pie chart drawn with the painter, legend in the top-left corner.
pub fn pie_panel(ui: &mut egui::Ui, title: &str, data: &[(String, f64)], size: egui::Vec2) {
    ui.vertical(|ui| {
        ui.label(RichText::new(title).size(14.0).strong());

        let total: f64 = data.iter().map(|(_, v)| *v).sum();
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(size.x, size.y - TITLE_HEIGHT),
            egui::Sense::hover(),
        );
        if total <= 0.0 {
            return;
        }

        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.38;

        let mut start = -std::f64::consts::FRAC_PI_2;
        for (label, value) in data {
            let sweep = value / total * std::f64::consts::TAU;
            pie_sector(&painter, center, radius, start, sweep, slice_color(label));
            start += sweep;
        }

        // Legend
        let mut ly = rect.top() + 6.0;
        for (label, value) in data {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(rect.left() + 6.0, ly), egui::vec2(12.0, 12.0)),
                2.0,
                slice_color(label),
            );
            painter.text(
                Pos2::new(rect.left() + 24.0, ly),
                Align2::LEFT_TOP,
                format!("{label}: {:.1}%", value / total * 100.0),
                FontId::proportional(13.0),
                ui.visuals().text_color(),
            );
            ly += 18.0;
        }
    });
}

fn slice_color(label: &str) -> Color32 {
    if label.starts_with("Delayed") {
        PIE_DELAYED
    } else {
        PIE_ONTIME
    }
}

/// Fill one pie sector. egui only fills convex polygons, so wide sectors
/// are split into fan chunks of at most a quarter turn.
fn pie_sector(
    painter: &egui::Painter,
    center: Pos2,
    radius: f32,
    start: f64,
    sweep: f64,
    color: Color32,
) {
    let mut angle = start;
    let mut remaining = sweep;

    while remaining > 1e-6 {
        let chunk = remaining.min(std::f64::consts::FRAC_PI_2);
        let steps = ((chunk / 0.05).ceil() as usize).max(2);

        let mut points = Vec::with_capacity(steps + 2);
        points.push(center);
        for step in 0..=steps {
            let a = angle + chunk * step as f64 / steps as f64;
            points.push(center + radius * egui::vec2(a.cos() as f32, a.sin() as f32));
        }
        painter.add(egui::Shape::convex_polygon(points, color, Stroke::NONE));

        angle += chunk;
        remaining -= chunk;
    }
}
