//! Dashboard Application
//! Main window showing the four delay panels in a fixed 2x2 grid. The
//! plots are interactive (zoom and drag) via egui_plot.

use crate::charts::DashboardData;
use crate::gui::panels;
use egui::RichText;

const PANEL_SPACING: f32 = 10.0;

/// Run the dashboard window; blocks until the window is closed.
pub fn run_dashboard(data: DashboardData) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Olist Logistics Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Olist Logistics Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, data)))),
    )
}

/// Main application window.
struct DashboardApp {
    data: DashboardData,
}

impl DashboardApp {
    fn new(_cc: &eframe::CreationContext<'_>, data: DashboardData) -> Self {
        Self { data }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.data.is_empty() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No Data").size(20.0));
                });
                return;
            }

            let avail = ui.available_size();
            let cell = egui::vec2(
                (avail.x - PANEL_SPACING) / 2.0,
                (avail.y - PANEL_SPACING) / 2.0,
            );

            ui.horizontal(|ui| {
                ui.allocate_ui(cell, |ui| {
                    panels::bar_panel(
                        ui,
                        "state_delays",
                        "Average Delivery Delay by State (Days)",
                        &self.data.state_delays,
                        panels::STATE_COLOR,
                        cell,
                    );
                });
                ui.add_space(PANEL_SPACING);
                ui.allocate_ui(cell, |ui| {
                    panels::bar_panel(
                        ui,
                        "size_delays",
                        "Logistics Bottleneck: Package Size vs Delay",
                        &self.data.size_delays,
                        panels::SIZE_COLOR,
                        cell,
                    );
                });
            });
            ui.add_space(PANEL_SPACING);
            ui.horizontal(|ui| {
                ui.allocate_ui(cell, |ui| {
                    panels::trend_panel(
                        ui,
                        "monthly_trend",
                        "Historical Performance Trend (Monthly)",
                        &self.data.monthly_trend,
                        cell,
                    );
                });
                ui.add_space(PANEL_SPACING);
                ui.allocate_ui(cell, |ui| {
                    panels::pie_panel(
                        ui,
                        "Revenue Distribution: Delivery Status",
                        &self.data.revenue_split,
                        cell,
                    );
                });
            });
        });
    }
}
