//! GUI module - interactive dashboard window.

mod app;
mod panels;

pub use app::run_dashboard;
