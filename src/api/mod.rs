mod chart;
mod chart_config;
mod data_controller;
mod interaction_controller;
mod lifecycle;
mod render_coordinator;

pub use chart::{BarChart, LegendEntry};
pub use chart_config::{BarChartConfig, DEFAULT_LEGEND_TEMPLATE, HoverCallback};
pub use interaction_controller::BarHits;
