//! bar-chart-rs: grouped bar chart layout, animation and hit-testing.
//!
//! A [`BarChart`] maps N datasets × M categories onto non-overlapping bars,
//! keeps them in sync with data mutations and viewport changes, interpolates
//! bar geometry between states and resolves pointer positions back to bars.
//! Drawing produces backend-agnostic [`render::RenderFrame`]s.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{BarChart, BarChartConfig};
pub use error::{ChartError, ChartResult};
