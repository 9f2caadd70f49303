use serde::{Deserialize, Serialize};

use crate::core::{BarGeometry, BarRegistry, CategoryScale, ChartData, Viewport};
use crate::interaction::{BarIndex, HoverState};
use crate::render::{Color, Renderer};

use super::BarChartConfig;

/// Grouped bar chart controller.
///
/// Owns the chart data, one bar per (dataset, category) value and the scale
/// the bars are laid out against. Every mutation goes through `&mut self`
/// entry points, so bar state has a single writer.
pub struct BarChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: BarChartConfig,
    pub(super) geometry: BarGeometry,
    pub(super) scale: CategoryScale,
    pub(super) registry: BarRegistry,
    pub(super) hover: HoverState,
}

/// Data a host needs to build a legend for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub fill_color: Color,
    pub stroke_color: Color,
}

impl<R: Renderer> BarChart<R> {
    #[must_use]
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        self.registry.data()
    }

    #[must_use]
    pub fn registry(&self) -> &BarRegistry {
        &self.registry
    }

    #[must_use]
    pub fn scale(&self) -> &CategoryScale {
        &self.scale
    }

    #[must_use]
    pub fn geometry(&self) -> BarGeometry {
        self.geometry
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Bars highlighted by the latest handled pointer event.
    #[must_use]
    pub fn active_bars(&self) -> &[BarIndex] {
        self.hover.active()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.registry
            .data()
            .datasets
            .iter()
            .map(|dataset| LegendEntry {
                label: dataset.label.clone(),
                fill_color: dataset.fill_color,
                stroke_color: dataset.stroke_color,
            })
            .collect()
    }

    #[must_use]
    pub fn legend_template(&self) -> &str {
        &self.config.legend_template
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
