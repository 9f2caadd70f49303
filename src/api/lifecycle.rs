use tracing::{debug, trace, warn};

use crate::core::{
    BarRegistry, BarShape, CategoryScale, ChartData, Rectangle, Scale, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{HoverMode, HoverState};
use crate::render::Renderer;

use super::{BarChart, BarChartConfig};

impl<R: Renderer> BarChart<R> {
    /// Builds the chart, lays out every bar at the baseline and runs a first
    /// update, which draws the laid-out chart.
    pub fn new(renderer: R, config: BarChartConfig, data: ChartData) -> ChartResult<Self> {
        config.validate()?;
        data.validate()?;
        if config.hover_mode == HoverMode::Dataset {
            warn!("`dataset` hover mode is not supported; pointer events will be rejected");
        }

        let geometry = config.bar_geometry()?;
        let registry = BarRegistry::new(data);
        let scale = CategoryScale::new(
            config.viewport,
            registry.data().labels.clone(),
            config.range_mode()?,
            config.scale_style(),
            &|| registry.collect_values(),
        );

        let mut chart = Self {
            renderer,
            config,
            geometry,
            scale,
            registry,
            hover: HoverState::default(),
        };
        chart.place_bars_on_baseline();
        debug!(
            datasets = chart.registry.dataset_count(),
            categories = chart.registry.category_count(),
            animation = chart.config.animation,
            "initialize bar chart"
        );

        chart.update()?;
        Ok(chart)
    }

    /// Recomputes the scale and every bar from the current data and draws the
    /// final state.
    ///
    /// Every bar ends at its target, whether or not animation is enabled.
    pub fn update(&mut self) -> ChartResult<()> {
        self.retarget();
        self.draw(1.0)
    }

    /// Recomputes the scale and every bar's target without drawing.
    ///
    /// Bars keep their displayed geometry; the host animates them by calling
    /// [`BarChart::draw`] with increasing easing values ending at 1. With
    /// animation disabled this is the same as [`BarChart::update`].
    pub fn animate_update(&mut self) -> ChartResult<()> {
        if !self.config.animation {
            return self.update();
        }
        self.retarget();
        Ok(())
    }

    fn retarget(&mut self) {
        let registry = &self.registry;
        self.scale.update(None, &|| registry.collect_values());
        self.layout_bars();
        trace!(
            bars = self.registry.bar_count(),
            range_min = self.scale.range().min,
            range_max = self.scale.range().max,
            "update bar chart"
        );
    }

    /// Adapts the chart to a new viewport size.
    ///
    /// The scale is refit and every bar's geometry is recomputed against it
    /// and applied without animation. Values and colors are left as they are.
    pub fn reflow(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let registry = &self.registry;
        self.scale.update(Some(viewport), &|| registry.collect_values());
        self.config.viewport = viewport;

        let dataset_count = self.registry.dataset_count();
        let scale = &self.scale;
        let geometry = self.geometry;
        self.registry
            .for_each_bar_mut(|bar, category_index, dataset_index, _| {
                let value_y = bar
                    .value
                    .map_or(scale.end_point(), |value| scale.calculate_y(value));
                bar.set_target(BarShape::new(
                    geometry.bar_x(scale, dataset_count, dataset_index, category_index),
                    value_y,
                    geometry.bar_width(scale, dataset_count),
                    scale.end_point(),
                ));
                bar.save();
            });
        debug!(
            width = viewport.width,
            height = viewport.height,
            "reflow bar chart"
        );

        self.draw(1.0)
    }

    fn place_bars_on_baseline(&mut self) {
        let dataset_count = self.registry.dataset_count();
        let scale = &self.scale;
        let geometry = self.geometry;
        let show_stroke = self.config.bar_show_stroke;
        let stroke_width = self.config.bar_stroke_width;

        self.registry
            .for_each_bar_mut(|bar, category_index, dataset_index, _| {
                let base = scale.end_point();
                bar.set_target(BarShape::new(
                    geometry.bar_x(scale, dataset_count, dataset_index, category_index),
                    base,
                    geometry.bar_width(scale, dataset_count),
                    base,
                ));
                bar.show_stroke = show_stroke;
                bar.stroke_width = stroke_width;
                bar.save();
            });
    }

    /// Retargets every bar and refreshes its display state from the data.
    fn layout_bars(&mut self) {
        self.registry.rebuild_all();

        let dataset_count = self.registry.dataset_count();
        let scale = &self.scale;
        let geometry = self.geometry;
        let show_stroke = self.config.bar_show_stroke;
        let stroke_width = self.config.bar_stroke_width;

        self.registry
            .for_each_bar_mut(|bar, category_index, dataset_index, data| {
                let dataset = &data.datasets[dataset_index];
                let value = dataset.data.get(category_index).copied().flatten();
                let value_y = value.map_or(scale.end_point(), |value| scale.calculate_y(value));

                bar.set_target(BarShape::new(
                    geometry.bar_x(scale, dataset_count, dataset_index, category_index),
                    value_y,
                    geometry.bar_width(scale, dataset_count),
                    scale.end_point(),
                ));
                bar.value = value;
                bar.label = data.labels.get(category_index).cloned().unwrap_or_default();
                bar.dataset_label.clone_from(&dataset.label);
                bar.stroke_color = dataset.stroke_color;
                bar.fill_color = dataset.fill_color;
                bar.highlight_fill = dataset.resolved_highlight_fill();
                bar.highlight_stroke = dataset.resolved_highlight_stroke();
                bar.show_stroke = show_stroke;
                bar.stroke_width = stroke_width;
            });
    }
}
