use tracing::debug;

use crate::core::{Bar, BarShape, Scale};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::BarChart;

impl<R: Renderer> BarChart<R> {
    /// Appends a category with one value per dataset, in dataset order.
    ///
    /// New bars are created on the baseline at the slot after the last
    /// existing category; the update that follows moves them into place.
    pub fn add_data<V>(&mut self, values: &[V], label: impl Into<String>) -> ChartResult<()>
    where
        V: Copy + Into<Option<f64>>,
    {
        let dataset_count = self.registry.dataset_count();
        if values.len() != dataset_count {
            return Err(ChartError::InvalidData(format!(
                "expected {dataset_count} values (one per dataset), got {}",
                values.len()
            )));
        }
        let values: Vec<Option<f64>> = values.iter().map(|value| (*value).into()).collect();
        if values.iter().flatten().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "added values must be finite".to_owned(),
            ));
        }

        let label = label.into();
        let base = self.scale.end_point();
        let slot = self.scale.values_count() + 1;
        let scale = &self.scale;
        let geometry = self.geometry;
        let bars: Vec<Bar> = self
            .registry
            .data()
            .datasets
            .iter()
            .zip(&values)
            .enumerate()
            .map(|(dataset_index, (dataset, value))| {
                let mut bar = Bar::new(BarShape::new(
                    geometry.bar_x(scale, dataset_count, dataset_index, slot),
                    base,
                    geometry.bar_width(scale, dataset_count),
                    base,
                ));
                bar.value = *value;
                bar.label.clone_from(&label);
                bar.dataset_label.clone_from(&dataset.label);
                bar.stroke_color = dataset.stroke_color;
                bar.fill_color = dataset.fill_color;
                bar.highlight_fill = dataset.resolved_highlight_fill();
                bar.highlight_stroke = dataset.resolved_highlight_stroke();
                bar.show_stroke = self.config.bar_show_stroke;
                bar.stroke_width = self.config.bar_stroke_width;
                bar
            })
            .collect();

        self.registry.push_category(label.clone(), &values, bars);
        self.scale.add_label(label);
        debug!(
            categories = self.registry.category_count(),
            datasets = dataset_count,
            "add category"
        );

        self.update()
    }

    /// Removes the oldest category from every dataset.
    pub fn remove_data(&mut self) -> ChartResult<()> {
        if self.registry.category_count() == 0 {
            return Err(ChartError::InvalidData(
                "cannot remove a category from an empty chart".to_owned(),
            ));
        }

        self.scale.remove_label();
        let removed = self.registry.shift_category();
        self.hover.on_category_removed();
        debug!(
            removed = removed.as_deref().unwrap_or_default(),
            categories = self.registry.category_count(),
            "remove oldest category"
        );

        self.update()
    }

    /// Overwrites one value. Call [`BarChart::update`] (or
    /// [`BarChart::animate_update`]) to apply it.
    pub fn set_value(
        &mut self,
        dataset_index: usize,
        category_index: usize,
        value: Option<f64>,
    ) -> ChartResult<()> {
        if value.is_some_and(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        let slot = self
            .registry
            .data_mut()
            .datasets
            .get_mut(dataset_index)
            .and_then(|dataset| dataset.data.get_mut(category_index))
            .ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "no value at dataset {dataset_index}, category {category_index}"
                ))
            })?;
        *slot = value;
        Ok(())
    }
}
