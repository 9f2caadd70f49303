use crate::core::data::ChartData;
use crate::core::rectangle::Bar;

/// Chart data plus one [`Bar`] per (dataset, category) value.
///
/// `bars[dataset][category]` is positionally paired with
/// `data.datasets[dataset].data[category]`. Iteration is always
/// dataset-major, category-minor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarRegistry {
    data: ChartData,
    bars: Vec<Vec<Bar>>,
}

impl BarRegistry {
    #[must_use]
    pub fn new(data: ChartData) -> Self {
        let mut registry = Self {
            data,
            bars: Vec::new(),
        };
        registry.rebuild_all();
        registry
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut ChartData {
        &mut self.data
    }

    #[must_use]
    pub fn dataset_count(&self) -> usize {
        self.data.datasets.len()
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.data.labels.len()
    }

    /// Bars of one dataset, in category order.
    #[must_use]
    pub fn dataset_bars(&self, dataset_index: usize) -> &[Bar] {
        self.bars
            .get(dataset_index)
            .map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn bar(&self, dataset_index: usize, category_index: usize) -> Option<&Bar> {
        self.bars.get(dataset_index)?.get(category_index)
    }

    pub(crate) fn bar_mut(
        &mut self,
        dataset_index: usize,
        category_index: usize,
    ) -> Option<&mut Bar> {
        self.bars.get_mut(dataset_index)?.get_mut(category_index)
    }

    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.bars.iter().map(Vec::len).sum()
    }

    /// Creates any bar missing for the current data shape. Existing bars are
    /// kept and nothing is removed.
    pub fn rebuild_all(&mut self) {
        if self.bars.len() < self.data.datasets.len() {
            self.bars.resize_with(self.data.datasets.len(), Vec::new);
        }
        for (bars, dataset) in self.bars.iter_mut().zip(&self.data.datasets) {
            if bars.len() < dataset.data.len() {
                bars.resize_with(dataset.data.len(), Bar::default);
            }
        }
    }

    /// Visits `(bar, category_index, dataset_index)`.
    pub fn for_each_bar(&self, mut visitor: impl FnMut(&Bar, usize, usize)) {
        for (dataset_index, bars) in self.bars.iter().enumerate() {
            for (category_index, bar) in bars.iter().enumerate() {
                visitor(bar, category_index, dataset_index);
            }
        }
    }

    /// Mutable variant of [`Self::for_each_bar`]; the visitor also sees the
    /// chart data for the bar's dataset and category.
    pub fn for_each_bar_mut(
        &mut self,
        mut visitor: impl FnMut(&mut Bar, usize, usize, &ChartData),
    ) {
        let data = &self.data;
        for (dataset_index, bars) in self.bars.iter_mut().enumerate() {
            for (category_index, bar) in bars.iter_mut().enumerate() {
                visitor(bar, category_index, dataset_index, data);
            }
        }
    }

    /// Visits `(value, category_index, dataset_index)` for every present value.
    pub fn for_each_value(&self, mut visitor: impl FnMut(f64, usize, usize)) {
        for (dataset_index, dataset) in self.data.datasets.iter().enumerate() {
            for (category_index, value) in dataset.data.iter().enumerate() {
                if let Some(value) = value {
                    visitor(*value, category_index, dataset_index);
                }
            }
        }
    }

    /// Every present value, in iteration order.
    #[must_use]
    pub fn collect_values(&self) -> Vec<f64> {
        let mut values = Vec::new();
        self.for_each_value(|value, _, _| values.push(value));
        values
    }

    /// Appends one category: a value and a bar per dataset plus the label.
    ///
    /// `values` and `bars` must have one entry per dataset.
    pub(crate) fn push_category(
        &mut self,
        label: String,
        values: &[Option<f64>],
        bars: Vec<Bar>,
    ) {
        self.rebuild_all();
        for ((dataset, dataset_bars), (value, bar)) in self
            .data
            .datasets
            .iter_mut()
            .zip(self.bars.iter_mut())
            .zip(values.iter().zip(bars))
        {
            dataset.data.push(*value);
            dataset_bars.push(bar);
        }
        self.data.labels.push(label);
    }

    /// Removes the oldest category from the labels, every dataset and every
    /// bar list. Returns the removed label.
    pub(crate) fn shift_category(&mut self) -> Option<String> {
        if self.data.labels.is_empty() {
            return None;
        }
        let label = self.data.labels.remove(0);
        for dataset in &mut self.data.datasets {
            if !dataset.data.is_empty() {
                dataset.data.remove(0);
            }
        }
        for bars in &mut self.bars {
            if !bars.is_empty() {
                bars.remove(0);
            }
        }
        Some(label)
    }
}
