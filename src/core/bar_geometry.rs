use serde::{Deserialize, Serialize};

use crate::core::scale::Scale;
use crate::error::{ChartError, ChartResult};

/// Spacing rules for grouped bars.
///
/// Every category slot is inset by `value_spacing` on both sides; the
/// remaining width is shared by one bar per dataset with `dataset_spacing`
/// between neighbours. Dataset 0 is always the leftmost bar of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub value_spacing: f64,
    pub dataset_spacing: f64,
}

impl Default for BarGeometry {
    fn default() -> Self {
        Self {
            value_spacing: 5.0,
            dataset_spacing: 1.0,
        }
    }
}

impl BarGeometry {
    pub fn new(value_spacing: f64, dataset_spacing: f64) -> ChartResult<Self> {
        if !value_spacing.is_finite() || value_spacing < 0.0 {
            return Err(ChartError::InvalidConfig(
                "bar value spacing must be finite and >= 0".to_owned(),
            ));
        }
        if !dataset_spacing.is_finite() || dataset_spacing < 0.0 {
            return Err(ChartError::InvalidConfig(
                "bar dataset spacing must be finite and >= 0".to_owned(),
            ));
        }

        Ok(Self {
            value_spacing,
            dataset_spacing,
        })
    }

    /// Width available to one category's group of bars.
    #[must_use]
    pub fn base_width<S: Scale + ?Sized>(self, scale: &S) -> f64 {
        (scale.calculate_x(1) - scale.calculate_x(0)) - 2.0 * self.value_spacing
    }

    /// Width of a single bar when `dataset_count` bars share a slot.
    ///
    /// `dataset_count` must be > 0.
    #[must_use]
    pub fn bar_width<S: Scale + ?Sized>(self, scale: &S, dataset_count: usize) -> f64 {
        debug_assert!(dataset_count > 0, "bar width needs at least one dataset");
        let count = dataset_count as f64;
        (self.base_width(scale) - (count - 1.0) * self.dataset_spacing) / count
    }

    /// Center x of the bar for `dataset_index` in category `category_index`.
    #[must_use]
    pub fn bar_x<S: Scale + ?Sized>(
        self,
        scale: &S,
        dataset_count: usize,
        dataset_index: usize,
        category_index: usize,
    ) -> f64 {
        let base_width = self.base_width(scale);
        let slot_left = scale.calculate_x(category_index) - base_width / 2.0;
        let bar_width = self.bar_width(scale, dataset_count);
        let index = dataset_index as f64;

        slot_left + bar_width * index + index * self.dataset_spacing + bar_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::BarGeometry;
    use crate::core::scale::{RangeSource, Scale};
    use crate::core::types::Viewport;
    use crate::render::RenderFrame;

    /// Slots of 100px starting at x=50.
    struct FixedSlots;

    impl Scale for FixedSlots {
        fn values_count(&self) -> usize {
            3
        }
        fn labels(&self) -> &[String] {
            &[]
        }
        fn end_point(&self) -> f64 {
            200.0
        }
        fn calculate_x(&self, index: usize) -> f64 {
            50.0 + 100.0 * index as f64
        }
        fn calculate_y(&self, value: f64) -> f64 {
            200.0 - value
        }
        fn add_label(&mut self, _label: String) {}
        fn remove_label(&mut self) -> Option<String> {
            None
        }
        fn update(&mut self, _viewport: Option<Viewport>, _range_source: RangeSource<'_>) {}
        fn draw(&self, _frame: &mut RenderFrame, _easing: f64) {}
    }

    #[test]
    fn base_width_subtracts_value_spacing_on_both_sides() {
        let geometry = BarGeometry::new(5.0, 1.0).expect("geometry");
        assert_eq!(geometry.base_width(&FixedSlots), 90.0);
    }

    #[test]
    fn single_dataset_fills_the_slot() {
        let geometry = BarGeometry::new(5.0, 1.0).expect("geometry");
        assert_eq!(geometry.bar_width(&FixedSlots, 1), 90.0);
        assert_eq!(geometry.bar_x(&FixedSlots, 1, 0, 2), 250.0);
    }

    #[test]
    fn grouped_bars_are_laid_out_left_to_right() {
        let geometry = BarGeometry::new(5.0, 2.0).expect("geometry");
        // (90 - 2 * 2) / 3
        let width = geometry.bar_width(&FixedSlots, 3);
        assert!((width - 86.0 / 3.0).abs() <= 1e-9);

        let first = geometry.bar_x(&FixedSlots, 3, 0, 0);
        let second = geometry.bar_x(&FixedSlots, 3, 1, 0);
        assert!((first - (5.0 + width / 2.0)).abs() <= 1e-9);
        assert!((second - first - (width + 2.0)).abs() <= 1e-9);
    }

    #[test]
    fn negative_spacing_is_rejected() {
        assert!(BarGeometry::new(-1.0, 0.0).is_err());
        assert!(BarGeometry::new(0.0, f64::NAN).is_err());
    }
}
