use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const MIN_STEPS: usize = 2;
const MAX_FIT_ITERATIONS: usize = 64;
const MAX_LABEL_DECIMALS: usize = 10;

/// Value range covered by the y axis, split into `steps` equal intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    pub step_value: f64,
    pub steps: usize,
}

impl ScaleRange {
    /// Builds an explicit range starting at `start_value`.
    pub fn from_steps(start_value: f64, step_value: f64, steps: usize) -> ChartResult<Self> {
        if !start_value.is_finite() {
            return Err(ChartError::InvalidConfig(
                "scale start value must be finite".to_owned(),
            ));
        }
        if !step_value.is_finite() || step_value <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "scale step width must be finite and > 0".to_owned(),
            ));
        }
        if steps == 0 {
            return Err(ChartError::InvalidConfig(
                "scale steps must be > 0".to_owned(),
            ));
        }

        Ok(Self {
            min: start_value,
            max: start_value + step_value * steps as f64,
            step_value,
            steps,
        })
    }

    /// Half of `max - min`, finite for any pair of finite bounds.
    #[must_use]
    pub fn half_span(self) -> f64 {
        self.max / 2.0 - self.min / 2.0
    }

    /// Tick values from `min` to `max`, inclusive.
    #[must_use]
    pub fn tick_values(self) -> Vec<f64> {
        let steps = self.steps.max(1) as f64;
        (0..=self.steps)
            .map(|index| {
                let tick = self.min + self.step_value * index as f64;
                if tick.is_finite() {
                    tick
                } else {
                    let t = index as f64 / steps;
                    self.min * (1.0 - t) + self.max * t
                }
            })
            .collect()
    }

    /// Splits `[min, max]` into [`MIN_STEPS`] equal steps without rounding.
    fn split_evenly(min: f64, max: f64) -> Self {
        let steps = MIN_STEPS;
        Self {
            min,
            max,
            step_value: max / steps as f64 - min / steps as f64,
            steps,
        }
    }
}

/// Computes a "nice" axis range for `values`.
///
/// The step count is fitted so that labels spaced `font_size * 1.5` apart fit
/// into `drawing_height`. When fewer than two steps fit, the range is split
/// into exactly two steps without rounding the step value.
#[must_use]
pub fn calculate_scale_range(
    values: &[f64],
    drawing_height: f64,
    font_size: f64,
    begin_at_zero: bool,
    integers_only: bool,
) -> ScaleRange {
    let max_steps = if drawing_height > 0.0 && font_size > 0.0 {
        (drawing_height / (font_size * 1.5)).floor() as usize
    } else {
        0
    };
    let mut skip_fitting = MIN_STEPS >= max_steps;

    let (mut min_value, mut max_value) = values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });
    if min_value > max_value {
        min_value = 0.0;
        max_value = 0.0;
    }

    if max_value == min_value {
        max_value += 0.5;
        if min_value >= 0.5 && !begin_at_zero {
            min_value -= 0.5;
        } else {
            max_value += 0.5;
        }
    }

    let magnitude = order_of_magnitude((max_value - min_value).abs());
    let unit = 10f64.powi(magnitude);
    let mut graph_max = (max_value / unit).ceil() * unit;
    let mut graph_min = (min_value / unit).floor() * unit;
    if begin_at_zero {
        graph_min = graph_min.min(0.0);
        graph_max = graph_max.max(0.0);
    }
    let graph_range = graph_max - graph_min;
    // Spans beyond f64::MAX cannot be stepped; fall back to the raw extent.
    if !graph_range.is_finite() {
        return ScaleRange::split_evenly(min_value, max_value);
    }

    let mut step_value = unit;
    let mut steps = (graph_range / step_value).round() as usize;
    let mut iterations = 0;
    while !skip_fitting && (steps > max_steps || steps * 2 < max_steps) {
        iterations += 1;
        if iterations > MAX_FIT_ITERATIONS {
            break;
        }

        if steps > max_steps {
            step_value *= 2.0;
        } else if integers_only && magnitude >= 0 {
            if (step_value / 2.0).fract() != 0.0 {
                break;
            }
            step_value /= 2.0;
        } else {
            step_value /= 2.0;
        }
        steps = (graph_range / step_value).round() as usize;
        if steps == 0 {
            skip_fitting = true;
        }
    }

    if skip_fitting || steps > max_steps.max(MIN_STEPS) {
        steps = MIN_STEPS;
        step_value = graph_range / steps as f64;
    }

    ScaleRange {
        min: graph_min,
        max: graph_min + steps as f64 * step_value,
        step_value,
        steps,
    }
}

/// `floor(log10(value))`, or 0 for non-positive input.
#[must_use]
pub fn order_of_magnitude(value: f64) -> i32 {
    if value > 0.0 && value.is_finite() {
        value.log10().floor() as i32
    } else {
        0
    }
}

/// Number of fractional digits needed to print `value` exactly.
#[must_use]
pub fn decimal_places(value: f64) -> usize {
    if value.fract() == 0.0 {
        return 0;
    }
    let text = value.to_string();
    text.split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
        .min(MAX_LABEL_DECIMALS)
}
