use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{BarGeometry, RangeMode, ScaleRange, ScaleStyle, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{BarHit, HoverMode, PointerEventKind};
use crate::render::Color;

pub const DEFAULT_LEGEND_TEMPLATE: &str = "<ul class=\"<%=name.toLowerCase()%>-legend\"><% for (var i=0; i<datasets.length; i++){%><li><span style=\"background-color:<%=datasets[i].fillColor%>\"></span><%if(datasets[i].label){%><%=datasets[i].label%><%}%></li><%}%></ul>";

/// Callback invoked with the bars resolved by each handled pointer event.
#[derive(Clone)]
pub struct HoverCallback(Rc<dyn Fn(&[BarHit<'_>])>);

impl HoverCallback {
    pub fn new(callback: impl Fn(&[BarHit<'_>]) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub(crate) fn call(&self, active: &[BarHit<'_>]) {
        (self.0)(active);
    }
}

impl fmt::Debug for HoverCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HoverCallback(..)")
    }
}

impl PartialEq for HoverCallback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Bar chart options.
///
/// Every field has a default; keys unknown to this struct are ignored when
/// deserializing. `on_hover` is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    pub viewport: Viewport,
    #[serde(default = "default_true")]
    pub animation: bool,
    #[serde(default = "default_true")]
    pub show_scale: bool,
    #[serde(default)]
    pub scale_override: bool,
    #[serde(default)]
    pub scale_steps: usize,
    #[serde(default)]
    pub scale_step_width: f64,
    #[serde(default)]
    pub scale_start_value: f64,
    #[serde(default = "default_true")]
    pub scale_begin_at_zero: bool,
    #[serde(default = "default_true")]
    pub scale_integers_only: bool,
    #[serde(default = "default_true")]
    pub scale_show_labels: bool,
    #[serde(default = "default_scale_font_size")]
    pub scale_font_size: f64,
    #[serde(default = "default_scale_font_color")]
    pub scale_font_color: Color,
    #[serde(default = "default_line_width")]
    pub scale_line_width: f64,
    #[serde(default = "default_scale_line_color")]
    pub scale_line_color: Color,
    #[serde(default = "default_true")]
    pub scale_show_grid_lines: bool,
    #[serde(default = "default_scale_grid_line_color")]
    pub scale_grid_line_color: Color,
    #[serde(default = "default_line_width")]
    pub scale_grid_line_width: f64,
    #[serde(default = "default_true")]
    pub scale_show_horizontal_lines: bool,
    #[serde(default = "default_true")]
    pub scale_show_vertical_lines: bool,
    #[serde(default = "default_true")]
    pub bar_show_stroke: bool,
    #[serde(default = "default_bar_stroke_width")]
    pub bar_stroke_width: f64,
    #[serde(default = "default_bar_value_spacing")]
    pub bar_value_spacing: f64,
    #[serde(default = "default_bar_dataset_spacing")]
    pub bar_dataset_spacing: f64,
    #[serde(default = "default_true")]
    pub show_tooltips: bool,
    #[serde(default = "default_tooltip_events")]
    pub tooltip_events: Vec<PointerEventKind>,
    #[serde(default)]
    pub hover_mode: HoverMode,
    #[serde(skip)]
    pub on_hover: Option<HoverCallback>,
    #[serde(default = "default_legend_template")]
    pub legend_template: String,
}

impl BarChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            animation: true,
            show_scale: true,
            scale_override: false,
            scale_steps: 0,
            scale_step_width: 0.0,
            scale_start_value: 0.0,
            scale_begin_at_zero: true,
            scale_integers_only: true,
            scale_show_labels: true,
            scale_font_size: default_scale_font_size(),
            scale_font_color: default_scale_font_color(),
            scale_line_width: default_line_width(),
            scale_line_color: default_scale_line_color(),
            scale_show_grid_lines: true,
            scale_grid_line_color: default_scale_grid_line_color(),
            scale_grid_line_width: default_line_width(),
            scale_show_horizontal_lines: true,
            scale_show_vertical_lines: true,
            bar_show_stroke: true,
            bar_stroke_width: default_bar_stroke_width(),
            bar_value_spacing: default_bar_value_spacing(),
            bar_dataset_spacing: default_bar_dataset_spacing(),
            show_tooltips: true,
            tooltip_events: default_tooltip_events(),
            hover_mode: HoverMode::default(),
            on_hover: None,
            legend_template: default_legend_template(),
        }
    }

    #[must_use]
    pub fn with_animation(mut self, animation: bool) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn with_hover_mode(mut self, mode: HoverMode) -> Self {
        self.hover_mode = mode;
        self
    }

    #[must_use]
    pub fn with_on_hover(mut self, callback: impl Fn(&[BarHit<'_>]) + 'static) -> Self {
        self.on_hover = Some(HoverCallback::new(callback));
        self
    }

    #[must_use]
    pub fn with_bar_spacing(mut self, value_spacing: f64, dataset_spacing: f64) -> Self {
        self.bar_value_spacing = value_spacing;
        self.bar_dataset_spacing = dataset_spacing;
        self
    }

    /// Replaces auto-ranging with `steps` steps of `step_width` from
    /// `start_value`.
    #[must_use]
    pub fn with_scale_override(mut self, start_value: f64, step_width: f64, steps: usize) -> Self {
        self.scale_override = true;
        self.scale_start_value = start_value;
        self.scale_step_width = step_width;
        self.scale_steps = steps;
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|err| {
            ChartError::InvalidConfig(format!("failed to parse chart config: {err}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            ChartError::InvalidConfig(format!("failed to serialize chart config: {err}"))
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.scale_font_size.is_finite() || self.scale_font_size <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "scale font size must be finite and > 0".to_owned(),
            ));
        }
        for (name, width) in [
            ("scale line width", self.scale_line_width),
            ("scale grid line width", self.scale_grid_line_width),
            ("bar stroke width", self.bar_stroke_width),
        ] {
            if !width.is_finite() || width < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for color in [
            self.scale_font_color,
            self.scale_line_color,
            self.scale_grid_line_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        self.bar_geometry()?;
        self.range_mode()?;
        Ok(())
    }

    pub fn bar_geometry(&self) -> ChartResult<BarGeometry> {
        BarGeometry::new(self.bar_value_spacing, self.bar_dataset_spacing)
    }

    pub fn range_mode(&self) -> ChartResult<RangeMode> {
        if self.scale_override {
            let range = ScaleRange::from_steps(
                self.scale_start_value,
                self.scale_step_width,
                self.scale_steps,
            )?;
            return Ok(RangeMode::Fixed(range));
        }
        Ok(RangeMode::Auto {
            begin_at_zero: self.scale_begin_at_zero,
            integers_only: self.scale_integers_only,
        })
    }

    #[must_use]
    pub fn scale_style(&self) -> ScaleStyle {
        // A hidden scale still leaves room for the bar outline.
        let padding_px = if self.show_scale {
            0.0
        } else if self.bar_show_stroke {
            self.bar_stroke_width
        } else {
            0.0
        };

        ScaleStyle {
            display: self.show_scale,
            show_labels: self.scale_show_labels,
            font_size_px: self.scale_font_size,
            font_color: self.scale_font_color,
            line_width: self.scale_line_width,
            line_color: self.scale_line_color,
            show_grid_lines: self.scale_show_grid_lines,
            grid_line_width: self.scale_grid_line_width,
            grid_line_color: self.scale_grid_line_color,
            show_horizontal_lines: self.scale_show_horizontal_lines,
            show_vertical_lines: self.scale_show_vertical_lines,
            padding_px,
        }
    }

    #[must_use]
    pub fn listens_to(&self, kind: PointerEventKind) -> bool {
        self.show_tooltips && self.tooltip_events.contains(&kind)
    }
}

fn default_true() -> bool {
    true
}

fn default_scale_font_size() -> f64 {
    12.0
}

fn default_scale_font_color() -> Color {
    Color::rgba8(102, 102, 102, 1.0)
}

fn default_line_width() -> f64 {
    1.0
}

fn default_scale_line_color() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 0.1)
}

fn default_scale_grid_line_color() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 0.05)
}

fn default_bar_stroke_width() -> f64 {
    2.0
}

fn default_bar_value_spacing() -> f64 {
    5.0
}

fn default_bar_dataset_spacing() -> f64 {
    1.0
}

fn default_tooltip_events() -> Vec<PointerEventKind> {
    vec![
        PointerEventKind::MouseMove,
        PointerEventKind::TouchStart,
        PointerEventKind::TouchMove,
        PointerEventKind::MouseOut,
    ]
}

fn default_legend_template() -> String {
    DEFAULT_LEGEND_TEMPLATE.to_owned()
}
