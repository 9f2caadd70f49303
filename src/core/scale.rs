use serde::{Deserialize, Serialize};

use crate::core::range::{ScaleRange, calculate_scale_range, decimal_places};
use crate::core::types::Viewport;
use crate::render::{
    Color, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive, estimate_text_width_px,
};

/// Lazily evaluated source of every plotted value, used for auto-ranging.
pub type RangeSource<'a> = &'a dyn Fn() -> Vec<f64>;

/// Coordinate system a grouped bar layout is computed against.
///
/// Categories are evenly spaced along x; values map linearly onto y with
/// larger values closer to the top of the viewport.
pub trait Scale {
    fn values_count(&self) -> usize;

    fn labels(&self) -> &[String];

    /// Pixel y of the range minimum (the bar baseline).
    fn end_point(&self) -> f64;

    /// Pixel x of the center of category slot `index`.
    fn calculate_x(&self, index: usize) -> f64;

    fn calculate_y(&self, value: f64) -> f64;

    fn add_label(&mut self, label: String);

    /// Removes the oldest label.
    fn remove_label(&mut self) -> Option<String>;

    /// Refits the scale, optionally to a new viewport.
    ///
    /// `range_source` is only invoked when the value range is auto-computed.
    fn update(&mut self, viewport: Option<Viewport>, range_source: RangeSource<'_>);

    fn draw(&self, frame: &mut RenderFrame, easing: f64);
}

/// How the value range of a [`CategoryScale`] is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RangeMode {
    Auto {
        begin_at_zero: bool,
        integers_only: bool,
    },
    Fixed(ScaleRange),
}

/// Visual configuration of a [`CategoryScale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleStyle {
    pub display: bool,
    pub show_labels: bool,
    pub font_size_px: f64,
    pub font_color: Color,
    pub line_width: f64,
    pub line_color: Color,
    pub show_grid_lines: bool,
    pub grid_line_width: f64,
    pub grid_line_color: Color,
    pub show_horizontal_lines: bool,
    pub show_vertical_lines: bool,
    /// Extra inset applied on every side of the plot area.
    pub padding_px: f64,
}

impl Default for ScaleStyle {
    fn default() -> Self {
        Self {
            display: true,
            show_labels: true,
            font_size_px: 12.0,
            font_color: Color::rgba8(102, 102, 102, 1.0),
            line_width: 1.0,
            line_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            show_grid_lines: true,
            grid_line_width: 1.0,
            grid_line_color: Color::rgba(0.0, 0.0, 0.0, 0.05),
            show_horizontal_lines: true,
            show_vertical_lines: true,
            padding_px: 0.0,
        }
    }
}

/// Category x axis paired with a linear value y axis.
///
/// With `offset_grid_lines` each category occupies a full slot and its
/// position is the slot center, which is what grouped bars need.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScale {
    viewport: Viewport,
    labels: Vec<String>,
    range_mode: RangeMode,
    style: ScaleStyle,
    offset_grid_lines: bool,
    range: ScaleRange,
    y_labels: Vec<String>,
    y_label_width: f64,
    start_point: f64,
    end_point: f64,
    x_padding_left: f64,
    x_padding_right: f64,
}

impl CategoryScale {
    /// Builds and fits a scale.
    #[must_use]
    pub fn new(
        viewport: Viewport,
        labels: Vec<String>,
        range_mode: RangeMode,
        style: ScaleStyle,
        range_source: RangeSource<'_>,
    ) -> Self {
        let mut scale = Self {
            viewport,
            labels,
            range_mode,
            style,
            offset_grid_lines: true,
            range: ScaleRange {
                min: 0.0,
                max: 1.0,
                step_value: 1.0,
                steps: 1,
            },
            y_labels: Vec::new(),
            y_label_width: 0.0,
            start_point: 0.0,
            end_point: 0.0,
            x_padding_left: 0.0,
            x_padding_right: 0.0,
        };
        scale.fit(range_source);
        scale
    }

    #[must_use]
    pub fn with_offset_grid_lines(mut self, offset: bool) -> Self {
        self.offset_grid_lines = offset;
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn range(&self) -> ScaleRange {
        self.range
    }

    #[must_use]
    pub fn start_point(&self) -> f64 {
        self.start_point
    }

    #[must_use]
    pub fn y_labels(&self) -> &[String] {
        &self.y_labels
    }

    #[must_use]
    pub fn x_padding(&self) -> (f64, f64) {
        (self.x_padding_left, self.x_padding_right)
    }

    fn fit(&mut self, range_source: RangeSource<'_>) {
        let font_size = self.style.font_size_px;
        let height = f64::from(self.viewport.height);

        self.start_point = if self.style.display { font_size } else { 0.0 };
        self.end_point = if self.style.display {
            height - font_size * 1.5 - 5.0
        } else {
            height
        };
        self.start_point += self.style.padding_px;
        self.end_point -= self.style.padding_px;

        let drawing_height = self.end_point - self.start_point;
        self.range = match self.range_mode {
            RangeMode::Fixed(range) => range,
            RangeMode::Auto {
                begin_at_zero,
                integers_only,
            } => calculate_scale_range(
                &range_source(),
                drawing_height,
                font_size,
                begin_at_zero,
                integers_only,
            ),
        };

        self.build_y_labels();
        self.fit_x_padding();
    }

    fn build_y_labels(&mut self) {
        let decimals = decimal_places(self.range.step_value);
        self.y_labels = self
            .range
            .tick_values()
            .into_iter()
            .map(|value| format!("{value:.decimals$}"))
            .collect();

        self.y_label_width = if self.style.display && self.style.show_labels {
            self.y_labels
                .iter()
                .map(|label| estimate_text_width_px(label, self.style.font_size_px))
                .fold(0.0, f64::max)
                + 10.0
        } else {
            0.0
        };
    }

    fn fit_x_padding(&mut self) {
        if !self.style.display {
            self.x_padding_left = self.style.padding_px;
            self.x_padding_right = self.style.padding_px;
            return;
        }

        let font_size = self.style.font_size_px;
        let first_width = self
            .labels
            .first()
            .map_or(0.0, |label| estimate_text_width_px(label, font_size));
        let last_width = self
            .labels
            .last()
            .map_or(0.0, |label| estimate_text_width_px(label, font_size));

        self.x_padding_right = last_width / 2.0 + 3.0;
        self.x_padding_left = (first_width / 2.0).max(self.y_label_width + 10.0);
    }

    fn x_at(&self, position: f64) -> f64 {
        let inner_width =
            f64::from(self.viewport.width) - (self.x_padding_left + self.x_padding_right);
        let slots = if self.offset_grid_lines {
            self.labels.len()
        } else {
            self.labels.len().saturating_sub(1)
        };
        let value_width = inner_width / slots.max(1) as f64;
        let mut offset = value_width * position + self.x_padding_left;
        if self.offset_grid_lines {
            offset += value_width / 2.0;
        }
        offset.round()
    }

    fn draw_y_axis(&self, frame: &mut RenderFrame) {
        let style = self.style;
        let x_start = self.x_padding_left;
        let x_end = f64::from(self.viewport.width);
        let label_gap = (self.end_point - self.start_point) / self.range.steps.max(1) as f64;

        for (index, label) in self.y_labels.iter().enumerate() {
            let center = self.end_point - label_gap * index as f64;
            let line_y = center.round() + alias_pixel(style.grid_line_width);

            if style.show_labels {
                frame.push_text(TextPrimitive::new(
                    label.clone(),
                    x_start - 10.0,
                    center,
                    style.font_size_px,
                    style.font_color,
                    TextHAlign::Right,
                ));
            }

            // The zero line doubles as the x axis and is always drawn.
            let (width, color) = if index == 0 {
                (style.line_width, style.line_color)
            } else if style.show_horizontal_lines && style.show_grid_lines {
                (style.grid_line_width, style.grid_line_color)
            } else {
                (0.0, style.grid_line_color)
            };
            push_line_if_visible(frame, x_start, line_y, x_end, line_y, width, color);
            push_line_if_visible(
                frame,
                x_start - 5.0,
                line_y,
                x_start,
                line_y,
                style.line_width,
                style.line_color,
            );
        }
    }

    fn draw_x_axis(&self, frame: &mut RenderFrame) {
        let style = self.style;
        let alias = alias_pixel(style.line_width);
        let line_offset = if self.offset_grid_lines { 0.5 } else { 0.0 };

        for (index, label) in self.labels.iter().enumerate() {
            let x = self.x_at(index as f64) + alias;
            let line_x = self.x_at(index as f64 - line_offset) + alias;

            let (width, color) = if index == 0 {
                (style.line_width, style.line_color)
            } else if style.show_vertical_lines && style.show_grid_lines {
                (style.grid_line_width, style.grid_line_color)
            } else {
                (0.0, style.grid_line_color)
            };
            push_line_if_visible(
                frame,
                line_x,
                self.end_point,
                line_x,
                self.start_point - 3.0,
                width,
                color,
            );
            push_line_if_visible(
                frame,
                line_x,
                self.end_point,
                line_x,
                self.end_point + 5.0,
                style.line_width,
                style.line_color,
            );

            if style.show_labels {
                frame.push_text(TextPrimitive::new(
                    label.clone(),
                    x,
                    self.end_point + 8.0,
                    style.font_size_px,
                    style.font_color,
                    TextHAlign::Center,
                ));
            }
        }
    }
}

impl Scale for CategoryScale {
    fn values_count(&self) -> usize {
        self.labels.len()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn end_point(&self) -> f64 {
        self.end_point
    }

    fn calculate_x(&self, index: usize) -> f64 {
        self.x_at(index as f64)
    }

    fn calculate_y(&self, value: f64) -> f64 {
        let half_span = self.range.half_span();
        if half_span == 0.0 || !half_span.is_finite() {
            return self.end_point;
        }
        let fraction = (value / 2.0 - self.range.min / 2.0) / half_span;
        self.end_point - (self.end_point - self.start_point) * fraction
    }

    fn add_label(&mut self, label: String) {
        self.labels.push(label);
        self.fit_x_padding();
    }

    fn remove_label(&mut self) -> Option<String> {
        if self.labels.is_empty() {
            return None;
        }
        let removed = self.labels.remove(0);
        self.fit_x_padding();
        Some(removed)
    }

    fn update(&mut self, viewport: Option<Viewport>, range_source: RangeSource<'_>) {
        if let Some(viewport) = viewport {
            self.viewport = viewport;
        }
        self.fit(range_source);
    }

    fn draw(&self, frame: &mut RenderFrame, _easing: f64) {
        if !self.style.display {
            return;
        }
        self.draw_y_axis(frame);
        self.draw_x_axis(frame);
    }
}

fn alias_pixel(line_width: f64) -> f64 {
    if line_width % 2.0 == 0.0 { 0.0 } else { 0.5 }
}

fn push_line_if_visible(
    frame: &mut RenderFrame,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    width: f64,
    color: Color,
) {
    if width > 0.0 && color.alpha > 0.0 {
        frame.push_line(LinePrimitive::new(x1, y1, x2, y2, width, color));
    }
}
