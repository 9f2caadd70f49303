use serde::{Deserialize, Serialize};

use crate::render::{Color, RectPrimitive, RenderFrame};

/// Animatable geometric property of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarProperty {
    X,
    Y,
    Width,
    Base,
}

/// Bars move horizontally, grow vertically and resize while animating.
pub const TRANSITION_PROPERTIES: [BarProperty; 3] =
    [BarProperty::X, BarProperty::Y, BarProperty::Width];

/// Vertical bar geometry in pixels: `x` is the center, `y` the value end and
/// `base` the baseline end.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub base: f64,
}

impl BarShape {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, base: f64) -> Self {
        Self { x, y, width, base }
    }

    #[must_use]
    pub fn get(self, property: BarProperty) -> f64 {
        match property {
            BarProperty::X => self.x,
            BarProperty::Y => self.y,
            BarProperty::Width => self.width,
            BarProperty::Base => self.base,
        }
    }

    pub fn set(&mut self, property: BarProperty, value: f64) {
        match property {
            BarProperty::X => self.x = value,
            BarProperty::Y => self.y = value,
            BarProperty::Width => self.width = value,
            BarProperty::Base => self.base = value,
        }
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x - self.width / 2.0
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y.min(self.base)
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y.max(self.base)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }
}

/// Drawable, animatable rectangle contract.
pub trait Rectangle {
    /// Makes the current target the displayed state, dropping any pending
    /// transition.
    fn save(&mut self);

    /// Moves the displayed `properties` towards the target by `easing`
    /// (0 = transition start, 1 = target).
    fn transition(&mut self, properties: &[BarProperty], easing: f64) -> &mut Self;

    fn draw(&self, frame: &mut RenderFrame);

    fn in_range(&self, x: f64, y: f64) -> bool;

    fn has_value(&self) -> bool;
}

/// Rectangle state for one (dataset, category) value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    target: BarShape,
    view: BarShape,
    start: Option<BarShape>,
    pub value: Option<f64>,
    pub label: String,
    pub dataset_label: String,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub highlight_fill: Color,
    pub highlight_stroke: Color,
    pub show_stroke: bool,
    pub stroke_width: f64,
    highlighted: bool,
}

impl Default for Bar {
    fn default() -> Self {
        Self {
            target: BarShape::default(),
            view: BarShape::default(),
            start: None,
            value: None,
            label: String::new(),
            dataset_label: String::new(),
            stroke_color: Color::TRANSPARENT,
            fill_color: Color::TRANSPARENT,
            highlight_fill: Color::TRANSPARENT,
            highlight_stroke: Color::TRANSPARENT,
            show_stroke: true,
            stroke_width: 2.0,
            highlighted: false,
        }
    }
}

impl Bar {
    /// Creates a bar displayed at `shape`.
    #[must_use]
    pub fn new(shape: BarShape) -> Self {
        Self {
            target: shape,
            view: shape,
            ..Self::default()
        }
    }

    /// Geometry the bar is moving towards.
    #[must_use]
    pub fn target(&self) -> BarShape {
        self.target
    }

    /// Geometry as last drawn.
    #[must_use]
    pub fn view(&self) -> BarShape {
        self.view
    }

    #[must_use]
    pub fn transition_start(&self) -> Option<BarShape> {
        self.start
    }

    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// Retargets the bar. The next transition starts from what is currently
    /// displayed.
    pub fn set_target(&mut self, target: BarShape) {
        self.target = target;
        self.start = None;
    }

    /// Moves the baseline immediately, without animation.
    pub fn set_base(&mut self, base: f64) {
        self.target.base = base;
        self.view.base = base;
        if let Some(start) = self.start.as_mut() {
            start.base = base;
        }
    }

    #[must_use]
    pub fn current_fill(&self) -> Color {
        if self.highlighted {
            self.highlight_fill
        } else {
            self.fill_color
        }
    }

    #[must_use]
    pub fn current_stroke(&self) -> Color {
        if self.highlighted {
            self.highlight_stroke
        } else {
            self.stroke_color
        }
    }
}

impl Rectangle for Bar {
    fn save(&mut self) {
        self.view = self.target;
        self.start = None;
    }

    fn transition(&mut self, properties: &[BarProperty], easing: f64) -> &mut Self {
        let start = *self.start.get_or_insert(self.view);
        for &property in properties {
            let from = start.get(property);
            let to = self.target.get(property);
            self.view.set(property, from + (to - from) * easing);
        }
        if easing >= 1.0 {
            self.start = None;
        }
        self
    }

    fn draw(&self, frame: &mut RenderFrame) {
        let shape = self.view;
        let mut left = shape.left();
        let mut right = shape.right();
        let mut top = shape.top();
        let mut bottom = shape.bottom();

        let stroked = self.show_stroke && self.stroke_width > 0.0;
        if stroked {
            let half_stroke = self.stroke_width / 2.0;
            left += half_stroke;
            right -= half_stroke;
            // Only the value end is inset; the baseline edge stays on the axis.
            if shape.y <= shape.base {
                top += half_stroke;
            } else {
                bottom -= half_stroke;
            }
        }

        let mut rect = RectPrimitive::new(
            left,
            top,
            (right - left).max(0.0),
            (bottom - top).max(0.0),
            self.current_fill(),
        );
        if stroked {
            rect = rect.with_border(self.stroke_width, self.current_stroke());
        }
        frame.push_rect(rect);
    }

    fn in_range(&self, x: f64, y: f64) -> bool {
        self.has_value() && self.view.contains(x, y)
    }

    fn has_value(&self) -> bool {
        self.value.is_some()
    }
}
