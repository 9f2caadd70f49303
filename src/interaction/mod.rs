use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Bar, Point};

/// How many bars a pointer query resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    /// The single bar under the pointer.
    Bar,
    /// Every dataset's bar in the category under the pointer.
    #[default]
    Bars,
    /// Every bar of the dataset under the pointer. Not supported.
    Dataset,
}

/// Pointer event kinds a chart can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEventKind {
    MouseMove,
    MouseOut,
    TouchStart,
    TouchMove,
    Click,
}

/// Pointer event in chart-relative pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    #[must_use]
    pub fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    #[must_use]
    pub fn mouse_move(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::MouseMove, x, y)
    }

    #[must_use]
    pub fn mouse_out() -> Self {
        Self::new(PointerEventKind::MouseOut, 0.0, 0.0)
    }

    #[must_use]
    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A bar resolved by a hit test, with its position in the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarHit<'a> {
    pub bar: &'a Bar,
    pub dataset_index: usize,
    pub category_index: usize,
}

/// Registry coordinates of a bar: `(dataset_index, category_index)`.
pub type BarIndex = (usize, usize);

/// Bars made active by the latest pointer event.
pub type ActiveBars = SmallVec<[BarIndex; 4]>;

/// Tracks which bars are currently highlighted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    active: ActiveBars,
}

impl HoverState {
    #[must_use]
    pub fn active(&self) -> &[BarIndex] {
        &self.active
    }

    /// Replaces the active set, returning the previous one.
    pub fn replace(&mut self, active: ActiveBars) -> ActiveBars {
        std::mem::replace(&mut self.active, active)
    }

    /// Empties the active set, returning what was active.
    pub fn clear(&mut self) -> ActiveBars {
        self.replace(ActiveBars::new())
    }

    /// Forgets bars of the removed oldest category and shifts the remaining
    /// category indices down by one.
    pub fn on_category_removed(&mut self) {
        self.active.retain(|(_, category)| *category > 0);
        for (_, category) in &mut self.active {
            *category -= 1;
        }
    }
}
