use smallvec::SmallVec;
use tracing::trace;

use crate::core::Rectangle;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    ActiveBars, BarHit, BarIndex, HoverMode, PointerEvent, PointerEventKind,
};
use crate::render::Renderer;

use super::BarChart;

/// Bars resolved by one hit test, in dataset order.
pub type BarHits<'a> = SmallVec<[BarHit<'a>; 4]>;

impl<R: Renderer> BarChart<R> {
    /// Returns the first bar under the pointer, scanning datasets in order
    /// and categories within each dataset.
    #[must_use]
    pub fn get_bar_at_event(&self, event: &PointerEvent) -> Option<BarHit<'_>> {
        let registry = &self.registry;
        let position = event.position();
        (0..registry.dataset_count()).find_map(|dataset_index| {
            registry
                .dataset_bars(dataset_index)
                .iter()
                .enumerate()
                .find(|(_, bar)| bar.in_range(position.x, position.y))
                .map(|(category_index, bar)| BarHit {
                    bar,
                    dataset_index,
                    category_index,
                })
        })
    }

    /// Returns every dataset's bar in the category of the first bar under
    /// the pointer, or nothing when no bar is hit.
    #[must_use]
    pub fn get_bars_at_event(&self, event: &PointerEvent) -> BarHits<'_> {
        let Some(hit) = self.get_bar_at_event(event) else {
            return BarHits::new();
        };
        self.hits_for_category(hit.category_index)
    }

    /// Resolves a pointer event according to the configured hover mode,
    /// notifies the hover callback and redraws highlighted bars when the
    /// active set changed.
    ///
    /// Events the chart does not listen to leave the active set untouched.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> ChartResult<ActiveBars> {
        if !self.config.listens_to(event.kind) {
            return Ok(ActiveBars::from_slice(self.hover.active()));
        }
        if event.kind == PointerEventKind::MouseOut {
            let previous = self.hover.clear();
            if !previous.is_empty() {
                self.set_highlighted(&previous, false);
                self.draw(1.0)?;
            }
            return Ok(ActiveBars::new());
        }

        let active: ActiveBars = match self.config.hover_mode {
            HoverMode::Bar => self
                .get_bar_at_event(&event)
                .map(|hit| (hit.dataset_index, hit.category_index))
                .into_iter()
                .collect(),
            HoverMode::Bars => self
                .get_bars_at_event(&event)
                .iter()
                .map(|hit| (hit.dataset_index, hit.category_index))
                .collect(),
            HoverMode::Dataset => {
                return Err(ChartError::UnsupportedHoverMode(HoverMode::Dataset));
            }
        };
        trace!(x = event.x, y = event.y, active = active.len(), "pointer hit test");

        if let Some(callback) = &self.config.on_hover {
            let hits = self.hits_for(&active);
            callback.call(&hits);
        }

        self.set_active(active.clone())?;
        Ok(active)
    }

    fn hits_for_category(&self, category_index: usize) -> BarHits<'_> {
        (0..self.registry.dataset_count())
            .filter_map(|dataset_index| {
                self.registry
                    .bar(dataset_index, category_index)
                    .map(|bar| BarHit {
                        bar,
                        dataset_index,
                        category_index,
                    })
            })
            .collect()
    }

    fn hits_for(&self, indices: &[BarIndex]) -> BarHits<'_> {
        indices
            .iter()
            .filter_map(|&(dataset_index, category_index)| {
                self.registry
                    .bar(dataset_index, category_index)
                    .map(|bar| BarHit {
                        bar,
                        dataset_index,
                        category_index,
                    })
            })
            .collect()
    }

    /// Swaps highlight state from the previous active bars to `active` and
    /// redraws when anything changed.
    fn set_active(&mut self, active: ActiveBars) -> ChartResult<()> {
        if self.hover.active() == active.as_slice() {
            return Ok(());
        }

        let previous = self.hover.replace(active.clone());
        self.set_highlighted(&previous, false);
        self.set_highlighted(&active, true);

        self.draw(1.0)
    }

    fn set_highlighted(&mut self, indices: &[BarIndex], highlighted: bool) {
        for &(dataset_index, category_index) in indices {
            if let Some(bar) = self.registry.bar_mut(dataset_index, category_index) {
                bar.set_highlighted(highlighted);
            }
        }
    }
}
