use tracing::trace;

use crate::core::{Rectangle, Scale, TRANSITION_PROPERTIES};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

use super::BarChart;

impl<R: Renderer> BarChart<R> {
    /// Draws one frame with bars `easing` of the way towards their targets.
    ///
    /// Bars without a value are skipped entirely. `easing` is clamped to
    /// `[0, 1]`; at 1 every drawn bar reaches its target.
    pub fn draw(&mut self, easing: f64) -> ChartResult<()> {
        if !easing.is_finite() {
            return Err(ChartError::InvalidData(
                "easing factor must be finite".to_owned(),
            ));
        }
        let easing = easing.clamp(0.0, 1.0);

        let mut frame = RenderFrame::new(self.config.viewport);
        self.scale.draw(&mut frame, easing);

        let end_point = self.scale.end_point();
        self.registry.for_each_bar_mut(|bar, _, _, _| {
            if !bar.has_value() {
                return;
            }
            bar.set_base(end_point);
            bar.transition(&TRANSITION_PROPERTIES, easing).draw(&mut frame);
        });

        trace!(
            easing,
            rects = frame.rects.len(),
            lines = frame.lines.len(),
            "draw bar chart frame"
        );
        self.renderer.render(&frame)
    }

    /// Draws the final state.
    pub fn render(&mut self) -> ChartResult<()> {
        self.draw(1.0)
    }
}
