use approx::assert_abs_diff_eq;
use bar_chart_rs::core::{ChartData, Dataset, Scale, Viewport};
use bar_chart_rs::interaction::PointerEvent;
use bar_chart_rs::render::{Color, NullRenderer, RenderFrame, Renderer};
use bar_chart_rs::{BarChart, BarChartConfig, ChartError, ChartResult};

const FIRST_FILL: Color = Color::rgb(0.8, 0.2, 0.2);
const FIRST_STROKE: Color = Color::rgb(0.6, 0.1, 0.1);
const SECOND_FILL: Color = Color::rgb(0.2, 0.2, 0.8);
const SECOND_STROKE: Color = Color::rgb(0.1, 0.1, 0.6);
const SECOND_HIGHLIGHT: Color = Color::rgb(1.0, 1.0, 0.0);

fn sample_data() -> ChartData {
    ChartData::new(["a", "b", "c"])
        .with_dataset(Dataset::new("first", FIRST_FILL, FIRST_STROKE).with_values([1.0, 2.0, 3.0]))
        .with_dataset(
            Dataset::new("second", SECOND_FILL, SECOND_STROKE)
                .with_values([4.0, 5.0, 6.0])
                .with_highlight(SECOND_HIGHLIGHT, SECOND_HIGHLIGHT),
        )
}

fn static_config() -> BarChartConfig {
    BarChartConfig::new(Viewport::new(600, 400)).with_animation(false)
}

fn last_frame(chart: &BarChart<NullRenderer>) -> &RenderFrame {
    chart.renderer().last_frame.as_ref().expect("a frame was rendered")
}

#[test]
fn final_frame_contains_one_rect_per_value_plus_scale() {
    let chart =
        BarChart::new(NullRenderer::default(), static_config(), sample_data()).expect("init");

    assert_eq!(chart.renderer().last_rect_count(), 6);
    assert!(chart.renderer().last_line_count() > 0);
    assert_eq!(
        chart.renderer().last_text_count(),
        chart.scale().y_labels().len() + 3
    );
}

#[test]
fn rects_are_emitted_in_dataset_major_order() {
    let chart =
        BarChart::new(NullRenderer::default(), static_config(), sample_data()).expect("init");
    let rects = &last_frame(&chart).rects;

    assert_eq!(rects.len(), 6);
    for rect in &rects[..3] {
        assert_eq!(rect.fill_color, FIRST_FILL);
        assert_eq!(rect.border_color, FIRST_STROKE);
    }
    for rect in &rects[3..] {
        assert_eq!(rect.fill_color, SECOND_FILL);
    }
    assert!(rects[0].x < rects[1].x && rects[1].x < rects[2].x);
    assert!(rects[0].x < rects[3].x && rects[3].x < rects[1].x);
}

#[test]
fn stroked_rects_are_inset_on_the_value_end_only() {
    let chart =
        BarChart::new(NullRenderer::default(), static_config(), sample_data()).expect("init");
    let bar = chart.registry().bar(0, 2).expect("bar").view();
    let rect = last_frame(&chart).rects[2];
    let half_stroke = chart.config().bar_stroke_width / 2.0;

    assert_abs_diff_eq!(rect.x, bar.left() + half_stroke, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.width, bar.width - 2.0 * half_stroke, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.y, bar.y + half_stroke, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.y + rect.height, bar.base, epsilon = 1e-9);
    assert_abs_diff_eq!(rect.border_width, 2.0, epsilon = 1e-9);
}

#[test]
fn disabled_stroke_draws_plain_rects() {
    let mut config = static_config();
    config.bar_show_stroke = false;
    let chart = BarChart::new(NullRenderer::default(), config, sample_data()).expect("init");
    let bar = chart.registry().bar(1, 0).expect("bar").view();
    let rect = last_frame(&chart).rects[3];

    assert_abs_diff_eq!(rect.border_width, 0.0);
    assert_abs_diff_eq!(rect.x, bar.left(), epsilon = 1e-9);
    assert_abs_diff_eq!(rect.y, bar.top(), epsilon = 1e-9);
    assert_abs_diff_eq!(rect.height, bar.base - bar.y, epsilon = 1e-9);
}

#[test]
fn hidden_scale_draws_bars_only() {
    let mut config = static_config();
    config.show_scale = false;
    let chart = BarChart::new(NullRenderer::default(), config, sample_data()).expect("init");

    assert_eq!(chart.renderer().last_rect_count(), 6);
    assert_eq!(chart.renderer().last_line_count(), 0);
    assert_eq!(chart.renderer().last_text_count(), 0);
    // The baseline leaves room for the bar outline.
    assert_abs_diff_eq!(chart.scale().end_point(), 398.0, epsilon = 1e-9);
}

#[test]
fn missing_values_are_skipped_when_drawing() {
    let data = ChartData::new(["a", "b", "c"])
        .with_dataset(
            Dataset::new("first", FIRST_FILL, FIRST_STROKE)
                .with_optional_values([Some(1.0), None, Some(3.0)]),
        )
        .with_dataset(Dataset::new("second", SECOND_FILL, SECOND_STROKE).with_values([4.0, 5.0, 6.0]));
    let chart = BarChart::new(NullRenderer::default(), static_config(), data).expect("init");

    assert_eq!(chart.renderer().last_rect_count(), 5);
}

#[test]
fn easing_is_clamped_to_the_unit_interval() {
    let mut chart = BarChart::new(
        NullRenderer::default(),
        BarChartConfig::new(Viewport::new(600, 400)),
        sample_data(),
    )
    .expect("init");
    chart.set_value(0, 0, Some(3.5)).expect("set value");
    chart.animate_update().expect("animate update");
    let from = chart.registry().bar(0, 0).expect("bar").view();

    chart.draw(-3.0).expect("negative easing");
    let bar = chart.registry().bar(0, 0).expect("bar");
    assert_abs_diff_eq!(bar.view().y, from.y, epsilon = 1e-9);

    chart.draw(7.5).expect("easing beyond one");
    let bar = chart.registry().bar(0, 0).expect("bar");
    assert_eq!(bar.view(), bar.target());
}

#[test]
fn non_finite_easing_is_rejected() {
    let mut chart =
        BarChart::new(NullRenderer::default(), static_config(), sample_data()).expect("init");
    let frames = chart.renderer().frames_rendered;

    let error = chart.draw(f64::NAN).expect_err("NaN easing must fail");
    assert!(matches!(error, ChartError::InvalidData(_)));
    assert_eq!(chart.renderer().frames_rendered, frames);
}

#[test]
fn highlighted_bars_use_highlight_colors() {
    let mut chart =
        BarChart::new(NullRenderer::default(), static_config(), sample_data()).expect("init");
    let view = chart.registry().bar(1, 2).expect("bar").view();
    chart
        .handle_pointer_event(PointerEvent::mouse_move(view.x, (view.y + view.base) / 2.0))
        .expect("hover");

    let rects = &last_frame(&chart).rects;
    // Without explicit highlight colors the base colors are reused.
    assert_eq!(rects[2].fill_color, FIRST_FILL);
    assert_eq!(rects[5].fill_color, SECOND_HIGHLIGHT);
    assert_eq!(rects[5].border_color, SECOND_HIGHLIGHT);
    assert_eq!(rects[4].fill_color, SECOND_FILL);

    chart
        .handle_pointer_event(PointerEvent::mouse_out())
        .expect("mouse out");
    let rects = &last_frame(&chart).rects;
    assert_eq!(rects[5].fill_color, SECOND_FILL);
}

#[test]
fn render_draws_the_final_state() {
    let mut chart = BarChart::new(
        NullRenderer::default(),
        BarChartConfig::new(Viewport::new(600, 400)),
        sample_data(),
    )
    .expect("init");
    chart.render().expect("render");

    chart.registry().for_each_bar(|bar, _, _| {
        assert_eq!(bar.view(), bar.target());
    });
    assert_eq!(chart.renderer().frames_rendered, 2);
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&mut self, _frame: &RenderFrame) -> ChartResult<()> {
        Err(ChartError::InvalidData("backend unavailable".to_owned()))
    }
}

#[test]
fn renderer_errors_are_propagated() {
    let error = BarChart::new(FailingRenderer, static_config(), sample_data())
        .err()
        .expect("static chart draws during init");
    assert!(matches!(error, ChartError::InvalidData(_)));
}

#[test]
fn borrowed_renderers_can_be_driven() {
    let mut renderer = NullRenderer::default();
    {
        let mut chart =
            BarChart::new(&mut renderer, static_config(), sample_data()).expect("init");
        chart.draw(1.0).expect("draw");
    }
    assert_eq!(renderer.frames_rendered, 2);
}
