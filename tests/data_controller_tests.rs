use bar_chart_rs::core::{ChartData, Dataset, Rectangle, Scale, Viewport};
use bar_chart_rs::interaction::PointerEvent;
use bar_chart_rs::render::{Color, NullRenderer};
use bar_chart_rs::{BarChart, BarChartConfig, ChartError};

fn sample_data() -> ChartData {
    ChartData::new(["a", "b", "c"])
        .with_dataset(
            Dataset::new("first", Color::rgb(0.8, 0.2, 0.2), Color::rgb(0.6, 0.1, 0.1))
                .with_values([1.0, 2.0, 3.0]),
        )
        .with_dataset(
            Dataset::new("second", Color::rgb(0.2, 0.2, 0.8), Color::rgb(0.1, 0.1, 0.6))
                .with_values([4.0, 5.0, 6.0]),
        )
}

fn chart(animation: bool) -> BarChart<NullRenderer> {
    let config = BarChartConfig::new(Viewport::new(600, 400)).with_animation(animation);
    BarChart::new(NullRenderer::default(), config, sample_data()).expect("chart init")
}

fn values_of(chart: &BarChart<NullRenderer>, dataset_index: usize) -> Vec<Option<f64>> {
    chart
        .registry()
        .dataset_bars(dataset_index)
        .iter()
        .map(|bar| bar.value)
        .collect()
}

#[test]
fn add_data_appends_one_bar_per_dataset() {
    let mut chart = chart(false);
    chart.add_data(&[7.0, 8.0], "d").expect("add data");

    assert_eq!(chart.registry().category_count(), 4);
    assert_eq!(chart.registry().dataset_bars(0).len(), 4);
    assert_eq!(chart.registry().dataset_bars(1).len(), 4);
    assert_eq!(chart.data().labels, vec!["a", "b", "c", "d"]);
    assert_eq!(chart.scale().labels(), chart.data().labels.as_slice());

    let first = chart.registry().bar(0, 3).expect("new bar");
    let second = chart.registry().bar(1, 3).expect("new bar");
    assert_eq!(first.value, Some(7.0));
    assert_eq!(second.value, Some(8.0));
    assert_eq!(first.label, "d");
    assert_eq!(second.dataset_label, "second");
    assert_eq!(second.fill_color, Color::rgb(0.2, 0.2, 0.8));
}

#[test]
fn added_bars_reach_their_slot_even_with_animation_enabled() {
    let mut chart = chart(true);
    let frames = chart.renderer().frames_rendered;
    chart.add_data(&[7.0, 8.0], "d").expect("add data");

    assert_eq!(chart.renderer().frames_rendered, frames + 1);
    let end_point = chart.scale().end_point();
    for dataset_index in 0..2 {
        let bar = chart.registry().bar(dataset_index, 3).expect("new bar");
        assert_eq!(bar.view(), bar.target());
        assert!(bar.view().y < end_point);
        assert!((bar.view().base - end_point).abs() <= 1e-9);
    }
    let previous = chart.registry().bar(1, 2).expect("bar").view();
    let added = chart.registry().bar(0, 3).expect("new bar").view();
    assert!(previous.right() <= added.left() + 1e-9);
}

#[test]
fn add_data_relayouts_every_category() {
    let mut chart = chart(false);
    let width_before = chart.registry().bar(0, 0).expect("bar").target().width;
    chart.add_data(&[7.0, 8.0], "d").expect("add data");

    let width_after = chart.registry().bar(0, 0).expect("bar").target().width;
    assert!(width_after < width_before);
    chart.registry().for_each_bar(|bar, _, _| {
        assert!((bar.target().width - width_after).abs() <= 1e-9);
    });
}

#[test]
fn add_data_accepts_missing_values() {
    let mut chart = chart(false);
    chart.add_data(&[Some(7.0), None], "d").expect("add data");

    assert!(chart.registry().bar(0, 3).expect("bar").has_value());
    assert!(!chart.registry().bar(1, 3).expect("bar").has_value());
    assert_eq!(chart.data().datasets[1].data[3], None);
    // Missing values are not drawn.
    assert_eq!(chart.renderer().last_rect_count(), 7);
}

#[test]
fn add_data_rejects_mismatched_value_counts() {
    let mut chart = chart(false);
    let error = chart
        .add_data(&[7.0], "d")
        .expect_err("one value for two datasets must fail");
    assert!(matches!(error, ChartError::InvalidData(_)));
    assert_eq!(chart.registry().category_count(), 3);
    assert_eq!(chart.scale().values_count(), 3);
}

#[test]
fn add_data_rejects_non_finite_values() {
    let mut chart = chart(false);
    let error = chart
        .add_data(&[f64::NAN, 1.0], "d")
        .expect_err("NaN must fail");
    assert!(matches!(error, ChartError::InvalidData(_)));
    assert_eq!(chart.registry().category_count(), 3);
}

#[test]
fn remove_data_drops_the_oldest_category() {
    let mut chart = chart(false);
    chart.remove_data().expect("remove data");

    assert_eq!(chart.data().labels, vec!["b", "c"]);
    assert_eq!(chart.scale().labels(), ["b".to_owned(), "c".to_owned()]);
    assert_eq!(values_of(&chart, 0), vec![Some(2.0), Some(3.0)]);
    assert_eq!(values_of(&chart, 1), vec![Some(5.0), Some(6.0)]);
    assert_eq!(chart.data().datasets[0].data, vec![Some(2.0), Some(3.0)]);
}

#[test]
fn remove_data_after_add_keeps_the_newest_categories() {
    let mut chart = chart(false);
    chart.add_data(&[7.0, 8.0], "d").expect("add data");
    chart.remove_data().expect("remove data");

    assert_eq!(chart.registry().category_count(), 3);
    assert_eq!(chart.data().labels, vec!["b", "c", "d"]);
    assert_eq!(values_of(&chart, 0), vec![Some(2.0), Some(3.0), Some(7.0)]);
    assert_eq!(values_of(&chart, 1), vec![Some(5.0), Some(6.0), Some(8.0)]);
}

#[test]
fn removed_categories_shift_remaining_bars_left() {
    let mut chart = chart(false);
    let second_slot_x = chart.registry().bar(0, 1).expect("bar").target().x;
    let first_slot_x = chart.registry().bar(0, 0).expect("bar").target().x;
    chart.remove_data().expect("remove data");

    let bar = chart.registry().bar(0, 0).expect("bar");
    assert_eq!(bar.label, "b");
    assert!(bar.target().x < second_slot_x);
    assert!(bar.target().x >= first_slot_x - 1e-9);
}

#[test]
fn remove_data_on_an_empty_chart_fails() {
    let mut chart = chart(false);
    for _ in 0..3 {
        chart.remove_data().expect("remove data");
    }
    assert_eq!(chart.registry().category_count(), 0);
    assert_eq!(chart.registry().bar_count(), 0);

    let error = chart.remove_data().expect_err("nothing left to remove");
    assert!(matches!(error, ChartError::InvalidData(_)));
}

#[test]
fn emptied_chart_accepts_new_categories() {
    let mut chart = chart(false);
    for _ in 0..3 {
        chart.remove_data().expect("remove data");
    }
    chart.add_data(&[9.0, 10.0], "z").expect("add data");

    assert_eq!(chart.data().labels, vec!["z"]);
    assert_eq!(chart.registry().bar_count(), 2);
    assert_eq!(chart.renderer().last_rect_count(), 2);
}

#[test]
fn remove_data_shifts_highlighted_bars() {
    let mut chart = chart(false);
    let target = chart.registry().bar(1, 2).expect("bar").view();
    let event = PointerEvent::mouse_move(target.x, (target.y + target.base) / 2.0);
    chart.handle_pointer_event(event).expect("hover");
    assert_eq!(chart.active_bars(), [(0, 2), (1, 2)]);

    chart.remove_data().expect("remove data");
    assert_eq!(chart.active_bars(), [(0, 1), (1, 1)]);
    assert!(chart.registry().bar(1, 1).expect("bar").is_highlighted());
}

#[test]
fn removing_the_highlighted_category_clears_it() {
    let mut chart = chart(false);
    let target = chart.registry().bar(0, 0).expect("bar").view();
    let event = PointerEvent::mouse_move(target.x, (target.y + target.base) / 2.0);
    chart.handle_pointer_event(event).expect("hover");
    assert_eq!(chart.active_bars(), [(0, 0), (1, 0)]);

    chart.remove_data().expect("remove data");
    assert!(chart.active_bars().is_empty());
}

#[test]
fn set_value_rejects_unknown_positions() {
    let mut chart = chart(false);
    let error = chart
        .set_value(2, 0, Some(1.0))
        .expect_err("no third dataset");
    assert!(matches!(error, ChartError::InvalidData(_)));
    let error = chart
        .set_value(0, 3, Some(1.0))
        .expect_err("no fourth category");
    assert!(matches!(error, ChartError::InvalidData(_)));
    let error = chart
        .set_value(0, 0, Some(f64::INFINITY))
        .expect_err("infinite value");
    assert!(matches!(error, ChartError::InvalidData(_)));
}

#[test]
fn set_value_can_clear_a_value() {
    let mut chart = chart(false);
    chart.set_value(0, 1, None).expect("clear value");
    chart.update().expect("update");

    assert!(!chart.registry().bar(0, 1).expect("bar").has_value());
    assert_eq!(chart.renderer().last_rect_count(), 5);
}
