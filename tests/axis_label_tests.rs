use approx::assert_relative_eq;
use detection_timeline::api::{
    AxisLabelConfig, count_labels, format_time_label, grid_row_ys, time_labels,
};
use detection_timeline::core::{CanvasPadding, TimeMapper, TimeRange, Viewport};

const MINUTE: f64 = 60_000.0;

#[test]
fn grid_rows_split_drawable_height_evenly() {
    let rows = grid_row_ys(Viewport::new(220, 200), CanvasPadding::default(), 3);
    assert_eq!(rows.len(), 4);
    assert_relative_eq!(rows[0], 40.0);
    assert_relative_eq!(rows[3], 182.0, epsilon = 1e-9);
    assert_relative_eq!(rows[1] - rows[0], 142.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn count_labels_descend_from_max_to_zero() {
    let labels = count_labels(7, Viewport::new(220, 200), CanvasPadding::default(), 3);
    let values: Vec<u64> = labels.iter().map(|label| label.value).collect();
    assert_eq!(values, vec![7, 4, 2, 0]);
    assert!(count_labels(0, Viewport::new(220, 200), CanvasPadding::default(), 3).is_empty());
}

#[test]
fn time_labels_snap_outer_down_and_inner_to_nearest_minute() {
    let range = TimeRange::new(0.0, 60.0 * MINUTE).expect("valid range");
    let mapper = TimeMapper::new(range, 400.0).expect("valid mapper");

    let labels = time_labels(mapper, &AxisLabelConfig::default(), CanvasPadding::default());
    let minutes: Vec<f64> = labels.iter().map(|label| label.time / MINUTE).collect();
    assert_eq!(minutes, vec![5.0, 22.0, 38.0, 54.0]);

    for label in &labels {
        assert_relative_eq!(label.x, 18.0 + mapper.time_to_pixel_exact(label.time));
    }
}

#[test]
fn first_time_label_clears_the_count_label_gutter() {
    let range = TimeRange::new(0.0, 60.0 * MINUTE).expect("valid range");
    let mapper = TimeMapper::new(range, 400.0).expect("valid mapper");
    let padding = CanvasPadding {
        left: 40.0,
        ..CanvasPadding::default()
    };
    let config = AxisLabelConfig::default();

    let labels = time_labels(mapper, &config, padding);
    let first = labels.first().expect("labels fit");
    // 5.25 min floors to 5 min, i.e. 33.33 px into the mapped width.
    assert_relative_eq!(first.x, 40.0 + 5.0 * MINUTE / 9_000.0, epsilon = 1e-9);
    assert!(labels.iter().all(|label| label.x > padding.left));
}

#[test]
fn short_spans_get_at_most_one_label_per_minute() {
    let range = TimeRange::new(0.0, 1.5 * MINUTE).expect("valid range");
    let mapper = TimeMapper::new(range, 1000.0).expect("valid mapper");
    let labels = time_labels(mapper, &AxisLabelConfig::default(), CanvasPadding::default());
    assert_eq!(labels.len(), 2);
}

#[test]
fn narrow_surfaces_get_no_time_labels() {
    let range = TimeRange::new(0.0, 60.0 * MINUTE).expect("valid range");
    let mapper = TimeMapper::new(range, 40.0).expect("valid mapper");
    let labels = time_labels(mapper, &AxisLabelConfig::default(), CanvasPadding::default());
    assert!(labels.is_empty());
}

#[test]
fn time_labels_use_strftime_patterns() {
    let label = format_time_label(90.0 * MINUTE, "%b %d %H:%M").expect("formats");
    assert_eq!(label, "Jan 01 01:30");
    let label = format_time_label(-MINUTE, "%Y-%m-%d %H:%M").expect("formats");
    assert_eq!(label, "1969-12-31 23:59");
}

#[test]
fn chrono_datetimes_convert_to_chart_timestamps() {
    use chrono::{TimeZone, Utc};
    use detection_timeline::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};

    let datetime = Utc
        .with_ymd_and_hms(2020, 9, 13, 12, 26, 40)
        .single()
        .expect("unambiguous datetime");
    let millis = datetime_to_unix_millis(datetime);
    assert_eq!(millis, 1_600_000_000_000.0);
    assert_eq!(
        unix_millis_to_datetime(millis).expect("in range"),
        datetime
    );
    assert!(unix_millis_to_datetime(f64::NAN).is_err());
}
