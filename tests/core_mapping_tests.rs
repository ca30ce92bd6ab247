use approx::assert_relative_eq;
use detection_timeline::ChartError;
use detection_timeline::core::{
    CanvasPadding, DrawableArea, TimeMapper, TimeRange, TimeRangeTuning, Viewport,
};

#[test]
fn mapper_projects_range_onto_drawable_width() {
    let range = TimeRange::new(1_000.0, 3_000.0).expect("valid range");
    let mapper = TimeMapper::new(range, 400.0).expect("valid mapper");

    assert_eq!(mapper.time_per_pixel(), 5.0);
    assert_eq!(mapper.time_to_pixel(Some(1_000.0)), Some(0.0));
    assert_eq!(mapper.time_to_pixel(Some(3_000.0)), Some(400.0));
    assert_eq!(mapper.time_to_pixel(Some(2_002.0)), Some(200.0));
    assert_relative_eq!(mapper.time_to_pixel_exact(2_002.0), 200.4);
    assert_eq!(mapper.pixel_to_time(100.0), 1_500.0);
}

#[test]
fn mapper_keeps_absent_times_absent() {
    let range = TimeRange::new(0.0, 1_000.0).expect("valid range");
    let mapper = TimeMapper::new(range, 200.0).expect("valid mapper");
    assert_eq!(mapper.time_to_pixel(None), None);
    assert_eq!(mapper.time_to_pixel(Some(f64::NAN)), None);
}

#[test]
fn mapper_rejects_degenerate_inputs() {
    let range = TimeRange::new(0.0, 1_000.0).expect("valid range");
    assert!(matches!(
        TimeMapper::new(range, 0.0),
        Err(ChartError::MappingUnavailable(_))
    ));
    assert!(matches!(
        TimeMapper::new(range, f64::INFINITY),
        Err(ChartError::MappingUnavailable(_))
    ));

    let flat = TimeRange::new(5.0, 5.0).expect("valid range");
    assert!(matches!(
        TimeMapper::new(flat, 100.0),
        Err(ChartError::MappingUnavailable(_))
    ));
}

#[test]
fn mapper_handles_pre_epoch_times() {
    let range = TimeRange::new(-2_000.0, -1_000.0).expect("valid range");
    let mapper = TimeMapper::new(range, 100.0).expect("valid mapper");
    assert_eq!(mapper.time_to_pixel(Some(-1_500.0)), Some(50.0));
    assert_eq!(mapper.pixel_to_time(25.0), -1_750.0);
}

#[test]
fn time_range_pads_five_percent_of_extent_per_side() {
    let range = TimeRange::from_times([100.0, 0.0, 40.0], TimeRangeTuning::default())
        .expect("non-empty input");
    assert_relative_eq!(range.min(), -5.0);
    assert_relative_eq!(range.max(), 105.0);
    assert_relative_eq!(range.span(), 110.0);
}

#[test]
fn single_timestamp_gets_half_a_day_on_each_side() {
    let t = 1_600_000_000_000.0;
    let range = TimeRange::from_times([t, t], TimeRangeTuning::default())
        .expect("non-empty input");
    assert_eq!(range.min(), t - 43_200_000.0);
    assert_eq!(range.max(), t + 43_200_000.0);
}

#[test]
fn empty_input_has_no_time_range() {
    let result = TimeRange::from_times(std::iter::empty(), TimeRangeTuning::default());
    assert!(matches!(result, Err(ChartError::EmptyData)));
}

#[test]
fn non_finite_samples_are_rejected() {
    let result = TimeRange::from_times([1.0, f64::NAN], TimeRangeTuning::default());
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn time_range_new_orders_bounds() {
    let range = TimeRange::new(10.0, -10.0).expect("valid range");
    assert_eq!((range.min(), range.max()), (-10.0, 10.0));
    assert!(range.contains(0.0));
    assert!(!range.contains(11.0));
}

#[test]
fn padding_derives_drawable_width_and_pointer_area() {
    let padding = CanvasPadding {
        left: 20.0,
        right: 10.0,
        ..CanvasPadding::default()
    };
    let viewport = Viewport::new(230, 100);

    assert_eq!(padding.drawable_width(viewport), 200.0);
    assert_eq!(padding.drawable_area(viewport), DrawableArea::new(20.0, 220.0));
    assert_eq!(padding.drawable_width(Viewport::new(10, 100)), 0.0);
    assert_eq!(padding.drawable_height(viewport), 100.0 - 27.0 - 18.0 - 13.0);
}

#[test]
fn negative_padding_is_rejected() {
    let padding = CanvasPadding {
        bottom: -1.0,
        ..CanvasPadding::default()
    };
    assert!(matches!(
        padding.validate(),
        Err(ChartError::InvalidConfig(_))
    ));
}
