use std::time::Duration;

use detection_timeline::core::{CanvasPadding, Viewport};
use detection_timeline::render::{Color, NullRenderer};
use detection_timeline::{ChartError, ChartWidget, ChartWidgetConfig};

#[test]
fn defaults_match_chart_layout() {
    let config = ChartWidgetConfig::default();
    assert_eq!(config.padding, CanvasPadding::default());
    assert_eq!(config.padding.left, 18.0);
    assert_eq!(config.grid_lines_count, 3);
    assert_eq!(config.bar_width_px, 5.0);
    assert_eq!(config.resize_debounce(), Duration::from_millis(100));
    assert_eq!(config.seed_categories, vec!["user", "resource", "cluster"]);
    assert_eq!(config.labels.time_format, "%b %d %H:%M");
    assert_eq!(
        config.style.bar_color("user"),
        Color::rgb8(161, 119, 255)
    );
    assert_eq!(
        config.style.bar_color("unknown"),
        config.style.fallback_bar_color
    );
}

#[test]
fn empty_json_object_yields_defaults() {
    let config = ChartWidgetConfig::from_json_str("{}").expect("defaults parse");
    assert_eq!(config, ChartWidgetConfig::default());
}

#[test]
fn json_roundtrip_preserves_overrides() {
    let config = ChartWidgetConfig::new(Viewport::new(800, 160))
        .with_grid_lines_count(4)
        .with_bar_width_px(3.0)
        .with_resize_debounce(Duration::from_millis(250))
        .with_seed_categories(["user", "service"])
        .with_labels_visible(false);

    let json = config.to_json_pretty().expect("serializes");
    let restored = ChartWidgetConfig::from_json_str(&json).expect("parses");
    assert_eq!(restored, config);
}

#[test]
fn partial_json_overrides_selected_fields() {
    let config = ChartWidgetConfig::from_json_str(
        r#"{ "viewport": { "width": 300, "height": 90 }, "bar_width_px": 8.0 }"#,
    )
    .expect("parses");
    assert_eq!(config.viewport, Viewport::new(300, 90));
    assert_eq!(config.bar_width_px, 8.0);
    assert_eq!(config.grid_lines_count, 3);
}

#[test]
fn invalid_settings_are_rejected() {
    for json in [
        r#"{ "grid_lines_count": 0 }"#,
        r#"{ "bar_width_px": -1.0 }"#,
        r#"{ "seed_categories": ["user", " "] }"#,
        r#"{ "labels": { "visible": true, "time_label_width_px": 70.0, "time_label_gap_px": 25.0, "time_label_font_size_px": 10.0, "count_label_font_size_px": 12.0, "time_format": "" } }"#,
        "not json",
    ] {
        assert!(
            matches!(
                ChartWidgetConfig::from_json_str(json),
                Err(ChartError::InvalidConfig(_))
            ),
            "expected rejection for {json}"
        );
    }
}

#[test]
fn widget_refuses_invalid_config() {
    let config = ChartWidgetConfig::default().with_bar_width_px(f64::NAN);
    assert!(ChartWidget::new(NullRenderer::default(), config).is_err());
}
