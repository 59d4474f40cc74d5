use super::*;

#[test]
fn defaults_match_fresh_load() {
    let p = CompositeParams::default();
    assert_eq!(p.fill_mode, FillMode::Blur);
    assert_eq!(p.blur_radius_px, 20);
    assert_eq!(p.scale_percent, 100);
}

#[test]
fn clamp_input_parses_leading_integer() {
    assert_eq!(clamp_input("12", 0, 50), 12);
    assert_eq!(clamp_input("  12px", 0, 50), 12);
    assert_eq!(clamp_input("3.9", 0, 50), 3);
    assert_eq!(clamp_input("+7", 0, 50), 7);
    assert_eq!(clamp_input("1e3", 0, 50), 1);
}

#[test]
fn clamp_input_unparseable_falls_back_to_min() {
    assert_eq!(clamp_input("", 10, 100), 10);
    assert_eq!(clamp_input("abc", 10, 100), 10);
    assert_eq!(clamp_input("-", 10, 100), 10);
    assert_eq!(clamp_input(" . 5", 0, 50), 0);
}

#[test]
fn clamp_input_clamps_out_of_range() {
    assert_eq!(clamp_input("-5", 0, 50), 0);
    assert_eq!(clamp_input("51", 0, 50), 50);
    assert_eq!(clamp_input("5", 10, 100), 10);
    assert_eq!(clamp_input("99999999999999999999999", 10, 100), 100);
    assert_eq!(clamp_input("-99999999999999999999999", 10, 100), 10);
}

#[test]
fn clamp_value_truncates_and_handles_nan() {
    assert_eq!(clamp_value(42.9, 0, 50), 42);
    assert_eq!(clamp_value(-0.5, 0, 50), 0);
    assert_eq!(clamp_value(f64::NAN, 10, 100), 10);
    assert_eq!(clamp_value(f64::INFINITY, 10, 100), 100);
    assert_eq!(clamp_value(f64::NEG_INFINITY, 10, 100), 10);
}

#[test]
fn clamp_is_idempotent_and_in_range() {
    let inputs = [
        "", "0", "-1", "10", "55", "100", "101", "x9", "9x", "  -3", "+250", "50.5",
    ];
    for (min, max) in [(0, 50), (10, 100)] {
        for raw in inputs {
            let once = clamp_input(raw, min, max);
            assert!((min..=max).contains(&once), "{raw:?} -> {once}");
            assert_eq!(clamp_input(&once.to_string(), min, max), once);
        }
        for v in [-1e9, -1.0, 0.0, 12.5, 49.99, 1e9, f64::NAN] {
            let once = clamp_value(v, min, max);
            assert!((min..=max).contains(&once));
            assert_eq!(clamp_value(f64::from(once), min, max), once);
        }
    }
}

#[test]
fn sanitized_clamps_every_field() {
    let p = CompositeParams {
        fill_mode: FillMode::White,
        blur_radius_px: -4,
        scale_percent: 250,
    }
    .sanitized();
    assert_eq!(p.fill_mode, FillMode::White);
    assert_eq!(p.blur_radius_px, 0);
    assert_eq!(p.scale_percent, 100);

    let p = CompositeParams {
        blur_radius_px: 500,
        scale_percent: 0,
        ..CompositeParams::default()
    }
    .sanitized();
    assert_eq!(p.blur_radius_px, 50);
    assert_eq!(p.scale_percent, 10);
}

#[test]
fn blurred_background_needs_blur_mode_and_radius() {
    let mut p = CompositeParams::default();
    assert!(p.draws_blurred_background());
    p.blur_radius_px = 0;
    assert!(!p.draws_blurred_background());
    p.blur_radius_px = 10;
    p.fill_mode = FillMode::Black;
    assert!(!p.draws_blurred_background());
}

#[test]
fn fill_mode_serializes_lowercase() {
    for mode in FillMode::ALL {
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, format!("\"{}\"", mode.as_str()));
    }
    let p: CompositeParams =
        serde_json::from_str(r#"{ "fill_mode": "transparent", "scale_percent": 40 }"#).unwrap();
    assert_eq!(p.fill_mode, FillMode::Transparent);
    assert_eq!(p.blur_radius_px, DEFAULT_BLUR_RADIUS_PX);
    assert_eq!(p.scale_percent, 40);
}
