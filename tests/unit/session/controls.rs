use super::*;

#[test]
fn slider_and_field_stay_in_sync() {
    let mut blur = ControlPair::new(0, 50, 20);
    assert_eq!((blur.slider(), blur.field()), (20, 20));

    assert_eq!(blur.slide(35), 35);
    assert_eq!((blur.slider(), blur.field()), (35, 35));

    assert_eq!(blur.enter_field("7"), 7);
    assert_eq!((blur.slider(), blur.field()), (7, 7));
}

#[test]
fn field_text_is_validated_before_sync() {
    let mut scale = ControlPair::new(10, 100, 100);
    assert_eq!(scale.enter_field("abc"), 10);
    assert_eq!(scale.enter_field("250"), 100);
    assert_eq!(scale.enter_field("45%"), 45);
    assert_eq!(scale.value(), 45);
    assert_eq!(scale.slider(), scale.field());
}

#[test]
fn slider_and_reset_values_are_clamped() {
    let mut blur = ControlPair::new(0, 50, 20);
    assert_eq!(blur.slide(-3), 0);
    assert_eq!(blur.slide(99), 50);
    blur.reset(70);
    assert_eq!(blur.value(), 50);
}

#[test]
fn reversed_bounds_are_normalized() {
    let pair = ControlPair::new(100, 10, 5);
    assert_eq!(pair.bounds(), (10, 100));
    assert_eq!(pair.value(), 10);
}
