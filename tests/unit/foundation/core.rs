use super::*;

#[test]
fn premul_from_straight_scales_channels() {
    let px = Rgba8Premul::from_straight_rgba(200, 100, 50, 128);
    assert_eq!(px.a, 128);
    assert_eq!(px.r, ((200u16 * 128 + 127) / 255) as u8);
    assert_eq!(px.g, ((100u16 * 128 + 127) / 255) as u8);
    assert_eq!(px.b, ((50u16 * 128 + 127) / 255) as u8);

    assert_eq!(
        Rgba8Premul::from_straight_rgba(255, 255, 255, 255),
        Rgba8Premul::WHITE
    );
    assert_eq!(
        Rgba8Premul::from_straight_rgba(9, 9, 9, 0),
        Rgba8Premul::TRANSPARENT
    );
}

#[test]
fn rect_contains_is_half_open() {
    let r = PixelRect::new(2, 3, 4, 5);
    assert!(r.contains(2, 3));
    assert!(r.contains(5, 7));
    assert!(!r.contains(6, 3));
    assert!(!r.contains(2, 8));
    assert!(!r.contains(1, 3));
}

#[test]
fn clip_to_square_handles_negative_origin() {
    let r = PixelRect::new(-133, 0, 1067, 800);
    assert_eq!(r.clip_to_square(800), Some(PixelRect::new(0, 0, 800, 800)));

    let inside = PixelRect::new(100, 100, 200, 200);
    assert_eq!(inside.clip_to_square(400), Some(inside));

    let outside = PixelRect::new(500, 0, 10, 10);
    assert_eq!(outside.clip_to_square(400), None);
}
