use std::time::Duration;

use super::*;

fn loaded(w: u32, h: u32, name: &str) -> LoadedImage {
    LoadedImage {
        source: SourceImage::from_premul_rgba8(w, h, [30, 60, 90, 255].repeat((w * h) as usize))
            .unwrap(),
        file_name: Some(name.to_string()),
    }
}

fn ready_session() -> Session {
    let mut s = Session::default();
    s.finish_load(Ok(loaded(8, 4, "wide.png"))).unwrap();
    s
}

#[test]
fn fresh_session_only_allows_file_input() {
    let s = Session::default();
    assert!(!s.has_image());
    assert_eq!(
        s.controls(),
        ControlStates {
            file_input: true,
            ..ControlStates::default()
        }
    );
}

#[test]
fn loading_disables_everything() {
    let mut s = ready_session();
    s.begin_load();
    assert_eq!(s.controls(), ControlStates::default());
    s.finish_load(Ok(loaded(2, 2, "b.png"))).unwrap();
    assert!(s.controls().export);
}

#[test]
fn load_composites_immediately_with_defaults() {
    let s = ready_session();
    assert_eq!(s.render_count(), 1);
    assert_eq!(s.params(), CompositeParams::default());
    assert_eq!(s.surface().map(CanvasSurface::side), Some(8));
    assert_eq!(s.file_name(), Some("wide.png"));
}

#[test]
fn blur_controls_follow_fill_mode() {
    let mut s = ready_session();
    let now = Instant::now();
    assert!(s.controls().blur);
    s.handle(ControlEvent::FillMode(FillMode::White), now).unwrap();
    let c = s.controls();
    assert!(!c.blur);
    assert!(c.scale && c.reset && c.export && c.fill_mode && c.file_input);
}

#[test]
fn slider_burst_renders_once_after_quiet_window() {
    let mut s = ready_session();
    let t0 = Instant::now();
    for (i, v) in [21, 25, 30, 34].into_iter().enumerate() {
        s.handle(
            ControlEvent::BlurSlider(v),
            t0 + Duration::from_millis(10 * i as u64),
        )
        .unwrap();
    }
    assert_eq!(s.render_count(), 1);
    assert_eq!(s.blur_control().field(), 34);

    assert!(!s.tick(t0 + Duration::from_millis(60)).unwrap());
    assert!(s.tick(t0 + Duration::from_millis(80)).unwrap());
    assert_eq!(s.render_count(), 2);
    assert!(!s.tick(t0 + Duration::from_millis(500)).unwrap());
    assert_eq!(s.render_count(), 2);
}

#[test]
fn commit_renders_now_and_supersedes_pending() {
    let mut s = ready_session();
    let t0 = Instant::now();
    s.handle(ControlEvent::ScaleField("4".into()), t0).unwrap();
    assert_eq!(s.scale_control().value(), 10);
    assert!(s.has_pending_recompute());

    s.handle(ControlEvent::ScaleCommit("60".into()), t0).unwrap();
    assert_eq!(s.render_count(), 2);
    assert!(!s.has_pending_recompute());
    assert_eq!(s.params().scale_percent, 60);
    assert!(!s.tick(t0 + Duration::from_secs(1)).unwrap());
}

#[test]
fn flush_forces_pending_recompute() {
    let mut s = ready_session();
    s.handle(ControlEvent::BlurField("12".into()), Instant::now())
        .unwrap();
    assert!(s.flush().unwrap());
    assert!(!s.flush().unwrap());
    assert_eq!(s.render_count(), 2);
    assert_eq!(s.params().blur_radius_px, 12);
}

#[test]
fn reset_restores_defaults() {
    let mut s = ready_session();
    let now = Instant::now();
    s.handle(ControlEvent::FillMode(FillMode::Transparent), now)
        .unwrap();
    s.handle(ControlEvent::BlurCommit("3".into()), now).unwrap();
    s.handle(ControlEvent::ScaleCommit("30".into()), now).unwrap();
    s.handle(ControlEvent::Reset, now).unwrap();
    assert_eq!(s.params(), CompositeParams::default());
    assert_eq!(s.blur_control().slider(), 20);
    assert_eq!(s.scale_control().field(), 100);
}

#[test]
fn new_load_resets_params_and_drops_pending_work() {
    let mut s = ready_session();
    let now = Instant::now();
    s.handle(ControlEvent::ScaleCommit("40".into()), now).unwrap();
    s.handle(ControlEvent::BlurSlider(3), now).unwrap();
    assert!(s.has_pending_recompute());

    s.finish_load(Ok(loaded(3, 9, "tall.jpg"))).unwrap();
    assert!(!s.has_pending_recompute());
    assert_eq!(s.params(), CompositeParams::default());
    assert_eq!(s.surface().map(CanvasSurface::side), Some(9));
}

#[test]
fn unsupported_file_keeps_prior_image() {
    let mut s = ready_session();
    let err = s.load_bytes(Some("notes.txt"), "text/plain", b"hello");
    assert!(matches!(err, Err(SquareError::UnsupportedFileType(_))));
    assert!(s.has_image());
    assert!(s.surface().is_some());
    assert!(s.controls().export);
    assert!(s.last_error().is_some());
}

#[test]
fn unsupported_file_without_prior_image_stays_empty() {
    let mut s = Session::default();
    let err = s.load_bytes(Some("notes.txt"), "text/plain", b"hello");
    assert!(matches!(err, Err(SquareError::UnsupportedFileType(_))));
    assert!(!s.has_image());
    assert!(s.controls().file_input);
    assert!(!s.controls().export);
}

#[test]
fn invalid_source_resets_to_empty() {
    let mut s = ready_session();
    let err = s.load_bytes(Some("broken.png"), "image/png", b"not a png");
    assert!(matches!(err, Err(SquareError::InvalidSource(_))));
    assert!(!s.has_image());
    assert!(s.surface().is_none());
    assert!(!s.controls().scale);
}

#[test]
fn events_without_image_are_ignored() {
    let mut s = Session::default();
    s.handle(ControlEvent::BlurSlider(5), Instant::now()).unwrap();
    assert!(!s.has_pending_recompute());
    assert_eq!(s.render_count(), 0);
}

#[test]
fn export_without_image_fails_gracefully() {
    let mut s = Session::default();
    let err = s.export().unwrap_err();
    assert!(matches!(err, SquareError::ExportFailure(_)));
    assert!(s.last_error().unwrap().contains("export failure"));
    assert!(!s.has_image());
}

#[test]
fn export_names_file_after_source() {
    let mut s = ready_session();
    let out = s.export().unwrap();
    assert_eq!(out.file_name, "wide-1x1.png");
    assert_eq!(&out.png[..4], b"\x89PNG");
    assert_eq!(s.render_count(), 1);
}

#[test]
fn configured_defaults_apply_on_load() {
    let cfg = SessionConfig {
        debounce_ms: 10,
        defaults: CompositeParams {
            fill_mode: FillMode::Black,
            blur_radius_px: 5,
            scale_percent: 80,
        },
    };
    let mut s = Session::new(cfg);
    s.finish_load(Ok(loaded(5, 5, "sq.png"))).unwrap();
    assert_eq!(s.params().fill_mode, FillMode::Black);
    assert_eq!(s.params().scale_percent, 80);

    let t0 = Instant::now();
    s.handle(ControlEvent::ScaleSlider(50), t0).unwrap();
    assert!(s.tick(t0 + Duration::from_millis(10)).unwrap());
}
