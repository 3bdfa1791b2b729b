use super::*;
use crate::animation::clock::ManualClock;
use crate::animation::driver::MountOptions;
use crate::animation::extract::compute_metadata;
use crate::animation::options::AnimationOptions;

const THREE_STROKES: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40">
  <path d="M0 0 h10"/><path d="M0 10 h20"/><path d="M0 20 h5"/>
  <text>1</text><text>2</text><text>3</text>
</svg>"#;

fn options() -> AnimationOptions {
    AnimationOptions {
        draw_duration_ms: 1000.0,
        ..AnimationOptions::default()
    }
}

fn metas() -> Vec<StrokeMeta> {
    compute_metadata(&[10.0, 20.0, 5.0], &options()).metas().to_vec()
}

fn mounted() -> (Driver<ManualClock>, ManualClock, Transport) {
    let clock = ManualClock::at(0.0);
    let mut driver = Driver::with_clock(clock.clone());
    driver
        .mount(
            CanvasId::MAIN,
            THREE_STROKES,
            &MountOptions {
                autoplay: false,
                animation: options(),
            },
        )
        .unwrap();
    let transport = Transport::new(CanvasId::MAIN).with_play_options(options().into());
    (driver, clock, transport)
}

fn unit(driver: &Driver<ManualClock>) -> f64 {
    driver.state(CanvasId::MAIN).unwrap().current_unit()
}

#[test]
fn stepping_forward_from_inside_a_stroke_lands_on_the_next_start() {
    let m = metas();
    assert_eq!(step_forward_target(&m, 12.0, 35.0), Some(30.0));
    assert_eq!(step_forward_target(&m, 0.0, 35.0), Some(10.0));
    assert_eq!(step_forward_target(&m, 31.0, 35.0), Some(35.0));
    assert_eq!(step_forward_target(&m, 35.0, 35.0), None);
}

#[test]
fn stepping_backward_targets_the_previous_stroke() {
    let m = metas();
    assert_eq!(step_backward_target(&m, 12.0), Some(0.0));
    assert_eq!(step_backward_target(&m, 31.0), Some(10.0));
    assert_eq!(step_backward_target(&m, 5.0), None);
    assert_eq!(step_backward_target(&m, 0.0), None);
    // At the very end no window contains the position.
    assert_eq!(step_backward_target(&m, 35.0), Some(30.0));
}

#[test]
fn step_enablement() {
    let m = metas();
    assert!(!can_step_backward(&m, 0.0));
    assert!(!can_step_backward(&m, 5.0));
    assert!(can_step_backward(&m, 12.0));
    assert!(can_step_backward(&m, 35.0));
    assert!(!can_step_backward(&[], 3.0));

    assert!(can_step_forward(&m, 34.9, 35.0));
    assert!(!can_step_forward(&m, 35.0, 35.0));
    assert!(!can_step_forward(&[], 0.0, 0.0));
}

#[test]
fn mounted_glyph_shows_as_complete() {
    let (driver, _clock, transport) = mounted();
    let view = transport.view(&driver).unwrap();
    assert!(view.enabled);
    assert!(view.is_complete);
    assert!(!view.has_progress);
    assert!(!view.can_step_forward);
    assert!(view.can_step_backward);
}

#[test]
fn buttons_seek_through_the_driver() {
    let (mut driver, _clock, transport) = mounted();
    transport.skip_to_start(&mut driver);
    assert_eq!(unit(&driver), 0.0);

    driver.seek(CanvasId::MAIN, 12.0);
    assert_eq!(transport.step_forward(&mut driver), Some(30.0));
    assert_eq!(unit(&driver), 30.0);
    assert_eq!(transport.step_forward(&mut driver), Some(35.0));
    assert_eq!(unit(&driver), 35.0);
    assert_eq!(transport.step_forward(&mut driver), None);

    assert_eq!(transport.step_backward(&mut driver), Some(30.0));
    assert_eq!(transport.step_backward(&mut driver), Some(10.0));
    assert_eq!(transport.step_backward(&mut driver), Some(0.0));
    assert_eq!(transport.step_backward(&mut driver), None);

    transport.skip_to_end(&mut driver);
    assert_eq!(unit(&driver), 35.0);
}

#[test]
fn toggle_play_cycles_play_pause_resume() {
    let (mut driver, clock, transport) = mounted();
    transport.toggle_play(&mut driver);
    assert!(transport.view(&driver).unwrap().is_animating);

    clock.set(300.0);
    transport.toggle_play(&mut driver);
    let view = transport.view(&driver).unwrap();
    assert!(!view.is_animating);
    assert!(view.has_progress);
    assert!((unit(&driver) - 6.0).abs() < 1e-9);

    clock.set(1000.0);
    transport.toggle_play(&mut driver);
    assert!(transport.view(&driver).unwrap().is_animating);
    driver.on_frame(1200.0);
    assert!((unit(&driver) - 10.0).abs() < 1e-9);
}

#[test]
fn sub_unit_progress_restarts_instead_of_resuming() {
    let (mut driver, clock, transport) = mounted();
    driver.seek(CanvasId::MAIN, 0.4);
    clock.set(50.0);
    transport.toggle_play(&mut driver);
    let state = driver.state(CanvasId::MAIN).unwrap();
    assert!(state.is_animating());
    assert_eq!(state.current_unit(), 0.0);
}

#[test]
fn detached_canvas_disables_the_row() {
    let (mut driver, _clock, transport) = mounted();
    driver.unmount(CanvasId::MAIN);
    let view = transport.view(&driver).unwrap();
    assert!(!view.enabled);
    assert!(!view.can_step_backward);
    transport.toggle_play(&mut driver);
    assert_eq!(transport.step_forward(&mut driver), None);
    assert!(Transport::new(CanvasId(3)).view(&driver).is_none());
}

#[test]
fn default_transport_drives_the_main_canvas() {
    let (mut driver, _clock, _) = mounted();
    let transport = Transport::default();
    assert_eq!(transport.canvas(), CanvasId::MAIN);
    transport.skip_to_start(&mut driver);
    assert_eq!(unit(&driver), 0.0);
}
