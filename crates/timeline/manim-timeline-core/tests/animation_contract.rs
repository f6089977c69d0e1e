use approx::assert_abs_diff_eq;
use manim_timeline_core::{
    shared, Animation, AnimationCore, ChangeSpeed, Color, FadeToColor, MobjectRef,
    Placeholder, RateFunction, ScaleBy, Shift, SnapshotSource, TimelineConfig, Transform, VMobject,
    Vec3,
};
use std::cell::RefCell;
use std::rc::Rc;

fn init_tracing() {
    let default_filter = "manim_timeline_core=debug";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Records every alpha it is interpolated with.
#[derive(Debug)]
struct Recorder {
    core: AnimationCore,
    alphas: Rc<RefCell<Vec<f64>>>,
}

impl Recorder {
    fn new(mobject: MobjectRef, duration: f64) -> (Self, Rc<RefCell<Vec<f64>>>) {
        let alphas = Rc::new(RefCell::new(Vec::new()));
        let recorder = Self {
            core: AnimationCore::new(mobject, duration, RateFunction::Linear),
            alphas: alphas.clone(),
        };
        (recorder, alphas)
    }
}

impl Animation for Recorder {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn interpolate(&mut self, alpha: f64) {
        self.alphas.borrow_mut().push(alpha);
    }
}

#[test]
fn test_monotonic_progress() {
    init_tracing();
    let (mut recorder, alphas) = Recorder::new(shared(Placeholder::new()), 4.0);
    recorder.update(0.0, 10.0);
    recorder.update(2.0, 12.0);
    assert_eq!(recorder.start_time(), Some(10.0));
    assert_eq!(*alphas.borrow(), vec![0.0, 0.5]);
    assert!(!recorder.is_finished());

    recorder.update(3.0, 15.0);
    assert_eq!(alphas.borrow().last(), Some(&1.0));
    assert!(recorder.is_finished());
}

#[test]
fn test_zero_duration_completes_immediately() {
    init_tracing();
    let (mut recorder, alphas) = Recorder::new(shared(Placeholder::new()), 0.0);
    recorder.update(0.0, 3.0);
    assert_eq!(*alphas.borrow(), vec![1.0]);
    assert!(recorder.is_finished());
}

#[test]
fn test_reset_reverses_every_tracked_field() {
    init_tracing();
    let square = shared(
        VMobject::square(2.0)
            .with_color(Color::BLACK)
            .with_fill_opacity(0.5)
            .at(Vec3::new(1.0, 1.0, 0.0)),
    );
    let original = square.borrow().state().clone();
    let target = shared(VMobject::circle(3.0, 12).with_opacity(0.2));

    let animations = vec![
        Shift::new(square.clone(), Vec3::new(5.0, 0.0, 0.0)).into_ref(),
        ScaleBy::new(square.clone(), 4.0).into_ref(),
        FadeToColor::new(square.clone(), Color::WHITE).into_ref(),
        Transform::new(square.clone(), target).into_ref(),
    ];
    for animation in &animations {
        let mut animation = animation.borrow_mut();
        animation.begin();
        animation.interpolate(0.7);

        animation.reset();
        assert_eq!(square.borrow().state(), &original, "{}", animation.name());
        let borrowed = square.borrow();
        let points = borrowed.as_drawable().map(|d| d.points().len());
        assert_eq!(points, Some(4), "{}", animation.name());
    }
}

#[test]
fn test_uncopyable_mobject_uses_fallback_snapshot() {
    init_tracing();
    let placeholder = shared(Placeholder::new());
    placeholder.borrow_mut().state_mut().opacity = 0.4;
    let mut shift = Shift::new(placeholder.clone(), Vec3::new(1.0, 0.0, 0.0));
    shift.begin();
    assert_eq!(
        shift.core().snapshot().map(|s| s.source),
        Some(SnapshotSource::Fallback)
    );

    shift.interpolate(1.0);
    placeholder.borrow_mut().state_mut().opacity = 0.9;
    shift.reset();
    assert_eq!(placeholder.borrow().position(), Vec3::zeros());
    assert_abs_diff_eq!(placeholder.borrow().opacity(), 0.4);
}

#[test]
fn test_change_speed_unit_speed_round_trip() {
    init_tracing();
    let (recorder, alphas) = Recorder::new(shared(Placeholder::new()), 1.0);
    let mut wrapper = ChangeSpeed::new(recorder.into_ref(), |_| 1.0);
    assert_abs_diff_eq!(wrapper.duration(), 1.0, epsilon = 1e-12);

    for alpha in [0.0, 0.5, 1.0] {
        wrapper.interpolate(alpha);
        let received = alphas.borrow().last().copied();
        assert_abs_diff_eq!(received.unwrap_or(f64::NAN), alpha, epsilon = 1e-9);
    }
}

#[test]
fn test_change_speed_respects_config_resolution() {
    init_tracing();
    let config = TimelineConfig::preview();
    let (recorder, _) = Recorder::new(shared(Placeholder::new()), 2.0);
    let wrapper = ChangeSpeed::with_options(
        recorder.into_ref(),
        |t| 1.0 + t,
        manim_timeline_core::ChangeSpeedOptions::from_config(&config),
    );
    assert_eq!(wrapper.profile().samples(), 64);
    // 2 * ln(2) for speed 1 + t
    assert_abs_diff_eq!(wrapper.duration(), 2.0 * 2f64.ln(), epsilon = 1e-3);
}
