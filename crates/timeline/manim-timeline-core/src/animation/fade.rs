use super::{Animation, AnimationCore};
use crate::mobject::{Color, MobjectRef};

/// Fade a mobject in from zero to its opacity at construction time.
#[derive(Debug)]
pub struct FadeIn {
    core: AnimationCore,
    target_opacity: f64,
}

impl FadeIn {
    pub fn new(mobject: MobjectRef) -> Self {
        let opacity = mobject.borrow().opacity();
        let target_opacity = if opacity > 0.0 { opacity } else { 1.0 };
        Self {
            core: AnimationCore::for_mobject(mobject),
            target_opacity,
        }
    }

    fn apply(&self, opacity: f64) {
        self.core.mobject().borrow_mut().set_opacity(opacity);
    }
}

impl Animation for FadeIn {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "FadeIn"
    }

    fn interpolate(&mut self, alpha: f64) {
        self.apply(self.target_opacity * alpha.clamp(0.0, 1.0));
    }

    fn finish(&mut self) {
        self.apply(self.target_opacity);
        self.core.finish();
    }
}

/// Fade a mobject out to zero opacity. Removes the mobject when done.
#[derive(Debug)]
pub struct FadeOut {
    core: AnimationCore,
    start_opacity: f64,
}

impl FadeOut {
    pub fn new(mobject: MobjectRef) -> Self {
        Self {
            core: AnimationCore::for_mobject(mobject).with_remover(true),
            start_opacity: 1.0,
        }
    }

    fn apply(&self, opacity: f64) {
        self.core.mobject().borrow_mut().set_opacity(opacity);
    }
}

impl Animation for FadeOut {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "FadeOut"
    }

    fn begin(&mut self) {
        if self.core.begin() {
            self.start_opacity = self.core.mobject().borrow().opacity();
        }
    }

    fn interpolate(&mut self, alpha: f64) {
        self.apply(self.start_opacity * (1.0 - alpha.clamp(0.0, 1.0)));
    }

    fn finish(&mut self) {
        self.apply(0.0);
        self.core.finish();
    }
}

/// Blend the mobject's color toward a target color.
#[derive(Debug)]
pub struct FadeToColor {
    core: AnimationCore,
    color: Color,
    start_color: Color,
}

impl FadeToColor {
    pub fn new(mobject: MobjectRef, color: Color) -> Self {
        Self {
            core: AnimationCore::for_mobject(mobject),
            color,
            start_color: Color::default(),
        }
    }
}

impl Animation for FadeToColor {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "FadeToColor"
    }

    fn begin(&mut self) {
        if self.core.begin() {
            self.start_color = self.core.mobject().borrow().state().color;
        }
    }

    fn interpolate(&mut self, alpha: f64) {
        let mut mobject = self.core.mobject().borrow_mut();
        mobject.state_mut().color = self.start_color.lerp(&self.color, alpha);
        mobject.mark_dirty();
    }
}
