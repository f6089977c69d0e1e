//! Transform-field animations: translation, rotation and scale.
//!
//! Each captures the field's value at `begin` and interpolates absolutely from
//! it, so replaying from a reset always lands on the same state.

use super::{Animation, AnimationCore};
use crate::mobject::{MobjectRef, Vec3};

/// Translate by a fixed offset.
#[derive(Debug)]
pub struct Shift {
    core: AnimationCore,
    offset: Vec3,
    start: Vec3,
}

impl Shift {
    pub fn new(mobject: MobjectRef, offset: Vec3) -> Self {
        Self {
            core: AnimationCore::for_mobject(mobject),
            offset,
            start: Vec3::zeros(),
        }
    }
}

impl Animation for Shift {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "Shift"
    }

    fn begin(&mut self) {
        if self.core.begin() {
            self.start = self.core.mobject().borrow().position();
        }
    }

    fn interpolate(&mut self, alpha: f64) {
        let mut mobject = self.core.mobject().borrow_mut();
        mobject.state_mut().position = self.start + self.offset * alpha;
        mobject.mark_dirty();
    }
}

/// Move to an absolute position.
#[derive(Debug)]
pub struct MoveTo {
    core: AnimationCore,
    destination: Vec3,
    start: Vec3,
}

impl MoveTo {
    pub fn new(mobject: MobjectRef, destination: Vec3) -> Self {
        Self {
            core: AnimationCore::for_mobject(mobject),
            destination,
            start: Vec3::zeros(),
        }
    }
}

impl Animation for MoveTo {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "MoveTo"
    }

    fn begin(&mut self) {
        if self.core.begin() {
            self.start = self.core.mobject().borrow().position();
        }
    }

    fn interpolate(&mut self, alpha: f64) {
        let mut mobject = self.core.mobject().borrow_mut();
        mobject.state_mut().position = self.start.lerp(&self.destination, alpha);
        mobject.mark_dirty();
    }
}

/// Rotate by `angle` radians about `axis`, added to the Euler rotation.
#[derive(Debug)]
pub struct Rotate {
    core: AnimationCore,
    angle: f64,
    axis: Vec3,
    start: Vec3,
}

impl Rotate {
    /// Rotation about the z axis.
    pub fn new(mobject: MobjectRef, angle: f64) -> Self {
        Self::about_axis(mobject, angle, Vec3::z())
    }

    /// Rotation about an arbitrary axis. A zero axis falls back to z.
    pub fn about_axis(mobject: MobjectRef, angle: f64, axis: Vec3) -> Self {
        let axis = axis.try_normalize(f64::EPSILON).unwrap_or_else(Vec3::z);
        Self {
            core: AnimationCore::for_mobject(mobject),
            angle,
            axis,
            start: Vec3::zeros(),
        }
    }
}

impl Animation for Rotate {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "Rotate"
    }

    fn begin(&mut self) {
        if self.core.begin() {
            self.start = self.core.mobject().borrow().state().rotation;
        }
    }

    fn interpolate(&mut self, alpha: f64) {
        let mut mobject = self.core.mobject().borrow_mut();
        mobject.state_mut().rotation = self.start + self.axis * (self.angle * alpha);
        mobject.mark_dirty();
    }
}

/// Scale uniformly by `factor`.
#[derive(Debug)]
pub struct ScaleBy {
    core: AnimationCore,
    factor: f64,
    start: Vec3,
}

impl ScaleBy {
    pub fn new(mobject: MobjectRef, factor: f64) -> Self {
        Self {
            core: AnimationCore::for_mobject(mobject),
            factor,
            start: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Animation for ScaleBy {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "ScaleBy"
    }

    fn begin(&mut self) {
        if self.core.begin() {
            self.start = self.core.mobject().borrow().state().scale;
        }
    }

    fn interpolate(&mut self, alpha: f64) {
        let multiplier = 1.0 + (self.factor - 1.0) * alpha;
        let mut mobject = self.core.mobject().borrow_mut();
        mobject.state_mut().scale = self.start * multiplier;
        mobject.mark_dirty();
    }
}
