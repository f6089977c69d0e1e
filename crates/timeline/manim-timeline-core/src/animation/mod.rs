//! Animations: time-parameterised mutations of a single mobject.
//!
//! Every animation owns an [`AnimationCore`] and implements
//! [`Animation::interpolate`]. The lifecycle (`begin`, `update`, `finish`,
//! `reset`) is shared through default methods so concrete animations only
//! override what they need.

pub mod base;
pub mod fade;
pub mod movement;
pub mod transform;
pub mod wait;

pub use base::*;
pub use fade::*;
pub use movement::*;
pub use transform::*;
pub use wait::*;

use crate::mobject::MobjectRef;
use crate::RateFunction;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// Shared handle to an animation; timelines and speed wrappers alias the
/// same instance.
pub type AnimationRef = Rc<RefCell<dyn Animation>>;

pub trait Animation: fmt::Debug {
    fn core(&self) -> &AnimationCore;

    fn core_mut(&mut self) -> &mut AnimationCore;

    /// Apply the animation at `alpha`, already remapped by the rate function.
    /// Must tolerate alpha slightly outside `[0, 1]`.
    fn interpolate(&mut self, alpha: f64);

    fn name(&self) -> &'static str {
        "Animation"
    }

    /// Capture the pre-animation snapshot (if absent) and mark begun.
    fn begin(&mut self) {
        self.core_mut().begin();
    }

    fn finish(&mut self) {
        self.core_mut().finish();
    }

    /// Restore the target to its pre-`begin` state and clear run state.
    fn reset(&mut self) {
        self.core_mut().reset();
    }

    /// Advance to `current_time` (timeline seconds).
    fn update(&mut self, _dt: f64, current_time: f64) {
        if !self.has_begun() {
            self.begin();
        }
        let core = self.core_mut();
        let start = core.latch_start_time(current_time);
        let raw = core.raw_progress(current_time - start);
        let alpha = core.rate_function().apply(raw);
        trace!(animation = self.name(), raw, alpha, "update");

        self.interpolate(alpha);
        if raw >= 1.0 && !self.is_finished() {
            self.finish();
        }
    }

    /// The mobject whose appearance this animation controls.
    fn target(&self) -> MobjectRef {
        self.core().mobject().clone()
    }

    #[inline]
    fn duration(&self) -> f64 {
        self.core().duration()
    }

    #[inline]
    fn rate_function(&self) -> &RateFunction {
        self.core().rate_function()
    }

    #[inline]
    fn start_time(&self) -> Option<f64> {
        self.core().start_time()
    }

    #[inline]
    fn set_start_time(&mut self, start_time: Option<f64>) {
        self.core_mut().set_start_time(start_time);
    }

    #[inline]
    fn is_finished(&self) -> bool {
        self.core().is_finished()
    }

    #[inline]
    fn has_begun(&self) -> bool {
        self.core().has_begun()
    }

    #[inline]
    fn is_remover(&self) -> bool {
        self.core().is_remover()
    }

    fn with_duration(mut self, duration: f64) -> Self
    where
        Self: Sized,
    {
        self.core_mut().set_duration(duration.max(0.0));
        self
    }

    fn with_rate_function(mut self, rate_function: RateFunction) -> Self
    where
        Self: Sized,
    {
        self.core_mut().set_rate_function(rate_function);
        self
    }

    /// Wrap in a shared handle for scheduling.
    fn into_ref(self) -> AnimationRef
    where
        Self: Sized + 'static,
    {
        Rc::new(RefCell::new(self))
    }
}
