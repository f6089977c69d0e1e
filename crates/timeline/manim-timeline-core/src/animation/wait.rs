use super::{Animation, AnimationCore};
use crate::mobject::MobjectRef;
use crate::RateFunction;

/// Occupies time without touching anything. Bound to a sentinel mobject.
#[derive(Debug)]
pub struct Wait {
    core: AnimationCore,
}

impl Wait {
    pub fn new(sentinel: MobjectRef, duration: f64) -> Self {
        Self {
            core: AnimationCore::new(sentinel, duration.max(0.0), RateFunction::Linear),
        }
    }
}

impl Animation for Wait {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "Wait"
    }

    fn interpolate(&mut self, _alpha: f64) {}
}
