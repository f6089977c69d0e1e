//! Non-uniform time remapping for animations.
//!
//! [`ChangeSpeed`] wraps another animation and plays it with a
//! progress-dependent speed multiplier. The wall-clock duration is the inner
//! duration times `∫₀¹ 1 / speed(t) dt`; the integral is tabulated once with the
//! trapezoid rule and inverted per frame by binary search.

use crate::animation::{Animation, AnimationCore, AnimationRef};
use crate::config::{DEFAULT_SPEED_EPSILON, DEFAULT_SPEED_SAMPLES};
use crate::mobject::{shared, MobjectRef, Placeholder};
use crate::{RateFunction, TimelineConfig};
use tracing::{debug, warn};

/// Cumulative table of `∫ 1 / max(speed, ε)` over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedProfile {
    cumulative: Vec<f64>,
    total: f64,
}

impl SpeedProfile {
    /// Integrate `1 / max(speed(t), epsilon)` over `samples` equal intervals.
    pub fn integrate(speed: impl Fn(f64) -> f64, samples: usize, epsilon: f64) -> Self {
        let samples = samples.max(1);
        let step = 1.0 / samples as f64;
        let inverse = |t: f64| {
            let s = speed(t);
            if !s.is_finite() {
                warn!(t, speed = s, "non-finite speed sample");
            }
            1.0 / s.max(epsilon)
        };

        // Sum in units of `step` and divide once, so constant speeds give
        // exact totals.
        let count = samples as f64;
        let mut cumulative = Vec::with_capacity(samples + 1);
        cumulative.push(0.0);
        let mut previous = inverse(0.0);
        let mut sum = 0.0;
        for i in 1..=samples {
            let current = inverse(i as f64 * step);
            sum += (previous + current) / 2.0;
            cumulative.push(sum / count);
            previous = current;
        }

        Self {
            cumulative,
            total: sum / count,
        }
    }

    /// Value of the full integral; the duration multiplier.
    #[inline]
    pub fn total(&self) -> f64 {
        self.total
    }

    #[inline]
    pub fn samples(&self) -> usize {
        self.cumulative.len() - 1
    }

    /// Map wall-clock progress `alpha` to the inner animation's progress.
    pub fn invert(&self, alpha: f64) -> f64 {
        let alpha = alpha.clamp(0.0, 1.0);
        if self.total <= 0.0 {
            return alpha;
        }
        let target = alpha * self.total;
        let samples = self.samples() as f64;

        match self.cumulative.binary_search_by(|c| c.total_cmp(&target)) {
            Ok(index) => index as f64 / samples,
            Err(0) => 0.0,
            Err(index) if index >= self.cumulative.len() => 1.0,
            Err(index) => {
                let lo = self.cumulative[index - 1];
                let hi = self.cumulative[index];
                let frac = if hi > lo { (target - lo) / (hi - lo) } else { 0.0 };
                ((index - 1) as f64 + frac) / samples
            }
        }
    }

    /// Forward mapping: fraction of wall-clock time elapsed once the inner
    /// animation reaches progress `t`.
    pub fn progress_at(&self, t: f64) -> f64 {
        if self.total <= 0.0 {
            return t.clamp(0.0, 1.0);
        }
        let position = t.clamp(0.0, 1.0) * self.samples() as f64;
        let lo = (position.floor() as usize).min(self.samples() - 1);
        let frac = position - lo as f64;
        let value = self.cumulative[lo] + (self.cumulative[lo + 1] - self.cumulative[lo]) * frac;
        value / self.total
    }
}

/// Knobs for [`ChangeSpeed::with_options`].
#[derive(Debug, Clone)]
pub struct ChangeSpeedOptions {
    /// Rate function applied on top of the remapped time
    pub rate_function: RateFunction,
    pub samples: usize,
    pub epsilon: f64,
    /// Mobject the wrapper itself is bound to; a fresh [`Placeholder`] if unset
    pub sentinel: Option<MobjectRef>,
}

impl Default for ChangeSpeedOptions {
    fn default() -> Self {
        Self {
            rate_function: RateFunction::Linear,
            samples: DEFAULT_SPEED_SAMPLES,
            epsilon: DEFAULT_SPEED_EPSILON,
            sentinel: None,
        }
    }
}

impl ChangeSpeedOptions {
    pub fn from_config(config: &TimelineConfig) -> Self {
        Self {
            samples: config.speed_samples,
            epsilon: config.speed_epsilon,
            ..Self::default()
        }
    }

    pub fn with_sentinel(mut self, sentinel: MobjectRef) -> Self {
        self.sentinel = Some(sentinel);
        self
    }
}

/// Plays an inner animation with a speed multiplier that varies with progress.
#[derive(Debug)]
pub struct ChangeSpeed {
    core: AnimationCore,
    inner: AnimationRef,
    profile: SpeedProfile,
}

impl ChangeSpeed {
    pub fn new(inner: AnimationRef, speed: impl Fn(f64) -> f64) -> Self {
        Self::with_options(inner, speed, ChangeSpeedOptions::default())
    }

    pub fn with_options(
        inner: AnimationRef,
        speed: impl Fn(f64) -> f64,
        options: ChangeSpeedOptions,
    ) -> Self {
        let profile = SpeedProfile::integrate(speed, options.samples, options.epsilon);
        let (inner_name, inner_duration) = {
            let inner = inner.borrow();
            (inner.name(), inner.duration())
        };
        let duration = inner_duration * profile.total();
        debug!(
            inner = inner_name,
            inner_duration,
            duration,
            "integrated speed profile"
        );

        let sentinel = options
            .sentinel
            .unwrap_or_else(|| shared(Placeholder::new()));
        Self {
            core: AnimationCore::new(sentinel, duration, options.rate_function),
            inner,
            profile,
        }
    }

    pub fn inner(&self) -> &AnimationRef {
        &self.inner
    }

    pub fn profile(&self) -> &SpeedProfile {
        &self.profile
    }
}

impl Animation for ChangeSpeed {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "ChangeSpeed"
    }

    fn begin(&mut self) {
        self.core.begin();
        self.inner.borrow_mut().begin();
    }

    fn interpolate(&mut self, alpha: f64) {
        let t = self.profile.invert(alpha);
        let mut inner = self.inner.borrow_mut();
        let inner_alpha = inner.rate_function().apply(t);
        inner.interpolate(inner_alpha);
    }

    fn finish(&mut self) {
        self.inner.borrow_mut().finish();
        self.core.finish();
    }

    fn reset(&mut self) {
        self.core.reset();
        self.inner.borrow_mut().reset();
    }

    fn target(&self) -> MobjectRef {
        self.inner.borrow().target()
    }
}
