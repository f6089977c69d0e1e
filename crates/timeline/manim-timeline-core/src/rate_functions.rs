//! Rate functions shaping animation progress.
//!
//! A rate function maps raw progress `t ∈ [0, 1]` to the alpha handed to
//! [`Animation::interpolate`](crate::Animation::interpolate). Most map `0 → 0`
//! and `1 → 1`; a few (`there_and_back`, `wiggle`, `running_start`) deliberately
//! do not.

use std::f64::consts::PI;
use std::fmt;
use std::rc::Rc;

/// Logistic sigmoid.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[inline]
pub fn linear(t: f64) -> f64 {
    t
}

/// Sigmoid smoothstep with inflection 10, normalised so `smooth(0) = 0` and
/// `smooth(1) = 1`.
#[inline]
pub fn smooth(t: f64) -> f64 {
    smooth_with_inflection(t, 10.0)
}

pub fn smooth_with_inflection(t: f64, inflection: f64) -> f64 {
    let error = sigmoid(-inflection / 2.0);
    ((sigmoid(inflection * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
}

#[inline]
pub fn rush_into(t: f64) -> f64 {
    2.0 * smooth(t / 2.0)
}

#[inline]
pub fn rush_from(t: f64) -> f64 {
    2.0 * smooth(t / 2.0 + 0.5) - 1.0
}

#[inline]
pub fn slow_into(t: f64) -> f64 {
    (1.0 - (1.0 - t) * (1.0 - t)).max(0.0).sqrt()
}

pub fn double_smooth(t: f64) -> f64 {
    if t < 0.5 {
        0.5 * smooth(2.0 * t)
    } else {
        0.5 * (1.0 + smooth(2.0 * t - 1.0))
    }
}

pub fn there_and_back(t: f64) -> f64 {
    let new_t = if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
    smooth(new_t)
}

pub fn there_and_back_with_pause(t: f64, pause_ratio: f64) -> f64 {
    let a = 1.0 / pause_ratio;
    if t < 0.5 - pause_ratio / 2.0 {
        smooth(a * t)
    } else if t < 0.5 + pause_ratio / 2.0 {
        1.0
    } else {
        smooth(a - a * t)
    }
}

/// Pulls back by `pull_factor` before accelerating to the end.
pub fn running_start(t: f64, pull_factor: f64) -> f64 {
    bezier(&[0.0, 0.0, pull_factor, pull_factor, 1.0, 1.0, 1.0], t)
}

pub fn not_quite_there(t: f64, proportion: f64) -> f64 {
    proportion * smooth(t)
}

pub fn wiggle(t: f64, wiggles: f64) -> f64 {
    there_and_back(t) * (wiggles * PI * t).sin()
}

pub fn lingering(t: f64) -> f64 {
    squish(linear, 0.0, 0.8)(t)
}

pub fn exponential_decay(t: f64, half_life: f64) -> f64 {
    1.0 - (-t / half_life).exp()
}

pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

pub fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Compress `func` into the window `[a, b]`: constant `func(0)` before it and
/// `func(1)` after it.
pub fn squish(func: impl Fn(f64) -> f64, a: f64, b: f64) -> impl Fn(f64) -> f64 {
    move |t| {
        if a == b {
            return a;
        }
        if t < a {
            func(0.0)
        } else if t > b {
            func(1.0)
        } else {
            func((t - a) / (b - a))
        }
    }
}

/// Bernstein-form Bezier curve through scalar control points.
fn bezier(points: &[f64], t: f64) -> f64 {
    let n = points.len().saturating_sub(1);
    let mut result = 0.0;
    let mut binomial = 1.0;
    for (k, p) in points.iter().enumerate() {
        if k > 0 {
            binomial = binomial * (n + 1 - k) as f64 / k as f64;
        }
        result += binomial * (1.0 - t).powi((n - k) as i32) * t.powi(k as i32) * p;
    }
    result
}

/// A named or custom rate function.
#[derive(Clone, Default)]
pub enum RateFunction {
    Linear,
    #[default]
    Smooth,
    RushInto,
    RushFrom,
    SlowInto,
    DoubleSmooth,
    ThereAndBack,
    ThereAndBackWithPause,
    RunningStart,
    NotQuiteThere,
    Wiggle,
    Lingering,
    ExponentialDecay,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutCubic,
    /// User-supplied function
    Custom(Rc<dyn Fn(f64) -> f64>),
}

impl RateFunction {
    /// Wrap an arbitrary closure.
    pub fn custom(func: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::Custom(Rc::new(func))
    }

    /// Apply the rate function to raw progress `t`.
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Linear => linear(t),
            Self::Smooth => smooth(t),
            Self::RushInto => rush_into(t),
            Self::RushFrom => rush_from(t),
            Self::SlowInto => slow_into(t),
            Self::DoubleSmooth => double_smooth(t),
            Self::ThereAndBack => there_and_back(t),
            Self::ThereAndBackWithPause => there_and_back_with_pause(t, 1.0 / 3.0),
            Self::RunningStart => running_start(t, -0.5),
            Self::NotQuiteThere => not_quite_there(t, 0.7),
            Self::Wiggle => wiggle(t, 2.0),
            Self::Lingering => lingering(t),
            Self::ExponentialDecay => exponential_decay(t, 0.1),
            Self::EaseInQuad => ease_in_quad(t),
            Self::EaseOutQuad => ease_out_quad(t),
            Self::EaseInOutCubic => ease_in_out_cubic(t),
            Self::Custom(func) => func(t),
        }
    }

    /// Get the name of this rate function
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Smooth => "smooth",
            Self::RushInto => "rush_into",
            Self::RushFrom => "rush_from",
            Self::SlowInto => "slow_into",
            Self::DoubleSmooth => "double_smooth",
            Self::ThereAndBack => "there_and_back",
            Self::ThereAndBackWithPause => "there_and_back_with_pause",
            Self::RunningStart => "running_start",
            Self::NotQuiteThere => "not_quite_there",
            Self::Wiggle => "wiggle",
            Self::Lingering => "lingering",
            Self::ExponentialDecay => "exponential_decay",
            Self::EaseInQuad => "ease_in_quad",
            Self::EaseOutQuad => "ease_out_quad",
            Self::EaseInOutCubic => "ease_in_out_cubic",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for RateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RateFunction").field(&self.name()).finish()
    }
}

impl From<&str> for RateFunction {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "linear" => Self::Linear,
            "smooth" => Self::Smooth,
            "rush_into" => Self::RushInto,
            "rush_from" => Self::RushFrom,
            "slow_into" => Self::SlowInto,
            "double_smooth" => Self::DoubleSmooth,
            "there_and_back" => Self::ThereAndBack,
            "there_and_back_with_pause" => Self::ThereAndBackWithPause,
            "running_start" => Self::RunningStart,
            "not_quite_there" => Self::NotQuiteThere,
            "wiggle" => Self::Wiggle,
            "lingering" => Self::Lingering,
            "exponential_decay" => Self::ExponentialDecay,
            "ease_in_quad" => Self::EaseInQuad,
            "ease_out_quad" => Self::EaseOutQuad,
            "ease_in_out_cubic" => Self::EaseInOutCubic,
            _ => Self::Smooth, // Default to smooth for unknown names
        }
    }
}
