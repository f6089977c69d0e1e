use crate::animation::AnimationRef;
use crate::span::TimeSpan;

/// An animation placed on a timeline.
#[derive(Debug, Clone)]
pub struct ScheduledAnimation {
    pub animation: AnimationRef,
    pub span: TimeSpan,
    /// Scheduled start time has been handed to the animation
    pub(crate) started: bool,
}

impl ScheduledAnimation {
    /// Schedule `animation` at `start`, spanning its current duration.
    pub fn new(animation: AnimationRef, start: f64) -> Self {
        let duration = animation.borrow().duration();
        Self {
            animation,
            span: TimeSpan::from_start(start, duration),
            started: false,
        }
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.span.start
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.span.end
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }
}
