use crate::mobject::{MobjectRef, MobjectSnapshot};
use crate::RateFunction;

/// Default animation length in seconds
pub const DEFAULT_ANIMATION_DURATION: f64 = 1.0;

/// State shared by every [`Animation`](super::Animation).
///
/// The start time is assigned by whoever drives the animation (normally a
/// [`Timeline`](crate::Timeline)); the animation itself only latches it on the
/// first `update` when nothing assigned it beforehand.
#[derive(Debug)]
pub struct AnimationCore {
    mobject: MobjectRef,
    duration: f64,
    rate_function: RateFunction,
    start_time: Option<f64>,
    finished: bool,
    begun: bool,
    remover: bool,
    snapshot: Option<MobjectSnapshot>,
}

impl AnimationCore {
    pub fn new(mobject: MobjectRef, duration: f64, rate_function: RateFunction) -> Self {
        Self {
            mobject,
            duration,
            rate_function,
            start_time: None,
            finished: false,
            begun: false,
            remover: false,
            snapshot: None,
        }
    }

    /// Core with the default duration and rate function.
    pub fn for_mobject(mobject: MobjectRef) -> Self {
        Self::new(mobject, DEFAULT_ANIMATION_DURATION, RateFunction::Smooth)
    }

    #[inline]
    pub fn with_remover(mut self, remover: bool) -> Self {
        self.remover = remover;
        self
    }

    /// Capture the pre-animation snapshot if none is held, then mark begun.
    /// Returns `true` when a new snapshot was taken; start values derived
    /// from the mobject should be read only then.
    pub fn begin(&mut self) -> bool {
        let captured = self.snapshot.is_none();
        if captured {
            self.snapshot = Some(MobjectSnapshot::capture(&*self.mobject.borrow()));
        }
        self.begun = true;
        self.finished = false;
        captured
    }

    #[inline]
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Restore the mobject from the snapshot (consuming it) and clear all
    /// run state. Without a snapshot only the flags are cleared.
    pub fn reset(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            snapshot.restore_onto(&mut *self.mobject.borrow_mut());
        }
        self.start_time = None;
        self.finished = false;
        self.begun = false;
    }

    /// Clamped progress for `elapsed` seconds; `1.0` for non-positive durations.
    #[inline]
    pub fn raw_progress(&self, elapsed: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Return the start time, latching `current_time` if none is set.
    #[inline]
    pub(crate) fn latch_start_time(&mut self, current_time: f64) -> f64 {
        *self.start_time.get_or_insert(current_time)
    }

    #[inline]
    pub fn mobject(&self) -> &MobjectRef {
        &self.mobject
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    #[inline]
    pub fn rate_function(&self) -> &RateFunction {
        &self.rate_function
    }

    #[inline]
    pub fn set_rate_function(&mut self, rate_function: RateFunction) {
        self.rate_function = rate_function;
    }

    #[inline]
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    #[inline]
    pub fn set_start_time(&mut self, start_time: Option<f64>) {
        self.start_time = start_time;
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn has_begun(&self) -> bool {
        self.begun
    }

    #[inline]
    pub fn is_remover(&self) -> bool {
        self.remover
    }

    #[inline]
    pub fn snapshot(&self) -> Option<&MobjectSnapshot> {
        self.snapshot.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobject::{shared, Placeholder, SnapshotSource, VMobject};

    #[test]
    fn begin_captures_once() {
        let mobject = shared(VMobject::square(1.0));
        let mut core = AnimationCore::for_mobject(mobject.clone());

        assert!(core.begin());
        mobject.borrow_mut().state_mut().opacity = 0.3;
        assert!(!core.begin());

        assert_eq!(core.snapshot().map(|s| s.opacity), Some(1.0));
        assert!(core.has_begun());
        assert!(!core.is_finished());
    }

    #[test]
    fn fallback_snapshot_for_uncopyable_mobject() {
        let mut core = AnimationCore::for_mobject(shared(Placeholder::new()));
        core.begin();
        assert_eq!(
            core.snapshot().map(|s| s.source),
            Some(SnapshotSource::Fallback)
        );
    }

    #[test]
    fn reset_consumes_snapshot() {
        let mobject = shared(VMobject::square(1.0));
        let mut core = AnimationCore::for_mobject(mobject.clone());
        core.begin();
        core.set_start_time(Some(2.0));
        mobject.borrow_mut().state_mut().opacity = 0.0;

        core.reset();
        assert_eq!(mobject.borrow().opacity(), 1.0);
        assert!(core.snapshot().is_none());
        assert_eq!(core.start_time(), None);
        assert!(!core.has_begun());

        // Without a snapshot the mobject is left alone.
        mobject.borrow_mut().state_mut().opacity = 0.5;
        core.reset();
        assert_eq!(mobject.borrow().opacity(), 0.5);
    }

    #[test]
    fn raw_progress_clamps() {
        let core = AnimationCore::new(shared(Placeholder::new()), 2.0, RateFunction::Linear);
        assert_eq!(core.raw_progress(-1.0), 0.0);
        assert_eq!(core.raw_progress(1.0), 0.5);
        assert_eq!(core.raw_progress(5.0), 1.0);

        let instant = AnimationCore::new(shared(Placeholder::new()), 0.0, RateFunction::Linear);
        assert_eq!(instant.raw_progress(0.0), 1.0);
    }
}
