use super::{Mobject, MobjectState};
use crate::MobjectId;

/// Always-invisible stand-in mobject.
///
/// Wait animations and speed wrappers bind to one of these instead of a real
/// scene object. It does not support copying, so snapshots of it take the
/// fallback path.
#[derive(Debug, Clone)]
pub struct Placeholder {
    id: MobjectId,
    state: MobjectState,
    dirty: bool,
}

impl Placeholder {
    pub fn new() -> Self {
        Self {
            id: MobjectId::new(),
            state: MobjectState {
                opacity: 0.0,
                ..MobjectState::default()
            },
            dirty: false,
        }
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Self::new()
    }
}

impl Mobject for Placeholder {
    fn id(&self) -> MobjectId {
        self.id
    }

    fn state(&self) -> &MobjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut MobjectState {
        &mut self.state
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
