//! Identifiers for mobjects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a mobject, independent of where it lives in memory.
///
/// Copies made through [`Mobject::try_copy`](crate::Mobject::try_copy) receive a
/// fresh id so snapshots never collide with the live object.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MobjectId(Uuid);

impl MobjectId {
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MobjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MobjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
