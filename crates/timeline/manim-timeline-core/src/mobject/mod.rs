//! The mobject capability contract consumed by animations.
//!
//! Geometry, rendering and layout live outside this crate. Animations only need
//! the transform/style fields in [`MobjectState`], a way to take an independent
//! copy, an optional point buffer ([`Drawable`]) and a dirty signal.

pub mod color;
pub mod placeholder;
pub mod snapshot;
pub mod vmobject;

pub use color::*;
pub use placeholder::*;
pub use snapshot::*;
pub use vmobject::*;

use crate::MobjectId;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type Vec3 = nalgebra::Vector3<f64>;
pub type Point = Vec3;

/// Shared handle to a mobject. Its lifetime is owned by the scene, animations
/// only hold a reference.
pub type MobjectRef = Rc<RefCell<dyn Mobject>>;

/// Default stroke width for new mobjects
pub const DEFAULT_STROKE_WIDTH: f64 = 4.0;

/// Transform and style fields every mobject carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobjectState {
    pub position: Vec3,
    /// Euler angles in radians
    pub rotation: Vec3,
    pub scale: Vec3,
    pub color: Color,
    pub opacity: f64,
    pub stroke_width: f64,
    pub fill_opacity: f64,
}

impl Default for MobjectState {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            color: Color::WHITE,
            opacity: 1.0,
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill_opacity: 0.0,
        }
    }
}

/// Optional capability: a mobject backed by a point buffer.
pub trait Drawable {
    fn points(&self) -> &[Point];
    fn set_points(&mut self, points: Vec<Point>);
}

/// A node in the scene graph as seen by animations.
pub trait Mobject: fmt::Debug {
    fn id(&self) -> MobjectId;

    fn state(&self) -> &MobjectState;

    fn state_mut(&mut self) -> &mut MobjectState;

    /// Deep, independent clone. `None` when the mobject cannot be copied, in
    /// which case callers fall back to reading [`Mobject::state`] directly.
    fn try_copy(&self) -> Option<MobjectRef> {
        None
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        None
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        None
    }

    fn children(&self) -> &[MobjectRef] {
        &[]
    }

    /// Tell the rendering layer its buffers are stale.
    fn mark_dirty(&mut self);

    fn is_dirty(&self) -> bool;

    fn clear_dirty(&mut self);

    #[inline]
    fn opacity(&self) -> f64 {
        self.state().opacity
    }

    #[inline]
    fn set_opacity(&mut self, opacity: f64) {
        self.state_mut().opacity = opacity;
        self.mark_dirty();
    }

    #[inline]
    fn position(&self) -> Vec3 {
        self.state().position
    }
}

/// Wrap a concrete mobject in a shared handle.
pub fn shared<M: Mobject + 'static>(mobject: M) -> MobjectRef {
    Rc::new(RefCell::new(mobject))
}
