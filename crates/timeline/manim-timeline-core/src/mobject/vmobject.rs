use super::{shared, Color, Drawable, Mobject, MobjectRef, MobjectState, Point, Vec3};
use crate::MobjectId;
use std::f64::consts::TAU;

/// Vectorized mobject: a point buffer plus transform/style and child nodes.
#[derive(Debug)]
pub struct VMobject {
    id: MobjectId,
    state: MobjectState,
    points: Vec<Point>,
    children: Vec<MobjectRef>,
    dirty: bool,
}

impl VMobject {
    pub fn new() -> Self {
        Self::with_points(Vec::new())
    }

    pub fn with_points(points: Vec<Point>) -> Self {
        Self {
            id: MobjectId::new(),
            state: MobjectState::default(),
            points,
            children: Vec::new(),
            dirty: true,
        }
    }

    /// Closed polyline approximating a circle in the xy-plane.
    pub fn circle(radius: f64, samples: usize) -> Self {
        let samples = samples.max(3);
        let points = (0..samples)
            .map(|i| {
                let angle = TAU * i as f64 / samples as f64;
                Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
            })
            .collect();
        Self::with_points(points)
    }

    pub fn square(side: f64) -> Self {
        let h = side / 2.0;
        Self::with_points(vec![
            Vec3::new(-h, -h, 0.0),
            Vec3::new(h, -h, 0.0),
            Vec3::new(h, h, 0.0),
            Vec3::new(-h, h, 0.0),
        ])
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.state.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.state.opacity = opacity;
        self
    }

    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.state.fill_opacity = fill_opacity;
        self
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.state.position = position;
        self
    }

    pub fn add_child(&mut self, child: MobjectRef) {
        self.children.push(child);
        self.dirty = true;
    }

    /// Deep clone with a fresh id. `None` if any descendant cannot be copied.
    fn deep_copy(&self) -> Option<VMobject> {
        let children = self
            .children
            .iter()
            .map(|child| child.borrow().try_copy())
            .collect::<Option<Vec<_>>>()?;
        Some(VMobject {
            id: MobjectId::new(),
            state: self.state.clone(),
            points: self.points.clone(),
            children,
            dirty: true,
        })
    }
}

impl Default for VMobject {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawable for VMobject {
    fn points(&self) -> &[Point] {
        &self.points
    }

    fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        self.dirty = true;
    }
}

impl Mobject for VMobject {
    fn id(&self) -> MobjectId {
        self.id
    }

    fn state(&self) -> &MobjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut MobjectState {
        &mut self.state
    }

    fn try_copy(&self) -> Option<MobjectRef> {
        self.deep_copy().map(shared)
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }

    fn children(&self) -> &[MobjectRef] {
        &self.children
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
