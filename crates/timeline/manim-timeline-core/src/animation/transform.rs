use super::{Animation, AnimationCore};
use crate::mobject::{MobjectRef, MobjectState, Point};

/// Morph a mobject's points and style into those of another mobject.
///
/// The target is read at `begin`. Point buffers of different lengths are
/// aligned by repeating the last point of the shorter one.
#[derive(Debug)]
pub struct Transform {
    core: AnimationCore,
    target: MobjectRef,
    start_state: MobjectState,
    end_state: MobjectState,
    start_points: Vec<Point>,
    end_points: Vec<Point>,
}

impl Transform {
    pub fn new(mobject: MobjectRef, target: MobjectRef) -> Self {
        Self {
            core: AnimationCore::for_mobject(mobject),
            target,
            start_state: MobjectState::default(),
            end_state: MobjectState::default(),
            start_points: Vec::new(),
            end_points: Vec::new(),
        }
    }

    /// The mobject being morphed into.
    pub fn target_mobject(&self) -> &MobjectRef {
        &self.target
    }
}

fn read_points(mobject: &MobjectRef) -> Vec<Point> {
    mobject
        .borrow()
        .as_drawable()
        .map(|d| d.points().to_vec())
        .unwrap_or_default()
}

/// Pad the shorter buffer with copies of its last point.
fn align_points(a: &mut Vec<Point>, b: &mut Vec<Point>) {
    let len = a.len().max(b.len());
    for points in [a, b] {
        if let Some(&last) = points.last() {
            points.resize(len, last);
        }
    }
}

fn lerp_state(start: &MobjectState, end: &MobjectState, alpha: f64) -> MobjectState {
    let mix = |a: f64, b: f64| a + (b - a) * alpha;
    MobjectState {
        position: start.position.lerp(&end.position, alpha),
        rotation: start.rotation.lerp(&end.rotation, alpha),
        scale: start.scale.lerp(&end.scale, alpha),
        color: start.color.lerp(&end.color, alpha),
        opacity: mix(start.opacity, end.opacity),
        stroke_width: mix(start.stroke_width, end.stroke_width),
        fill_opacity: mix(start.fill_opacity, end.fill_opacity),
    }
}

impl Animation for Transform {
    fn core(&self) -> &AnimationCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AnimationCore {
        &mut self.core
    }

    fn name(&self) -> &'static str {
        "Transform"
    }

    fn begin(&mut self) {
        if !self.core.begin() {
            return;
        }
        self.start_state = self.core.mobject().borrow().state().clone();
        self.end_state = self.target.borrow().state().clone();
        self.start_points = read_points(self.core.mobject());
        self.end_points = read_points(&self.target);
        // An empty side morphs from/to the other side's shape.
        if self.start_points.is_empty() {
            self.start_points = self.end_points.clone();
        } else if self.end_points.is_empty() {
            self.end_points = self.start_points.clone();
        }
        align_points(&mut self.start_points, &mut self.end_points);
    }

    fn interpolate(&mut self, alpha: f64) {
        let state = lerp_state(&self.start_state, &self.end_state, alpha);
        let points = self
            .start_points
            .iter()
            .zip(&self.end_points)
            .map(|(a, b)| a.lerp(b, alpha))
            .collect();

        let mut mobject = self.core.mobject().borrow_mut();
        *mobject.state_mut() = state;
        if let Some(drawable) = mobject.as_drawable_mut() {
            drawable.set_points(points);
        }
        mobject.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobject::{shared, Color, Vec3, VMobject};
    use crate::RateFunction;
    use approx::assert_relative_eq;

    #[test]
    fn pads_shorter_buffer() {
        let mut a = vec![Vec3::zeros(), Vec3::x()];
        let mut b = vec![Vec3::y(), Vec3::y(), Vec3::z(), Vec3::z()];
        align_points(&mut a, &mut b);
        assert_eq!(a.len(), 4);
        assert_eq!(a[3], Vec3::x());
    }

    #[test]
    fn morphs_points_and_style() {
        let square = shared(VMobject::square(2.0));
        let circle = shared(VMobject::circle(1.0, 8).with_color(Color::BLACK));
        let mut transform = Transform::new(square.clone(), circle.clone())
            .with_rate_function(RateFunction::Linear);

        transform.update(0.0, 0.0);
        transform.update(1.0, 1.0);
        {
            let mobject = square.borrow();
            let drawable = mobject.as_drawable().unwrap();
            assert_eq!(drawable.points().len(), 8);
            assert_relative_eq!(drawable.points()[0].x, 1.0);
            assert_eq!(mobject.state().color, Color::BLACK);
        }
        assert!(transform.is_finished());
    }

    #[test]
    fn second_begin_keeps_morph_endpoints() {
        let square = shared(VMobject::square(2.0));
        let circle = shared(VMobject::circle(1.0, 16));
        let mut transform = Transform::new(square.clone(), circle);

        transform.begin();
        transform.interpolate(0.5);
        transform.begin();
        transform.interpolate(0.0);

        let mobject = square.borrow();
        assert_relative_eq!(mobject.as_drawable().unwrap().points()[0].x, -1.0);
    }

    #[test]
    fn reset_restores_point_buffer() {
        let square = shared(VMobject::square(2.0));
        let circle = shared(VMobject::circle(1.0, 16));
        let mut transform = Transform::new(square.clone(), circle);

        transform.update(0.0, 0.0);
        transform.update(0.5, 0.5);
        transform.reset();

        let mobject = square.borrow();
        assert_eq!(mobject.as_drawable().unwrap().points().len(), 4);
        assert_relative_eq!(mobject.as_drawable().unwrap().points()[0].x, -1.0);
    }
}
