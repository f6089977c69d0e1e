use super::{Color, Mobject, Point, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a snapshot was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotSource {
    /// Taken from a deep copy of the mobject
    Copy,
    /// The mobject could not be copied; fields were read from it directly
    Fallback,
}

/// The fields [`Animation::reset`](crate::Animation::reset) restores.
///
/// Both capture paths produce this shape. Only copy-derived snapshots of
/// drawable mobjects carry `points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobjectSnapshot {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
    pub color: Color,
    pub opacity: f64,
    pub stroke_width: f64,
    pub fill_opacity: f64,
    pub points: Option<Vec<Point>>,
    pub source: SnapshotSource,
}

impl MobjectSnapshot {
    /// Capture `mobject`, preferring a deep copy.
    pub fn capture(mobject: &dyn Mobject) -> Self {
        match mobject.try_copy() {
            Some(copy) => {
                let copy = copy.borrow();
                let points = copy.as_drawable().map(|d| d.points().to_vec());
                Self::from_fields(&*copy, points, SnapshotSource::Copy)
            }
            None => {
                debug!(mobject = %mobject.id(), "copy unsupported, using fallback snapshot");
                Self::from_fields(mobject, None, SnapshotSource::Fallback)
            }
        }
    }

    fn from_fields(mobject: &dyn Mobject, points: Option<Vec<Point>>, source: SnapshotSource) -> Self {
        let state = mobject.state();
        Self {
            position: state.position,
            rotation: state.rotation,
            scale: state.scale,
            color: state.color,
            opacity: state.opacity,
            stroke_width: state.stroke_width,
            fill_opacity: state.fill_opacity,
            points,
            source,
        }
    }

    /// Write the captured fields back and mark the mobject dirty. Points are
    /// restored only when both sides are drawable.
    pub fn restore_onto(&self, mobject: &mut dyn Mobject) {
        {
            let state = mobject.state_mut();
            state.position = self.position;
            state.rotation = self.rotation;
            state.scale = self.scale;
            state.color = self.color;
            state.opacity = self.opacity;
            state.stroke_width = self.stroke_width;
            state.fill_opacity = self.fill_opacity;
        }
        if let (Some(points), Some(drawable)) = (&self.points, mobject.as_drawable_mut()) {
            drawable.set_points(points.clone());
        }
        mobject.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobject::{Drawable, Placeholder, VMobject};

    #[test]
    fn copy_path_captures_points() {
        let square = VMobject::square(2.0);
        let snapshot = MobjectSnapshot::capture(&square);
        assert_eq!(snapshot.source, SnapshotSource::Copy);
        assert_eq!(snapshot.points.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn fallback_path_has_no_points() {
        let placeholder = Placeholder::new();
        let snapshot = MobjectSnapshot::capture(&placeholder);
        assert_eq!(snapshot.source, SnapshotSource::Fallback);
        assert!(snapshot.points.is_none());
        assert_eq!(snapshot.opacity, placeholder.opacity());
    }

    #[test]
    fn restore_writes_fields_and_points() {
        let mut square = VMobject::square(2.0);
        let snapshot = MobjectSnapshot::capture(&square);

        square.state_mut().opacity = 0.1;
        square.state_mut().position = Vec3::new(3.0, 0.0, 0.0);
        square.set_points(vec![Vec3::zeros()]);
        square.clear_dirty();

        snapshot.restore_onto(&mut square);
        assert_eq!(square.state().opacity, 1.0);
        assert_eq!(square.state().position, Vec3::zeros());
        assert_eq!(square.points().len(), 4);
        assert!(square.is_dirty());
    }
}
