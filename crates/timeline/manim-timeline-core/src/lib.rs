//! Manim Timeline Core
//!
//! Animation and timeline engine for a browser-hosted mathematical animation
//! library. Animations mutate shared mobjects over time, a [`Timeline`] schedules
//! them and supports random-access seeking, and a [`MasterTimeline`] groups them
//! into slide-like segments with navigation.

pub mod animation;
pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod master_timeline;
pub mod mobject;
pub mod rate_functions;
pub mod span;
pub mod speed;
pub mod timeline;

// Re-export common types for convenience
pub use animation::{
    Animation, AnimationCore, AnimationRef, FadeIn, FadeOut, FadeToColor, MoveTo, Rotate,
    ScaleBy, Shift, Transform, Wait,
};
pub use config::TimelineConfig;
pub use error::TimelineError;
pub use event::{EventQueue, EventType, TimelineEvent};
pub use ids::MobjectId;
pub use master_timeline::{MasterTimeline, Segment};
pub use mobject::{
    shared, Color, Drawable, Mobject, MobjectRef, MobjectSnapshot, MobjectState, Placeholder,
    Point, SnapshotSource, VMobject, Vec3,
};
pub use rate_functions::RateFunction;
pub use span::TimeSpan;
pub use speed::{ChangeSpeed, ChangeSpeedOptions, SpeedProfile};
pub use timeline::{Playback, PlaybackState, Timeline};

/// Timeline result type
pub type Result<T> = core::result::Result<T, TimelineError>;
