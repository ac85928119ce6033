// extensions/mod.rs
//
// Animation extensions. Decoupled from the scene core: the runner ticks the
// tween engine, demos only enqueue tweens and timelines.

pub mod easing;
pub mod timeline;
pub mod tween;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};
pub use timeline::{Position, Timeline};
pub use tween::{Channel, Tween, TweenDefaults, TweenId, TweenState, TweenTarget, DEFAULT_DURATION};
