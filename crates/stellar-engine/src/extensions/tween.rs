// extensions/tween.rs
//
// Tween engine: animates scalar channels of scene objects and overlays.
// Decoupled from the frame loop; the runner calls `tick` once per frame.
//
// Usage:
//   let mut tweens = TweenState::with_defaults(config.tweens);
//   let grow = tweens.object(id).scale_xy(1.7, 1.7);
//   tweens.add(grow);
//   tweens.tick(dt, &mut scene, &mut overlays);
//
// Semantics:
// - `to`-style tweens: only the end value is given; the start value is read
//   from the target the first time the tween renders (after its delay).
// - No overwriting. Several tweens may drive the same channel at once; they
//   are applied in order of start time, ties in creation order, so the one
//   applied last in a tick decides the channel's value for that frame.
// - A tween whose target no longer exists is dropped without error.

use serde::{Deserialize, Serialize};
use crate::api::types::{ObjectId, OverlayId};
use crate::components::object::SceneObject;
use crate::components::overlay::{OverlayState, OverlayStore};
use crate::core::scene::Scene;
use super::easing::{Easing, ease};

/// Default tween length in seconds.
pub const DEFAULT_DURATION: f32 = 0.5;

/// Duration and easing given to tweens that do not set their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenDefaults {
    /// Seconds.
    pub duration: f32,
    pub easing: Easing,
}

impl Default for TweenDefaults {
    fn default() -> Self {
        Self { duration: DEFAULT_DURATION, easing: Easing::default() }
    }
}

/// What a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    Object(ObjectId),
    Overlay(OverlayId),
}

/// A single animatable scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
    /// Overlay horizontal offset in CSS pixels.
    OffsetX,
    /// Overlay opacity.
    Opacity,
}

/// Read/write access to the channels a target type carries.
trait ChannelAccess {
    fn read(&self, channel: Channel) -> Option<f32>;
    fn write(&mut self, channel: Channel, value: f32);
}

impl ChannelAccess for SceneObject {
    fn read(&self, channel: Channel) -> Option<f32> {
        Some(match channel {
            Channel::PositionX => self.position.x,
            Channel::PositionY => self.position.y,
            Channel::PositionZ => self.position.z,
            Channel::RotationX => self.rotation.x,
            Channel::RotationY => self.rotation.y,
            Channel::RotationZ => self.rotation.z,
            Channel::ScaleX => self.scale.x,
            Channel::ScaleY => self.scale.y,
            Channel::ScaleZ => self.scale.z,
            Channel::OffsetX | Channel::Opacity => return None,
        })
    }

    fn write(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::PositionX => self.position.x = value,
            Channel::PositionY => self.position.y = value,
            Channel::PositionZ => self.position.z = value,
            Channel::RotationX => self.rotation.x = value,
            Channel::RotationY => self.rotation.y = value,
            Channel::RotationZ => self.rotation.z = value,
            Channel::ScaleX => self.scale.x = value,
            Channel::ScaleY => self.scale.y = value,
            Channel::ScaleZ => self.scale.z = value,
            Channel::OffsetX | Channel::Opacity => {}
        }
    }
}

impl ChannelAccess for OverlayState {
    fn read(&self, channel: Channel) -> Option<f32> {
        match channel {
            Channel::OffsetX => Some(self.offset_x),
            Channel::Opacity => Some(self.opacity),
            _ => None,
        }
    }

    fn write(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::OffsetX => self.offset_x = value,
            Channel::Opacity => self.opacity = value,
            _ => {}
        }
    }
}

/// One channel of a tween: where it is going and, once started, where it
/// came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelTween {
    pub channel: Channel,
    pub to: f32,
    from: Option<f32>,
}

impl ChannelTween {
    pub fn from(&self) -> Option<f32> {
        self.from
    }
}

/// A `to` tween: a target, end values per channel, timing and easing.
#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    pub channels: Vec<ChannelTween>,
    /// Duration in seconds.
    pub duration: f32,
    /// Delay before the tween starts, in seconds.
    pub delay: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(target: TweenTarget) -> Self {
        Self {
            target,
            channels: Vec::with_capacity(2),
            duration: DEFAULT_DURATION,
            delay: 0.0,
            easing: Easing::default(),
        }
    }

    pub fn object(id: ObjectId) -> Self {
        Self::new(TweenTarget::Object(id))
    }

    pub fn overlay(id: OverlayId) -> Self {
        Self::new(TweenTarget::Overlay(id))
    }

    // -- Builder methods --

    /// Animate `channel` to `to`. Setting a channel twice keeps the last value.
    pub fn set(mut self, channel: Channel, to: f32) -> Self {
        match self.channels.iter_mut().find(|c| c.channel == channel) {
            Some(existing) => existing.to = to,
            None => self.channels.push(ChannelTween { channel, to, from: None }),
        }
        self
    }

    pub fn position_x(self, x: f32) -> Self {
        self.set(Channel::PositionX, x)
    }

    pub fn position_xz(self, x: f32, z: f32) -> Self {
        self.set(Channel::PositionX, x).set(Channel::PositionZ, z)
    }

    pub fn rotation_y(self, y: f32) -> Self {
        self.set(Channel::RotationY, y)
    }

    pub fn scale_xy(self, x: f32, y: f32) -> Self {
        self.set(Channel::ScaleX, x).set(Channel::ScaleY, y)
    }

    pub fn offset_x(self, x: f32) -> Self {
        self.set(Channel::OffsetX, x)
    }

    pub fn opacity(self, opacity: f32) -> Self {
        self.set(Channel::Opacity, opacity)
    }

    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_defaults(self, defaults: TweenDefaults) -> Self {
        self.with_duration(defaults.duration).with_easing(defaults.easing)
    }

    /// End value for a channel, if this tween drives it.
    pub fn target_value(&self, channel: Channel) -> Option<f32> {
        self.channels.iter().find(|c| c.channel == channel).map(|c| c.to)
    }
}

/// Handle to a scheduled tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

#[derive(Debug, Clone)]
struct Scheduled {
    id: TweenId,
    /// Absolute start time on the engine clock.
    start: f64,
    started: bool,
    done: bool,
    tween: Tween,
}

/// Owns every in-flight tween and the clock they run on.
#[derive(Debug, Default)]
pub struct TweenState {
    /// Sorted by start time; equal start times keep creation order.
    active: Vec<Scheduled>,
    now: f64,
    next_id: u64,
    defaults: TweenDefaults,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: TweenDefaults) -> Self {
        Self { defaults, ..Self::default() }
    }

    pub fn defaults(&self) -> TweenDefaults {
        self.defaults
    }

    /// A tween on a scene object, carrying this state's defaults.
    pub fn object(&self, id: ObjectId) -> Tween {
        Tween::object(id).with_defaults(self.defaults)
    }

    /// A tween on an overlay, carrying this state's defaults.
    pub fn overlay(&self, id: OverlayId) -> Tween {
        Tween::overlay(id).with_defaults(self.defaults)
    }

    /// Schedule a tween to start after its delay, measured from now.
    pub fn add(&mut self, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        let start = self.now + tween.delay.max(0.0) as f64;
        let idx = self.active.partition_point(|s| s.start <= start);
        self.active.insert(idx, Scheduled { id, start, started: false, done: false, tween });
        id
    }

    pub fn remove(&mut self, id: TweenId) -> bool {
        let before = self.active.len();
        self.active.retain(|s| s.id != id);
        self.active.len() != before
    }

    /// Drop every tween driving `target`.
    pub fn remove_target(&mut self, target: TweenTarget) {
        self.active.retain(|s| s.tween.target != target);
    }

    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.active.iter().find(|s| s.id == id).map(|s| &s.tween)
    }

    /// Tweens currently scheduled for `target`, in application order.
    pub fn tweens_of(&self, target: TweenTarget) -> impl Iterator<Item = &Tween> {
        self.active
            .iter()
            .filter(move |s| s.tween.target == target)
            .map(|s| &s.tween)
    }

    /// Seconds on the tween clock.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance the clock and apply every started tween.
    /// Returns the number of tweens that finished (or lost their target).
    pub fn tick(&mut self, dt: f32, scene: &mut Scene, overlays: &mut OverlayStore) -> usize {
        self.now += dt.max(0.0) as f64;
        let now = self.now;
        let mut finished = 0;

        for s in self.active.iter_mut() {
            if s.start > now {
                // Sorted by start: nothing after this has started either.
                break;
            }

            let alive = match s.tween.target {
                TweenTarget::Object(id) => scene
                    .get_mut(id)
                    .is_some_and(|o| render_channels(s, now, o)),
                TweenTarget::Overlay(id) => overlays
                    .get_mut(id)
                    .is_some_and(|st| render_channels(s, now, st)),
            };

            if !alive || progress(s, now) >= 1.0 {
                s.done = true;
                finished += 1;
            }
        }

        if finished > 0 {
            self.active.retain(|s| !s.done);
        }
        finished
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

fn progress(s: &Scheduled, now: f64) -> f32 {
    if s.tween.duration <= 0.0 {
        1.0
    } else {
        (((now - s.start) / s.tween.duration as f64) as f32).clamp(0.0, 1.0)
    }
}

/// Capture start values on first render, then write eased values.
/// Returns false when no channel applies to the target.
fn render_channels(s: &mut Scheduled, now: f64, target: &mut impl ChannelAccess) -> bool {
    if !s.started {
        s.started = true;
        for ch in s.tween.channels.iter_mut() {
            ch.from = target.read(ch.channel);
        }
    }
    let t = progress(s, now);
    let mut any = false;
    for ch in &s.tween.channels {
        if let Some(from) = ch.from {
            target.write(ch.channel, ease(from, ch.to, t, s.tween.easing));
            any = true;
        }
    }
    any
}
