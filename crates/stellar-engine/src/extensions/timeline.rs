// extensions/timeline.rs
//
// Sequencing for tweens. A timeline lays children out on its own local
// time axis, then `TweenState::play` schedules them relative to now.
//
// Usage:
//   let mut tl = Timeline::new();
//   tl.to_at(Tween::overlay(el).offset_x(100.0).with_duration(1.0), Position::FromEnd(-1.0));
//   tl.to(Tween::overlay(el).opacity(3.0).with_duration(1.0));
//   tweens.play(tl);

use super::tween::{Tween, TweenId, TweenState};

/// Where a child is placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Append at the current end of the timeline.
    End,
    /// Relative to the current end; `FromEnd(-1.0)` overlaps the last second.
    FromEnd(f32),
    /// Absolute time on the timeline.
    At(f32),
}

/// An ordered group of tweens with explicit start offsets.
/// Child start times never go below zero.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    children: Vec<(f32, Tween)>,
    end: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tween at the end.
    pub fn to(&mut self, tween: Tween) -> &mut Self {
        self.to_at(tween, Position::End)
    }

    /// Insert a tween at `position`. The tween's own delay shifts it further.
    pub fn to_at(&mut self, tween: Tween, position: Position) -> &mut Self {
        let base = match position {
            Position::End => self.end,
            Position::FromEnd(offset) => self.end + offset,
            Position::At(t) => t,
        };
        let start = (base + tween.delay).max(0.0);
        self.end = self.end.max(start + tween.duration.max(0.0));
        self.children.push((start, tween));
        self
    }

    /// End time of the last-finishing child.
    pub fn duration(&self) -> f32 {
        self.end
    }

    /// Children with their start times, in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (f32, &Tween)> {
        self.children.iter().map(|(start, t)| (*start, t))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl TweenState {
    /// Schedule every child of a timeline, offset from now.
    pub fn play(&mut self, timeline: Timeline) -> Vec<TweenId> {
        timeline
            .children
            .into_iter()
            .map(|(start, tween)| self.add(tween.with_delay(start)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::OverlayId;
    use crate::components::overlay::{OverlayState, OverlayStore};
    use crate::core::scene::Scene;
    use crate::extensions::easing::Easing;

    fn el() -> Tween {
        Tween::overlay(OverlayId(0)).with_duration(1.0)
    }

    #[test]
    fn append_sequences_children() {
        let mut tl = Timeline::new();
        tl.to(el().offset_x(100.0)).to(el().opacity(3.0));
        let starts: Vec<f32> = tl.children().map(|(s, _)| s).collect();
        assert_eq!(starts, vec![0.0, 1.0]);
        assert_eq!(tl.duration(), 2.0);
    }

    #[test]
    fn from_end_overlaps_and_clamps_at_zero() {
        let mut tl = Timeline::new();
        tl.to_at(el().offset_x(350.0), Position::FromEnd(-1.0));
        tl.to_at(el().opacity(0.0), Position::FromEnd(-1.0));
        let starts: Vec<f32> = tl.children().map(|(s, _)| s).collect();
        assert_eq!(starts, vec![0.0, 0.0]);
        assert_eq!(tl.duration(), 1.0);
    }

    #[test]
    fn hover_then_reset_layout() {
        let mut tl = Timeline::new();
        tl.to_at(el().offset_x(100.0), Position::FromEnd(-1.0));
        tl.to(el().opacity(3.0));
        tl.to_at(el().offset_x(350.0), Position::FromEnd(-1.0));
        tl.to_at(el().opacity(0.0), Position::FromEnd(-1.0));
        let starts: Vec<f32> = tl.children().map(|(s, _)| s).collect();
        assert_eq!(starts, vec![0.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn absolute_position() {
        let mut tl = Timeline::new();
        tl.to_at(el().opacity(1.0), Position::At(2.5));
        assert_eq!(tl.children().next().unwrap().0, 2.5);
        assert_eq!(tl.duration(), 3.5);
    }

    #[test]
    fn play_schedules_relative_to_now() {
        let mut scene = Scene::new();
        let mut overlays = OverlayStore::new();
        let id = overlays.bind(".sun-desc", OverlayState::new(0.0, 0.0));
        let mut tweens = TweenState::new();

        let mut tl = Timeline::new();
        tl.to(Tween::overlay(id).offset_x(100.0).with_duration(1.0).with_easing(Easing::Linear));
        tl.to(Tween::overlay(id).opacity(1.0).with_duration(1.0).with_easing(Easing::Linear));
        assert_eq!(tweens.play(tl).len(), 2);

        tweens.tick(1.0, &mut scene, &mut overlays);
        let st = *overlays.get(id).unwrap();
        assert_eq!(st.offset_x, 100.0);
        assert_eq!(st.opacity, 0.0);

        tweens.tick(0.5, &mut scene, &mut overlays);
        assert!((overlays.get(id).unwrap().opacity - 0.5).abs() < 1e-5);
    }
}
