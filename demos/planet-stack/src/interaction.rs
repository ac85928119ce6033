//! Per-frame interaction: input handlers, body spin, pointer hit testing and
//! the highlight / reset tweens that follow from it.

use glam::Vec3;
use stellar_engine::input::queue::{InputEvent, InputQueue};
use stellar_engine::{
    EngineContext, Intersection, ObjectId, OverlayId, Position, Raycaster, Timeline,
};

use crate::config::HoverPolicy;

// ── Spin ─────────────────────────────────────────────────────────────

/// Radians per second around each axis.
const SPIN_RATE: Vec3 = Vec3::new(0.2, 0.1, 0.2);

// ── Highlight targets ────────────────────────────────────────────────

const HIGHLIGHT_SCALE: f32 = 1.7;
const HIGHLIGHT_ROTATION_Y: f32 = -0.5;
const HIGHLIGHT_X: f32 = 4.0;
const HIGHLIGHT_Z: f32 = -0.9;

const OVERLAY_SHOWN_X: f32 = 100.0;
const OVERLAY_SHOWN_OPACITY: f32 = 3.0;
const OVERLAY_HIDDEN_X: f32 = 350.0;
const OVERLAY_HIDDEN_OPACITY: f32 = 0.0;
const OVERLAY_DURATION: f32 = 1.0;

/// Timeline position for overlay tweens that overlap the previous second.
const OVERLAP: Position = Position::FromEnd(-1.0);

/// A body and the overlay panel that describes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyLink {
    pub object: ObjectId,
    /// `None` when the host page has no matching element.
    pub overlay: Option<OverlayId>,
}

/// Absolute rotation of every body at `t` seconds.
pub fn body_rotation(t: f32) -> Vec3 {
    SPIN_RATE * t
}

/// Apply queued host events in arrival order.
pub fn apply_input(ctx: &mut EngineContext, input: &InputQueue, scroll_factor: f32) {
    for event in input.iter() {
        match *event {
            InputEvent::PointerMove { x, y } => {
                if ctx.viewport.is_degenerate() {
                    continue;
                }
                let viewport = ctx.viewport;
                ctx.pointer.set_client(x, y, &viewport);
            }
            InputEvent::Resize { width, height, device_pixel_ratio } => {
                ctx.resize(width, height, device_pixel_ratio);
                log::debug!(
                    "resize {}x{} @{} (aspect {:.3})",
                    width,
                    height,
                    ctx.viewport.pixel_ratio,
                    ctx.camera.aspect
                );
            }
            InputEvent::Scroll { top } => {
                ctx.camera.position.y = top * scroll_factor;
            }
        }
    }
}

/// Drives the hover behaviour of the stack.
pub struct Interaction {
    raycaster: Raycaster,
    policy: HoverPolicy,
}

impl Interaction {
    pub fn new(policy: HoverPolicy) -> Self {
        Self {
            raycaster: Raycaster::new(),
            policy,
        }
    }

    pub fn policy(&self) -> HoverPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: HoverPolicy) {
        self.policy = policy;
    }

    /// Spin every body to its pose at `t`. Stars are left alone.
    pub fn spin(&self, ctx: &mut EngineContext, bodies: &[BodyLink], t: f32) {
        let rotation = body_rotation(t);
        for link in bodies {
            if let Some(obj) = ctx.scene.get_mut(link.object) {
                obj.rotation = rotation;
            }
        }
    }

    /// Named meshes under the pointer, nearest first.
    pub fn hit_test(&mut self, ctx: &EngineContext) -> Vec<Intersection> {
        self.raycaster.set_from_camera(ctx.pointer.ndc, &ctx.camera);
        self.raycaster.intersect_objects(ctx.scene.pickable())
    }

    /// One frame of the stack: spin, pick, then issue highlight tweens for
    /// the hit bodies and reset tweens for the rest. Returns the hit bodies.
    pub fn frame(&mut self, ctx: &mut EngineContext, bodies: &[BodyLink]) -> Vec<ObjectId> {
        let t = ctx.time.elapsed;
        self.spin(ctx, bodies, t);

        let hits: Vec<ObjectId> = self.hit_test(ctx).into_iter().map(|h| h.object).collect();
        let mut timeline = Timeline::new();

        for id in &hits {
            if let Some(link) = bodies.iter().find(|b| b.object == *id) {
                highlight(ctx, link, &mut timeline);
            }
        }

        for link in bodies {
            if self.policy == HoverPolicy::GateReset && hits.contains(&link.object) {
                continue;
            }
            reset(ctx, link, &mut timeline);
        }

        ctx.tweens.play(timeline);
        if !hits.is_empty() {
            log::trace!("frame {}: {} bodies under pointer", ctx.time.frame, hits.len());
        }
        hits
    }
}

fn highlight(ctx: &mut EngineContext, link: &BodyLink, timeline: &mut Timeline) {
    let tweens = &mut ctx.tweens;
    let body = [
        tweens.object(link.object).scale_xy(HIGHLIGHT_SCALE, HIGHLIGHT_SCALE),
        tweens.object(link.object).rotation_y(HIGHLIGHT_ROTATION_Y),
        tweens.object(link.object).position_xz(HIGHLIGHT_X, HIGHLIGHT_Z),
    ];
    for tween in body {
        tweens.add(tween);
    }

    if let Some(overlay) = link.overlay {
        timeline.to_at(
            tweens.overlay(overlay).offset_x(OVERLAY_SHOWN_X).with_duration(OVERLAY_DURATION),
            OVERLAP,
        );
        timeline.to(
            tweens.overlay(overlay).opacity(OVERLAY_SHOWN_OPACITY).with_duration(OVERLAY_DURATION),
        );
    }
}

fn reset(ctx: &mut EngineContext, link: &BodyLink, timeline: &mut Timeline) {
    let tweens = &mut ctx.tweens;
    let body = [
        tweens.object(link.object).scale_xy(1.0, 1.0),
        tweens.object(link.object).rotation_y(0.0),
        tweens.object(link.object).position_xz(0.0, 0.0),
    ];
    for tween in body {
        tweens.add(tween);
    }

    if let Some(overlay) = link.overlay {
        timeline.to_at(
            tweens.overlay(overlay).offset_x(OVERLAY_HIDDEN_X).with_duration(OVERLAY_DURATION),
            OVERLAP,
        );
        timeline.to_at(
            tweens.overlay(overlay).opacity(OVERLAY_HIDDEN_OPACITY).with_duration(OVERLAY_DURATION),
            OVERLAP,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_engine::{Channel, OverlayState, Tween, TweenTarget};

    use crate::bodies::BODIES;
    use crate::config::StackConfig;
    use crate::scene_setup;

    const EPS: f32 = 1e-5;

    fn stack() -> (EngineContext, Vec<BodyLink>) {
        let mut ctx = EngineContext::default();
        let handles = scene_setup::build(&mut ctx, &StackConfig::default()).unwrap();
        let links = handles
            .bodies
            .iter()
            .zip(BODIES.iter())
            .map(|(&object, body)| BodyLink {
                object,
                overlay: Some(ctx.overlays.bind(body.overlay_selector(), OverlayState::new(350.0, 0.0))),
            })
            .collect();
        (ctx, links)
    }

    fn pointer_at(ctx: &mut EngineContext, x: f32, y: f32) {
        let mut input = InputQueue::new();
        input.push(InputEvent::PointerMove { x, y });
        apply_input(ctx, &input, 0.01);
    }

    #[test]
    fn rotation_follows_elapsed_time() {
        for t in [0.0f32, 0.5, 1.0, 12.25, 300.0] {
            let r = body_rotation(t);
            assert!((r.x - 0.2 * t).abs() < EPS * t.max(1.0));
            assert!((r.y - 0.1 * t).abs() < EPS * t.max(1.0));
            assert!((r.z - 0.2 * t).abs() < EPS * t.max(1.0));
        }
    }

    #[test]
    fn spin_touches_bodies_only() {
        let (mut ctx, links) = stack();
        let interaction = Interaction::new(HoverPolicy::Faithful);
        interaction.spin(&mut ctx, &links, 5.0);
        for link in &links {
            let rot = ctx.scene.get(link.object).unwrap().rotation;
            assert!((rot - Vec3::new(1.0, 0.5, 1.0)).length() < EPS);
        }
        assert!(ctx
            .scene
            .iter()
            .filter(|o| o.name.is_empty())
            .all(|o| o.rotation == Vec3::ZERO));
    }

    #[test]
    fn pointer_maps_to_ndc() {
        let (mut ctx, _) = stack();
        pointer_at(&mut ctx, 0.0, 0.0);
        assert!((ctx.pointer.ndc.x + 1.0).abs() < EPS);
        assert!((ctx.pointer.ndc.y - 1.0).abs() < EPS);
        pointer_at(&mut ctx, 1280.0, 720.0);
        assert!((ctx.pointer.ndc.x - 1.0).abs() < EPS);
        assert!((ctx.pointer.ndc.y + 1.0).abs() < EPS);
    }

    #[test]
    fn scroll_moves_camera_directly() {
        let (mut ctx, _) = stack();
        let mut input = InputQueue::new();
        input.push(InputEvent::Scroll { top: -1200.0 });
        apply_input(&mut ctx, &input, 0.01);
        assert!((ctx.camera.position.y + 12.0).abs() < EPS);

        input.drain();
        input.push(InputEvent::Scroll { top: 0.0 });
        apply_input(&mut ctx, &input, 0.01);
        assert_eq!(ctx.camera.position.y, 0.0);
    }

    #[test]
    fn resize_updates_aspect_and_pixel_ratio() {
        let (mut ctx, _) = stack();
        let mut input = InputQueue::new();
        input.push(InputEvent::Resize { width: 800.0, height: 400.0, device_pixel_ratio: 3.0 });
        apply_input(&mut ctx, &input, 0.01);
        assert!((ctx.camera.aspect - 2.0).abs() < EPS);
        assert_eq!((ctx.viewport.width, ctx.viewport.height), (800.0, 400.0));
        assert_eq!(ctx.viewport.pixel_ratio, 2.0);

        input.drain();
        input.push(InputEvent::Resize { width: 800.0, height: 400.0, device_pixel_ratio: 1.5 });
        apply_input(&mut ctx, &input, 0.01);
        assert_eq!(ctx.viewport.pixel_ratio, 1.5);
    }

    #[test]
    fn events_apply_in_arrival_order() {
        let (mut ctx, _) = stack();
        let mut input = InputQueue::new();
        input.push(InputEvent::Resize { width: 200.0, height: 100.0, device_pixel_ratio: 1.0 });
        input.push(InputEvent::PointerMove { x: 150.0, y: 25.0 });
        apply_input(&mut ctx, &input, 0.01);
        assert!((ctx.pointer.ndc.x - 0.5).abs() < EPS);
        assert!((ctx.pointer.ndc.y - 0.5).abs() < EPS);
    }

    #[test]
    fn centre_pointer_hits_sun_first() {
        let (mut ctx, _) = stack();
        pointer_at(&mut ctx, 640.0, 360.0);
        let mut interaction = Interaction::new(HoverPolicy::Faithful);
        let hits = interaction.hit_test(&ctx);
        assert!(!hits.is_empty());
        let sun = ctx.scene.find_by_name("sun").unwrap();
        assert_eq!(hits[0].object, sun.id);
        // ray starts on the near plane (z = 1.9), unit sphere at origin
        assert!((hits[0].distance - 0.9).abs() < 1e-3);
        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn corner_pointer_hits_nothing() {
        let (mut ctx, _) = stack();
        pointer_at(&mut ctx, 0.0, 0.0);
        let mut interaction = Interaction::new(HoverPolicy::Faithful);
        assert!(interaction.hit_test(&ctx).is_empty());
    }

    #[test]
    fn scrolled_camera_picks_lower_body() {
        let (mut ctx, _) = stack();
        let mut input = InputQueue::new();
        input.push(InputEvent::Scroll { top: -900.0 });
        input.push(InputEvent::PointerMove { x: 640.0, y: 360.0 });
        apply_input(&mut ctx, &input, 0.01);
        let mut interaction = Interaction::new(HoverPolicy::Faithful);
        let hits = interaction.hit_test(&ctx);
        assert_eq!(ctx.scene.get(hits[0].object).unwrap().name, "earth");
    }

    #[test]
    fn highlight_targets_for_hovered_sun() {
        let (mut ctx, links) = stack();
        pointer_at(&mut ctx, 640.0, 360.0);
        let mut interaction = Interaction::new(HoverPolicy::Faithful);
        let hits = interaction.frame(&mut ctx, &links);
        let sun = links[0].object;
        assert_eq!(hits.first(), Some(&sun));

        let tweens: Vec<&Tween> = ctx.tweens.tweens_of(TweenTarget::Object(sun)).collect();
        let value = |channel: Channel| -> Vec<f32> {
            tweens.iter().filter_map(|t| t.target_value(channel)).collect()
        };
        assert!(value(Channel::ScaleX).contains(&1.7));
        assert!(value(Channel::ScaleY).contains(&1.7));
        assert!(value(Channel::RotationY).contains(&-0.5));
        assert!(value(Channel::PositionX).contains(&4.0));
        assert!(value(Channel::PositionZ).contains(&-0.9));
        // reset issued after the highlight
        assert_eq!(value(Channel::ScaleX).last(), Some(&1.0));
    }

    #[test]
    fn reset_wins_for_hovered_body_by_default() {
        let (mut ctx, links) = stack();
        pointer_at(&mut ctx, 640.0, 360.0);
        let mut interaction = Interaction::new(HoverPolicy::Faithful);
        interaction.frame(&mut ctx, &links);
        ctx.tweens.tick(0.5, &mut ctx.scene, &mut ctx.overlays);
        let sun = ctx.scene.get(links[0].object).unwrap();
        assert!((sun.scale.x - 1.0).abs() < EPS);
        assert!(sun.position.x.abs() < EPS);
    }

    #[test]
    fn gate_reset_lets_highlight_hold() {
        let (mut ctx, links) = stack();
        pointer_at(&mut ctx, 640.0, 360.0);
        let mut interaction = Interaction::new(HoverPolicy::GateReset);
        interaction.frame(&mut ctx, &links);
        ctx.tweens.tick(0.5, &mut ctx.scene, &mut ctx.overlays);
        let sun = ctx.scene.get(links[0].object).unwrap();
        assert!((sun.scale.x - 1.7).abs() < EPS);
        assert!((sun.position.x - 4.0).abs() < EPS);
        assert!((sun.position.z + 0.9).abs() < EPS);
        let mercury = ctx.scene.get(links[1].object).unwrap();
        assert!((mercury.scale.x - 1.0).abs() < EPS);
    }

    #[test]
    fn overlay_tweens_follow_the_timeline() {
        let (mut ctx, links) = stack();
        pointer_at(&mut ctx, 640.0, 360.0);
        let mut interaction = Interaction::new(HoverPolicy::GateReset);
        interaction.frame(&mut ctx, &links);
        let sun_overlay = links[0].overlay.unwrap();

        // offset runs first, opacity is appended after it
        ctx.tweens.tick(1.0, &mut ctx.scene, &mut ctx.overlays);
        let state = *ctx.overlays.get(sun_overlay).unwrap();
        assert!((state.offset_x - 100.0).abs() < EPS);
        assert!(state.opacity.abs() < EPS);

        ctx.tweens.tick(1.0, &mut ctx.scene, &mut ctx.overlays);
        let state = *ctx.overlays.get(sun_overlay).unwrap();
        assert!((state.opacity - 3.0).abs() < EPS);
    }

    #[test]
    fn missing_overlay_is_skipped() {
        let (mut ctx, mut links) = stack();
        links[0].overlay = None;
        pointer_at(&mut ctx, 640.0, 360.0);
        let mut interaction = Interaction::new(HoverPolicy::Faithful);
        let hits = interaction.frame(&mut ctx, &links);
        assert_eq!(hits.first(), Some(&links[0].object));
        let sun_overlay = ctx.overlays.resolve(".sun-desc").unwrap();
        assert_eq!(ctx.tweens.tweens_of(TweenTarget::Overlay(sun_overlay)).count(), 0);
    }

    #[test]
    fn stars_never_reported() {
        let (mut ctx, links) = stack();
        let mut interaction = Interaction::new(HoverPolicy::Faithful);
        for (x, y) in [(0.0, 0.0), (100.0, 600.0), (640.0, 360.0), (1200.0, 50.0)] {
            pointer_at(&mut ctx, x, y);
            for id in interaction.frame(&mut ctx, &links) {
                assert!(!ctx.scene.get(id).unwrap().name.is_empty());
            }
        }
    }
}
