use glam::Vec3;
use serde::{Deserialize, Serialize};
use crate::api::types::ObjectId;
use crate::assets::registry::TextureRegistry;
use crate::components::overlay::OverlayStore;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::core::time::FrameTime;
use crate::error::{EngineError, Result};
use crate::extensions::tween::{TweenDefaults, TweenState};
use crate::input::pointer::Pointer;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::viewport::Viewport;
use crate::systems::lighting::LightState;

/// Camera settings applied at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 100.0,
            position: [0.0, 0.0, 2.0],
        }
    }
}

/// Engine configuration, provided by the demo and overridable from JSON.
/// Unknown keys are ignored so one JSON document can also carry
/// demo-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub camera: CameraConfig,
    /// Viewport assumed until the host reports its first resize.
    pub initial_width: f32,
    pub initial_height: f32,
    /// Cap applied to the device pixel ratio.
    pub max_pixel_ratio: f32,
    /// Seed for procedural placement.
    pub seed: u64,
    /// Maximum render instances in the frame buffer.
    pub max_instances: usize,
    /// Maximum overlay elements in the frame buffer.
    pub max_overlays: usize,
    /// Maximum point lights in the frame buffer.
    pub max_lights: usize,
    /// Duration and easing for tweens built through `EngineContext::tweens`.
    pub tweens: TweenDefaults,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            initial_width: 1280.0,
            initial_height: 720.0,
            max_pixel_ratio: 2.0,
            seed: 42,
            max_instances: 1024,
            max_overlays: 16,
            max_lights: 4,
            tweens: TweenDefaults::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(EngineError::Config)
    }
}

/// The contract every demo fulfils.
pub trait Demo {
    /// Engine configuration. Called once before init.
    fn config(&self) -> DemoConfig {
        DemoConfig::default()
    }

    /// Apply demo-specific settings from the JSON document the host passed
    /// at startup. The default ignores it.
    fn configure(&mut self, _json: &str) -> Result<()> {
        Ok(())
    }

    /// Build the scene, register textures and lights.
    fn init(&mut self, ctx: &mut EngineContext) -> Result<()>;

    /// CSS selectors of the host overlay elements this demo animates.
    fn overlay_selectors(&self) -> Vec<String> {
        Vec::new()
    }

    /// Host overlay bindings are final; resolve overlay handles here.
    fn overlays_bound(&mut self, _ctx: &mut EngineContext) {}

    /// One frame: consume input, update the scene, enqueue tweens.
    /// The runner advances tweens before calling this, so values written
    /// here are the ones presented. Tweens enqueued here first render on
    /// the next frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// All mutable engine state, owned by the runner and lent to the demo.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub viewport: Viewport,
    pub pointer: Pointer,
    pub tweens: TweenState,
    pub overlays: OverlayStore,
    pub lights: LightState,
    pub textures: TextureRegistry,
    pub rng: Rng,
    /// Timing of the frame being processed.
    pub time: FrameTime,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &DemoConfig) -> Self {
        let viewport = Viewport::new(config.initial_width, config.initial_height, config.max_pixel_ratio);
        let camera = PerspectiveCamera::new(
            config.camera.fov_deg,
            viewport.aspect(),
            config.camera.near,
            config.camera.far,
        )
        .with_position(Vec3::from_array(config.camera.position));

        Self {
            scene: Scene::with_capacity(config.max_instances),
            camera,
            viewport,
            pointer: Pointer::new(),
            tweens: TweenState::with_defaults(config.tweens),
            overlays: OverlayStore::new(),
            lights: LightState::new(),
            textures: TextureRegistry::new(),
            rng: Rng::new(config.seed),
            time: FrameTime { elapsed: 0.0, delta: 0.0, frame: 0 },
            next_id: 1,
        }
    }

    /// Generate the next unique object ID.
    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Resize the render surface and keep the camera's aspect in step.
    /// A zero-sized surface keeps the previous projection.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.viewport.resize(width, height, device_pixel_ratio);
        if self.viewport.is_degenerate() {
            log::warn!("ignoring projection update for {}x{} viewport", width, height);
            return;
        }
        self.camera.set_aspect(self.viewport.aspect());
    }

    /// Advance tweens by the current frame delta.
    pub fn tick_tweens(&mut self) -> usize {
        self.tweens.tick(self.time.delta, &mut self.scene, &mut self.overlays)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&DemoConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_matches_config() {
        let ctx = EngineContext::default();
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(ctx.camera.fov_deg, 75.0);
        assert!((ctx.camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::default();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn resize_updates_camera_and_viewport() {
        let mut ctx = EngineContext::default();
        ctx.resize(1000.0, 500.0, 3.0);
        assert_eq!(ctx.camera.aspect, 2.0);
        assert_eq!(ctx.viewport.width, 1000.0);
        assert_eq!(ctx.viewport.height, 500.0);
        assert_eq!(ctx.viewport.pixel_ratio, 2.0);
    }

    #[test]
    fn degenerate_resize_keeps_projection() {
        let mut ctx = EngineContext::default();
        let aspect = ctx.camera.aspect;
        ctx.resize(800.0, 0.0, 1.0);
        assert_eq!(ctx.camera.aspect, aspect);
        assert_eq!(ctx.viewport.height, 0.0);
    }

    #[test]
    fn config_from_partial_json() {
        let config = DemoConfig::from_json(r#"{ "seed": 7, "camera": { "fov_deg": 60 }, "unrelated": true }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.camera.fov_deg, 60.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.max_instances, 1024);
    }

    #[test]
    fn tween_defaults_come_from_config() {
        let config = DemoConfig::from_json(r#"{ "tweens": { "duration": 1.0, "easing": "none" } }"#).unwrap();
        let ctx = EngineContext::new(&config);
        let tween = ctx.tweens.object(ObjectId(1));
        assert_eq!(tween.duration, 1.0);
        assert_eq!(tween.easing, crate::extensions::easing::Easing::Linear);

        let fallback = EngineContext::default();
        assert_eq!(fallback.tweens.object(ObjectId(1)).duration, 0.5);
    }

    #[test]
    fn config_rejects_bad_types() {
        assert!(matches!(DemoConfig::from_json(r#"{ "seed": "x" }"#), Err(EngineError::Config(_))));
    }
}
