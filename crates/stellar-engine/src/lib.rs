pub mod api;
pub mod assets;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::demo::{CameraConfig, Demo, DemoConfig, EngineContext};
pub use api::types::{ObjectId, OverlayId, TextureId};
pub use assets::manifest::{TextureDescriptor, TextureManifest};
pub use assets::registry::TextureRegistry;
pub use bridge::protocol::{FrameView, ProtocolLayout, write_frame};
pub use components::mesh::{Geometry, Material, MeshComponent};
pub use components::object::SceneObject;
pub use components::overlay::{OverlayState, OverlayStore};
pub use crate::core::rng::Rng;
pub use crate::core::scene::Scene;
pub use crate::core::time::{Clock, FrameLoop, FrameTime, LoopState};
pub use error::EngineError;
pub use input::pointer::Pointer;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{CameraUniform, PerspectiveCamera};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use renderer::viewport::Viewport;
pub use systems::lighting::{LightState, PointLight};
pub use systems::raycast::{Intersection, Ray, Raycaster};
pub use systems::render::build_render_buffer;

// Extensions: animation on top of the scene core
pub use extensions::{
    Easing, lerp, lerp_vec3, ease, ease_vec3,
    Channel, Tween, TweenDefaults, TweenId, TweenState, TweenTarget, DEFAULT_DURATION,
    Position, Timeline,
};
