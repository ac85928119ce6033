use bytemuck::{Pod, Zeroable};

/// Per-mesh render data read by the host renderer.
/// Must match the host protocol: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderInstance {
    /// Column-major local-to-world matrix.
    pub model: [[f32; 4]; 4],
    /// Base colour texture id, or -1 while unloaded / absent.
    pub map: f32,
    /// Normal map texture id, or -1.
    pub normal_map: f32,
    /// Geometry kind (0 = sphere, 1 = plane).
    pub geometry: f32,
    /// 1.0 when the material is alpha blended.
    pub transparent: f32,
    /// Sphere: radius and unused. Plane: width and height.
    pub size: [f32; 2],
    pub _pad: [f32; 2],
}

impl Default for RenderInstance {
    fn default() -> Self {
        Self {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            map: -1.0,
            normal_map: -1.0,
            geometry: 0.0,
            transparent: 0.0,
            size: [1.0, 0.0],
            _pad: [0.0; 2],
        }
    }
}

impl RenderInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer holding every visible mesh for one frame.
pub struct RenderBuffer {
    /// Instances ordered by pass: opaque first, then transparent after
    /// `transparent_split`.
    pub instances: Vec<RenderInstance>,
    /// Instances [0..transparent_split) are opaque,
    /// instances [transparent_split..] are alpha blended.
    pub transparent_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            transparent_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.transparent_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn set_transparent_split(&mut self, split: u32) {
        self.transparent_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
