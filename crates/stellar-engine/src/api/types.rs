/// Unique identifier for an object in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

/// Handle to a host-side overlay element (a DOM node the host styles).
/// Indices are dense and follow binding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u32);

/// Handle to a texture registered in the `TextureRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

impl TextureId {
    /// Wire value written into render buffers for "no texture".
    pub const NONE_WIRE: f32 = -1.0;

    pub fn wire(id: Option<TextureId>) -> f32 {
        id.map_or(Self::NONE_WIRE, |t| t.0 as f32)
    }
}
