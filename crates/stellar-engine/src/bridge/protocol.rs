//! Frame buffer layout shared with the host renderer.
//! Must stay in sync with the host's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Camera: 20 floats]
//! [Instances: max_instances × 24 floats]
//! [Overlays: max_overlays × 2 floats]
//! [Lights: max_lights × 8 floats]
//! ```
//!
//! Capacities are written into the header every frame; the host reads
//! them to compute section offsets.

use bytemuck::cast_slice;
use crate::api::demo::DemoConfig;
use crate::api::types::TextureId;
use crate::components::overlay::OverlayState;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::RenderInstance;
use crate::renderer::viewport::Viewport;
use crate::systems::lighting::PointLight;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TRANSPARENT_SPLIT: usize = 4;
pub const HEADER_MAX_OVERLAYS: usize = 5;
pub const HEADER_OVERLAY_COUNT: usize = 6;
pub const HEADER_MAX_LIGHTS: usize = 7;
pub const HEADER_LIGHT_COUNT: usize = 8;
pub const HEADER_VIEWPORT_WIDTH: usize = 9;
pub const HEADER_VIEWPORT_HEIGHT: usize = 10;
pub const HEADER_PIXEL_RATIO: usize = 11;
pub const HEADER_BACKGROUND_TEXTURE: usize = 12;
pub const HEADER_AMBIENT_R: usize = 13;
pub const HEADER_AMBIENT_G: usize = 14;
pub const HEADER_AMBIENT_B: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_overlays: usize,
    pub max_lights: usize,

    pub camera_offset: usize,
    pub instance_data_offset: usize,
    pub overlay_data_offset: usize,
    pub light_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_overlays: usize, max_lights: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let instance_data_offset = camera_offset + CameraUniform::FLOATS;
        let overlay_data_offset = instance_data_offset + max_instances * RenderInstance::FLOATS;
        let light_data_offset = overlay_data_offset + max_overlays * OverlayState::FLOATS;
        let buffer_total_floats = light_data_offset + max_lights * PointLight::FLOATS;

        Self {
            max_instances,
            max_overlays,
            max_lights,
            camera_offset,
            instance_data_offset,
            overlay_data_offset,
            light_data_offset,
            buffer_total_floats,
        }
    }

    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(config.max_instances, config.max_overlays, config.max_lights)
    }

    pub fn buffer_total_bytes(&self) -> usize {
        self.buffer_total_floats * 4
    }
}

/// Everything the host needs to draw one frame.
pub struct FrameView<'a> {
    pub frame: u64,
    pub camera: CameraUniform,
    pub instances: &'a [RenderInstance],
    pub transparent_split: u32,
    pub overlays: &'a [OverlayState],
    pub lights: &'a [PointLight],
    pub ambient: [f32; 3],
    pub viewport: Viewport,
    pub background: Option<TextureId>,
}

/// Pack a frame into `buf` (resized to the layout). Sections past their
/// capacity are truncated and the header reports the written counts.
pub fn write_frame(layout: &ProtocolLayout, frame: &FrameView, buf: &mut Vec<f32>) {
    buf.resize(layout.buffer_total_floats, 0.0);

    let instance_count = frame.instances.len().min(layout.max_instances);
    let overlay_count = frame.overlays.len().min(layout.max_overlays);
    let light_count = frame.lights.len().min(layout.max_lights);
    if instance_count < frame.instances.len() {
        log::trace!("instance buffer full: dropping {}", frame.instances.len() - instance_count);
    }

    let header = &mut buf[..HEADER_FLOATS];
    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_FRAME_COUNTER] = frame.frame as f32;
    header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
    header[HEADER_INSTANCE_COUNT] = instance_count as f32;
    header[HEADER_TRANSPARENT_SPLIT] = (frame.transparent_split as usize).min(instance_count) as f32;
    header[HEADER_MAX_OVERLAYS] = layout.max_overlays as f32;
    header[HEADER_OVERLAY_COUNT] = overlay_count as f32;
    header[HEADER_MAX_LIGHTS] = layout.max_lights as f32;
    header[HEADER_LIGHT_COUNT] = light_count as f32;
    header[HEADER_VIEWPORT_WIDTH] = frame.viewport.width;
    header[HEADER_VIEWPORT_HEIGHT] = frame.viewport.height;
    header[HEADER_PIXEL_RATIO] = frame.viewport.pixel_ratio;
    header[HEADER_BACKGROUND_TEXTURE] = TextureId::wire(frame.background);
    header[HEADER_AMBIENT_R] = frame.ambient[0];
    header[HEADER_AMBIENT_G] = frame.ambient[1];
    header[HEADER_AMBIENT_B] = frame.ambient[2];

    copy_section(buf, layout.camera_offset, cast_slice(std::slice::from_ref(&frame.camera)));
    copy_section(buf, layout.instance_data_offset, cast_slice(&frame.instances[..instance_count]));
    copy_section(buf, layout.overlay_data_offset, cast_slice(&frame.overlays[..overlay_count]));
    copy_section(buf, layout.light_data_offset, cast_slice(&frame.lights[..light_count]));
}

fn copy_section(buf: &mut [f32], offset: usize, data: &[f32]) {
    buf[offset..offset + data.len()].copy_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(instances: &'a [RenderInstance], overlays: &'a [OverlayState], lights: &'a [PointLight]) -> FrameView<'a> {
        FrameView {
            frame: 7,
            camera: crate::renderer::camera::PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0).uniform(),
            instances,
            transparent_split: 1,
            overlays,
            lights,
            ambient: [0.0; 3],
            viewport: Viewport::default(),
            background: Some(TextureId(0)),
        }
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 10, 4);
        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS + 20);
        assert_eq!(layout.overlay_data_offset, layout.instance_data_offset + 100 * 24);
        assert_eq!(layout.light_data_offset, layout.overlay_data_offset + 10 * 2);
        assert_eq!(layout.buffer_total_floats, layout.light_data_offset + 4 * 8);
        assert_eq!(layout.buffer_total_bytes(), layout.buffer_total_floats * 4);
    }

    #[test]
    fn from_default_config() {
        let config = DemoConfig::default();
        let layout = ProtocolLayout::from_config(&config);
        assert_eq!(layout.max_instances, config.max_instances);
        assert_eq!(layout.max_overlays, config.max_overlays);
    }

    #[test]
    fn write_frame_fills_header_and_sections() {
        let layout = ProtocolLayout::new(4, 2, 1);
        let instances = [RenderInstance::default(), RenderInstance::default()];
        let overlays = [OverlayState::new(350.0, 0.5)];
        let lights = [PointLight::new(glam::Vec3::new(0.0, -5.0, 7.0), [1.0; 3], 2.0)];

        let mut buf = Vec::new();
        write_frame(&layout, &view(&instances, &overlays, &lights), &mut buf);

        assert_eq!(buf.len(), layout.buffer_total_floats);
        assert_eq!(buf[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(buf[HEADER_INSTANCE_COUNT], 2.0);
        assert_eq!(buf[HEADER_TRANSPARENT_SPLIT], 1.0);
        assert_eq!(buf[HEADER_OVERLAY_COUNT], 1.0);
        assert_eq!(buf[HEADER_BACKGROUND_TEXTURE], 0.0);
        assert_eq!(buf[layout.overlay_data_offset], 350.0);
        assert_eq!(buf[layout.overlay_data_offset + 1], 0.5);
        assert_eq!(buf[layout.light_data_offset + 1], -5.0);
    }

    #[test]
    fn write_frame_truncates_past_capacity() {
        let layout = ProtocolLayout::new(1, 0, 0);
        let instances = [RenderInstance::default(); 3];
        let overlays = [OverlayState::default()];
        let mut buf = Vec::new();
        write_frame(&layout, &view(&instances, &overlays, &[]), &mut buf);
        assert_eq!(buf[HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(buf[HEADER_OVERLAY_COUNT], 0.0);
        assert_eq!(buf[HEADER_TRANSPARENT_SPLIT], 1.0);
    }
}
