use stellar_engine::{
    build_render_buffer, write_frame, Demo, DemoConfig, EngineContext, FrameLoop, FrameView,
    InputEvent, InputQueue, OverlayState, ProtocolLayout, RenderBuffer,
};

/// Generic demo runner that wires up the frame loop.
///
/// Each concrete demo creates a `thread_local!` DemoRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_demo!`), because
/// wasm-bindgen cannot export generic structs directly.
pub struct DemoRunner<D: Demo> {
    demo: D,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    frame_loop: FrameLoop,
    config: DemoConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Packed frame the host renderer reads after each tick.
    frame_buffer: Vec<f32>,
}

impl<D: Demo> DemoRunner<D> {
    pub fn new(demo: D) -> Self {
        let config = demo.config();
        Self::with_config(demo, config)
    }

    /// Build a runner whose engine config and demo settings come from a
    /// host-provided JSON document. Invalid JSON falls back to the demo's
    /// defaults.
    pub fn from_json(mut demo: D, json: &str) -> Self {
        let config = match DemoConfig::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}; using defaults", err);
                demo.config()
            }
        };
        if let Err(err) = demo.configure(json) {
            log::error!("demo settings rejected: {}", err);
        }
        Self::with_config(demo, config)
    }

    fn with_config(demo: D, config: DemoConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            demo,
            ctx: EngineContext::new(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            frame_loop: FrameLoop::new(),
            frame_buffer: vec![0.0; layout.buffer_total_floats],
            layout,
            config,
            initialized: false,
        }
    }

    /// Build the scene. Call once after construction.
    pub fn init(&mut self) {
        if let Err(err) = self.demo.init(&mut self.ctx) {
            log::error!("demo init failed: {}", err);
        }
        self.initialized = true;
        self.present();
        log::info!(
            "scene ready: {} objects, {} textures",
            self.ctx.scene.len(),
            self.ctx.textures.len()
        );
    }

    // ---- Lifecycle ----

    pub fn start(&mut self) -> bool {
        self.initialized && self.frame_loop.start()
    }

    pub fn stop(&mut self) -> bool {
        self.frame_loop.stop()
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: tweens, demo update, then presentation.
    /// Writes made by the demo's update are what the frame shows.
    /// Returns false when the loop is stopped (nothing was produced).
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.initialized {
            return false;
        }
        let Some(time) = self.frame_loop.tick(dt) else {
            return false;
        };
        self.ctx.time = time;

        self.ctx.tick_tweens();

        self.demo.update(&mut self.ctx, &self.input);
        self.input.drain();

        self.present();
        true
    }

    fn present(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &self.ctx.textures, &mut self.render_buffer);
        let view = FrameView {
            frame: self.ctx.time.frame,
            camera: self.ctx.camera.uniform(),
            instances: &self.render_buffer.instances,
            transparent_split: self.render_buffer.transparent_split,
            overlays: self.ctx.overlays.states(),
            lights: self.ctx.lights.as_slice(),
            ambient: self.ctx.lights.ambient(),
            viewport: self.ctx.viewport,
            background: self.ctx.scene.background,
        };
        write_frame(&self.layout, &view, &mut self.frame_buffer);
    }

    // ---- Assets & overlays ----

    /// Texture manifest as JSON for the host loader.
    pub fn texture_manifest_json(&self) -> String {
        match self.ctx.textures.manifest().to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("{}", err);
                String::from(r#"{"textures":[]}"#)
            }
        }
    }

    /// Host finished loading a texture. Unknown names are logged and ignored.
    pub fn texture_loaded(&mut self, name: &str) -> bool {
        match self.ctx.textures.mark_loaded_by_name(name) {
            Ok(_) => {
                log::debug!("texture `{}` loaded", name);
                true
            }
            Err(err) => {
                log::warn!("{}", err);
                false
            }
        }
    }

    /// Selectors the demo wants bound, in the order it expects them.
    pub fn overlay_selectors(&self) -> Vec<String> {
        self.demo.overlay_selectors()
    }

    /// Bind a host overlay element with its current style. Returns its index.
    pub fn bind_overlay(&mut self, selector: &str, offset_x: f32, opacity: f32) -> u32 {
        let id = self.ctx.overlays.bind(selector, OverlayState::new(offset_x, opacity));
        log::debug!("overlay `{}` bound as #{}", selector, id.0);
        id.0
    }

    /// All overlays the host could find are bound.
    pub fn overlays_ready(&mut self) {
        self.demo.overlays_bound(&mut self.ctx);
        self.present();
    }

    /// Texture paths in registration order, for hosts that skip the manifest.
    pub fn texture_paths(&self) -> Vec<String> {
        self.ctx
            .textures
            .manifest()
            .textures
            .into_iter()
            .map(|t| t.path)
            .collect()
    }

    // ---- Frame buffer accessors (read by the host via wasm_bindgen exports) ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame_buffer.len() as u32
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn transparent_split(&self) -> u32 {
        self.render_buffer.transparent_split
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_loop.frame_count() as u32
    }

    pub fn elapsed(&self) -> f32 {
        self.frame_loop.clock().elapsed()
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_overlays(&self) -> u32 {
        self.layout.max_overlays as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn demo(&self) -> &D {
        &self.demo
    }
}
