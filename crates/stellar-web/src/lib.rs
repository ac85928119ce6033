pub mod runner;

pub use runner::DemoRunner;
pub use js_sys;
pub use stellar_engine;

/// Generate all `#[wasm_bindgen]` exports for a demo.
///
/// Generates:
/// - `thread_local!` storage for the DemoRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (lifecycle, tick, input handlers, asset and
///   overlay binding, frame buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyDemo;
///
/// stellar_web::export_demo!(MyDemo, "my-demo");
/// ```
///
/// # Arguments
///
/// - `$demo_type`: The demo struct type that implements `stellar_engine::Demo`
///   and has a `new()` constructor
/// - `$demo_name`: A string literal used in the initialization log message
///
/// # Host boot order
///
/// 1. `demo_init()` or `demo_init_with_config(json)`
/// 2. load every texture from `demo_texture_manifest()`, calling
///    `demo_texture_loaded(name)` as each one arrives
/// 3. for each of `demo_overlay_selectors()` found in the page,
///    `demo_bind_overlay(selector, offset_x, opacity)`, then
///    `demo_overlays_ready()`
/// 4. `demo_start()`, then `demo_tick(dt)` from `requestAnimationFrame`
#[macro_export]
macro_rules! export_demo {
    ($demo_type:ty, $demo_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::DemoRunner<$demo_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::DemoRunner<$demo_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Demo not initialized. Call demo_init() first.");
                f(runner)
            })
        }

        fn install_runner(runner: $crate::DemoRunner<$demo_type>) {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            with_runner(|r| r.init());
            log::info!("{}: initialized", $demo_name);
        }

        #[wasm_bindgen]
        pub fn demo_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            install_runner($crate::DemoRunner::new(<$demo_type>::new()));
        }

        #[wasm_bindgen]
        pub fn demo_init_with_config(json: &str) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            install_runner($crate::DemoRunner::from_json(<$demo_type>::new(), json));
        }

        // ---- Lifecycle ----

        #[wasm_bindgen]
        pub fn demo_start() -> bool {
            with_runner(|r| r.start())
        }

        #[wasm_bindgen]
        pub fn demo_stop() -> bool {
            with_runner(|r| r.stop())
        }

        #[wasm_bindgen]
        pub fn demo_is_running() -> bool {
            with_runner(|r| r.is_running())
        }

        /// Returns false when the loop is stopped; the host should stop
        /// requesting frames.
        #[wasm_bindgen]
        pub fn demo_tick(dt: f32) -> bool {
            with_runner(|r| r.tick(dt))
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn demo_pointer_move(x: f32, y: f32) {
            with_runner(|r| {
                r.push_input($crate::stellar_engine::InputEvent::PointerMove { x, y })
            });
        }

        #[wasm_bindgen]
        pub fn demo_resize(width: f32, height: f32, device_pixel_ratio: f32) {
            with_runner(|r| {
                r.push_input($crate::stellar_engine::InputEvent::Resize {
                    width,
                    height,
                    device_pixel_ratio,
                })
            });
        }

        #[wasm_bindgen]
        pub fn demo_scroll(top: f32) {
            with_runner(|r| r.push_input($crate::stellar_engine::InputEvent::Scroll { top }));
        }

        // ---- Assets ----

        #[wasm_bindgen]
        pub fn demo_texture_manifest() -> String {
            with_runner(|r| r.texture_manifest_json())
        }

        #[wasm_bindgen]
        pub fn demo_texture_paths() -> $crate::js_sys::Array {
            with_runner(|r| {
                r.texture_paths()
                    .iter()
                    .map(|p| wasm_bindgen::JsValue::from_str(p))
                    .collect()
            })
        }

        #[wasm_bindgen]
        pub fn demo_texture_loaded(name: &str) -> bool {
            with_runner(|r| r.texture_loaded(name))
        }

        // ---- Overlays ----

        #[wasm_bindgen]
        pub fn demo_overlay_selectors() -> $crate::js_sys::Array {
            with_runner(|r| {
                r.overlay_selectors()
                    .iter()
                    .map(|s| wasm_bindgen::JsValue::from_str(s))
                    .collect()
            })
        }

        #[wasm_bindgen]
        pub fn demo_bind_overlay(selector: &str, offset_x: f32, opacity: f32) -> u32 {
            with_runner(|r| r.bind_overlay(selector, offset_x, opacity))
        }

        #[wasm_bindgen]
        pub fn demo_overlays_ready() {
            with_runner(|r| r.overlays_ready());
        }

        // ---- Frame buffer accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.frame_len())
        }

        #[wasm_bindgen]
        pub fn get_frame_count() -> u32 {
            with_runner(|r| r.frame_count())
        }

        #[wasm_bindgen]
        pub fn get_elapsed() -> f32 {
            with_runner(|r| r.elapsed())
        }

        #[wasm_bindgen]
        pub fn get_camera_offset() -> u32 {
            with_runner(|r| r.layout().camera_offset as u32)
        }

        #[wasm_bindgen]
        pub fn get_instance_data_offset() -> u32 {
            with_runner(|r| r.layout().instance_data_offset as u32)
        }

        #[wasm_bindgen]
        pub fn get_overlay_data_offset() -> u32 {
            with_runner(|r| r.layout().overlay_data_offset as u32)
        }

        #[wasm_bindgen]
        pub fn get_light_data_offset() -> u32 {
            with_runner(|r| r.layout().light_data_offset as u32)
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_transparent_split() -> u32 {
            with_runner(|r| r.transparent_split())
        }

        #[wasm_bindgen]
        pub fn get_overlay_count() -> u32 {
            with_runner(|r| r.context().overlays.len() as u32)
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.context().lights.count() as u32)
        }

        // ---- Viewport accessors ----

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(|r| r.context().viewport.width)
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(|r| r.context().viewport.height)
        }

        #[wasm_bindgen]
        pub fn get_pixel_ratio() -> f32 {
            with_runner(|r| r.context().viewport.pixel_ratio)
        }

        /// Background texture id, or -1 when there is none.
        #[wasm_bindgen]
        pub fn get_background_texture() -> f32 {
            with_runner(|r| $crate::stellar_engine::api::types::TextureId::wire(r.context().scene.background))
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_overlays() -> u32 {
            with_runner(|r| r.max_overlays())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
