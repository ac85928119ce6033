/// Host window events the engine understands.
/// Forwarded unfiltered; no debouncing happens on either side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to client (CSS pixel) coordinates.
    PointerMove { x: f32, y: f32 },
    /// Window resized to `width` x `height` CSS pixels.
    Resize { width: f32, height: f32, device_pixel_ratio: f32 },
    /// Page scrolled; `top` is the document body's bounding-rect top
    /// (zero at rest, negative once scrolled down).
    Scroll { top: f32 },
}

/// A queue of input events.
/// JS pushes events as they fire; Rust reads them at the start of the next frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events in arrival order without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
