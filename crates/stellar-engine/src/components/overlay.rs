//! Host-side overlay elements (DOM nodes) animated alongside the scene.
//!
//! The host resolves each selector once at startup and binds it here with its
//! current style; from then on Rust only refers to overlays by `OverlayId`.
//! Each frame the host reads the packed states back and applies them as
//! `translateX(offset_x px)` and `opacity`.

use std::collections::HashMap;
use bytemuck::{Pod, Zeroable};
use crate::api::types::OverlayId;
use crate::error::{EngineError, Result};

/// Animatable style of one overlay element.
///
/// Wire format (2 floats / 8 bytes): `[offset_x, opacity]`.
/// Opacity is not clamped; the host's CSS engine clamps on apply.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OverlayState {
    pub offset_x: f32,
    pub opacity: f32,
}

impl OverlayState {
    pub const FLOATS: usize = 2;

    pub fn new(offset_x: f32, opacity: f32) -> Self {
        Self { offset_x, opacity }
    }
}

/// Dense store of bound overlays, indexed by `OverlayId`.
#[derive(Debug, Default)]
pub struct OverlayStore {
    selectors: Vec<String>,
    states: Vec<OverlayState>,
    by_selector: HashMap<String, OverlayId>,
}

impl OverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a selector with its current style. Binding the same selector
    /// again refreshes the stored state and returns the existing handle.
    pub fn bind(&mut self, selector: impl Into<String>, initial: OverlayState) -> OverlayId {
        let selector = selector.into();
        if let Some(&id) = self.by_selector.get(&selector) {
            self.states[id.0 as usize] = initial;
            return id;
        }
        let id = OverlayId(self.states.len() as u32);
        self.by_selector.insert(selector.clone(), id);
        self.selectors.push(selector);
        self.states.push(initial);
        id
    }

    pub fn resolve(&self, selector: &str) -> Option<OverlayId> {
        self.by_selector.get(selector).copied()
    }

    /// Like `resolve`, but a missing selector is an error.
    pub fn require(&self, selector: &str) -> Result<OverlayId> {
        self.resolve(selector)
            .ok_or_else(|| EngineError::UnknownOverlay(selector.to_string()))
    }

    pub fn get(&self, id: OverlayId) -> Option<&OverlayState> {
        self.states.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut OverlayState> {
        self.states.get_mut(id.0 as usize)
    }

    pub fn selector(&self, id: OverlayId) -> Option<&str> {
        self.selectors.get(id.0 as usize).map(String::as_str)
    }

    pub fn states(&self) -> &[OverlayState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
