use std::collections::HashMap;
use crate::api::types::TextureId;
use crate::assets::manifest::{TextureDescriptor, TextureManifest};
use crate::error::{EngineError, Result};

#[derive(Debug, Clone)]
struct TextureEntry {
    name: String,
    path: String,
    loaded: bool,
}

/// Registry of named textures and their host load status.
/// Loading happens on the host; Rust only learns when an image is ready.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    by_name: HashMap<String, TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: &TextureManifest) -> Self {
        let mut reg = Self::new();
        for desc in &manifest.textures {
            reg.register(desc.name.clone(), desc.path.clone());
        }
        reg
    }

    /// Register a texture. Registering an existing name returns its id and
    /// keeps the first path.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<String>) -> TextureId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = TextureId(self.entries.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.entries.push(TextureEntry {
            name,
            path: path.into(),
            loaded: false,
        });
        id
    }

    pub fn get(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Like `get`, but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<TextureId> {
        self.get(name)
            .ok_or_else(|| EngineError::UnknownTexture(name.to_string()))
    }

    pub fn path(&self, id: TextureId) -> Option<&str> {
        self.entries.get(id.0 as usize).map(|e| e.path.as_str())
    }

    pub fn mark_loaded(&mut self, id: TextureId) {
        if let Some(entry) = self.entries.get_mut(id.0 as usize) {
            entry.loaded = true;
        }
    }

    /// Mark a texture loaded by name (host callbacks only know names).
    pub fn mark_loaded_by_name(&mut self, name: &str) -> Result<TextureId> {
        let id = self.require(name)?;
        self.mark_loaded(id);
        Ok(id)
    }

    pub fn is_loaded(&self, id: TextureId) -> bool {
        self.entries.get(id.0 as usize).is_some_and(|e| e.loaded)
    }

    pub fn loaded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.loaded).count()
    }

    /// Manifest of everything registered, in registration order.
    pub fn manifest(&self) -> TextureManifest {
        TextureManifest {
            textures: self
                .entries
                .iter()
                .map(|e| TextureDescriptor {
                    name: e.name.clone(),
                    path: e.path.clone(),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
