use serde::{Deserialize, Serialize};
use crate::error::{EngineError, Result};

/// Texture manifest: every image the host should fetch, keyed by name.
/// Exchanged with the host as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureManifest {
    pub textures: Vec<TextureDescriptor>,
}

/// One image file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Name demo code refers to (e.g., "earth_normal_map").
    pub name: String,
    /// URL path the host loads (e.g., "/textures/earth_normal_map.png").
    pub path: String,
}

impl TextureManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(EngineError::Manifest)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(EngineError::Manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "textures": [
                { "name": "space", "path": "/textures/space.jpg" },
                { "name": "earth_normal_map", "path": "/textures/earth_normal_map.png" }
            ]
        }"#;
        let manifest = TextureManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures.len(), 2);
        assert_eq!(manifest.textures[1].path, "/textures/earth_normal_map.png");
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let err = TextureManifest::from_json(r#"{ "textures": 3 }"#);
        assert!(matches!(err, Err(EngineError::Manifest(_))));
    }
}
