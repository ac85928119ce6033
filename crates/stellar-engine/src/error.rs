use thiserror::Error;

/// Errors surfaced by fallible engine seams (config, manifests, scene setup).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid demo config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("invalid texture manifest: {0}")]
    Manifest(#[source] serde_json::Error),

    #[error("an object named `{0}` already exists in the scene")]
    DuplicateName(String),

    #[error("unknown texture `{0}`")]
    UnknownTexture(String),

    #[error("unknown overlay selector `{0}`")]
    UnknownOverlay(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
