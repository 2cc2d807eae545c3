use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrimError {
    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Unknown parameter `{name}` for {kind}")]
    UnknownParameter { kind: &'static str, name: String },

    #[error("Parameter `{name}` expects {expected}")]
    ParameterType { name: String, expected: &'static str },

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Resource error: {0}")]
    Resource(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, PrimError>;
