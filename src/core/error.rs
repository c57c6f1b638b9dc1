use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalaxyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Image service error: {0}")]
    ImageService(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GalaxyError>;
