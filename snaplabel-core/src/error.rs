use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnaplabelError {
    #[error("Upload of {key} failed: {message}")]
    Upload { key: String, message: String },

    #[error("Label detection for {key} failed: {message}")]
    Detection { key: String, message: String },

    #[error("Write to table {table} failed: {message}")]
    Persist { table: String, message: String },

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SnaplabelError {
    /// Pipeline step this error belongs to, for logs and run summaries.
    pub fn step(&self) -> &'static str {
        match self {
            SnaplabelError::Upload { .. } => "upload",
            SnaplabelError::Detection { .. } => "detect",
            SnaplabelError::Persist { .. } | SnaplabelError::Serialization(_) => "persist",
            SnaplabelError::Config(_) | SnaplabelError::InvalidConfig(_) => "config",
            SnaplabelError::Io(_) => "read",
        }
    }
}
