use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromoteError {
    #[error("invalid promotion choice '{0}': expected one of 'edge -> beta', 'beta -> candidate', 'candidate -> stable'")]
    InvalidChoice(String),

    #[error("invalid channel: {0}")]
    InvalidChannel(String),

    #[error("invalid ref name '{0}'")]
    InvalidRef(String),

    #[error("not initialized: run 'promote init'")]
    NotInitialized,

    #[error("no packages configured: add one to .promote/config.yaml or pass --package")]
    NoPackages,

    #[error("publisher program '{0}' not found on PATH")]
    PublisherNotFound(String),

    #[error("failed to spawn publisher: {0}")]
    PublisherSpawnFailed(String),

    #[error("promotion of '{package}' failed ({status}): {stderr}")]
    PublisherFailed {
        package: String,
        status: String,
        stderr: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PromoteError>;
