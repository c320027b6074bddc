use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("no API credential configured")]
    NoCredential,

    #[error("remote call failed: {0}")]
    TransportFailure(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TaskError>;
