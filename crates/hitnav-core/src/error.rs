use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation failed: {0}")]
    Operation(String),

    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("No such transition: {0}")]
    NoSuchTransition(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
