use crate::config::ConfigError;
use crate::decode::DecodeError;
use thiserror::Error;

/// Top-level error type for the cfgpath library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}
