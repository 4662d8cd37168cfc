//! Crate-level error type.

use thiserror::Error;

use crate::config::{UnsupportedFormat, ValidationError};
use crate::encode::EncodeError;
use crate::source::SourceError;

/// Any failure while turning one image declaration into a pixel buffer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormat),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
