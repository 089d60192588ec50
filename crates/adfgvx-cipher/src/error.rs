//! Errors of the end-to-end cipher.

use std::{io, path::PathBuf};

use adfgvx_core::ConfigError;
use adfgvx_stream::StreamError;
use adfgvx_transposition::TranspositionError;

use crate::TextEncoding;

/// Errors raised while building a [`Cipher`](crate::Cipher) or running it.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CipherError {
    /// The alphabet, password or code symbols are invalid.
    #[display("invalid configuration: {_0}")]
    Config(#[from] ConfigError),
    /// The transposition passwords are invalid.
    #[display("invalid transposition: {_0}")]
    Transposition(#[from] TranspositionError),
    /// The text could not be streamed through the pipeline.
    #[display("malformed text: {_0}")]
    Stream(#[from] StreamError),
    /// The input exceeds the configured size limit.
    #[display("input of {size} bytes exceeds the limit of {limit} bytes")]
    #[from(ignore)]
    InputTooLarge {
        /// Size of the input in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
    /// The input bytes are not valid in the detected encoding.
    #[display("input is not valid {encoding}")]
    #[from(ignore)]
    Decode {
        /// Encoding the input was decoded as.
        encoding: TextEncoding,
    },
    /// A file could not be read or written.
    #[display("failed to {operation} {}: {source}", path.display())]
    #[from(ignore)]
    Io {
        /// What was being done, e.g. `"read"`.
        operation: &'static str,
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// A settings file is not valid JSON for [`CipherSettings`](crate::CipherSettings).
    #[display("invalid settings file {}: {source}", path.display())]
    #[from(ignore)]
    Settings {
        /// The settings file.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },
}

impl CipherError {
    /// Wraps an I/O error with the operation and path it occurred on.
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
