//! Error types for the session engine.
//!
//! This module defines error types for transport-level failures,
//! malformed inbound lines, and configuration loading.

use thiserror::Error;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Line exceeded maximum allowed length.
    #[error("message too long: {0} bytes")]
    MessageTooLong(usize),

    /// Illegal control character in a line.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),

    /// Failed to parse an IRC line.
    #[error("invalid message: {string}")]
    InvalidMessage {
        /// The raw line.
        string: String,
        /// The underlying parse error.
        #[source]
        cause: MessageParseError,
    },
}

/// Errors encountered when parsing IRC lines.
///
/// Every variant means the line is malformed: the caller drops it and
/// keeps the session running.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty.
    #[error("empty message")]
    EmptyMessage,

    /// Line carried a prefix but nothing after it.
    #[error("missing command after prefix")]
    MissingCommand,

    /// Command token was empty or not alphanumeric.
    #[error("invalid command")]
    InvalidCommand,
}

/// Errors raised while loading a [`Config`](crate::config::Config).
#[cfg(feature = "client")]
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`Config`](crate::config::Config).
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}
