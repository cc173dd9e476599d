//! Error types for transport and switch control

use hsw_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can surface from switch operations and construction
///
/// Network-level failures are deliberately absent: the transport absorbs
/// them (see [`Device::process`](crate::Device::process)), because a
/// non-responding device is normal operation for this protocol.
#[derive(Debug, Error)]
pub enum SwitchError {
    /// Protocol-level validation failure
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Source number cannot be represented as a protocol data byte
    #[error("source {0} cannot be encoded as a data byte")]
    InvalidSource(i32),

    /// URL could not be parsed
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// URL parsed but names a scheme/protocol pair we do not speak
    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),
}
