//! Error types for Hex protocol encoding and decoding

use thiserror::Error;

/// Errors that can occur while building or decoding instructions
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Data value outside the accepted range
    #[error("invalid data value: {value} (valid values are 0 through 254)")]
    InvalidDataValue { value: u8 },

    /// Frame is not exactly six bytes
    #[error("invalid frame length: expected {expected} bytes, got {actual}")]
    FrameLength { expected: usize, actual: usize },
}
