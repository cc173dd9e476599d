//! Hex Protocol Library
//!
//! This crate provides the instruction model and frame codec for the
//! "Hex" control protocol spoken by multi-input HDMI switches such as the
//! TESmart HSW1601 and HSW801.
//!
//! The protocol is a fixed-size binary format: every message, in either
//! direction, is a single 6-byte frame:
//!
//! ```text
//! [0xAA] [0xBB] [0x03] [CMD] [DATA] [0xEE]
//! ```
//!
//! - Bytes 0-2: constant header
//! - Byte 3: command id (see [`Command`])
//! - Byte 4: data value (meaning depends on command)
//! - Byte 5: constant footer
//!
//! There is no length prefix and no checksum. Devices answer some
//! requests with a frame of the same shape and simply stay silent for
//! others; handling that silence is the transport's job, not this
//! crate's.
//!
//! # Example
//!
//! ```rust
//! use hsw_protocol::{codec, Command, Instruction};
//!
//! // Query the currently selected input
//! let query = Instruction::new(Command::QueryActiveInput);
//! assert_eq!(codec::encode(&query), [0xAA, 0xBB, 0x03, 0x10, 0x00, 0xEE]);
//!
//! // Decode the device's answer
//! let reply = codec::decode(&[0xAA, 0xBB, 0x03, 0x11, 0x03, 0xEE]).unwrap();
//! assert_eq!(reply.command(), Some(Command::CurrentActiveInput));
//! assert_eq!(reply.data_value(), 3);
//! ```

pub mod codec;
pub mod command;
pub mod error;
pub mod instruction;

pub use command::Command;
pub use error::ProtocolError;
pub use instruction::Instruction;

/// Size of every Hex protocol frame, in bytes
pub const FRAME_LEN: usize = 6;

/// Frame header bytes
pub const FRAME_HEADER: [u8; 3] = [0xAA, 0xBB, 0x03];

/// Frame footer byte
pub const FRAME_FOOTER: u8 = 0xEE;
