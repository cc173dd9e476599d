//! Instruction value type
//!
//! An [`Instruction`] is one Hex protocol message: a command id plus a
//! single data byte. It is transport-independent; encoding to and from
//! the 6-byte wire frame lives in [`codec`](crate::codec).

use std::fmt;

use crate::command::Command;
use crate::error::ProtocolError;
use crate::{FRAME_FOOTER, FRAME_HEADER, FRAME_LEN};

/// Highest accepted data value. Reference implementations of the
/// protocol validate against an exclusive upper bound of 255, so the
/// literal value 255 is rejected even though it fits in the byte; we
/// match that boundary.
pub const DATA_VALUE_MAX: u8 = 254;

/// One fully-formed Hex protocol instruction
///
/// The id may be any byte. Ids outside the known [`Command`] set are
/// carried verbatim and reported as unsupported rather than rejected;
/// devices are free to send them and we want to log them faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    id: u8,
    data_value: u8,
}

/// Name reported for ids outside the known command set
pub const UNSUPPORTED_COMMAND_NAME: &str = "UNSUPPORTED";

impl Instruction {
    /// Create an instruction with a data value of zero
    pub fn new(id: impl Into<u8>) -> Self {
        Self {
            id: id.into(),
            data_value: 0,
        }
    }

    /// Create an instruction carrying a data value
    ///
    /// Fails with [`ProtocolError::InvalidDataValue`] when the value is
    /// above [`DATA_VALUE_MAX`].
    pub fn with_value(id: impl Into<u8>, data_value: u8) -> Result<Self, ProtocolError> {
        if data_value > DATA_VALUE_MAX {
            return Err(ProtocolError::InvalidDataValue { value: data_value });
        }
        Ok(Self {
            id: id.into(),
            data_value,
        })
    }

    /// Wire id of this instruction
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Data byte carried by this instruction
    pub fn data_value(&self) -> u8 {
        self.data_value
    }

    /// The known command this id maps to, if any
    pub fn command(&self) -> Option<Command> {
        Command::from_id(self.id)
    }

    /// Symbolic command name, or `"UNSUPPORTED"` for unknown ids
    pub fn name(&self) -> &'static str {
        match self.command() {
            Some(cmd) => cmd.name(),
            None => UNSUPPORTED_COMMAND_NAME,
        }
    }

    /// Returns whether the id belongs to the known command set
    pub fn is_supported(&self) -> bool {
        self.command().is_some()
    }

    /// The 6-byte wire frame for this instruction
    pub fn frame(&self) -> [u8; FRAME_LEN] {
        [
            FRAME_HEADER[0],
            FRAME_HEADER[1],
            FRAME_HEADER[2],
            self.id,
            self.data_value,
            FRAME_FOOTER,
        ]
    }
}

impl From<Command> for Instruction {
    fn from(cmd: Command) -> Self {
        Self::new(cmd)
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        cmd.id()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, data {})", self.name(), self.id, self.data_value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Instruction, DATA_VALUE_MAX, UNSUPPORTED_COMMAND_NAME};
    use crate::command::Command;
    use crate::error::ProtocolError;

    #[test]
    fn test_new_defaults_data_to_zero() {
        let ins = Instruction::new(Command::QueryActiveInput);
        assert_eq!(ins.id(), 16);
        assert_eq!(ins.data_value(), 0);
    }

    #[test]
    fn test_name_for_supported_command() {
        let ins = Instruction::new(Command::MuteBuzzer);
        assert_eq!(ins.name(), "MUTE_BUZZER");
        assert!(ins.is_supported());
    }

    #[test]
    fn test_name_for_unsupported_id() {
        let ins = Instruction::new(64u8);
        assert_eq!(ins.name(), UNSUPPORTED_COMMAND_NAME);
        assert_eq!(ins.id(), 64);
        assert!(!ins.is_supported());
        assert_eq!(ins.command(), None);
    }

    #[test]
    fn test_with_value_accepts_boundary_values() {
        assert!(Instruction::with_value(Command::SwitchVideo, 0).is_ok());
        assert!(Instruction::with_value(Command::SwitchVideo, DATA_VALUE_MAX).is_ok());
    }

    #[test]
    fn test_with_value_rejects_255() {
        // The upper bound is exclusive: 255 fits in the byte but is not
        // accepted, matching the protocol's reference tooling.
        let err = Instruction::with_value(Command::SwitchVideo, 255).unwrap_err();
        assert_eq!(err, ProtocolError::InvalidDataValue { value: 255 });
    }

    #[test]
    fn test_frame_layout() {
        let ins = Instruction::with_value(Command::SwitchVideo, 7).unwrap();
        assert_eq!(ins.frame(), [0xAA, 0xBB, 0x03, 0x01, 0x07, 0xEE]);
    }

    #[test]
    fn test_equality_is_structural() {
        let a = Instruction::with_value(Command::CurrentActiveInput, 3).unwrap();
        let b = Instruction::with_value(17u8, 3).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Instruction::new(Command::CurrentActiveInput));
    }

    #[test]
    fn test_display_names_unknown_ids() {
        let ins = Instruction::new(200u8);
        assert_eq!(ins.to_string(), "UNSUPPORTED(200, data 0)");
    }
}
