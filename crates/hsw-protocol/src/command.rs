//! Hex protocol command ids
//!
//! The command set is taken from TESmart's published protocol notes.
//! The id space is a full byte; ids outside this enumeration are legal on
//! the wire and must be representable (see [`Instruction`]), they are
//! just not ones this library knows how to interpret.
//!
//! [`Instruction`]: crate::instruction::Instruction

/// Known Hex protocol command ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Command {
    /// Synthesized when the device closes the connection without answering
    NullResponse = 0,
    /// Select the active video input (data = 1-indexed input number)
    SwitchVideo = 1,
    /// Enable or disable the buzzer (data = 1 enables, 0 disables)
    MuteBuzzer = 2,
    /// Set the front-panel LED timeout (data = seconds: 0, 10 or 30)
    LedTimeoutSeconds = 3,
    /// Ask the device which input is active
    QueryActiveInput = 16,
    /// Device report of the active input (data = 0-indexed input number)
    CurrentActiveInput = 17,
    /// Enable or disable automatic input detection (data = 1 or 0)
    EnableInputDetection = 129,
}

impl Command {
    /// Look up a command by its wire id
    pub fn from_id(id: u8) -> Option<Command> {
        match id {
            0 => Some(Self::NullResponse),
            1 => Some(Self::SwitchVideo),
            2 => Some(Self::MuteBuzzer),
            3 => Some(Self::LedTimeoutSeconds),
            16 => Some(Self::QueryActiveInput),
            17 => Some(Self::CurrentActiveInput),
            129 => Some(Self::EnableInputDetection),
            _ => None,
        }
    }

    /// Returns whether an id belongs to the known command set
    pub fn is_supported(id: u8) -> bool {
        Self::from_id(id).is_some()
    }

    /// Wire id of this command
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Symbolic name, as used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::NullResponse => "NULL_RESPONSE",
            Self::SwitchVideo => "SWITCH_VIDEO",
            Self::MuteBuzzer => "MUTE_BUZZER",
            Self::LedTimeoutSeconds => "LED_TIMEOUT_SECONDS",
            Self::QueryActiveInput => "QUERY_ACTIVE_INPUT",
            Self::CurrentActiveInput => "CURRENT_ACTIVE_INPUT",
            Self::EnableInputDetection => "ENABLE_INPUT_DETECTION",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Command;

    const KNOWN_IDS: [u8; 7] = [0, 1, 2, 3, 16, 17, 129];

    #[test]
    fn test_is_supported_for_known_ids() {
        for id in KNOWN_IDS {
            assert!(Command::is_supported(id), "id {} should be supported", id);
        }
    }

    #[test]
    fn test_is_supported_false_for_unknown_ids() {
        for id in 0u8..=255 {
            if !KNOWN_IDS.contains(&id) {
                assert!(!Command::is_supported(id), "id {} should be unknown", id);
            }
        }
        assert!(!Command::is_supported(64));
    }

    #[test]
    fn test_from_id_roundtrips_discriminant() {
        for id in KNOWN_IDS {
            let cmd = Command::from_id(id).unwrap();
            assert_eq!(cmd.id(), id);
        }
    }

    #[test]
    fn test_names_match_protocol_notes() {
        assert_eq!(Command::QueryActiveInput.name(), "QUERY_ACTIVE_INPUT");
        assert_eq!(Command::CurrentActiveInput.name(), "CURRENT_ACTIVE_INPUT");
    }
}
