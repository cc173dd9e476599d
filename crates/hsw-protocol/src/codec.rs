//! Frame codec
//!
//! Pure conversion between an [`Instruction`] and its 6-byte wire frame.
//! Frames arrive pre-sized from the transport (which accumulates exactly
//! six bytes per response), so there is no streaming buffer here.
//!
//! Decoding reads only the command id and data bytes; the header and
//! footer bytes are not validated. Devices in the field have been seen
//! answering with stale header bytes, and the id/data pair is the only
//! part that carries meaning.

use crate::error::ProtocolError;
use crate::instruction::Instruction;
use crate::FRAME_LEN;

/// Serialize an instruction to its wire frame
pub fn encode(instruction: &Instruction) -> [u8; FRAME_LEN] {
    instruction.frame()
}

/// Decode a 6-byte frame into an instruction
///
/// Fails when `data` is not exactly six bytes, or when the data byte is
/// outside the accepted range (see [`Instruction::with_value`]).
pub fn decode(data: &[u8]) -> Result<Instruction, ProtocolError> {
    let frame: &[u8; FRAME_LEN] =
        data.try_into()
            .map_err(|_| ProtocolError::FrameLength {
                expected: FRAME_LEN,
                actual: data.len(),
            })?;
    Instruction::with_value(frame[3], frame[4])
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{decode, encode};
    use crate::command::Command;
    use crate::error::ProtocolError;
    use crate::instruction::Instruction;

    #[test]
    fn test_encode_produces_wire_bytes() {
        let ins = Instruction::new(Command::QueryActiveInput);
        assert_eq!(encode(&ins), [0xAA, 0xBB, 0x03, 0x10, 0x00, 0xEE]);
    }

    #[test]
    fn test_decode_reads_id_and_data() {
        let ins = decode(&[0xAA, 0xBB, 0x03, 0x11, 0x03, 0xEE]).unwrap();
        assert_eq!(ins, Instruction::with_value(Command::CurrentActiveInput, 3).unwrap());
    }

    #[test]
    fn test_decode_ignores_header_and_footer() {
        let ins = decode(&[0x00, 0x00, 0x00, 0x01, 0x05, 0x00]).unwrap();
        assert_eq!(ins, Instruction::with_value(Command::SwitchVideo, 5).unwrap());
    }

    #[test]
    fn test_decode_rejects_short_frames() {
        let err = decode(&[0xAA, 0xBB, 0x03]).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::FrameLength {
                expected: 6,
                actual: 3
            }
        );
    }

    #[test]
    fn test_decode_rejects_long_frames() {
        let err = decode(&[0u8; 7]).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::FrameLength {
                expected: 6,
                actual: 7
            }
        );
    }

    #[test]
    fn test_decode_rejects_out_of_range_data() {
        let err = decode(&[0xAA, 0xBB, 0x03, 0x01, 0xFF, 0xEE]).unwrap_err();
        assert_eq!(err, ProtocolError::InvalidDataValue { value: 255 });
    }

    #[test]
    fn test_decode_then_encode_returns_input() {
        let input = [0xAA, 0xBB, 0x03, 0x01, 0x01, 0xEE];
        let ins = decode(&input).unwrap();
        assert_eq!(encode(&ins), input);
    }

    proptest! {
        #[test]
        fn prop_encode_decode_roundtrip(id in 0u8..=255, data in 0u8..=254) {
            let ins = Instruction::with_value(id, data).unwrap();
            let decoded = decode(&encode(&ins)).unwrap();
            prop_assert_eq!(decoded, ins);
        }
    }
}
