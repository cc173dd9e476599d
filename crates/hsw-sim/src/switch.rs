//! Virtual switch state machine

use hsw_protocol::{codec, Command, Instruction, FRAME_LEN};
use serde::{Deserialize, Serialize};

/// Configuration for creating a virtual switch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualSwitchConfig {
    /// Number of inputs the simulated hardware has
    pub input_count: u8,
    /// Input selected at power-on (1-indexed)
    pub initial_input: u8,
}

impl Default for VirtualSwitchConfig {
    fn default() -> Self {
        Self {
            input_count: 16,
            initial_input: 1,
        }
    }
}

/// A simulated Hex protocol switch
///
/// Mirrors observed hardware behavior: selecting an input in range
/// switches and echoes the new active input; selecting out of range is
/// silently ignored; querying always answers; configuration commands
/// apply and stay silent.
#[derive(Debug)]
pub struct VirtualSwitch {
    input_count: u8,
    selected_input: u8,
    buzzer_enabled: bool,
    led_timeout: u8,
    auto_detect: bool,
}

impl VirtualSwitch {
    /// Create a switch with the given number of inputs, input 1 active
    pub fn new(input_count: u8) -> Self {
        Self::from_config(VirtualSwitchConfig {
            input_count,
            ..VirtualSwitchConfig::default()
        })
    }

    /// Create a switch from configuration
    pub fn from_config(config: VirtualSwitchConfig) -> Self {
        Self {
            input_count: config.input_count,
            selected_input: config.initial_input,
            buzzer_enabled: true,
            led_timeout: 0,
            auto_detect: false,
        }
    }

    /// Currently selected input (1-indexed)
    pub fn selected_input(&self) -> u8 {
        self.selected_input
    }

    /// Number of inputs
    pub fn input_count(&self) -> u8 {
        self.input_count
    }

    /// Whether the buzzer is enabled
    pub fn buzzer_enabled(&self) -> bool {
        self.buzzer_enabled
    }

    /// Configured LED timeout in seconds
    pub fn led_timeout(&self) -> u8 {
        self.led_timeout
    }

    /// Whether automatic input detection is enabled
    pub fn auto_detect(&self) -> bool {
        self.auto_detect
    }

    /// Process one request frame, producing the response frame if the
    /// hardware would send one
    pub fn handle_frame(&mut self, frame: &[u8; FRAME_LEN]) -> Option<[u8; FRAME_LEN]> {
        let instruction = codec::decode(frame).ok()?;
        match instruction.command()? {
            Command::SwitchVideo => {
                let requested = instruction.data_value();
                if (1..=self.input_count).contains(&requested) {
                    self.selected_input = requested;
                    Some(self.active_input_frame())
                } else {
                    // Out-of-range selections are ignored without a reply
                    None
                }
            }
            Command::QueryActiveInput => Some(self.active_input_frame()),
            Command::MuteBuzzer => {
                self.buzzer_enabled = instruction.data_value() != 0;
                None
            }
            Command::LedTimeoutSeconds => {
                self.led_timeout = instruction.data_value();
                None
            }
            Command::EnableInputDetection => {
                self.auto_detect = instruction.data_value() != 0;
                None
            }
            Command::NullResponse | Command::CurrentActiveInput => None,
        }
    }

    fn active_input_frame(&self) -> [u8; FRAME_LEN] {
        // The wire reports inputs 0-indexed
        let report = Instruction::with_value(Command::CurrentActiveInput, self.selected_input - 1)
            .expect("selected input is always a valid data byte");
        codec::encode(&report)
    }
}

#[cfg(test)]
mod tests {
    use hsw_protocol::{codec, Command, Instruction};

    use super::VirtualSwitch;

    fn frame(cmd: Command, data: u8) -> [u8; 6] {
        codec::encode(&Instruction::with_value(cmd, data).unwrap())
    }

    #[test]
    fn test_query_reports_active_input_zero_indexed() {
        let mut sw = VirtualSwitch::new(16);

        let resp = sw.handle_frame(&frame(Command::QueryActiveInput, 0)).unwrap();

        assert_eq!(resp, frame(Command::CurrentActiveInput, 0));
    }

    #[test]
    fn test_switch_video_in_range_selects_and_echoes() {
        let mut sw = VirtualSwitch::new(16);

        let resp = sw.handle_frame(&frame(Command::SwitchVideo, 5)).unwrap();

        assert_eq!(sw.selected_input(), 5);
        assert_eq!(resp, frame(Command::CurrentActiveInput, 4));
    }

    #[test]
    fn test_switch_video_out_of_range_is_silent() {
        let mut sw = VirtualSwitch::new(8);

        assert_eq!(sw.handle_frame(&frame(Command::SwitchVideo, 9)), None);
        assert_eq!(sw.handle_frame(&frame(Command::SwitchVideo, 0)), None);
        assert_eq!(sw.selected_input(), 1);
    }

    #[test]
    fn test_configuration_commands_apply_silently() {
        let mut sw = VirtualSwitch::new(16);

        assert_eq!(sw.handle_frame(&frame(Command::MuteBuzzer, 0)), None);
        assert_eq!(sw.handle_frame(&frame(Command::LedTimeoutSeconds, 30)), None);
        assert_eq!(sw.handle_frame(&frame(Command::EnableInputDetection, 1)), None);

        assert!(!sw.buzzer_enabled());
        assert_eq!(sw.led_timeout(), 30);
        assert!(sw.auto_detect());
    }

    #[test]
    fn test_unknown_commands_are_ignored() {
        let mut sw = VirtualSwitch::new(16);

        assert_eq!(sw.handle_frame(&frame(Command::NullResponse, 0)), None);
        assert_eq!(
            sw.handle_frame(&codec::encode(&Instruction::new(64u8))),
            None
        );
    }
}
