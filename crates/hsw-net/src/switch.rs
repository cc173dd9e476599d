//! Media switch state machine
//!
//! [`HexMediaSwitch`] owns the observable state of one switch and
//! translates high-level operations into Hex instructions. State is only
//! ever updated by folding device responses back in; sending a request
//! changes nothing on its own, because the hardware is free to ignore
//! it.

use hsw_protocol::{Command, Instruction};
use tracing::info;

use crate::device::Device;
use crate::error::SwitchError;

/// Highest input number any supported device has
pub const MAX_SUPPORTED_INPUTS: u8 = 16;

/// LED timeouts the hardware accepts, in seconds
pub const VALID_LED_TIMEOUTS: [u8; 3] = [0, 10, 30];

/// A multi-input, single-output media switch (e.g. a 16x1 HDMI switch)
///
/// One concrete implementation exists per protocol family; callers that
/// hold a `Box<dyn MediaSwitch>` are insulated from the wire protocol in
/// use.
pub trait MediaSwitch {
    /// Select the specified video input (1-indexed)
    ///
    /// Out-of-range values are clamped: below 1 becomes 1, above the
    /// known input count becomes the input count. When the input count
    /// is unknown only the lower clamp applies.
    fn select_source(&mut self, input: i32) -> Result<(), SwitchError>;

    /// Enable or disable buzzer muting
    fn set_buzzer_muting(&mut self, mute_buzzer: bool) -> Result<(), SwitchError>;

    /// Set the front-panel LED timeout; values other than 0, 10 or 30
    /// seconds are replaced with 0
    fn set_led_timeout_seconds(&mut self, led_timeout_seconds: u8) -> Result<(), SwitchError>;

    /// Enable or disable automatic input detection
    fn set_auto_input_detection(&mut self, enable: bool) -> Result<(), SwitchError>;

    /// Refresh state from the device
    fn update(&mut self) -> Result<(), SwitchError>;

    /// Input number of the selected source (0 = unknown)
    fn selected_source(&self) -> u8;

    /// Number of inputs the switch has (0 = not determined)
    fn input_count(&self) -> u8;

    /// Number of outputs the switch has
    fn output_count(&self) -> u8;
}

impl std::fmt::Debug for dyn MediaSwitch + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaSwitch")
            .field("selected_source", &self.selected_source())
            .field("input_count", &self.input_count())
            .field("output_count", &self.output_count())
            .finish()
    }
}

/// Hex-over-TCP implementation of [`MediaSwitch`]
///
/// Construction performs an initial state refresh followed by input
/// count discovery, so building one issues real traffic and takes up to
/// one timeout per unanswered probe.
pub struct HexMediaSwitch<D> {
    device: D,
    selected_source: u8,
    input_count: u8,
    output_count: u8,
}

impl<D: Device> HexMediaSwitch<D> {
    /// Build a switch over the given transport and learn its state
    pub fn new(device: D) -> Result<Self, SwitchError> {
        let mut switch = Self {
            device,
            selected_source: 0,
            input_count: 0,
            // Matrix switches not currently supported
            output_count: 1,
        };
        switch.update()?;
        switch.discover_input_count()?;
        Ok(switch)
    }

    fn process(&mut self, instructions: &[Instruction]) {
        let results = self.device.process(instructions);
        self.fold_responses(&results);
    }

    /// Fold device responses into state, later responses winning
    fn fold_responses(&mut self, responses: &[Instruction]) {
        for response in responses {
            match response.command() {
                Some(Command::CurrentActiveInput) => {
                    // Data values are capped at 254, so this cannot wrap.
                    self.selected_source = response.data_value() + 1;
                }
                _ => info!(instruction = %response, "discarded instruction"),
            }
        }
    }

    /// Probe for the highest valid input number
    ///
    /// Devices clamp out-of-range selections internally and either stay
    /// silent or echo the clamped value, so probing downward from the
    /// maximum means the first confirmed echo is the true input count.
    /// A device that never answers leaves the count at 0.
    fn discover_input_count(&mut self) -> Result<(), SwitchError> {
        let previous = self.selected_source;
        self.selected_source = 0;

        for candidate in (1..=MAX_SUPPORTED_INPUTS).rev() {
            self.select_source(i32::from(candidate))?;
            if self.selected_source != 0 {
                self.input_count = self.selected_source;
                break;
            }
        }

        self.select_source(i32::from(previous))
    }

    fn clamp_source(&self, input: i32) -> i32 {
        let mut normalized = input.max(1);
        if self.input_count > 0 {
            normalized = normalized.min(i32::from(self.input_count));
        }
        normalized
    }
}

impl<D: Device> MediaSwitch for HexMediaSwitch<D> {
    fn select_source(&mut self, input: i32) -> Result<(), SwitchError> {
        let normalized = self.clamp_source(input);
        let data = u8::try_from(normalized).map_err(|_| SwitchError::InvalidSource(input))?;
        let instruction = Instruction::with_value(Command::SwitchVideo, data)?;
        self.process(&[instruction]);
        Ok(())
    }

    fn set_buzzer_muting(&mut self, mute_buzzer: bool) -> Result<(), SwitchError> {
        // The data byte means "buzzer enabled", so muting inverts.
        let instruction = Instruction::with_value(Command::MuteBuzzer, u8::from(!mute_buzzer))?;
        self.process(&[instruction]);
        Ok(())
    }

    fn set_led_timeout_seconds(&mut self, led_timeout_seconds: u8) -> Result<(), SwitchError> {
        let normalized = if VALID_LED_TIMEOUTS.contains(&led_timeout_seconds) {
            led_timeout_seconds
        } else {
            0
        };
        let instruction = Instruction::with_value(Command::LedTimeoutSeconds, normalized)?;
        self.process(&[instruction]);
        Ok(())
    }

    fn set_auto_input_detection(&mut self, enable: bool) -> Result<(), SwitchError> {
        let instruction =
            Instruction::with_value(Command::EnableInputDetection, u8::from(enable))?;
        self.process(&[instruction]);
        Ok(())
    }

    fn update(&mut self) -> Result<(), SwitchError> {
        self.process(&[Instruction::new(Command::QueryActiveInput)]);
        Ok(())
    }

    fn selected_source(&self) -> u8 {
        self.selected_source
    }

    fn input_count(&self) -> u8 {
        self.input_count
    }

    fn output_count(&self) -> u8 {
        self.output_count
    }
}
