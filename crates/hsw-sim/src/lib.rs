//! Simulated Hex protocol switch
//!
//! Provides a protocol-accurate stand-in for a real HDMI switch:
//! [`VirtualSwitch`] is the in-memory state machine, [`SimServer`] puts
//! it behind a loopback TCP listener so transport code can be exercised
//! end to end, including the hardware's less convenient habits (silence,
//! chunked frames, abrupt hangups).

pub mod server;
pub mod switch;

pub use server::{ServerBehavior, SimServer};
pub use switch::{VirtualSwitch, VirtualSwitchConfig};
