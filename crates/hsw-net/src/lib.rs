//! Hex Protocol Switch Control
//!
//! This crate controls multi-input HDMI switches (TESmart HSW1601,
//! HSW801 and compatibles) that speak the Hex protocol over TCP. It
//! provides:
//!
//! - A synchronous TCP transport ([`TcpDevice`]) that exchanges 6-byte
//!   instruction frames with a device, tolerating partial reads and the
//!   hardware's habit of not answering at all
//! - A state machine ([`HexMediaSwitch`]) that tracks the selected
//!   source and discovers how many inputs the device has by probing
//! - URL-based construction of the whole stack
//!
//! # Example
//!
//! ```no_run
//! use hsw_net::get_media_switch;
//!
//! let mut switch = get_media_switch("10.0.0.1", None)?;
//! println!("{} inputs, input {} active", switch.input_count(), switch.selected_source());
//! switch.select_source(2)?;
//! # Ok::<(), hsw_net::SwitchError>(())
//! ```
//!
//! All I/O is blocking and runs on the calling thread; there is no
//! background refresh. Each `process` batch opens one TCP connection,
//! and each read is individually bounded by the endpoint's timeout.

pub mod device;
pub mod endpoint;
pub mod error;
pub mod switch;
pub mod url;

use std::time::Duration;

pub use device::{Device, TcpDevice};
pub use endpoint::TcpEndpoint;
pub use error::SwitchError;
pub use switch::{HexMediaSwitch, MediaSwitch, MAX_SUPPORTED_INPUTS};
pub use crate::url::{resolve_url, ResolvedUrl, PROTOCOL_HEX, SCHEME_TCP};

/// Build a media switch from a device URL
///
/// The URL takes the form `<scheme>://<host>:<port>#<protocol>` with
/// everything but the host optional; see [`resolve_url`] for the
/// defaults. Only the `tcp` scheme with the `hex` protocol is currently
/// supported.
///
/// `timeout` bounds each read while waiting for a response;
/// `None` uses [`TcpEndpoint::DEFAULT_TIMEOUT`].
///
/// Construction talks to the device: it refreshes state and runs input
/// count discovery, so expect it to block for up to one timeout per
/// unanswered probe.
pub fn get_media_switch(
    url: &str,
    timeout: Option<Duration>,
) -> Result<Box<dyn MediaSwitch>, SwitchError> {
    let resolved = resolve_url(url)?;
    if resolved.scheme != SCHEME_TCP || resolved.protocol != PROTOCOL_HEX {
        return Err(SwitchError::UnsupportedUrl(url.to_string()));
    }

    let mut endpoint = TcpEndpoint::new(resolved.host);
    if let Some(port) = resolved.port {
        endpoint = endpoint.with_port(port);
    }
    if let Some(timeout) = timeout {
        endpoint = endpoint.with_timeout(Some(timeout));
    }

    let device = TcpDevice::new(endpoint);
    let switch = HexMediaSwitch::new(device)?;
    Ok(Box::new(switch))
}
