//! Connection URL resolution
//!
//! Device locations are written as `<scheme>://<host>:<port>#<protocol>`
//! with everything but the host optional:
//!
//! - `10.0.0.1` → tcp, 10.0.0.1, 5000, hex
//! - `localhost:1337` → tcp, localhost, 1337, hex
//! - `tcp://switch.local:8080#hex` → tcp, switch.local, 8080, hex

use url::Url;

use crate::endpoint::TcpEndpoint;
use crate::error::SwitchError;

/// Scheme identifier for TCP transport
pub const SCHEME_TCP: &str = "tcp";

/// Protocol identifier for the Hex protocol
pub const PROTOCOL_HEX: &str = "hex";

const DEFAULT_HOST: &str = "localhost";

/// Connection parameters resolved from a URL, with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    /// Transport scheme (defaults to `tcp`)
    pub scheme: String,
    /// Host name or address (defaults to `localhost`)
    pub host: String,
    /// Port; defaulted for known schemes, `None` for unknown ones
    pub port: Option<u16>,
    /// Wire protocol identifier from the fragment (defaults to `hex`)
    pub protocol: String,
}

/// Parse a device URL and apply defaults
pub fn resolve_url(raw: &str) -> Result<ResolvedUrl, SwitchError> {
    // Bare `host:port` strings are not valid URLs; give them the
    // default scheme before parsing.
    let normalized = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("{SCHEME_TCP}://{raw}")
    };

    let parsed =
        Url::parse(&normalized).map_err(|e| SwitchError::InvalidUrl(format!("{raw}: {e}")))?;

    let scheme = parsed.scheme().to_string();
    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => DEFAULT_HOST.to_string(),
    };
    let port = parsed.port().or(default_port(&scheme));
    let protocol = match parsed.fragment() {
        Some(fragment) if !fragment.is_empty() => fragment.to_string(),
        _ => PROTOCOL_HEX.to_string(),
    };

    Ok(ResolvedUrl {
        scheme,
        host,
        port,
        protocol,
    })
}

fn default_port(scheme: &str) -> Option<u16> {
    if scheme == SCHEME_TCP {
        Some(TcpEndpoint::DEFAULT_PORT)
    } else {
        None
    }
}
