//! TCP endpoint configuration

use std::time::Duration;

/// Connection target for one Hex protocol device
///
/// Immutable once built. The timeout applies to each individual read
/// while waiting for a response frame, not to connecting or to a whole
/// batch; `None` means reads block indefinitely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpEndpoint {
    host: String,
    port: u16,
    timeout: Option<Duration>,
}

impl TcpEndpoint {
    /// Port the switches listen on out of the box
    pub const DEFAULT_PORT: u16 = 5000;

    /// Default per-read timeout
    ///
    /// The hardware answers quickly when it answers at all; 250ms is
    /// generous while keeping the 16-probe discovery pass under a few
    /// seconds against a silent device.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(250);

    /// Create an endpoint with the default port and timeout
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Some(Self::DEFAULT_TIMEOUT),
        }
    }

    /// Set the TCP port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the per-read timeout; `None` blocks indefinitely
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Host name or address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Per-read timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::TcpEndpoint;

    #[test]
    fn test_defaults_applied() {
        let ep = TcpEndpoint::new("10.0.0.1");
        assert_eq!(ep.host(), "10.0.0.1");
        assert_eq!(ep.port(), TcpEndpoint::DEFAULT_PORT);
        assert_eq!(ep.timeout(), Some(TcpEndpoint::DEFAULT_TIMEOUT));
    }

    #[test]
    fn test_builders_override_defaults() {
        let ep = TcpEndpoint::new("localhost")
            .with_port(1337)
            .with_timeout(Some(Duration::from_millis(101)));
        assert_eq!(ep.port(), 1337);
        assert_eq!(ep.timeout(), Some(Duration::from_millis(101)));
    }

    #[test]
    fn test_none_timeout_means_blocking() {
        let ep = TcpEndpoint::new("localhost").with_timeout(None);
        assert_eq!(ep.timeout(), None);
    }
}
