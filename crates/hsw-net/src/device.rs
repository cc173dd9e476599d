//! TCP transport for Hex protocol devices
//!
//! A [`TcpDevice`] executes a batch of instructions against one physical
//! switch over one TCP connection and hands back whatever responses
//! arrived. Communication failures never surface to the caller: the
//! hardware omits responses by protocol design, so a missing answer is a
//! normal outcome, not an error. Failures go to the log instead, and the
//! caller simply receives fewer results.

use std::io::{self, ErrorKind, Read, Write};
use std::net::TcpStream;

use hsw_protocol::{codec, Command, Instruction, ProtocolError, FRAME_LEN};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::endpoint::TcpEndpoint;

/// Transport seam for anything that can execute Hex instructions
///
/// Object-safe so the state machine can run against a scripted fake in
/// tests as well as a live [`TcpDevice`].
pub trait Device {
    /// Execute instructions in order and return all decoded responses
    ///
    /// Responses are flattened across the batch; each instruction yields
    /// zero or one response. Transport failures are logged, never
    /// returned.
    fn process(&mut self, instructions: &[Instruction]) -> Vec<Instruction>;
}

/// Errors internal to one request/response exchange
///
/// These never escape [`TcpDevice::process`]; they exist so the
/// exchange path can use `?` and the batch loop can decide what is
/// fatal.
#[derive(Debug, Error)]
enum ExchangeError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// TCP transport bound to one endpoint
///
/// Opens a fresh connection per [`process`](Device::process) call; all
/// instructions in the batch share it, and it is dropped on every exit
/// path.
#[derive(Debug)]
pub struct TcpDevice {
    endpoint: TcpEndpoint,
}

impl TcpDevice {
    /// Create a transport for the given endpoint
    pub fn new(endpoint: TcpEndpoint) -> Self {
        Self { endpoint }
    }

    /// The endpoint this transport connects to
    pub fn endpoint(&self) -> &TcpEndpoint {
        &self.endpoint
    }

    fn connect(&self) -> io::Result<TcpStream> {
        let stream = TcpStream::connect((self.endpoint.host(), self.endpoint.port()))?;
        stream.set_read_timeout(self.endpoint.timeout())?;
        Ok(stream)
    }
}

impl Device for TcpDevice {
    fn process(&mut self, instructions: &[Instruction]) -> Vec<Instruction> {
        let mut results = Vec::new();

        let mut stream = match self.connect() {
            Ok(stream) => stream,
            Err(e) => {
                error!("failed communicating with device: {e}");
                return results;
            }
        };

        for instruction in instructions {
            match exchange(&mut stream, instruction) {
                Ok(Some(response)) => results.push(response),
                Ok(None) => {}
                Err(e) => {
                    error!("failed communicating with device: {e}");
                    break;
                }
            }
        }

        // Dropping the stream closes the connection
        results
    }
}

/// Write one instruction and wait for its (optional) response frame
///
/// `Ok(None)` means the read timed out, which the hardware does on
/// purpose for most commands. A zero-length read means the device closed
/// the connection; that is reported as a synthesized
/// [`Command::NullResponse`] so callers can tell silence from a hangup.
fn exchange(
    stream: &mut TcpStream,
    instruction: &Instruction,
) -> Result<Option<Instruction>, ExchangeError> {
    let request = codec::encode(instruction);
    debug!(instruction = %instruction, "sending frame");
    stream.write_all(&request)?;
    stream.flush()?;

    // The device may deliver the frame in multiple chunks.
    let mut frame = [0u8; FRAME_LEN];
    let mut filled = 0;
    while filled < FRAME_LEN {
        match stream.read(&mut frame[filled..]) {
            Ok(0) => {
                debug!("connection closed by device before a full frame arrived");
                return Ok(Some(Instruction::new(Command::NullResponse)));
            }
            Ok(n) => filled += n,
            Err(e) if is_timeout(&e) => {
                info!("timed out waiting for response; the device does not always send one");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let response = codec::decode(&frame)?;
    debug!(response = %response, "received frame");
    Ok(Some(response))
}

// Read timeouts on TCP sockets surface as WouldBlock on Unix and
// TimedOut on Windows.
fn is_timeout(err: &io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
