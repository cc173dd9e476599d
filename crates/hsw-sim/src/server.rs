//! Loopback TCP server harness
//!
//! Wraps a [`VirtualSwitch`] behind a real `TcpListener` so transport
//! code can be tested over an actual socket. The behavior knob selects
//! which of the hardware's failure modes to reproduce.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use std::{fmt, io};

use hsw_protocol::{codec, Instruction, FRAME_LEN};
use tracing::debug;

use crate::switch::VirtualSwitch;

/// How the server treats incoming requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerBehavior {
    /// Answer the way the hardware does
    Respond,
    /// Answer, but deliver each response frame in two chunks with a
    /// pause between them
    RespondChunked,
    /// Apply state changes but never answer; clients will hit their
    /// read timeout
    Silent,
    /// Close the connection as soon as a request arrives
    CloseOnRead,
}

/// A [`VirtualSwitch`] served over loopback TCP
///
/// The listener accepts any number of sequential connections, matching
/// hardware that is reachable again after every hangup. Shuts down and
/// joins its service thread on drop.
pub struct SimServer {
    addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    received: Arc<Mutex<Vec<Instruction>>>,
    handle: Option<JoinHandle<()>>,
}

impl SimServer {
    /// Bind to an ephemeral loopback port and start serving
    pub fn spawn(switch: VirtualSwitch, behavior: ServerBehavior) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let shutdown = Arc::new(AtomicBool::new(false));
        let received = Arc::new(Mutex::new(Vec::new()));

        let thread_shutdown = Arc::clone(&shutdown);
        let thread_received = Arc::clone(&received);
        let handle = thread::spawn(move || {
            serve(listener, switch, behavior, thread_shutdown, thread_received);
        });

        Ok(Self {
            addr,
            shutdown,
            received,
            handle: Some(handle),
        })
    }

    /// Address the server is listening on
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Host string for building endpoints
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Port the server is listening on
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Every instruction received so far, across all connections
    pub fn received(&self) -> Vec<Instruction> {
        self.received.lock().expect("request log poisoned").clone()
    }
}

impl Drop for SimServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        // Wake the blocking accept so the thread can observe the flag
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl fmt::Debug for SimServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimServer").field("addr", &self.addr).finish()
    }
}

fn serve(
    listener: TcpListener,
    mut switch: VirtualSwitch,
    behavior: ServerBehavior,
    shutdown: Arc<AtomicBool>,
    received: Arc<Mutex<Vec<Instruction>>>,
) {
    for conn in listener.incoming() {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }
        match conn {
            Ok(stream) => {
                if let Err(e) = serve_connection(stream, &mut switch, behavior, &received) {
                    debug!("sim connection ended: {e}");
                }
            }
            Err(e) => {
                debug!("sim accept failed: {e}");
                break;
            }
        }
    }
}

fn serve_connection(
    mut stream: TcpStream,
    switch: &mut VirtualSwitch,
    behavior: ServerBehavior,
    received: &Mutex<Vec<Instruction>>,
) -> io::Result<()> {
    let mut frame = [0u8; FRAME_LEN];
    loop {
        if !read_frame(&mut stream, &mut frame)? {
            // Client closed the connection
            return Ok(());
        }

        if let Ok(instruction) = codec::decode(&frame) {
            received.lock().expect("request log poisoned").push(instruction);
        }

        match behavior {
            ServerBehavior::CloseOnRead => return Ok(()),
            ServerBehavior::Silent => {
                let _ = switch.handle_frame(&frame);
            }
            ServerBehavior::Respond => {
                if let Some(response) = switch.handle_frame(&frame) {
                    stream.write_all(&response)?;
                }
            }
            ServerBehavior::RespondChunked => {
                if let Some(response) = switch.handle_frame(&frame) {
                    stream.write_all(&response[..2])?;
                    stream.flush()?;
                    thread::sleep(Duration::from_millis(10));
                    stream.write_all(&response[2..])?;
                }
            }
        }
    }
}

/// Read one full frame; `Ok(false)` means the client hung up cleanly
fn read_frame(stream: &mut TcpStream, frame: &mut [u8; FRAME_LEN]) -> io::Result<bool> {
    let mut filled = 0;
    while filled < FRAME_LEN {
        let n = stream.read(&mut frame[filled..])?;
        if n == 0 {
            return Ok(false);
        }
        filled += n;
    }
    Ok(true)
}
