//! Connection
//!
//! One outbound stream connection, driven through a fixed sequence of
//! steps: connect, send, receive, close.

use std::fmt;
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use bytes::BytesMut;

use crate::config::{ClientConfig, WriteMode};
use crate::error::{ClientError, Result};
use crate::protocol::{Command, Response};

/// Lifecycle of a connection
///
/// ```text
/// Disconnected -> Connected -> Sent -> Received -> Closed
/// ```
/// Any state may jump straight to `Closed`. Nothing moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Sent,
    Received,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connected => "connected",
            ConnectionState::Sent => "sent",
            ConnectionState::Received => "received",
            ConnectionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// An open connection to the service
///
/// The socket is released when the value is closed or dropped, whichever
/// comes first.
pub struct Connection {
    stream: TcpStream,

    state: ConnectionState,

    write_mode: WriteMode,

    peer_addr: SocketAddr,

    local_addr: SocketAddr,
}

impl Connection {
    /// Open a connection to the configured endpoint
    ///
    /// Every resolved address is tried in order; the last failure is
    /// reported if none accepts.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let endpoint = &config.endpoint;
        let addrs = endpoint.resolve()?;

        let mut last_err = None;
        for addr in addrs {
            let attempt = if config.connect_timeout_ms > 0 {
                TcpStream::connect_timeout(&addr, Duration::from_millis(config.connect_timeout_ms))
            } else {
                TcpStream::connect(addr)
            };

            match attempt {
                Ok(stream) => {
                    return Self::from_stream(stream, config)
                        .map_err(|e| endpoint.connect_error(e));
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(endpoint.connect_error(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no address to connect to")
        })))
    }

    /// Configure a freshly connected stream
    fn from_stream(stream: TcpStream, config: &ClientConfig) -> io::Result<Self> {
        stream.set_nodelay(config.nodelay)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        let peer_addr = stream.peer_addr()?;
        let local_addr = stream.local_addr()?;
        tracing::debug!("Connected to {} from {}", peer_addr, local_addr);

        Ok(Self {
            stream,
            state: ConnectionState::Connected,
            write_mode: config.write_mode,
            peer_addr,
            local_addr,
        })
    }

    /// Write `bytes` to the peer and return how many were written
    ///
    /// A failed write closes the connection.
    pub fn send(&mut self, bytes: &[u8]) -> Result<usize> {
        self.expect_state("send", ConnectionState::Connected)?;

        let written = match self.write_bytes(bytes) {
            Ok(written) => written,
            Err(e) => return Err(self.fail(e)),
        };

        tracing::trace!("Sent {} bytes to {}", written, self.peer_addr);
        self.state = ConnectionState::Sent;
        Ok(written)
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<usize> {
        let written = match self.write_mode {
            WriteMode::All => {
                self.stream
                    .write_all(bytes)
                    .map_err(|source| ClientError::Send { source })?;
                bytes.len()
            }
            WriteMode::SingleAttempt => {
                let written = loop {
                    match self.stream.write(bytes) {
                        Ok(n) => break n,
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(source) => return Err(ClientError::Send { source }),
                    }
                };
                if written < bytes.len() {
                    return Err(ClientError::ShortWrite {
                        written,
                        expected: bytes.len(),
                    });
                }
                written
            }
        };

        self.stream
            .flush()
            .map_err(|source| ClientError::Send { source })?;
        Ok(written)
    }

    /// Validate a command and send its wire form
    pub fn send_command(&mut self, command: &Command) -> Result<usize> {
        command.validate()?;
        self.send(command.to_wire().as_bytes())
    }

    /// Perform exactly one read of up to `max_bytes`
    ///
    /// An empty response means the peer closed the connection. Bytes beyond
    /// `max_bytes`, or arriving after this read, are left unread. A failed
    /// read closes the connection.
    pub fn receive(&mut self, max_bytes: usize) -> Result<Response> {
        self.expect_state("receive", ConnectionState::Sent)?;
        if max_bytes == 0 {
            return Err(ClientError::Config(
                "receive buffer size must be greater than zero".to_string(),
            ));
        }

        let mut buffer = BytesMut::zeroed(max_bytes);
        let read = loop {
            match self.stream.read(&mut buffer[..]) {
                Ok(n) => break n,
                // No data moved; still the single read
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(self.fail(ClientError::Receive { source })),
            }
        };
        buffer.truncate(read);

        if read == 0 {
            tracing::debug!("Peer {} closed the connection without replying", self.peer_addr);
        } else {
            tracing::trace!("Received {} bytes from {}", read, self.peer_addr);
        }

        self.state = ConnectionState::Received;
        Ok(Response::new(buffer.freeze(), max_bytes))
    }

    /// Release the connection
    pub fn close(mut self) {
        self.release();
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    fn expect_state(&self, operation: &'static str, expected: ConnectionState) -> Result<()> {
        if self.state != expected {
            return Err(ClientError::InvalidState {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    /// A stage failure ends the connection; there is no retry
    fn fail(&mut self, error: ClientError) -> ClientError {
        tracing::debug!("Connection to {} failed: {}", self.peer_addr, error);
        self.release();
        error
    }

    fn release(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }

        // The peer may already have reset the connection
        if let Err(e) = self.stream.shutdown(Shutdown::Both) {
            if e.kind() != io::ErrorKind::NotConnected {
                tracing::warn!("Shutdown of connection to {} failed: {}", self.peer_addr, e);
            }
        }

        tracing::debug!("Connection to {} closed in state {}", self.peer_addr, self.state);
        self.state = ConnectionState::Closed;
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("peer_addr", &self.peer_addr)
            .field("local_addr", &self.local_addr)
            .field("state", &self.state)
            .finish()
    }
}
