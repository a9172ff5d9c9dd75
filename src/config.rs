//! Configuration for kvs-client
//!
//! Centralized configuration with defaults matching the stock service
//! (`127.0.0.1:2000`, 1 KiB receive buffer, blocking I/O).

use crate::error::{ClientError, Result};
use crate::network::Endpoint;

/// Default receive buffer capacity; a longer reply is truncated
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 1024;

/// Default service port
pub const DEFAULT_PORT: u16 = 2000;

/// Command sent when the caller supplies none
pub const DEFAULT_COMMAND: &str = "set teacher King";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Endpoint
    // -------------------------------------------------------------------------
    /// Remote service address
    pub endpoint: Endpoint,

    // -------------------------------------------------------------------------
    // I/O Behaviour
    // -------------------------------------------------------------------------
    /// Capacity of the single read; longer replies are cut off
    pub recv_buffer_size: usize,

    /// How the command bytes are written
    pub write_mode: WriteMode,

    /// Disable Nagle's algorithm
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Timeouts (0 = block indefinitely)
    // -------------------------------------------------------------------------
    /// Connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds)
    pub write_timeout_ms: u64,
}

/// Write strategy for a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Keep writing until every byte is accepted by the transport
    All,

    /// One write call; fewer bytes written than requested is an error
    SingleAttempt,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::new("127.0.0.1", DEFAULT_PORT),
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            write_mode: WriteMode::All,
            nodelay: true,
            connect_timeout_ms: 0,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Check invariants that the builder cannot express in types
    pub fn validate(&self) -> Result<()> {
        if self.recv_buffer_size == 0 {
            return Err(ClientError::Config(
                "receive buffer size must be greater than zero".to_string(),
            ));
        }
        if self.endpoint.host().is_empty() {
            return Err(ClientError::Config("endpoint host is empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the remote endpoint
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.config.endpoint = endpoint;
        self
    }

    /// Set the receive buffer capacity (in bytes)
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.config.recv_buffer_size = size;
        self
    }

    /// Set the write strategy
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
