//! Client
//!
//! Runs one request/response exchange per call.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::protocol::{Command, Reply, Response};

use super::Connection;

/// Outcome of a completed exchange
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Command that was sent
    pub command: Command,

    /// Bytes accepted by the transport
    pub bytes_written: usize,

    /// Bytes from the single read
    pub response: Response,
}

impl Exchange {
    /// The response interpreted for the command that was sent
    pub fn reply(&self) -> Reply {
        self.response.reply(self.command.kind())
    }
}

/// Client for the key-value service
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Create a client, checking the config first
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Open a connection to the configured endpoint
    pub fn connect(&self) -> Result<Connection> {
        Connection::connect(&self.config)
    }

    /// Connect, send `command`, read one reply, close
    ///
    /// The command is validated before any I/O. The connection is released
    /// whichever step fails.
    pub fn execute(&self, command: &Command) -> Result<Exchange> {
        self.execute_with(command, |_, _| {})
    }

    /// Like [`Client::execute`], calling `on_sent` with the wire text and
    /// byte count once the command is written and before the read starts
    pub fn execute_with<F>(&self, command: &Command, on_sent: F) -> Result<Exchange>
    where
        F: FnOnce(&str, usize),
    {
        command.validate()?;
        let wire = command.to_wire();

        let mut connection = self.connect()?;
        let bytes_written = connection.send(wire.as_bytes())?;
        on_sent(&wire, bytes_written);

        let response = connection.receive(self.config.recv_buffer_size)?;
        connection.close();

        Ok(Exchange {
            command: command.clone(),
            bytes_written,
            response,
        })
    }

    /// Send `text` verbatim
    pub fn execute_raw(&self, text: &str) -> Result<Exchange> {
        self.execute(&Command::raw(text))
    }
}
