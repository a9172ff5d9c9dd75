//! Endpoint
//!
//! The `(host, port)` pair a client connects to.

use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Address of the remote service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve to socket addresses, in resolver order
    ///
    /// A name that resolves to nothing is a connect failure.
    pub fn resolve(&self) -> Result<Vec<SocketAddr>> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| self.connect_error(source))?
            .collect();

        if addrs.is_empty() {
            return Err(self.connect_error(io::Error::new(
                io::ErrorKind::NotFound,
                "host resolved to no addresses",
            )));
        }
        Ok(addrs)
    }

    pub(crate) fn connect_error(&self, source: io::Error) -> ClientError {
        ClientError::Connect {
            endpoint: self.to_string(),
            source,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = ClientError;

    /// Parse `host:port` or `[ipv6]:port`
    fn from_str(s: &str) -> Result<Self> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| ClientError::InvalidEndpoint(format!("'{}' is not host:port", s)))?;

        let host = match host.strip_prefix('[') {
            Some(inner) => inner.strip_suffix(']').ok_or_else(|| {
                ClientError::InvalidEndpoint(format!("unbalanced brackets in '{}'", s))
            })?,
            None if host.contains(':') => {
                return Err(ClientError::InvalidEndpoint(format!(
                    "IPv6 host in '{}' must be bracketed",
                    s
                )))
            }
            None => host,
        };

        if host.is_empty() {
            return Err(ClientError::InvalidEndpoint(format!("missing host in '{}'", s)));
        }

        let port = port
            .parse::<u16>()
            .map_err(|_| ClientError::InvalidEndpoint(format!("bad port '{}'", port)))?;

        Ok(Endpoint::new(host, port))
    }
}
