//! Response definitions
//!
//! The bytes of one read, and what the service meant by them.

use std::borrow::Cow;

use bytes::Bytes;

use super::CommandKind;

/// Reply prefixes used by the service
pub const OK: &str = "OK";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const EXPIRED: &str = "EXPIRED";
pub const ERROR_PREFIX: &str = "ERROR:";

/// Bytes received from a single read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Received bytes, at most `capacity` long
    payload: Bytes,

    /// Buffer capacity the read was performed with
    capacity: usize,
}

impl Response {
    pub fn new(payload: Bytes, capacity: usize) -> Self {
        Self { payload, capacity }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_bytes(self) -> Bytes {
        self.payload
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Zero bytes: the peer closed the connection without replying
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The read filled the whole buffer, so the reply may have been cut off
    pub fn fills_buffer(&self) -> bool {
        self.payload.len() == self.capacity
    }

    /// Payload as text, invalid UTF-8 replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// Interpret the payload as a reply to a command of `kind`
    pub fn reply(&self, kind: CommandKind) -> Reply {
        Reply::classify(kind, &self.text())
    }
}

/// A reply interpreted according to the command that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Mutation applied; `detail` carries any annotation after `OK`
    Ok { detail: Option<String> },

    /// Value returned by `get`
    Value(String),

    NotFound,

    Expired,

    /// Service-side error message
    Error(String),

    /// Peer closed without sending anything
    Closed,

    /// Text that does not fit the expected replies for the command
    Other(String),
}

impl Reply {
    pub fn classify(kind: CommandKind, text: &str) -> Self {
        if text.is_empty() {
            return Reply::Closed;
        }
        if let Some(message) = text.strip_prefix(ERROR_PREFIX) {
            return Reply::Error(message.trim().to_string());
        }
        // Status words may arrive with a trailing newline
        let status = text.trim_end();
        if status == NOT_FOUND {
            return Reply::NotFound;
        }

        match kind {
            CommandKind::Get => {
                if status == EXPIRED {
                    Reply::Expired
                } else {
                    Reply::Value(text.to_string())
                }
            }
            CommandKind::Set | CommandKind::Del | CommandKind::Raw => {
                match parse_ok(text) {
                    Some(detail) => Reply::Ok { detail },
                    None if kind == CommandKind::Raw && status == EXPIRED => Reply::Expired,
                    None => Reply::Other(text.to_string()),
                }
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }
}

/// `OK` or `OK <detail>`
fn parse_ok(text: &str) -> Option<Option<String>> {
    let rest = text.strip_prefix(OK)?;
    if rest.is_empty() {
        return Some(None);
    }
    if rest.starts_with(char::is_whitespace) {
        let detail = rest.trim();
        return Some((!detail.is_empty()).then(|| detail.to_string()));
    }
    None
}
