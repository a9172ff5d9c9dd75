//! Command definitions
//!
//! Typed requests and their text wire form.

use std::fmt;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Command kinds, used to interpret replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Get,
    Set,
    Del,
    Raw,
}

/// A request to the key-value service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Get a value by key
    Get { key: String },

    /// Set a key-value pair, optionally expiring after `ttl` seconds
    Set {
        key: String,
        value: String,
        ttl: Option<u64>,
    },

    /// Delete a key
    Del { key: String },

    /// Text sent verbatim
    Raw(String),
}

impl Command {
    pub fn get(key: impl Into<String>) -> Self {
        Command::Get { key: key.into() }
    }

    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Command::Set {
            key: key.into(),
            value: value.into(),
            ttl: None,
        }
    }

    pub fn set_with_ttl(key: impl Into<String>, value: impl Into<String>, ttl: u64) -> Self {
        Command::Set {
            key: key.into(),
            value: value.into(),
            ttl: Some(ttl),
        }
    }

    pub fn del(key: impl Into<String>) -> Self {
        Command::Del { key: key.into() }
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Command::Raw(text.into())
    }

    /// Get the command kind
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Get { .. } => CommandKind::Get,
            Command::Set { .. } => CommandKind::Set,
            Command::Del { .. } => CommandKind::Del,
            Command::Raw(_) => CommandKind::Raw,
        }
    }

    /// Parse a whitespace-separated command line
    ///
    /// Accepts `get <key>`, `set <key> <value> [ttl_seconds]` and `del <key>`.
    pub fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (op, args) = match tokens.split_first() {
            Some((op, args)) => (*op, args),
            None => return Err(ClientError::InvalidCommand("empty command".to_string())),
        };

        let command = match (op, args) {
            ("get", [key]) => Command::get(*key),
            ("del", [key]) => Command::del(*key),
            ("set", [key, value]) => Command::set(*key, *value),
            ("set", [key, value, ttl]) => {
                let ttl = ttl.parse::<u64>().map_err(|_| {
                    ClientError::InvalidCommand(format!(
                        "ttl must be a whole number of seconds, got '{}'",
                        ttl
                    ))
                })?;
                Command::set_with_ttl(*key, *value, ttl)
            }
            ("get", _) => return Err(usage("get <key>")),
            ("del", _) => return Err(usage("del <key>")),
            ("set", _) => return Err(usage("set <key> <value> [ttl_seconds]")),
            (other, _) => {
                return Err(ClientError::InvalidCommand(format!(
                    "unknown operation '{}' (expected set/get/del)",
                    other
                )))
            }
        };
        Ok(command)
    }

    /// Check that the command survives the space-separated encoding
    ///
    /// Tokens cannot be empty or contain whitespace: there is no escaping.
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Get { key } | Command::Del { key } => check_token("key", key),
            Command::Set { key, value, .. } => {
                check_token("key", key)?;
                check_token("value", value)
            }
            Command::Raw(text) => {
                if text.is_empty() {
                    return Err(ClientError::InvalidCommand("empty command".to_string()));
                }
                Ok(())
            }
        }
    }

    /// Encode as the text sent on the wire
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Get { key } => write!(f, "get {}", key),
            Command::Set {
                key,
                value,
                ttl: None,
            } => write!(f, "set {} {}", key, value),
            Command::Set {
                key,
                value,
                ttl: Some(ttl),
            } => write!(f, "set {} {} {}", key, value, ttl),
            Command::Del { key } => write!(f, "del {}", key),
            Command::Raw(text) => f.write_str(text),
        }
    }
}

impl FromStr for Command {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Command::parse(s)
    }
}

fn usage(form: &str) -> ClientError {
    ClientError::InvalidCommand(format!("expected '{}'", form))
}

fn check_token(what: &str, token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(ClientError::InvalidCommand(format!("{} is empty", what)));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(ClientError::InvalidCommand(format!(
            "{} '{}' contains whitespace",
            what, token
        )));
    }
    Ok(())
}
