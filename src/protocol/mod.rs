//! Protocol Module
//!
//! Defines the text protocol spoken with the key-value service.
//!
//! ## Request Format
//! ```text
//! <operation> <key> [<value> [<ttl_seconds>]]
//! ```
//! Tokens are separated by single spaces. There is no delimiter, length
//! prefix or escaping: the request is whatever one write puts on the wire.
//!
//! ### Operations
//! - `get <key>`
//! - `set <key> <value> [ttl_seconds]`
//! - `del <key>`
//!
//! ## Reply Format
//! Whatever arrives in one read, interpreted as text:
//! - `OK` (set/del), possibly followed by annotations
//! - `NOT_FOUND`, `EXPIRED`
//! - `ERROR: <message>`
//! - any other text is the value of a `get`

mod command;
mod response;

pub use command::{Command, CommandKind};
pub use response::{Reply, Response, ERROR_PREFIX, EXPIRED, NOT_FOUND, OK};
