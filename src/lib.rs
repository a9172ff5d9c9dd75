//! # kvs-client
//!
//! A blocking TCP client for a text-command key-value service:
//! - One connection per exchange, no pooling or reconnection
//! - Commands are space-separated text (`set <key> <value>`, `get <key>`, `del <key>`)
//! - Replies are whatever arrives in a single read, bounded by the buffer size
//!
//! ## Exchange Overview
//!
//! ```text
//!   ┌──────────┐   connect    ┌───────────┐
//!   │  Client  │─────────────▶│ Connected │
//!   └──────────┘              └─────┬─────┘
//!                                   │ send (one command)
//!                                   ▼
//!                             ┌───────────┐
//!                             │   Sent    │
//!                             └─────┬─────┘
//!                                   │ receive (one read, ≤ buffer size)
//!                                   ▼
//!                             ┌───────────┐
//!                             │ Received  │
//!                             └─────┬─────┘
//!                                   │ close
//!                                   ▼
//!                             ┌───────────┐
//!                             │  Closed   │  ◀── also reached from any
//!                             └───────────┘      state when a step fails
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod network;
pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ClientError, Result, Stage};
pub use config::{ClientConfig, WriteMode};
pub use network::{Client, Connection, ConnectionState, Endpoint, Exchange};
pub use protocol::{Command, CommandKind, Reply, Response};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of kvs-client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
