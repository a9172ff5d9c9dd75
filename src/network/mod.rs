//! Network Module
//!
//! Blocking TCP client plumbing.
//!
//! ## Architecture
//! - `Endpoint` names the service
//! - `Connection` owns the socket and enforces the step order
//! - `Client` drives one full exchange per call

mod client;
mod connection;
mod endpoint;

pub use client::{Client, Exchange};
pub use connection::{Connection, ConnectionState};
pub use endpoint::Endpoint;
