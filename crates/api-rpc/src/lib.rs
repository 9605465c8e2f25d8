//! JSON-RPC API Layer
//!
//! Read-only JSON-RPC 2.0 surface over the latest progress snapshot.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use handler::RpcHandler;
pub use server::{RpcServer, RpcServerConfig};
