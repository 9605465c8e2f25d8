// Lifeclock Core - Time progress math, ports and scheduling
// NO transport or subscriber dependencies: adapters live in sibling crates

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::calculator::compute_progress;
pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
