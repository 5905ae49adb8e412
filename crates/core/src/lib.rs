// Plume Core - Domain logic, ports and use cases
// NO infrastructure dependencies (hexagonal architecture)

pub mod context;
pub mod domain;
pub mod error;
pub mod port;
pub mod usecase;

pub use context::{CancelHandle, Context, TxSlot};
pub use error::{Error, ErrorKind, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
