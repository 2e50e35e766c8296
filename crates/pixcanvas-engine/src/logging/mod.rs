//! Logger initialization.
//!
//! The engine logs through the `log` facade only; binaries call
//! [`init_logging`] early to install `env_logger`.

mod init;

pub use init::{init_logging, LoggingConfig};
