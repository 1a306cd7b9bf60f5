//! HTTP server module.
//!
//! Binds the listener, serves the application router and shuts down
//! gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
