//! Command Handler Module
//!
//! This module implements the request-processing layer: it takes parsed
//! requests, validates arguments, runs them against the file store, and
//! produces the response plus a close-connection flag.
//!
//! ## Commands
//!
//! - `quit` - close the connection
//! - `get_file_listing` - list regular files in the served root
//! - `get_metadata <name>` - file size in bytes
//! - `get_slice <name> <offset> <size>` - base64-encoded byte range

pub mod handler;

// Re-export the main command handler
pub use handler::{CommandError, CommandHandler, CommandOutcome};
