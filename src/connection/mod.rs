//! Connection Module
//!
//! This module manages individual client connections. Each accepted client
//! is handled by its own async task; the protocol logic itself lives in a
//! synchronous engine so it can be tested without sockets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     TCP Listener                            │
//! │                      (main.rs)                              │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │ accept() + spawn task per client
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ConnectionHandler (async)                   │
//! │   read bytes ──> ConnectionEngine::feed ──> write responses │
//! │                        │                                    │
//! │                        ▼                                    │
//! │        line framing ──> dispatch ──> CommandHandler         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Connections are fully independent: one engine instance per client, no
//! shared mutable state between them.
//!
//! ## Example
//!
//! ```ignore
//! use hftpd::commands::CommandHandler;
//! use hftpd::connection::{handle_connection, ConnectionStats};
//! use hftpd::storage::FileStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(FileStore::new("testdata")?);
//! let stats = Arc::new(ConnectionStats::new());
//!
//! // For each accepted connection...
//! let (stream, addr) = listener.accept().await?;
//! let handler = CommandHandler::new(Arc::clone(&store));
//! tokio::spawn(handle_connection(stream, addr, handler, Arc::clone(&stats)));
//! ```

pub mod engine;
pub mod handler;

// Re-export commonly used types
pub use engine::ConnectionEngine;
pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ConnectionStats};
