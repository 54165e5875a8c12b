//! # hftpd - A Line-Oriented File Transfer Protocol Server
//!
//! hftpd serves the files of one directory over a minimal text protocol
//! ("HFTP"): a client connects over TCP, sends one command per
//! CRLF-terminated line, and receives numeric status lines plus payload
//! lines (directory listings, file sizes, base64-encoded byte ranges).
//!
//! ## Features
//!
//! - **Line-Oriented Protocol**: whitespace-separated commands, CRLF framing
//! - **Stateless Serving**: every request reads the filesystem fresh
//! - **Async I/O**: built on Tokio, one independent task per connection
//! - **Strict Error Taxonomy**: every request yields exactly one status
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             hftpd                               │
//! │                                                                 │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────┐         │
//! │  │ TCP Server  │───>│ Connection   │───>│  Command    │         │
//! │  │ (Listener)  │    │ Engine       │    │  Handler    │         │
//! │  └─────────────┘    └──────────────┘    └──────┬──────┘         │
//! │                        │                       │                │
//! │                        ▼                       ▼                │
//! │  ┌──────────────────────────┐    ┌──────────────────────────┐   │
//! │  │   Line Framing + Status  │    │        FileStore         │   │
//! │  │   Catalog (protocol)     │    │  (served root directory) │   │
//! │  └──────────────────────────┘    └──────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use hftpd::commands::CommandHandler;
//! use hftpd::connection::{handle_connection, ConnectionStats};
//! use hftpd::storage::FileStore;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Served root, created if absent
//!     let store = Arc::new(FileStore::new("testdata")?);
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind("0.0.0.0:19500").await?;
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await?;
//!         let handler = CommandHandler::new(Arc::clone(&store));
//!         let stats = Arc::clone(&stats);
//!
//!         tokio::spawn(handle_connection(stream, addr, handler, stats));
//!     }
//! }
//! ```
//!
//! ## Supported Commands
//!
//! - `quit` - end the session
//! - `get_file_listing` - one line per regular file, then a blank line
//! - `get_metadata <name>` - file size in bytes
//! - `get_slice <name> <offset> <size>` - base64 of the requested range
//!
//! ## Status Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0    | OK |
//! | 100  | BAD EOL (fatal, closes the connection) |
//! | 199  | INTERNAL SERVER ERROR |
//! | 200  | NO SUCH COMMAND |
//! | 201  | INVALID ARGUMENTS FOR COMMAND |
//! | 202  | FILE NOT FOUND |
//! | 203  | OFFSET EXCEEDS FILE SIZE |
//!
//! ## Module Overview
//!
//! - [`protocol`]: line framing, request parsing, status catalog
//! - [`commands`]: the four request handlers
//! - [`connection`]: per-connection engine and async transport
//! - [`storage`]: read-only view over the served root

pub mod commands;
pub mod connection;
pub mod protocol;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::{CommandHandler, CommandOutcome};
pub use connection::{handle_connection, ConnectionEngine, ConnectionStats};
pub use protocol::{Request, Response, Status, EOL};
pub use storage::{FileStore, StoreError};

/// The default port hftpd listens on
pub const DEFAULT_PORT: u16 = 19500;

/// The default host hftpd binds to
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// The default served root directory
pub const DEFAULT_ROOT: &str = "testdata";

/// Version of hftpd
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
