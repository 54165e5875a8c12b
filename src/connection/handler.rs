//! Async Connection Transport
//!
//! This module moves bytes between a client socket and the per-connection
//! [`ConnectionEngine`](super::ConnectionEngine). Each client gets its own
//! handler task that runs in a loop, reading raw bytes, feeding the engine,
//! and writing back whatever responses it produced.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. ConnectionHandler spawned
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  Read bytes from socket      │
//!    │        │                     │
//!    │        ▼                     │
//!    │  engine.feed(bytes)          │
//!    │        │                     │
//!    │        ▼                     │
//!    │  Write response bytes        │
//!    │        │                     │
//!    │        ▼                     │
//!    │  [Loop while engine open]    │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 4. quit / BAD_EOL / disconnect
//!        │
//!        ▼
//! 5. Handler task ends
//! ```
//!
//! Responses are built in full by the engine before being written, so a
//! client never observes a partially sent response.

use crate::commands::CommandHandler;
use crate::connection::engine::ConnectionEngine;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tracing::{debug, info, trace, warn};

/// Read chunk capacity reserved before each socket read
const READ_CHUNK_SIZE: usize = 4096;

/// Statistics for connection handling
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Handles a single client connection.
///
/// Owns the socket and the protocol engine for one client; no state is
/// shared with other connections beyond the read-only file store and the
/// atomic statistics.
pub struct ConnectionHandler {
    /// The TCP stream for this connection
    stream: BufWriter<TcpStream>,

    /// Client's address (for logging)
    addr: SocketAddr,

    /// The protocol engine for this connection
    engine: ConnectionEngine,

    /// Scratch buffer for socket reads
    read_buf: Vec<u8>,

    /// Connection statistics (shared)
    stats: Arc<ConnectionStats>,
}

impl ConnectionHandler {
    /// Creates a new connection handler.
    ///
    /// # Arguments
    ///
    /// * `stream` - The TCP stream for this connection
    /// * `addr` - The client's socket address
    /// * `command_handler` - The command handler for executing requests
    /// * `stats` - Shared connection statistics
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        command_handler: CommandHandler,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        Self {
            stream: BufWriter::new(stream),
            addr,
            engine: ConnectionEngine::new(command_handler),
            read_buf: Vec::with_capacity(READ_CHUNK_SIZE),
            stats,
        }
    }

    /// Runs the main connection loop to completion.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => info!(client = %self.addr, "Client disconnected"),
            Err(e) => match e {
                ConnectionError::ClientDisconnected => {
                    debug!(client = %self.addr, "Client disconnected")
                }
                ConnectionError::IoError(io_err)
                    if io_err.kind() == std::io::ErrorKind::ConnectionReset =>
                {
                    debug!(client = %self.addr, "Connection reset by client")
                }
                _ => warn!(client = %self.addr, error = %e, "Connection error"),
            },
        }

        self.stats.connection_closed();
        result
    }

    /// The read-feed-respond loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        while self.engine.is_open() {
            self.read_buf.clear();
            let n = self.stream.get_mut().read_buf(&mut self.read_buf).await?;

            if n == 0 {
                // Connection closed by client
                if self.engine.buffered() == 0 {
                    return Err(ConnectionError::ClientDisconnected);
                } else {
                    // Partial line in buffer
                    return Err(ConnectionError::UnexpectedEof);
                }
            }

            self.stats.bytes_read(n);
            trace!(client = %self.addr, bytes = n, "Read data");

            let responses = self.engine.feed(&self.read_buf);
            if !responses.is_empty() {
                self.stream.write_all(&responses).await?;
                self.stream.flush().await?;
                self.stats.bytes_written(responses.len());
                trace!(client = %self.addr, bytes = responses.len(), "Sent responses");
            }
        }

        Ok(())
    }
}

/// Errors that can occur while handling a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error (network issue)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Client disconnected normally
    #[error("Client disconnected")]
    ClientDisconnected,

    /// Unexpected end of stream (partial line buffered)
    #[error("Unexpected end of stream")]
    UnexpectedEof,
}

/// Handles a client connection.
///
/// This is a convenience function that creates a ConnectionHandler
/// and runs it to completion.
///
/// # Arguments
///
/// * `stream` - The TCP stream for this connection
/// * `addr` - The client's socket address
/// * `command_handler` - The command handler for executing requests
/// * `stats` - Shared connection statistics
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    command_handler: CommandHandler,
    stats: Arc<ConnectionStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, command_handler, stats);
    if let Err(e) = handler.run().await {
        match e {
            ConnectionError::ClientDisconnected => {}
            ConnectionError::IoError(ref io_err)
                if io_err.kind() == std::io::ErrorKind::ConnectionReset => {}
            _ => {
                debug!(client = %addr, error = %e, "Connection ended with error");
            }
        }
    }
}
