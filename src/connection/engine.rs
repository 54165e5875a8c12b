//! Per-Connection Protocol Engine
//!
//! The engine is the synchronous core of a connection: it owns the receive
//! buffer and the connection-lifetime flag, turns raw byte deliveries into
//! complete lines, and runs each line through the command handler.
//!
//! It knows nothing about sockets. The async transport layer
//! ([`super::handler`]) feeds it whatever bytes arrive and writes out
//! whatever bytes it returns, which keeps all framing and dispatch logic
//! unit-testable without I/O.
//!
//! ## Processing One Delivery
//!
//! ```text
//! feed(bytes)
//!   │ append to buffer
//!   ▼
//! ┌─────────────────────────────────────────────┐
//! │ while connection open and a full line is    │
//! │ buffered:                                   │
//! │   - slice the line off the buffer           │
//! │   - scan for a malformed EOL (BAD_EOL)      │
//! │   - parse + dispatch the command            │
//! │   - append its response bytes to the output │
//! └─────────────────────────────────────────────┘
//!   │
//!   ▼
//! response bytes for the transport to write
//! ```
//!
//! Leftover bytes after the last complete line stay buffered for the next
//! `feed`, so framing is independent of delivery boundaries.

use crate::commands::CommandHandler;
use crate::protocol::{find_eol, has_bare_newline, Request, Response, Status, EOL};
use bytes::BytesMut;
use tracing::{debug, trace};

/// Initial receive buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// The protocol engine for a single connection.
///
/// Owned exclusively by one connection task; never shared.
#[derive(Debug)]
pub struct ConnectionEngine {
    /// Received bytes not yet consumed into complete lines
    buffer: BytesMut,

    /// False once quit was processed or a fatal framing error occurred
    open: bool,

    /// Dispatches parsed requests to the four handlers
    handler: CommandHandler,
}

impl ConnectionEngine {
    /// Creates an engine for a fresh connection.
    pub fn new(handler: CommandHandler) -> Self {
        Self {
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            open: true,
            handler,
        }
    }

    /// True until quit is processed or a fatal framing error occurs.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of buffered bytes awaiting a complete line.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Consumes a raw byte delivery and returns the response bytes it
    /// produced.
    ///
    /// Zero or more complete lines are extracted and processed; each yields
    /// at least one status-bearing response. Once the engine is closed,
    /// remaining buffered lines are not processed.
    pub fn feed(&mut self, data: &[u8]) -> Vec<u8> {
        self.buffer.extend_from_slice(data);

        let mut out = Vec::new();
        while self.open {
            let Some(pos) = find_eol(&self.buffer) else {
                break;
            };
            let line = self.buffer.split_to(pos + EOL.len());
            self.process_line(&line[..pos], &mut out);
        }

        trace!(
            buffered = self.buffer.len(),
            produced = out.len(),
            "Processed delivery"
        );
        out
    }

    /// Processes one complete line, appending its response bytes to `out`.
    fn process_line(&mut self, line: &[u8], out: &mut Vec<u8>) {
        // A bare LF inside the line is a framing violation and fatal. The
        // line is still dispatched afterwards, so the client may see two
        // responses for it; this replicates the reference server's
        // observable behavior.
        if has_bare_newline(line) {
            debug!("Malformed end-of-line inside request line");
            Response::status(Status::BadEol).serialize_into(out);
            self.open = false;
        }

        let Some(request) = Request::parse(line) else {
            Response::status(Status::InvalidCommand).serialize_into(out);
            return;
        };

        debug!(command = %request.name, args = request.args.len(), "Dispatching command");
        let outcome = self.handler.execute(&request);
        outcome.response.serialize_into(out);
        if outcome.close {
            self.open = false;
        }
    }
}
