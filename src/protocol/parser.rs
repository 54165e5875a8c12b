//! Incremental Line Framing and Request Parsing
//!
//! This module turns a raw byte stream into protocol lines and lines into
//! requests.
//!
//! ## How Framing Works
//!
//! TCP delivers arbitrary byte chunks, so the caller accumulates incoming
//! data in a buffer and asks `extract_line` for the next complete line:
//!
//! - `Some((line, consumed))` - a full CRLF-terminated line was found;
//!   `consumed` bytes (line plus terminator) should be dropped from the buffer
//! - `None` - no complete line yet, keep the buffer and wait for more data
//!
//! This makes framing independent of delivery boundaries: feeding `"get_fi"`
//! and then `"le_listing\r\n"` yields the same line as one delivery.
//!
//! ## Malformed Line Endings
//!
//! The protocol terminates lines with CRLF only. A line-feed inside a line's
//! content that is not part of a CRLF pair is a framing violation
//! (`has_bare_newline`), reported as BAD_EOL and fatal to the connection.

use crate::protocol::types::EOL;

/// Extracts the next complete line from the buffer, if any.
///
/// Returns the line content (terminator excluded) and the number of bytes
/// consumed (terminator included). Bytes after the terminator are untouched.
/// No line-length limit is enforced.
pub fn extract_line(buf: &[u8]) -> Option<(&[u8], usize)> {
    find_eol(buf).map(|pos| (&buf[..pos], pos + EOL.len()))
}

/// Finds the position of the EOL marker in the buffer.
///
/// Returns the position of `\r` if the full marker is present, or None.
#[inline]
pub fn find_eol(buf: &[u8]) -> Option<usize> {
    for i in 0..buf.len().saturating_sub(1) {
        if buf[i] == b'\r' && buf[i + 1] == b'\n' {
            return Some(i);
        }
    }
    None
}

/// Reports whether the line contains a line-feed not preceded by a
/// carriage return.
///
/// Such a byte means the client used a malformed end-of-line sequence
/// inside the line content; the engine answers BAD_EOL and closes.
pub fn has_bare_newline(line: &[u8]) -> bool {
    line.iter().enumerate().any(|(i, &b)| {
        b == b'\n' && (i == 0 || line[i - 1] != b'\r')
    })
}

/// A parsed request: a command name plus its arguments.
///
/// Transient value produced from one line and consumed within one request
/// cycle; no identity beyond that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The command name (first whitespace-separated token).
    pub name: String,
    /// The remaining tokens, in order.
    pub args: Vec<String>,
}

impl Request {
    /// Parses a raw line into a request.
    ///
    /// Tokens are split on ASCII whitespace, matching the reference server's
    /// behavior. Non-UTF-8 bytes are replaced lossily rather than rejected.
    /// Returns None for a line with no tokens at all.
    pub fn parse(line: &[u8]) -> Option<Self> {
        let text = String::from_utf8_lossy(line);
        let mut tokens = text.split_whitespace().map(str::to_string);
        let name = tokens.next()?;
        Some(Self {
            name,
            args: tokens.collect(),
        })
    }
}
