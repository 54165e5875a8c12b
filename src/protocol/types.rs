//! HFTP Protocol Types
//!
//! This module defines the status catalog and response type for the HFTP
//! wire protocol.
//!
//! ## Protocol Format
//!
//! HFTP is a line-oriented text protocol. Every line, request or response,
//! is terminated by CRLF (`\r\n`). A response is a status line followed by
//! zero or more payload lines:
//!
//! ```text
//! <code> <text>\r\n
//! [payload line\r\n]...
//! ```
//!
//! ## Examples
//!
//! Success: `0 OK\r\n`
//! Metadata response: `0 OK\r\n785\r\n`
//! Unknown command: `200 NO SUCH COMMAND\r\n`
//! Bad slice bounds: `203 OFFSET EXCEEDS FILE SIZE\r\n`

use std::fmt;

/// The CRLF terminator used for both requests and responses.
pub const EOL: &[u8] = b"\r\n";

/// Status of a processed request.
///
/// Every handler outcome maps to exactly one of these. Codes are stable wire
/// values; the texts are fixed and sent verbatim on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The request was handled successfully.
    Ok,
    /// A line contained a malformed end-of-line sequence. Fatal: the
    /// connection is closed after reporting it.
    BadEol,
    /// An unexpected failure occurred while handling the request.
    InternalError,
    /// The command name is not part of the protocol.
    InvalidCommand,
    /// The command was recognized but its arguments were malformed.
    InvalidArguments,
    /// The named file does not exist in the served root.
    FileNotFound,
    /// The requested slice falls outside the file's bounds.
    BadOffset,
}

impl Status {
    /// Returns the stable numeric wire code for this status.
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 0,
            Status::BadEol => 100,
            Status::InternalError => 199,
            Status::InvalidCommand => 200,
            Status::InvalidArguments => 201,
            Status::FileNotFound => 202,
            Status::BadOffset => 203,
        }
    }

    /// Returns the fixed human-readable text for this status.
    pub fn message(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadEol => "BAD EOL",
            Status::InternalError => "INTERNAL SERVER ERROR",
            Status::InvalidCommand => "NO SUCH COMMAND",
            Status::InvalidArguments => "INVALID ARGUMENTS FOR COMMAND",
            Status::FileNotFound => "FILE NOT FOUND",
            Status::BadOffset => "OFFSET EXCEEDS FILE SIZE",
        }
    }

    /// Codes in `[100, 200)` are framing-level errors.
    ///
    /// Of these only BAD_EOL terminates the connection; INTERNAL_ERROR is
    /// reported and the connection stays open.
    pub fn is_fatal(self) -> bool {
        (100..200).contains(&self.code())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.message())
    }
}

/// A complete response: one status line plus optional payload lines.
///
/// Responses are built in full before being handed to the transport; they
/// are never partially sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The status reported on the first line.
    pub status: Status,
    /// Payload lines sent after the status line, each terminated by EOL.
    /// An empty string produces a blank line (used to terminate listings).
    pub payload: Vec<String>,
}

impl Response {
    /// Creates a bare status response with no payload.
    pub fn status(status: Status) -> Self {
        Self {
            status,
            payload: Vec::new(),
        }
    }

    /// Creates a successful response carrying the given payload lines.
    pub fn ok_with(payload: Vec<String>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// Serializes the response to wire bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the response into an existing buffer.
    ///
    /// This is more efficient than `serialize()` when batching several
    /// responses into one write.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.status.code().to_string().as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.status.message().as_bytes());
        buf.extend_from_slice(EOL);
        for line in &self.payload {
            buf.extend_from_slice(line.as_bytes());
            buf.extend_from_slice(EOL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_stable() {
        assert_eq!(Status::Ok.code(), 0);
        assert_eq!(Status::BadEol.code(), 100);
        assert_eq!(Status::InternalError.code(), 199);
        assert_eq!(Status::InvalidCommand.code(), 200);
        assert_eq!(Status::InvalidArguments.code(), 201);
        assert_eq!(Status::FileNotFound.code(), 202);
        assert_eq!(Status::BadOffset.code(), 203);
    }

    #[test]
    fn test_status_line_serialize() {
        let response = Response::status(Status::Ok);
        assert_eq!(response.serialize(), b"0 OK\r\n");

        let response = Response::status(Status::InvalidCommand);
        assert_eq!(response.serialize(), b"200 NO SUCH COMMAND\r\n");
    }

    #[test]
    fn test_payload_serialize() {
        let response = Response::ok_with(vec!["785".to_string()]);
        assert_eq!(response.serialize(), b"0 OK\r\n785\r\n");
    }

    #[test]
    fn test_listing_serialize_with_blank_terminator() {
        let response = Response::ok_with(vec![
            "a.txt".to_string(),
            "b.bin".to_string(),
            String::new(),
        ]);
        assert_eq!(response.serialize(), b"0 OK\r\na.txt\r\nb.bin\r\n\r\n");
    }

    #[test]
    fn test_fatal_band() {
        assert!(Status::BadEol.is_fatal());
        assert!(Status::InternalError.is_fatal());
        assert!(!Status::Ok.is_fatal());
        assert!(!Status::InvalidCommand.is_fatal());
        assert!(!Status::BadOffset.is_fatal());
    }

    #[test]
    fn test_display() {
        assert_eq!(Status::FileNotFound.to_string(), "202 FILE NOT FOUND");
    }
}
