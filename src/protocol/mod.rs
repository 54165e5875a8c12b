//! HFTP Protocol Implementation
//!
//! This module implements the wire level of the HFTP file-transfer protocol.
//!
//! ## Overview
//!
//! HFTP is a line-oriented text protocol: one command per CRLF-terminated
//! line, answered with a numeric status line plus optional payload lines.
//!
//! ## Modules
//!
//! - `types`: the `Status` catalog, `Response` type and EOL constant
//! - `parser`: incremental line framing and `Request` parsing
//!
//! ## Example
//!
//! ```
//! use hftpd::protocol::{extract_line, Request, Response, Status};
//!
//! let buf = b"get_metadata a.txt\r\n";
//! let (line, _consumed) = extract_line(buf).unwrap();
//! let request = Request::parse(line).unwrap();
//! assert_eq!(request.name, "get_metadata");
//!
//! let response = Response::status(Status::FileNotFound);
//! assert_eq!(response.serialize(), b"202 FILE NOT FOUND\r\n");
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{extract_line, find_eol, has_bare_newline, Request};
pub use types::{Response, Status, EOL};
