//! Command Handler Module
//!
//! This module implements the four HFTP commands. It receives parsed
//! requests, validates their arguments, executes them against the file
//! store, and returns a complete response.
//!
//! ## Supported Commands
//!
//! - `quit` - close the connection
//! - `get_file_listing` - list the regular files in the served root
//! - `get_metadata <name>` - byte size of a file
//! - `get_slice <name> <offset> <size>` - base64-encoded byte range
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐      │
//! │  │  execute()  │───>│  dispatch() │───>│   cmd_*()   │      │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘      │
//! │                                               │             │
//! │                                               ▼             │
//! │                                           FileStore         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Policy
//!
//! User-input errors (wrong argument count, unknown command, bad bounds,
//! missing file) map to their protocol statuses and leave the connection
//! open. Anything else a handler hits is caught at the dispatch boundary
//! and reported as INTERNAL_ERROR, again leaving the connection open.

use crate::protocol::{Request, Response, Status};
use crate::storage::{FileStore, StoreError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Failures a handler can report past its own status mapping.
///
/// Everything that reaches the dispatch boundary through this type is
/// reported to the client as INTERNAL_ERROR.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A file store operation failed in an unexpected way.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// The result of executing one request: the response to send and whether
/// the connection should close afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// The complete response for this request.
    pub response: Response,
    /// True when the handler terminated the connection (successful `quit`).
    pub close: bool,
}

impl CommandOutcome {
    /// An outcome that keeps the connection open.
    fn respond(response: Response) -> Self {
        Self {
            response,
            close: false,
        }
    }

    /// An outcome that closes the connection after sending the response.
    fn respond_and_close(response: Response) -> Self {
        Self {
            response,
            close: true,
        }
    }
}

/// Dispatches HFTP requests to their handlers.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    /// The served-root file store (shared across connections)
    store: Arc<FileStore>,
}

impl CommandHandler {
    /// Creates a new command handler over the given file store.
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }

    /// Executes a request and returns the outcome.
    ///
    /// Never fails: handler faults are collapsed to INTERNAL_ERROR here so
    /// every request yields exactly one status-bearing response.
    pub fn execute(&self, request: &Request) -> CommandOutcome {
        match self.dispatch(request) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(command = %request.name, error = %e, "Command failed unexpectedly");
                CommandOutcome::respond(Response::status(Status::InternalError))
            }
        }
    }

    /// Dispatches a request by exact command-name match.
    fn dispatch(&self, request: &Request) -> Result<CommandOutcome, CommandError> {
        let args = request.args.as_slice();
        match request.name.as_str() {
            "quit" => Ok(self.cmd_quit(args)),
            "get_file_listing" => self.cmd_get_file_listing(args),
            "get_metadata" => self.cmd_get_metadata(args),
            "get_slice" => self.cmd_get_slice(args),
            _ => Ok(CommandOutcome::respond(Response::status(
                Status::InvalidCommand,
            ))),
        }
    }

    /// `quit` - zero arguments, closes the connection.
    fn cmd_quit(&self, args: &[String]) -> CommandOutcome {
        if args.is_empty() {
            CommandOutcome::respond_and_close(Response::status(Status::Ok))
        } else {
            CommandOutcome::respond(Response::status(Status::InvalidArguments))
        }
    }

    /// `get_file_listing` - zero arguments, one line per regular file in the
    /// served root followed by a terminating blank line.
    fn cmd_get_file_listing(&self, args: &[String]) -> Result<CommandOutcome, CommandError> {
        if !args.is_empty() {
            return Ok(CommandOutcome::respond(Response::status(
                Status::InvalidArguments,
            )));
        }

        let mut payload = self.store.list_regular_files()?;
        payload.push(String::new());
        Ok(CommandOutcome::respond(Response::ok_with(payload)))
    }

    /// `get_metadata <name>` - byte size of the named file as one decimal line.
    fn cmd_get_metadata(&self, args: &[String]) -> Result<CommandOutcome, CommandError> {
        let [name] = args else {
            return Ok(CommandOutcome::respond(Response::status(
                Status::InvalidArguments,
            )));
        };

        match self.store.size(name) {
            Ok(size) => Ok(CommandOutcome::respond(Response::ok_with(vec![
                size.to_string()
            ]))),
            Err(StoreError::NotFound) => Ok(CommandOutcome::respond(Response::status(
                Status::FileNotFound,
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// `get_slice <name> <offset> <size>` - base64 of the byte range
    /// `[offset, offset + size)` of the named file.
    fn cmd_get_slice(&self, args: &[String]) -> Result<CommandOutcome, CommandError> {
        let [name, offset, size] = args else {
            return Ok(CommandOutcome::respond(Response::status(
                Status::InvalidArguments,
            )));
        };

        if !is_decimal(offset) || !is_decimal(size) {
            return Ok(CommandOutcome::respond(Response::status(
                Status::InvalidArguments,
            )));
        }

        // All-digit values too large for u64 necessarily exceed any real
        // file's size.
        let (Ok(offset), Ok(size)) = (offset.parse::<u64>(), size.parse::<u64>()) else {
            return Ok(CommandOutcome::respond(Response::status(Status::BadOffset)));
        };

        let file_size = match self.store.size(name) {
            Ok(n) => n,
            Err(StoreError::NotFound) => {
                return Ok(CommandOutcome::respond(Response::status(
                    Status::FileNotFound,
                )))
            }
            Err(e) => return Err(e.into()),
        };

        if offset > file_size || size > file_size - offset {
            return Ok(CommandOutcome::respond(Response::status(Status::BadOffset)));
        }

        let data = match self.store.read_range(name, offset, size) {
            Ok(data) => data,
            Err(StoreError::NotFound) => {
                return Ok(CommandOutcome::respond(Response::status(
                    Status::FileNotFound,
                )))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(CommandOutcome::respond(Response::ok_with(vec![
            BASE64.encode(&data)
        ])))
    }
}

/// True when `s` is a non-empty run of ASCII digits.
///
/// Signs and leading whitespace are rejected, matching the reference
/// server's `isdigit` validation.
fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn handler_with_files(files: &[(&str, &[u8])]) -> (TempDir, CommandHandler) {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            let mut f = File::create(dir.path().join(name)).unwrap();
            f.write_all(contents).unwrap();
        }
        let store = Arc::new(FileStore::new(dir.path()).unwrap());
        (dir, CommandHandler::new(store))
    }

    fn run(handler: &CommandHandler, line: &str) -> CommandOutcome {
        let request = Request::parse(line.as_bytes()).unwrap();
        handler.execute(&request)
    }

    #[test]
    fn test_quit() {
        let (_dir, handler) = handler_with_files(&[]);

        let outcome = run(&handler, "quit");
        assert_eq!(outcome.response.status, Status::Ok);
        assert!(outcome.close);
    }

    #[test]
    fn test_quit_with_arguments_stays_open() {
        let (_dir, handler) = handler_with_files(&[]);

        let outcome = run(&handler, "quit now");
        assert_eq!(outcome.response.status, Status::InvalidArguments);
        assert!(!outcome.close);
    }

    #[test]
    fn test_unknown_command() {
        let (_dir, handler) = handler_with_files(&[]);

        let outcome = run(&handler, "bogus_command");
        assert_eq!(outcome.response.status, Status::InvalidCommand);
        assert!(!outcome.close);
    }

    #[test]
    fn test_file_listing() {
        let (_dir, handler) = handler_with_files(&[("b.bin", b"xy"), ("a.txt", b"ABCD")]);

        let outcome = run(&handler, "get_file_listing");
        assert_eq!(outcome.response.status, Status::Ok);
        assert_eq!(outcome.response.payload, vec!["a.txt", "b.bin", ""]);
        assert_eq!(
            outcome.response.serialize(),
            b"0 OK\r\na.txt\r\nb.bin\r\n\r\n"
        );
    }

    #[test]
    fn test_file_listing_empty_root() {
        let (_dir, handler) = handler_with_files(&[]);

        let outcome = run(&handler, "get_file_listing");
        assert_eq!(outcome.response.serialize(), b"0 OK\r\n\r\n");
    }

    #[test]
    fn test_file_listing_rejects_arguments() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        let outcome = run(&handler, "get_file_listing extra");
        assert_eq!(outcome.response.status, Status::InvalidArguments);
    }

    #[test]
    fn test_metadata() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        let outcome = run(&handler, "get_metadata a.txt");
        assert_eq!(outcome.response.status, Status::Ok);
        assert_eq!(outcome.response.payload, vec!["4"]);
    }

    #[test]
    fn test_metadata_missing_file() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        let outcome = run(&handler, "get_metadata missing.txt");
        assert_eq!(outcome.response.status, Status::FileNotFound);
    }

    #[test]
    fn test_metadata_argument_count() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        for line in ["get_metadata", "get_metadata a.txt extra"] {
            let outcome = run(&handler, line);
            assert_eq!(outcome.response.status, Status::InvalidArguments);
        }
    }

    #[test]
    fn test_slice_decodes_to_exact_range() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        let outcome = run(&handler, "get_slice a.txt 1 2");
        assert_eq!(outcome.response.status, Status::Ok);
        let decoded = BASE64.decode(&outcome.response.payload[0]).unwrap();
        assert_eq!(decoded, b"BC");
    }

    #[test]
    fn test_slice_whole_file() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        let outcome = run(&handler, "get_slice a.txt 0 4");
        let decoded = BASE64.decode(&outcome.response.payload[0]).unwrap();
        assert_eq!(decoded, b"ABCD");
    }

    #[test]
    fn test_slice_bounds() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        // offset past the end
        let outcome = run(&handler, "get_slice a.txt 5 0");
        assert_eq!(outcome.response.status, Status::BadOffset);

        // size past the end
        let outcome = run(&handler, "get_slice a.txt 0 10");
        assert_eq!(outcome.response.status, Status::BadOffset);

        let outcome = run(&handler, "get_slice a.txt 3 2");
        assert_eq!(outcome.response.status, Status::BadOffset);
    }

    #[test]
    fn test_slice_at_eof_with_zero_size() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        let outcome = run(&handler, "get_slice a.txt 4 0");
        assert_eq!(outcome.response.status, Status::Ok);
        assert_eq!(outcome.response.payload, vec![""]);
    }

    #[test]
    fn test_slice_missing_file() {
        let (_dir, handler) = handler_with_files(&[]);

        let outcome = run(&handler, "get_slice missing.txt 0 1");
        assert_eq!(outcome.response.status, Status::FileNotFound);
    }

    #[test]
    fn test_slice_invalid_arguments() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        for line in [
            "get_slice",
            "get_slice a.txt",
            "get_slice a.txt 1",
            "get_slice a.txt 1 2 3",
            "get_slice a.txt -1 2",
            "get_slice a.txt 1 two",
            "get_slice a.txt 1.5 2",
        ] {
            let outcome = run(&handler, line);
            assert_eq!(
                outcome.response.status,
                Status::InvalidArguments,
                "line: {line}"
            );
        }
    }

    #[test]
    fn test_slice_huge_decimal_reports_bad_offset() {
        let (_dir, handler) = handler_with_files(&[("a.txt", b"ABCD")]);

        let outcome = run(&handler, "get_slice a.txt 99999999999999999999999999 1");
        assert_eq!(outcome.response.status, Status::BadOffset);
    }
}
