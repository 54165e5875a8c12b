//! File Storage Module
//!
//! This module provides the read-only filesystem view the command handlers
//! use to serve requests.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 FileStore                   │
//! │                                             │
//! │  list_regular_files()  ─┐                   │
//! │  exists(name)           ├──> served root    │
//! │  size(name)             │    (one directory │
//! │  read_range(...)       ─┘     on disk)      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! There is no cache: every call goes to the filesystem, so results always
//! reflect the directory's current contents.
//!
//! ## Example
//!
//! ```no_run
//! use hftpd::storage::FileStore;
//!
//! let store = FileStore::new("testdata")?;
//! for name in store.list_regular_files()? {
//!     println!("{}: {} bytes", name, store.size(&name)?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod store;

// Re-export commonly used types
pub use store::{FileStore, StoreError, StoreResult};
