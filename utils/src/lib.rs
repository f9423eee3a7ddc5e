//! Shared infrastructure utilities for the zoo inventory.
//!
//! Cross-cutting file helpers that don't belong in the domain-pure
//! `zoo-types` crate:
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename), no-clobber
//!   creation, `.bak` recovery and scoped single-line appends

pub mod atomic_write;

pub use atomic_write::{
    AtomicWriteOptions, FileSyncPolicy, PersistMode, append_line, atomic_create_with_options,
    atomic_write, atomic_write_with_options, recover_bak_file,
};
