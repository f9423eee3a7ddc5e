//! Delimited, file-backed storage for the zoo inventory.
//!
//! Two plain-text files, one row per entity and a fixed header on the first
//! line:
//!
//! ```text
//! animals.csv   Id,Type,Name,Weight,Extra
//! users.csv     Id,Email,Password
//! ```
//!
//! Additions and registrations append a single line. Updates and deletions
//! load the whole collection, modify it in memory and atomically rewrite the
//! file. Ids are recomputed from the file on every insert as "max + 1".

mod animals;
mod error;
mod store;
mod users;

pub use error::{Result, StoreError};
pub use store::{DEFAULT_ADMIN, DelimitedStore, Initialized};
pub use users::Registration;
