//! Core domain types for the zoo inventory.
//!
//! This crate contains pure domain types with no IO and minimal dependencies:
//! the animal record and its species, user accounts, typed identifiers,
//! resolved settings, and the delimited row codec both stores share.

mod animal;
mod ids;
mod row;
mod settings;
mod text;
mod user;

pub use animal::{Animal, AnimalKind, KindChangeError, Species, Weight, WeightError};
pub use ids::{AnimalId, UserId};
pub use row::{ANIMAL_HEADER, RowError, USER_HEADER, UserRow, leading_id};
pub use settings::{DEFAULT_ANIMALS_FILE, DEFAULT_USERS_FILE, Settings, StorePaths};
pub use text::{CellText, FieldTextError, NonEmptyCell};
pub use user::User;

/// Column separator for every persisted row.
pub const DELIMITER: char = ',';
