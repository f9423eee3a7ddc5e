use std::fmt;

use crate::{NonEmptyCell, UserId};

/// A registered account.
///
/// The secret is kept and compared as plain text; the `Debug` impl masks it.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    identifier: NonEmptyCell,
    secret: NonEmptyCell,
}

impl User {
    #[must_use]
    pub fn new(id: UserId, identifier: NonEmptyCell, secret: NonEmptyCell) -> Self {
        Self {
            id,
            identifier,
            secret,
        }
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    #[must_use]
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }
}

// Manual Debug impl to keep secrets out of logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("identifier", &self.identifier.as_str())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
