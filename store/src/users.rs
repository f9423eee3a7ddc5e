//! User accounts: registration and plain-text credential checks.

use zoo_types::{NonEmptyCell, User, UserId, UserRow};
use zoo_utils::append_line;

use crate::error::{Result, StoreError};
use crate::store::{DelimitedStore, data_lines, read_optional};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Registered(User),
    /// An account with this identifier already exists; nothing was written.
    Duplicate,
}

impl DelimitedStore {
    /// Append a new account unless the identifier is taken (case-sensitive).
    pub fn register_user(
        &self,
        identifier: NonEmptyCell,
        secret: NonEmptyCell,
    ) -> Result<Registration> {
        self.ensure_user_file()?;
        let path = self.paths().users();
        let content = read_optional(path)?.unwrap_or_default();

        let taken = data_lines(&content)
            .filter_map(|(_, line)| UserRow::parse(line))
            .any(|row| row.identifier == identifier.as_str());
        if taken {
            tracing::debug!(path = %path.display(), "Registration rejected: identifier taken");
            return Ok(Registration::Duplicate);
        }

        let id = UserId::new(Self::next_id(path)?);
        let user = User::new(id, identifier, secret);
        append_line(path, &user.to_row()).map_err(|e| StoreError::write(path, e))?;

        tracing::debug!(id = %id, path = %path.display(), "Registered user");
        Ok(Registration::Registered(user))
    }

    /// `true` iff some row has exactly this identifier and secret.
    ///
    /// Unknown identifiers and wrong secrets are indistinguishable to the
    /// caller. A missing user file authenticates nobody.
    pub fn authenticate(&self, identifier: &str, secret: &str) -> Result<bool> {
        let path = self.paths().users();
        let Some(content) = read_optional(path)? else {
            return Ok(false);
        };

        let ok = data_lines(&content)
            .filter_map(|(_, line)| UserRow::parse(line))
            .any(|row| row.matches(identifier, secret));
        tracing::debug!(ok, "Authentication attempt");
        Ok(ok)
    }
}
