//! Delimited row codec for animals and users.
//!
//! Animal rows are `id,kind,name,weight,extra`; Lion rows still carry the
//! trailing empty slot so every row has five columns. Numbers are written
//! with `f64`'s `Display`, which is locale-independent and round-trips.

use thiserror::Error;

use crate::{
    Animal, AnimalId, AnimalKind, CellText, DELIMITER, FieldTextError, NonEmptyCell, Species,
    User, Weight,
};

pub const ANIMAL_HEADER: &str = "Id,Type,Name,Weight,Extra";
pub const USER_HEADER: &str = "Id,Email,Password";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("expected at least 4 fields, found {0}")]
    TooFewFields(usize),
    #[error("invalid id {0:?}")]
    InvalidId(String),
    #[error("invalid weight {0:?}")]
    InvalidWeight(String),
    #[error("unrecognized kind {0:?}")]
    UnknownKind(String),
    #[error("invalid name: {0}")]
    InvalidName(FieldTextError),
}

/// Parse the leading integer column of a data row.
#[must_use]
pub fn leading_id(line: &str) -> Option<u64> {
    let first = line.split(DELIMITER).next()?;
    first.trim().parse().ok()
}

fn parse_length(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

impl Animal {
    #[must_use]
    pub fn to_row(&self) -> String {
        format!(
            "{id}{d}{kind}{d}{name}{d}{weight}{d}{extra}",
            id = self.id(),
            kind = self.kind(),
            name = self.name(),
            weight = self.weight(),
            extra = self.species().extra_cell(),
            d = DELIMITER,
        )
    }

    /// Parse one data row.
    ///
    /// Unparseable numeric extras fall back to `0`, missing text extras to
    /// the empty string. Everything else that does not fit is an error and
    /// the caller is expected to skip the row.
    pub fn from_row(line: &str) -> Result<Self, RowError> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        let [id, tag, name, weight, rest @ ..] = fields.as_slice() else {
            return Err(RowError::TooFewFields(fields.len()));
        };

        let id = id
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| RowError::InvalidId((*id).to_string()))?;
        let weight = weight
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|kg| Weight::new(kg).ok())
            .ok_or_else(|| RowError::InvalidWeight((*weight).to_string()))?;
        let kind =
            AnimalKind::parse(tag).ok_or_else(|| RowError::UnknownKind((*tag).to_string()))?;
        let name = NonEmptyCell::new(*name).map_err(RowError::InvalidName)?;
        let extra = rest.first().copied().unwrap_or("");

        let species = match kind {
            AnimalKind::Lion => Species::Lion,
            AnimalKind::Elephant => Species::Elephant {
                trunk_length: parse_length(extra),
            },
            AnimalKind::Parrot => Species::Parrot {
                color: CellText::new(extra).unwrap_or_default(),
            },
            AnimalKind::Giraffe => Species::Giraffe {
                neck_length: parse_length(extra),
            },
            AnimalKind::Penguin => Species::Penguin {
                rank: CellText::new(extra).unwrap_or_default(),
            },
        };

        Ok(Self::new(name, weight, species).with_id(AnimalId::new(id)))
    }
}

impl User {
    #[must_use]
    pub fn to_row(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            self.id(),
            self.identifier(),
            self.secret(),
            d = DELIMITER
        )
    }
}

/// Borrowed view over the identifier and secret columns of a user row.
///
/// The id column is not interpreted: lookups by identifier work on every row
/// that has one, whatever state its id is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRow<'a> {
    pub identifier: &'a str,
    pub secret: Option<&'a str>,
}

impl<'a> UserRow<'a> {
    #[must_use]
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.split(DELIMITER).skip(1);
        let identifier = fields.next()?;
        Some(Self {
            identifier,
            secret: fields.next(),
        })
    }

    /// Exact, case-sensitive comparison of both columns.
    #[must_use]
    pub fn matches(&self, identifier: &str, secret: &str) -> bool {
        self.identifier == identifier && self.secret == Some(secret)
    }
}
