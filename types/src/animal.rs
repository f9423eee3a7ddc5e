//! The animal record: one shared base shape plus a closed set of species.

use std::fmt;

use thiserror::Error;

use crate::{AnimalId, CellText, NonEmptyCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimalKind {
    Lion,
    Elephant,
    Parrot,
    Giraffe,
    Penguin,
}

impl AnimalKind {
    pub const ALL: [Self; 5] = [
        Self::Lion,
        Self::Elephant,
        Self::Parrot,
        Self::Giraffe,
        Self::Penguin,
    ];

    /// Tag written to the `Type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lion => "Lion",
            Self::Elephant => "Elephant",
            Self::Parrot => "Parrot",
            Self::Giraffe => "Giraffe",
            Self::Penguin => "Penguin",
        }
    }

    /// Exact, case-sensitive match against the stored tag.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    /// Label of the single species-specific attribute, if the kind has one.
    #[must_use]
    pub const fn extra_label(self) -> Option<&'static str> {
        match self {
            Self::Lion => None,
            Self::Elephant => Some("trunk length (m)"),
            Self::Parrot => Some("color"),
            Self::Giraffe => Some("neck length (m)"),
            Self::Penguin => Some("rank"),
        }
    }
}

impl fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WeightError {
    #[error("weight must not be negative (got {0})")]
    Negative(f64),
    #[error("weight must be a finite number")]
    NotFinite,
}

/// Body weight in kilograms. Finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub fn new(kg: f64) -> Result<Self, WeightError> {
        if !kg.is_finite() {
            return Err(WeightError::NotFinite);
        }
        if kg < 0.0 {
            return Err(WeightError::Negative(kg));
        }
        Ok(Self(kg))
    }

    #[must_use]
    pub const fn kg(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The species of an animal together with its one extra attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Species {
    Lion,
    Elephant { trunk_length: f64 },
    Parrot { color: CellText },
    Giraffe { neck_length: f64 },
    Penguin { rank: CellText },
}

impl Species {
    #[must_use]
    pub const fn kind(&self) -> AnimalKind {
        match self {
            Self::Lion => AnimalKind::Lion,
            Self::Elephant { .. } => AnimalKind::Elephant,
            Self::Parrot { .. } => AnimalKind::Parrot,
            Self::Giraffe { .. } => AnimalKind::Giraffe,
            Self::Penguin { .. } => AnimalKind::Penguin,
        }
    }

    /// The extra attribute as it is written to the `Extra` column.
    #[must_use]
    pub fn extra_cell(&self) -> String {
        match self {
            Self::Lion => String::new(),
            Self::Elephant { trunk_length } => trunk_length.to_string(),
            Self::Giraffe { neck_length } => neck_length.to_string(),
            Self::Parrot { color } => color.to_string(),
            Self::Penguin { rank } => rank.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot turn a {from} into a {to}")]
pub struct KindChangeError {
    pub from: AnimalKind,
    pub to: AnimalKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    id: AnimalId,
    name: NonEmptyCell,
    weight: Weight,
    species: Species,
}

impl Animal {
    /// A record that has not been persisted yet.
    #[must_use]
    pub fn new(name: NonEmptyCell, weight: Weight, species: Species) -> Self {
        Self {
            id: AnimalId::UNASSIGNED,
            name,
            weight,
            species,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: AnimalId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn id(&self) -> AnimalId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &NonEmptyCell {
        &self.name
    }

    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[must_use]
    pub fn species(&self) -> &Species {
        &self.species
    }

    #[must_use]
    pub fn kind(&self) -> AnimalKind {
        self.species.kind()
    }

    pub fn set_name(&mut self, name: NonEmptyCell) {
        self.name = name;
    }

    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    /// Replace the species attribute. The kind itself is fixed for life.
    pub fn set_species(&mut self, species: Species) -> Result<(), KindChangeError> {
        let (from, to) = (self.kind(), species.kind());
        if from != to {
            return Err(KindChangeError { from, to });
        }
        self.species = species;
        Ok(())
    }

    /// Daily food requirement in kilograms.
    #[must_use]
    pub fn daily_food(&self) -> f64 {
        let kg = self.weight.kg();
        match self.species {
            Species::Lion => kg * 0.05,
            Species::Elephant { .. } => kg * 0.10,
            Species::Parrot { .. } => 0.1,
            Species::Giraffe { .. } => kg * 0.08,
            Species::Penguin { .. } => kg * 0.15,
        }
    }

    #[must_use]
    pub fn sound(&self) -> &'static str {
        match self.species {
            Species::Lion => "Roooar!",
            Species::Elephant { .. } => "Toot-toot!",
            Species::Parrot { .. } => "Pieces of eight!",
            Species::Giraffe { .. } => "Munch-munch",
            Species::Penguin { .. } => "Smile and wave!",
        }
    }

    /// One-line human readable summary, e.g. `ID: 2 | Dumbo (Elephant) trunk: 0.5m`.
    #[must_use]
    pub fn description(&self) -> String {
        let base = format!("ID: {} | {} ({})", self.id, self.name, self.kind());
        match &self.species {
            Species::Lion => base,
            Species::Elephant { trunk_length } => format!("{base} trunk: {trunk_length}m"),
            Species::Parrot { color } => format!("{base} color: {color}"),
            Species::Giraffe { neck_length } => format!("{base} neck: {neck_length}m"),
            Species::Penguin { rank } => format!("{base} rank: {rank}"),
        }
    }
}
