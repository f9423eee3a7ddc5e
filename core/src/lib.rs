//! Application facade for the zoo inventory.
//!
//! [`Zoo`] validates raw input from the console layer, builds the right
//! [`Species`] and forwards to the [`DelimitedStore`]. Every failure comes
//! back as a value; nothing here is fatal to the process.

mod error;
mod seed;
mod stats;

pub use error::{Result, ZooError};
pub use seed::DEMO_CAST;
pub use stats::Statistics;
pub use zoo_store::{DelimitedStore, Initialized, Registration};
use zoo_types::{
    Animal, AnimalId, AnimalKind, CellText, NonEmptyCell, Settings, Species, Weight,
};

/// Fields to change on an existing animal. `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimalEdit<'a> {
    pub name: Option<&'a str>,
    pub weight: Option<f64>,
    /// Raw species attribute. Ignored for kinds without one.
    pub extra: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct Zoo {
    store: DelimitedStore,
}

impl Zoo {
    #[must_use]
    pub fn new(store: DelimitedStore) -> Self {
        Self { store }
    }

    /// Build the store from resolved settings, create missing files and seed
    /// demo data when enabled.
    pub fn open(settings: &Settings) -> Result<Self> {
        let zoo = Self::new(DelimitedStore::new(settings.paths.clone()));
        zoo.initialize()?;
        if settings.seed_demo_data {
            zoo.seed_demo_data()?;
        }
        Ok(zoo)
    }

    #[must_use]
    pub fn store(&self) -> &DelimitedStore {
        &self.store
    }

    pub fn initialize(&self) -> Result<Initialized> {
        Ok(self.store.initialize()?)
    }

    pub fn list_animals(&self) -> Result<Vec<Animal>> {
        Ok(self.store.load_animals()?)
    }

    /// Validate raw input, build the species for `kind` and persist it.
    pub fn add_animal(
        &self,
        kind: AnimalKind,
        name: &str,
        weight: f64,
        extra: &str,
    ) -> Result<Animal> {
        let name = NonEmptyCell::new(name).map_err(ZooError::InvalidName)?;
        let weight = Weight::new(weight)?;
        let species = build_species(kind, extra)?;
        Ok(self.store.add_animal(Animal::new(name, weight, species))?)
    }

    /// Merge the supplied fields into the stored record and write it back.
    ///
    /// The kind never changes. Validation happens before anything is written.
    pub fn edit_animal(&self, id: AnimalId, edit: AnimalEdit<'_>) -> Result<Animal> {
        let mut animal = self
            .find_animal(id)?
            .ok_or(ZooError::AnimalNotFound(id))?;

        if let Some(name) = edit.name {
            animal.set_name(NonEmptyCell::new(name).map_err(ZooError::InvalidName)?);
        }
        if let Some(weight) = edit.weight {
            animal.set_weight(Weight::new(weight)?);
        }
        if let Some(extra) = edit.extra {
            match animal.kind() {
                AnimalKind::Lion => {
                    tracing::debug!(id = %id, "Ignoring extra attribute for Lion");
                }
                kind => animal.set_species(build_species(kind, extra)?)?,
            }
        }

        if !self.store.update_animal(&animal)? {
            return Err(ZooError::AnimalNotFound(id));
        }
        Ok(animal)
    }

    /// Remove an animal. `None` when no record has `id`.
    pub fn delete_animal(&self, id: AnimalId) -> Result<Option<Animal>> {
        Ok(self.store.delete_animal(id)?)
    }

    pub fn find_animal(&self, id: AnimalId) -> Result<Option<Animal>> {
        Ok(self.list_animals()?.into_iter().find(|a| a.id() == id))
    }

    pub fn statistics(&self) -> Result<Statistics> {
        Ok(Statistics::from_animals(&self.list_animals()?))
    }

    /// `(name, sound)` for every animal, in file order.
    pub fn sounds(&self) -> Result<Vec<(String, &'static str)>> {
        Ok(self
            .list_animals()?
            .iter()
            .map(|a| (a.name().to_string(), a.sound()))
            .collect())
    }

    pub fn login(&self, identifier: &str, secret: &str) -> Result<bool> {
        Ok(self.store.authenticate(identifier, secret)?)
    }

    pub fn register(&self, identifier: &str, secret: &str) -> Result<Registration> {
        let identifier = NonEmptyCell::new(identifier).map_err(ZooError::InvalidCredential)?;
        let secret = NonEmptyCell::new(secret).map_err(ZooError::InvalidCredential)?;
        Ok(self.store.register_user(identifier, secret)?)
    }
}

fn parse_length(kind: AnimalKind, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|meters| meters.is_finite() && *meters >= 0.0)
        .ok_or_else(|| ZooError::InvalidExtra {
            kind,
            raw: raw.to_string(),
        })
}

fn parse_text(kind: AnimalKind, raw: &str) -> Result<CellText> {
    CellText::new(raw.trim()).map_err(|source| ZooError::InvalidExtraText { kind, source })
}

fn build_species(kind: AnimalKind, extra: &str) -> Result<Species> {
    Ok(match kind {
        AnimalKind::Lion => Species::Lion,
        AnimalKind::Elephant => Species::Elephant {
            trunk_length: parse_length(kind, extra)?,
        },
        AnimalKind::Parrot => Species::Parrot {
            color: parse_text(kind, extra)?,
        },
        AnimalKind::Giraffe => Species::Giraffe {
            neck_length: parse_length(kind, extra)?,
        },
        AnimalKind::Penguin => Species::Penguin {
            rank: parse_text(kind, extra)?,
        },
    })
}
