//! The demo cast written into an empty animal store.

use zoo_store::DelimitedStore;
use zoo_types::AnimalKind;

use crate::Zoo;
use crate::error::Result;

/// `(kind, name, weight in kg, extra attribute)`
pub const DEMO_CAST: [(AnimalKind, &str, f64, &str); 5] = [
    (AnimalKind::Lion, "Alex", 220.0, ""),
    (AnimalKind::Elephant, "Dumbo", 200.0, "0.5"),
    (AnimalKind::Parrot, "Iago", 0.6, "Red"),
    (AnimalKind::Giraffe, "Melman", 1200.0, "2.8"),
    (AnimalKind::Penguin, "Skipper", 15.0, "Captain"),
];

impl Zoo {
    /// Add the demo cast if the animal store holds no data rows yet.
    ///
    /// Returns how many records were added; `0` when data already exists.
    pub fn seed_demo_data(&self) -> Result<usize> {
        if DelimitedStore::next_id(self.store().paths().animals())? != 1 {
            return Ok(0);
        }
        for (kind, name, weight, extra) in DEMO_CAST {
            self.add_animal(kind, name, weight, extra)?;
        }
        tracing::info!(count = DEMO_CAST.len(), "Seeded demo animals");
        Ok(DEMO_CAST.len())
    }
}
