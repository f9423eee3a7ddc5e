//! Animal collection: load, append, and load-modify-rewrite mutations.

use zoo_types::{ANIMAL_HEADER, Animal, AnimalId};
use zoo_utils::{append_line, atomic_write};

use crate::error::{Result, StoreError};
use crate::store::{DelimitedStore, data_lines, read_optional};

impl DelimitedStore {
    /// All parseable animals in file order.
    ///
    /// Malformed rows (too few fields, bad id or weight, unknown kind) are
    /// logged and skipped; they never fail the load.
    pub fn load_animals(&self) -> Result<Vec<Animal>> {
        let path = self.paths().animals();
        let Some(content) = read_optional(path)? else {
            return Ok(Vec::new());
        };

        let mut animals = Vec::new();
        for (line_no, line) in data_lines(&content) {
            match Animal::from_row(line) {
                Ok(animal) => animals.push(animal),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = line_no,
                        "Skipping animal row: {e}"
                    );
                }
            }
        }
        Ok(animals)
    }

    /// Persist a new animal under a freshly assigned id.
    ///
    /// Any id already set on `animal` is replaced. Returns the stored record.
    pub fn add_animal(&self, animal: Animal) -> Result<Animal> {
        self.ensure_animal_file()?;
        let path = self.paths().animals();

        let id = AnimalId::new(Self::next_id(path)?);
        let animal = animal.with_id(id);
        append_line(path, &animal.to_row()).map_err(|e| StoreError::write(path, e))?;

        tracing::debug!(id = %id, kind = %animal.kind(), path = %path.display(), "Added animal");
        Ok(animal)
    }

    /// Replace the stored record that has `animal.id()`.
    ///
    /// Full replacement, not a merge. Returns `false` and leaves the file
    /// untouched when no record has that id.
    pub fn update_animal(&self, animal: &Animal) -> Result<bool> {
        let mut animals = self.load_animals()?;
        let Some(slot) = animals.iter_mut().find(|a| a.id() == animal.id()) else {
            tracing::debug!(id = %animal.id(), "Update skipped: no animal with id");
            return Ok(false);
        };
        *slot = animal.clone();

        self.rewrite_animals(&animals)?;
        tracing::debug!(id = %animal.id(), kind = %animal.kind(), "Updated animal");
        Ok(true)
    }

    /// Remove the first record with `id`, returning it.
    ///
    /// `None` means nothing matched and the file was not touched.
    pub fn delete_animal(&self, id: AnimalId) -> Result<Option<Animal>> {
        let mut animals = self.load_animals()?;
        let Some(pos) = animals.iter().position(|a| a.id() == id) else {
            tracing::debug!(id = %id, "Delete skipped: no animal with id");
            return Ok(None);
        };
        let removed = animals.remove(pos);

        self.rewrite_animals(&animals)?;
        tracing::debug!(id = %id, kind = %removed.kind(), "Deleted animal");
        Ok(Some(removed))
    }

    /// Rewrite the whole file from `animals`. Rows that failed to parse on
    /// the preceding load are not carried over.
    fn rewrite_animals(&self, animals: &[Animal]) -> Result<()> {
        let path = self.paths().animals();
        let mut content = String::with_capacity(64 * (animals.len() + 1));
        content.push_str(ANIMAL_HEADER);
        content.push('\n');
        for animal in animals {
            content.push_str(&animal.to_row());
            content.push('\n');
        }
        atomic_write(path, content.as_bytes()).map_err(|e| StoreError::write(path, e))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use zoo_types::{CellText, NonEmptyCell, Species, StorePaths, Weight};

    use super::*;

    fn store_in(dir: &Path) -> DelimitedStore {
        let store = DelimitedStore::new(StorePaths::in_dir(dir));
        store.initialize().unwrap();
        store
    }

    fn animal(name: &str, kg: f64, species: Species) -> Animal {
        Animal::new(
            NonEmptyCell::new(name).unwrap(),
            Weight::new(kg).unwrap(),
            species,
        )
    }

    fn read(store: &DelimitedStore) -> String {
        fs::read_to_string(store.paths().animals()).unwrap()
    }

    #[test]
    fn add_assigns_sequential_ids_and_appends_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let alex = store.add_animal(animal("Alex", 220.0, Species::Lion)).unwrap();
        let dumbo = store
            .add_animal(animal("Dumbo", 200.0, Species::Elephant { trunk_length: 0.5 }))
            .unwrap();

        assert_eq!(alex.id(), AnimalId::new(1));
        assert_eq!(dumbo.id(), AnimalId::new(2));
        assert_eq!(
            read(&store),
            "Id,Type,Name,Weight,Extra\n1,Lion,Alex,220,\n2,Elephant,Dumbo,200,0.5\n"
        );
    }

    #[test]
    fn add_ignores_caller_supplied_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let stored = store
            .add_animal(animal("Alex", 220.0, Species::Lion).with_id(AnimalId::new(42)))
            .unwrap();
        assert_eq!(stored.id(), AnimalId::new(1));
    }

    #[test]
    fn identical_records_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let first = store.add_animal(animal("Twin", 10.0, Species::Lion)).unwrap();
        let second = store.add_animal(animal("Twin", 10.0, Species::Lion)).unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(store.load_animals().unwrap().len(), 2);
    }

    #[test]
    fn add_creates_missing_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(StorePaths::in_dir(dir.path()));

        store.add_animal(animal("Alex", 220.0, Species::Lion)).unwrap();
        assert_eq!(read(&store), "Id,Type,Name,Weight,Extra\n1,Lion,Alex,220,\n");
    }

    #[test]
    fn load_skips_malformed_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(
            store.paths().animals(),
            "Id,Type,Name,Weight,Extra\n1,Lion,Alex,220,\n2,Lion,Bad,heavy,\n",
        )
        .unwrap();

        let animals = store.load_animals().unwrap();
        assert_eq!(animals.len(), 1);
        assert_eq!(animals[0].name().as_str(), "Alex");
    }

    #[test]
    fn load_skips_unknown_kinds_short_rows_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(
            store.paths().animals(),
            "Id,Type,Name,Weight,Extra\n\n1,Tiger,Shere Khan,200,\n2,Lion\n3,Penguin,Skipper,15,Captain\n",
        )
        .unwrap();

        let animals = store.load_animals().unwrap();
        assert_eq!(animals.len(), 1);
        assert_eq!(animals[0].id(), AnimalId::new(3));
        assert_eq!(
            animals[0].species(),
            &Species::Penguin {
                rank: CellText::new("Captain").unwrap()
            }
        );
    }

    #[test]
    fn load_keeps_rows_around_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(
            store.paths().animals(),
            b"Id,Type,Name,Weight,Extra\n1,Lion,Jos\xe9,220,\n2,Lion,Alex,220,\n",
        )
        .unwrap();

        let animals = store.load_animals().unwrap();
        let names: Vec<&str> = animals.iter().map(|a| a.name().as_str()).collect();
        assert_eq!(names, vec!["Jos\u{fffd}", "Alex"]);

        let added = store.add_animal(animal("Marty", 300.0, Species::Lion)).unwrap();
        assert_eq!(added.id(), AnimalId::new(3));
    }

    #[test]
    fn add_after_unterminated_last_row_starts_a_new_line() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.paths().animals(), "Id,Type,Name,Weight,Extra\n1,Lion,Alex,220,").unwrap();

        let bob = store.add_animal(animal("Bob", 180.0, Species::Lion)).unwrap();
        assert_eq!(bob.id(), AnimalId::new(2));

        let names: Vec<String> = store
            .load_animals()
            .unwrap()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, vec!["Alex".to_string(), "Bob".to_string()]);
    }

    #[test]
    fn add_refuses_when_ids_are_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let content = format!("Id,Type,Name,Weight,Extra\n{},Lion,Alex,220,\n", u64::MAX);
        fs::write(store.paths().animals(), &content).unwrap();

        let err = store.add_animal(animal("Bob", 180.0, Species::Lion)).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted { .. }));
        assert_eq!(read(&store), content);
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DelimitedStore::new(StorePaths::in_dir(dir.path()));
        assert!(store.load_animals().unwrap().is_empty());
    }

    #[test]
    fn load_preserves_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(
            store.paths().animals(),
            "Id,Type,Name,Weight,Extra\n9,Lion,C,1,\n2,Lion,A,1,\n5,Lion,B,1,\n",
        )
        .unwrap();

        let ids: Vec<u64> = store
            .load_animals()
            .unwrap()
            .iter()
            .map(|a| a.id().value())
            .collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }

    #[test]
    fn update_replaces_record_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.add_animal(animal("Alex", 220.0, Species::Lion)).unwrap();
        let mut melman = store
            .add_animal(animal("Melman", 1200.0, Species::Giraffe { neck_length: 2.8 }))
            .unwrap();
        store.add_animal(animal("Gloria", 1500.0, Species::Lion)).unwrap();

        melman.set_weight(Weight::new(1100.0).unwrap());
        assert!(store.update_animal(&melman).unwrap());

        assert_eq!(
            read(&store),
            "Id,Type,Name,Weight,Extra\n1,Lion,Alex,220,\n2,Giraffe,Melman,1100,2.8\n3,Lion,Gloria,1500,\n"
        );
    }

    #[test]
    fn update_with_unknown_id_is_a_silent_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.add_animal(animal("Alex", 220.0, Species::Lion)).unwrap();
        let before = read(&store);

        let ghost = animal("Ghost", 1.0, Species::Lion).with_id(AnimalId::new(99));
        assert!(!store.update_animal(&ghost).unwrap());
        assert_eq!(read(&store), before);
    }

    #[test]
    fn delete_removes_record_and_keeps_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.add_animal(animal("Alex", 220.0, Species::Lion)).unwrap();
        store.add_animal(animal("Marty", 300.0, Species::Lion)).unwrap();
        store.add_animal(animal("Gloria", 1500.0, Species::Lion)).unwrap();

        let removed = store.delete_animal(AnimalId::new(2)).unwrap().unwrap();
        assert_eq!(removed.name().as_str(), "Marty");

        let ids: Vec<u64> = store
            .load_animals()
            .unwrap()
            .iter()
            .map(|a| a.id().value())
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let next = store.add_animal(animal("Julien", 5.0, Species::Lion)).unwrap();
        assert_eq!(next.id(), AnimalId::new(4));
    }

    #[test]
    fn delete_unknown_id_leaves_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.add_animal(animal("Alex", 220.0, Species::Lion)).unwrap();
        let before = read(&store);

        assert!(store.delete_animal(AnimalId::new(7)).unwrap().is_none());
        assert_eq!(read(&store), before);
    }

    #[test]
    fn deleting_last_record_resets_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.add_animal(animal("Alex", 220.0, Species::Lion)).unwrap();
        store.add_animal(animal("Marty", 300.0, Species::Lion)).unwrap();
        store.delete_animal(AnimalId::new(1)).unwrap();
        store.delete_animal(AnimalId::new(2)).unwrap();

        assert_eq!(read(&store), "Id,Type,Name,Weight,Extra\n");
        let again = store.add_animal(animal("Alex", 220.0, Species::Lion)).unwrap();
        assert_eq!(again.id(), AnimalId::new(1));
    }

    #[test]
    fn rewrite_drops_rows_that_failed_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(
            store.paths().animals(),
            "Id,Type,Name,Weight,Extra\n1,Lion,Alex,220,\n2,Dragon,Smaug,9000,\n3,Lion,Marty,300,\n",
        )
        .unwrap();

        store.delete_animal(AnimalId::new(3)).unwrap();
        assert_eq!(read(&store), "Id,Type,Name,Weight,Extra\n1,Lion,Alex,220,\n");
    }
}
