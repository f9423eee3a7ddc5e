use zoo_types::Animal;

/// Aggregate figures over the current animal collection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    pub count: usize,
    /// Kilograms.
    pub total_weight: f64,
    /// Kilograms per day.
    pub total_daily_food: f64,
    /// Kilograms per day; `0.0` for an empty collection.
    pub average_daily_food: f64,
}

impl Statistics {
    #[must_use]
    pub fn from_animals(animals: &[Animal]) -> Self {
        let count = animals.len();
        if count == 0 {
            return Self::default();
        }
        let total_weight = animals.iter().map(|a| a.weight().kg()).sum();
        let total_daily_food: f64 = animals.iter().map(Animal::daily_food).sum();
        Self {
            count,
            total_weight,
            total_daily_food,
            average_daily_food: total_daily_food / count as f64,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
