//! Person identifiers and the placeholders used for missing identity fields

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Produces stand-ins for identity fields a record does not provide
pub trait PlaceholderGenerator {
    /// Stand-in for a missing name or surname
    fn name_placeholder(&mut self) -> String;

    /// Stand-in for a missing birth date
    fn date_placeholder(&mut self) -> String;
}

/// Random placeholders of the form `.naXXXXXX.` and `.na123456.`
#[derive(Debug, Clone)]
pub struct RandomPlaceholders<R = StdRng> {
    rng: R,
}

impl RandomPlaceholders<StdRng> {
    /// Seeded from the operating system; ids differ on every run
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Reproducible sequence of placeholders
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomPlaceholders<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PlaceholderGenerator for RandomPlaceholders<R> {
    fn name_placeholder(&mut self) -> String {
        let letters: String = (0..6)
            .map(|_| char::from(self.rng.random_range(b'A'..=b'Z')))
            .collect();
        format!(".na{}.", letters)
    }

    fn date_placeholder(&mut self) -> String {
        format!(".na{}.", self.rng.random_range(100_000u32..=999_999))
    }
}

/// Build the identifier `surname + name + birth date`
///
/// Missing parts are replaced by placeholders, requested in the order name,
/// surname, birth date. Only a record with all three parts gets a stable id.
pub fn synthesize_id(
    name: Option<&str>,
    surname: Option<&str>,
    birth_date: Option<&str>,
    placeholders: &mut dyn PlaceholderGenerator,
) -> String {
    let name = name.map_or_else(|| placeholders.name_placeholder(), str::to_string);
    let surname = surname.map_or_else(|| placeholders.name_placeholder(), str::to_string);
    let birth_date =
        birth_date.map_or_else(|| placeholders.date_placeholder(), str::to_string);

    let id = format!("{}{}{}", surname, name, birth_date);
    debug!(%id, "synthesized person id");
    id
}
