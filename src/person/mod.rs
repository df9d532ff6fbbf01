//! Person records
//!
//! A [`Person`] is built once from a [`PersonRecord`]. Construction parses the
//! vital dates, estimates an age and assigns an identifier; afterwards the
//! person is read-only.

pub mod age;
pub mod ids;

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::date::{parse_date, ParsedDate};
use crate::error::Result;

pub use age::{estimate_age, Age};
pub use ids::{synthesize_id, PlaceholderGenerator, RandomPlaceholders};

/// Input fields for one person, all optional
///
/// Field names double as the keys of a `[[person]]` table in a record file.
/// Empty strings are treated the same as missing fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonRecord {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub nickname: Option<String>,
    pub sex: Option<String>,

    pub birth_date: Option<String>,
    pub birth_details: Option<String>,
    /// Extra birth entry; switches the LaTeX key to `birth+`
    pub birth_plus: Option<String>,
    pub death_date: Option<String>,
    pub death_details: Option<String>,
    /// Extra death entry; switches the LaTeX key to `death+`
    pub death_plus: Option<String>,

    pub work: Option<String>,
    pub work_details: Option<String>,
    pub comment: Option<String>,
}

impl PersonRecord {
    /// Drop empty fields; whitespace is a value like any other
    fn normalized(self) -> Self {
        fn keep(field: Option<String>) -> Option<String> {
            field.filter(|value| !value.is_empty())
        }

        Self {
            name: keep(self.name),
            surname: keep(self.surname),
            nickname: keep(self.nickname),
            sex: keep(self.sex),
            birth_date: keep(self.birth_date),
            birth_details: keep(self.birth_details),
            birth_plus: keep(self.birth_plus),
            death_date: keep(self.death_date),
            death_details: keep(self.death_details),
            death_plus: keep(self.death_plus),
            work: keep(self.work),
            work_details: keep(self.work_details),
            comment: keep(self.comment),
        }
    }
}

/// The two parents of a person, if known
///
/// Kept for reference only; nothing walks or validates the lineage.
#[derive(Debug, Clone, Default)]
pub struct Parents {
    pub first: Option<Arc<Person>>,
    pub second: Option<Arc<Person>>,
}

impl Parents {
    pub fn new(first: Option<Arc<Person>>, second: Option<Arc<Person>>) -> Self {
        Self { first, second }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

/// One individual of a family record
#[derive(Debug, Clone)]
pub struct Person {
    record: PersonRecord,
    parents: Parents,
    age: Option<Age>,
    id: String,
}

impl Person {
    /// Build a person using the system clock and random placeholders
    pub fn new(record: PersonRecord) -> Result<Self> {
        Self::with_parents(record, Parents::default())
    }

    /// Like [`Person::new`], recording the given parents
    pub fn with_parents(record: PersonRecord, parents: Parents) -> Result<Self> {
        Self::build(
            record,
            parents,
            &SystemClock,
            &mut RandomPlaceholders::from_entropy(),
        )
    }

    /// Build a person with explicit sources for "today" and placeholders
    ///
    /// Fails if a birth or death date is present but matches no accepted
    /// pattern. The clock is only consulted when there is a birth date and
    /// no death date.
    pub fn build(
        record: PersonRecord,
        parents: Parents,
        clock: &dyn Clock,
        placeholders: &mut dyn PlaceholderGenerator,
    ) -> Result<Self> {
        let record = record.normalized();

        let age = match record.birth_date.as_deref() {
            Some(birth) => {
                let start = parse_date(birth)?;
                let end = match record.death_date.as_deref() {
                    Some(death) => parse_date(death)?,
                    None => ParsedDate::today(clock.today()),
                };
                Some(estimate_age(&start, &end))
            }
            None => {
                // an unparseable death date is an error even without a birth date
                if let Some(death) = record.death_date.as_deref() {
                    parse_date(death)?;
                }
                None
            }
        };

        let id = synthesize_id(
            record.name.as_deref(),
            record.surname.as_deref(),
            record.birth_date.as_deref(),
            placeholders,
        );

        debug!(%id, age = ?age, "built person");

        Ok(Self {
            record,
            parents,
            age,
            id,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Estimated age; absent when the birth date is unknown
    pub fn age(&self) -> Option<Age> {
        self.age
    }

    /// Age as stored text, `"10"` or `"9-10"`
    pub fn age_text(&self) -> Option<String> {
        self.age.map(|age| age.to_string())
    }

    /// LaTeX node entry, see [`crate::latex::render`]
    pub fn to_latex(&self) -> String {
        crate::latex::render(self)
    }

    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    /// Normalized input fields
    pub fn record(&self) -> &PersonRecord {
        &self.record
    }

    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }

    pub fn surname(&self) -> Option<&str> {
        self.record.surname.as_deref()
    }

    pub fn nickname(&self) -> Option<&str> {
        self.record.nickname.as_deref()
    }

    pub fn sex(&self) -> Option<&str> {
        self.record.sex.as_deref()
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.record.birth_date.as_deref()
    }

    pub fn birth_details(&self) -> Option<&str> {
        self.record.birth_details.as_deref()
    }

    pub fn birth_plus(&self) -> Option<&str> {
        self.record.birth_plus.as_deref()
    }

    pub fn death_date(&self) -> Option<&str> {
        self.record.death_date.as_deref()
    }

    pub fn death_details(&self) -> Option<&str> {
        self.record.death_details.as_deref()
    }

    pub fn death_plus(&self) -> Option<&str> {
        self.record.death_plus.as_deref()
    }

    pub fn work(&self) -> Option<&str> {
        self.record.work.as_deref()
    }

    pub fn work_details(&self) -> Option<&str> {
        self.record.work_details.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.record.comment.as_deref()
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
