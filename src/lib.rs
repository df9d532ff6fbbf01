//! Genealogy Tree Library
//!
//! Turns single family-record entries into LaTeX for a genealogytree
//! document. This library provides functionality to:
//! - Parse the loose date formats found in parish and civil registers
//! - Estimate ages from dates of mixed precision
//! - Assign identifiers to persons, with placeholders for missing data
//! - Render persons as `name`/`birth`/`death` node entries
//! - Load person records from TOML files
//!
//! # Example
//!
//! ```
//! use gentree::latex::render;
//! use gentree::person::{Person, PersonRecord};
//!
//! let person = Person::new(PersonRecord {
//!     name: Some("Gianni".to_string()),
//!     surname: Some("Armani".to_string()),
//!     birth_date: Some("2000".to_string()),
//!     death_date: Some("3/03/2100".to_string()),
//!     ..Default::default()
//! })
//! .expect("valid dates");
//!
//! assert_eq!(person.id(), "ArmaniGianni2000");
//! assert!(render(&person).contains("death = {3/03/2100 [99-100]}{?}"));
//! ```

pub mod clock;
pub mod date;
pub mod error;
pub mod latex;
pub mod person;
pub mod records;

// Re-export commonly used items
pub use error::{Error, Result};
pub use person::{Person, PersonRecord};
