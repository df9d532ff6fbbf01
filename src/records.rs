//! Record files
//!
//! A record file is TOML with one `[[person]]` table per individual:
//!
//! ```toml
//! [[person]]
//! name = "Sebastiano"
//! surname = "Donazzan"
//! sex = "male"
//! birth_date = "1884-06-19"
//! birth_details = '\pove'
//! death_date = "1952-09-17"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::person::PersonRecord;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordFile {
    #[serde(default)]
    person: Vec<PersonRecord>,
}

/// Parse the contents of a record file; `path` is only used in errors
pub fn parse_records(text: &str, path: &Path) -> Result<Vec<PersonRecord>> {
    let file: RecordFile = toml::from_str(text).map_err(|source| Error::Record {
        path: path.to_path_buf(),
        source,
    })?;

    if file.person.is_empty() {
        return Err(Error::EmptyRecordFile(path.to_path_buf()));
    }

    Ok(file.person)
}

/// Read and parse a record file
pub fn load_records(path: &Path) -> Result<Vec<PersonRecord>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    let records = parse_records(&text, path)?;
    debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Expand glob patterns into a sorted list of paths
///
/// Arguments without glob characters are taken literally, even if the file
/// does not exist yet; a pattern that matches nothing is an error.
pub fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let entries = glob(pattern)
                .map_err(|e| Error::InvalidGlob(format!("{}: {}", pattern, e)))?;

            let mut matched = false;
            for entry in entries {
                match entry {
                    Ok(path) => {
                        paths.push(path);
                        matched = true;
                    }
                    Err(e) => warn!(pattern = %pattern, error = %e, "glob error"),
                }
            }
            if !matched {
                return Err(Error::NoFilesMatched(pattern.clone()));
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    // Sort paths for consistent ordering
    paths.sort();

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DONAZZAN: &str = r#"
[[person]]
name = "Sebastiano"
surname = "Donazzan"
sex = "male"
birth_date = "1884-06-19"
birth_details = '\pove'
death_date = "1952-09-17"
work = "Tagliapietra"

[[person]]
sex = "female"
birth_date = "1890"
"#;

    #[test]
    fn test_parse_records() {
        let records = parse_records(DONAZZAN, Path::new("donazzan.toml")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].surname.as_deref(), Some("Donazzan"));
        assert_eq!(records[0].birth_details.as_deref(), Some("\\pove"));
        assert_eq!(records[0].work.as_deref(), Some("Tagliapietra"));
        assert_eq!(records[1].name, None);
        assert_eq!(records[1].birth_date.as_deref(), Some("1890"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let text = "[[person]]\nbirthDate = \"1890\"\n";
        let err = parse_records(text, Path::new("typo.toml")).unwrap_err();
        assert!(matches!(err, Error::Record { .. }));
        assert!(err.to_string().contains("typo.toml"));
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = parse_records("", Path::new("empty.toml")).unwrap_err();
        assert!(matches!(err, Error::EmptyRecordFile(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_records(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_literal_paths_are_sorted() {
        let paths = expand_globs(&["b.toml".to_string(), "a.toml".to_string()]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
    }

    #[test]
    fn test_unmatched_pattern() {
        let err = expand_globs(&["no-such-dir-xyz/*.toml".to_string()]).unwrap_err();
        assert!(matches!(err, Error::NoFilesMatched(_)));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = expand_globs(&["records/[.toml".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidGlob(_)));
    }
}
