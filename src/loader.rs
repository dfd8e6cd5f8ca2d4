//! This module provides the `SpecLoader` struct, responsible for reading and writing machine
//! specifications as JSON, from strings, files, and directories.

use crate::spec::{Spec, ValidSpec};
use crate::types::TuringMachineError;
use std::fs;
use std::path::{Path, PathBuf};

/// `SpecLoader` is a utility struct for persisting machine specifications.
/// Every load path validates the specification before returning it.
pub struct SpecLoader;

impl SpecLoader {
    /// Loads and validates a single specification from the given JSON file.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::SerializationError)` if the content is not a specification.
    /// * `Err(TuringMachineError::Spec)` if the specification is inconsistent.
    pub fn load(path: &Path) -> Result<ValidSpec, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parses and validates a specification from JSON text.
    pub fn from_json(content: &str) -> Result<ValidSpec, TuringMachineError> {
        let spec: Spec = serde_json::from_str(content)
            .map_err(|e| TuringMachineError::SerializationError(e.to_string()))?;

        Ok(spec.validate()?)
    }

    /// Serializes a specification as pretty-printed JSON.
    pub fn to_json(spec: &Spec) -> Result<String, TuringMachineError> {
        serde_json::to_string_pretty(spec)
            .map_err(|e| TuringMachineError::SerializationError(e.to_string()))
    }

    /// Writes a specification to `path` as JSON.
    pub fn save(path: &Path, spec: &Spec) -> Result<(), TuringMachineError> {
        let content = Self::to_json(spec)?;

        fs::write(path, content).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to write file {}: {}", path.display(), e))
        })
    }

    /// Loads every `.json` file in `directory`.
    ///
    /// Directories and other files are skipped. Each element is either the path and the loaded
    /// specification, or the error that prevented loading it.
    pub fn load_dir(directory: &Path) -> Vec<Result<(PathBuf, ValidSpec), TuringMachineError>> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                Some(Self::load(&path).map(|spec| (path, spec)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs::{anbn_machine, parity_machine};
    use crate::types::SpecError;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const SMALL_SPEC: &str = r#"{
        "name": "Small",
        "states": ["s", "t"],
        "input_alphabet": ["a"],
        "tape_alphabet": ["a", "_"],
        "rules": {
            "s": [{ "read": "a", "write": "a", "direction": "R", "next_state": "t" }]
        },
        "initial_state": "s",
        "blank": "_",
        "final_states": ["t"]
    }"#;

    #[test]
    fn test_from_json() {
        let spec = SpecLoader::from_json(SMALL_SPEC).unwrap();

        assert_eq!(spec.name(), "Small");
        assert_eq!(spec.action("s", 'a').unwrap().next_state, "t");
        assert!(spec.is_final("t"));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let result = SpecLoader::from_json("This is not a valid spec");

        assert!(matches!(
            result,
            Err(TuringMachineError::SerializationError(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_invalid_direction() {
        let content = SMALL_SPEC.replace(r#""direction": "R""#, r#""direction": "U""#);

        assert!(matches!(
            SpecLoader::from_json(&content),
            Err(TuringMachineError::Spec(SpecError::InvalidDirection { direction: 'U', .. }))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("anbn.json");

        SpecLoader::save(&file_path, &anbn_machine()).unwrap();
        let loaded = SpecLoader::load(&file_path).unwrap();

        assert_eq!(loaded.spec(), &anbn_machine());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = SpecLoader::load(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(TuringMachineError::FileError(_))));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempdir().unwrap();

        SpecLoader::save(&dir.path().join("parity.json"), &parity_machine()).unwrap();

        let mut invalid = File::create(dir.path().join("invalid.json")).unwrap();
        invalid.write_all(b"{}").unwrap();

        let mut ignored = File::create(dir.path().join("notes.txt")).unwrap();
        ignored.write_all(b"This file should be ignored").unwrap();

        let results = SpecLoader::load_dir(dir.path());

        // One success and one error; the .txt file is skipped.
        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[test]
    fn test_load_dir_missing() {
        let results = SpecLoader::load_dir(Path::new("/definitely/not/here"));

        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
