use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

use crate::domain::entities::CalculatorLine;

const APP_QUALIFIER: &str = "uk";
const APP_ORG: &str = "ScrapEngine";
const APP_NAME: &str = "ScrapEngine";

/// On-disk name kept stable across releases; existing installs keep their
/// saved calculator loads.
const CALC_FILE: &str = "scrapEngine_calcItems.json";

fn calc_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CALC_FILE))
}

/// Directory for exported reports.
pub fn export_dir() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Load the saved calculator lines. Missing or corrupt files read as an
/// empty load rather than an error.
pub fn load_calculator_lines() -> Vec<CalculatorLine> {
    let Some(path) = calc_file() else {
        return Vec::new();
    };
    load_lines_from(&path)
}

pub fn save_calculator_lines(lines: &[CalculatorLine]) -> Result<(), PersistSaveError> {
    let path = calc_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_lines_to(&path, lines)
}

fn load_lines_from(path: &Path) -> Vec<CalculatorLine> {
    let Ok(data) = fs::read_to_string(path) else {
        return Vec::new();
    };
    match serde_json::from_str(&data) {
        Ok(lines) => lines,
        Err(error) => {
            tracing::warn!("discarding unreadable calculator file {}: {error}", path.display());
            Vec::new()
        }
    }
}

fn save_lines_to(path: &Path, lines: &[CalculatorLine]) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(lines)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_on_disk_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CALC_FILE);
        let lines = vec![
            CalculatorLine {
                id: "abc123def".to_string(),
                material_id: "mnc-clean-copper-tube-042".to_string(),
                weight_kg: 12.5,
            },
            CalculatorLine {
                id: "zzz999aaa".to_string(),
                material_id: "lon-mixed-brass-7".to_string(),
                weight_kg: 40.0,
            },
        ];

        save_lines_to(&path, &lines).unwrap();
        assert_eq!(load_lines_from(&path), lines);
    }

    #[test]
    fn stored_fields_use_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CALC_FILE);
        let lines = vec![CalculatorLine {
            id: "abc".to_string(),
            material_id: "mnc-zinc-1".to_string(),
            weight_kg: 5.0,
        }];

        save_lines_to(&path, &lines).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"materialId\""));
        assert!(raw.contains("\"weightKg\""));
        assert!(!raw.contains("material_id"));
    }

    #[test]
    fn reload_tracks_an_add_remove_clear_sequence() {
        use crate::domain::valuation::{add_line, remove_line};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CALC_FILE);
        let mut lines = Vec::new();

        assert!(add_line(&mut lines, "mnc-clean-copper-tube-042", 12.5));
        save_lines_to(&path, &lines).unwrap();
        assert_eq!(load_lines_from(&path), lines);

        assert!(add_line(&mut lines, "lon-mixed-brass-7", 40.0));
        assert!(add_line(&mut lines, "lee-lead-scrap-9", 8.0));
        save_lines_to(&path, &lines).unwrap();
        assert_eq!(load_lines_from(&path), lines);

        let removed = lines[1].id.clone();
        remove_line(&mut lines, &removed);
        save_lines_to(&path, &lines).unwrap();
        let reloaded = load_lines_from(&path);
        assert_eq!(reloaded, lines);
        assert!(reloaded.iter().all(|line| line.id != removed));

        lines.clear();
        save_lines_to(&path, &lines).unwrap();
        assert!(load_lines_from(&path).is_empty());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_lines_from(&dir.path().join("absent.json")).is_empty());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CALC_FILE);
        fs::write(&path, "{not json").unwrap();
        assert!(load_lines_from(&path).is_empty());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join(CALC_FILE);
        save_lines_to(&path, &[]).unwrap();
        assert!(path.exists());
    }
}
