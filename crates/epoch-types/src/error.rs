// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EpochError {
    #[error("No .sdf files found in directory: {}", dir.display())]
    NoSdfFiles { dir: PathBuf },

    #[error("Variable '{name}' not found in dataset. Available: {}", available.join(", "))]
    VariableNotFound { name: String, available: Vec<String> },

    #[error("Malformed SDF file: {0}")]
    SdfFormat(String),

    #[error("Deck parse error at line {line}: {message}")]
    DeckParse { line: usize, message: String },

    #[error("Invalid deck path '{path}': {message}")]
    DeckPath { path: String, message: String },

    #[error("Parameter scan error: {0}")]
    Scan(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("NPY export error: {0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),
}

impl EpochError {
    pub fn sdf(message: impl Into<String>) -> Self {
        EpochError::SdfFormat(message.into())
    }

    pub fn deck_path(path: &str, message: impl Into<String>) -> Self {
        EpochError::DeckPath {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

pub type EpochResult<T> = Result<T, EpochError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_not_found_lists_names() {
        let err = EpochError::VariableNotFound {
            name: "Nonexistent_Field".into(),
            available: vec!["Electric_Field_Ex".into(), "Grid_Grid".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'Nonexistent_Field'"));
        assert!(msg.contains("Electric_Field_Ex, Grid_Grid"));
    }

    #[test]
    fn test_no_sdf_files_names_directory() {
        let err = EpochError::NoSdfFiles {
            dir: PathBuf::from("./test_2d"),
        };
        assert_eq!(err.to_string(), "No .sdf files found in directory: ./test_2d");
    }
}
