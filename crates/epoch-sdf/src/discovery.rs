// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Snapshot Discovery
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Finding and ordering the SDF files of a run directory.
//!
//! Output numbers need not be contiguous (`0005.sdf`, `0012.sdf`);
//! ordering is always by the number embedded in the file name.

use std::path::{Path, PathBuf};

use epoch_types::error::{EpochError, EpochResult};
use tracing::warn;

use crate::snapshot::Snapshot;

/// A discovered snapshot file and its output number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdfEntry {
    pub number: u64,
    pub path: PathBuf,
}

/// Output number of a file: all digits of the file stem, concatenated.
/// `None` when the stem has no digits or the number does not fit.
pub fn sdf_number(file_stem: &str) -> Option<u64> {
    let digits: String = file_stem.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Path of output `number` in `dir`, zero padded to four digits.
pub fn snapshot_path(number: u64, dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(format!("{number:04}.sdf"))
}

/// All `*.{extension}` files of `dir`, sorted by output number.
///
/// Files whose stem has no digits, or whose concatenated digits overflow
/// a `u64` (more than 19-20 digits), are skipped with a warning rather
/// than failing the whole directory.
pub fn discover(dir: impl AsRef<Path>, extension: &str) -> EpochResult<Vec<SdfEntry>> {
    let dir = dir.as_ref();
    let mut entries = Vec::new();
    for item in std::fs::read_dir(dir)? {
        let path = item?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        match sdf_number(stem) {
            Some(number) => entries.push(SdfEntry { number, path }),
            None => warn!(
                "Skipping {}: file name has no output number that fits in 64 bits",
                path.display()
            ),
        }
    }
    if entries.is_empty() {
        return Err(EpochError::NoSdfFiles {
            dir: dir.to_path_buf(),
        });
    }
    entries.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}

/// Load every snapshot of `dir` in output order.
pub fn load_directory(dir: impl AsRef<Path>, extension: &str) -> EpochResult<Vec<Snapshot>> {
    discover(dir, extension)?
        .iter()
        .map(|entry| Snapshot::open(&entry.path))
        .collect()
}

/// Load output `number` from `dir`.
pub fn getdata(number: u64, dir: impl AsRef<Path>) -> EpochResult<Snapshot> {
    Snapshot::open(snapshot_path(number, dir))
}
