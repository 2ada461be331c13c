// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Scan
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
pub mod campaign;
pub mod grid;
pub mod params;
pub mod random;

pub use campaign::{case_dir, write_paths, Campaign, DECK_FILE_NAME};
pub use grid::GridScan;
pub use params::{ParameterRange, ParameterSpace, Sample};
pub use random::RandomScan;
