// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — NPY Export
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::path::Path;

use epoch_types::error::EpochResult;
use ndarray_npy::write_npy;
use tracing::info;

use crate::snapshot::Variable;

/// Write a variable's array to a `.npy` file (C order, f64).
pub fn export_npy(var: &Variable, path: impl AsRef<Path>) -> EpochResult<()> {
    let path = path.as_ref();
    let data = var.data.as_standard_layout();
    write_npy(path, &data)?;
    info!("Wrote {} {:?} to {}", var.name, var.shape(), path.display());
    Ok(())
}
