// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — SDF
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! SDF snapshot access: block reader, snapshots, directory discovery.

pub mod discovery;
pub mod export;
pub mod format;
pub mod reader;
pub mod snapshot;
pub mod writer;

pub use discovery::{discover, getdata, load_directory, SdfEntry};
pub use snapshot::{Axis, Mesh, Snapshot, Variable};
