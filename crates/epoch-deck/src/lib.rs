// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Deck
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! EPOCH input decks: `load`/`loads`/`dump`/`dumps` and path-based edits.

pub mod deck;
pub mod parser;
pub mod value;
pub mod writer;

pub use deck::{Block, Deck, Section};
pub use parser::{load, load_file, loads};
pub use value::Value;
pub use writer::{dump, dump_file, dumps};
