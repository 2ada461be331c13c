// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Property-Based Tests (proptest) for epoch-deck
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for epoch-deck using proptest.
//!
//! Covers: dump/reload stability, single-value edits (including string
//! values that must either reload unchanged or be refused).

use epoch_deck::{dumps, loads, Deck, Section, Value};
use proptest::prelude::*;

const TEMPLATE: &str = "\
begin:control
  nx = 256
  t_end = 50 * femto
end:control

begin:constant
  intens = 1.0e23
  nel = 1.0e21
end:constant

begin:species
  name = Electron
  charge = -1.0
  density = nel
end:species

begin:species
  name = Positron
  charge = 1.0
  density = nel
end:species
";

const PATHS: [&str; 5] = [
    "control:nx",
    "constant:intens",
    "constant:nel",
    "species:Electron:charge",
    "species:Positron:charge",
];

fn all_values(deck: &Deck) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    for (kind, section) in deck.sections() {
        for (i, block) in section.blocks().into_iter().enumerate() {
            let tag = match section {
                Section::Single(_) => kind.to_string(),
                _ => format!("{kind}:{i}"),
            };
            for (key, value) in block {
                out.push((format!("{tag}:{key}"), value.clone()));
            }
        }
    }
    out
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        (-1.0e30f64..1.0e30).prop_map(Value::Float),
        any::<bool>().prop_map(Value::Bool),
        "[a-z_]{1,12}( \\* (femto|micron|pico))?".prop_map(|s| Value::parse(&s)),
        "[ -~\n]{0,10}".prop_map(Value::Str),
    ]
}

proptest! {
    /// Editing one value and passing the deck through text changes exactly
    /// that value.
    #[test]
    fn single_edit_survives_reload(which in 0usize..PATHS.len(), value in scalar()) {
        let original = loads(TEMPLATE).unwrap();
        let mut edited = original.clone();
        if edited.set(PATHS[which], value.clone()).is_err() {
            // Refused edits leave the deck alone.
            prop_assert!(value.check_writable().is_err());
            prop_assert_eq!(&edited, &original);
            return Ok(());
        }

        let reloaded = loads(&dumps(&edited)).unwrap();
        prop_assert_eq!(&reloaded, &edited);
        prop_assert_eq!(reloaded.get(PATHS[which]).unwrap(), &value);

        let before = all_values(&original);
        let after = all_values(&reloaded);
        prop_assert_eq!(before.len(), after.len());
        let changed: Vec<_> = before
            .iter()
            .zip(&after)
            .filter(|(a, b)| a != b)
            .collect();
        prop_assert!(changed.len() <= 1, "changed: {:?}", changed);
    }

    /// dumps is a fixed point after one pass.
    #[test]
    fn dumps_is_stable(which in 0usize..PATHS.len(), value in scalar()) {
        let mut deck = loads(TEMPLATE).unwrap();
        prop_assume!(deck.set(PATHS[which], value).is_ok());
        let once = dumps(&deck);
        let twice = dumps(&loads(&once).unwrap());
        prop_assert_eq!(once, twice);
    }
}
