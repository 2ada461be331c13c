// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Property-Based Tests (proptest) for epoch-sdf
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for epoch-sdf using proptest.
//!
//! Covers: discovery ordering, output-number parsing, variable layout.

use epoch_sdf::discovery::{discover, sdf_number};
use epoch_sdf::reader::SdfFile;
use epoch_sdf::snapshot::Snapshot;
use epoch_sdf::writer::SdfWriter;
use ndarray::{Array1, Array2};
use proptest::prelude::*;

// ── Discovery Ordering ───────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any set of output numbers comes back sorted numerically,
    /// whatever their zero padding.
    #[test]
    fn discovery_sorts_numerically(
        numbers in prop::collection::btree_set(0u64..100_000, 1..12),
        pad in 0usize..6,
    ) {
        let tmp = tempfile::tempdir().unwrap();
        for n in &numbers {
            let name = format!("{:0width$}.sdf", n, width = pad);
            std::fs::write(tmp.path().join(name), b"").unwrap();
        }
        let found: Vec<u64> = discover(tmp.path(), "sdf")
            .unwrap()
            .into_iter()
            .map(|e| e.number)
            .collect();
        let expected: Vec<u64> = numbers.iter().copied().collect();
        prop_assert_eq!(found, expected);
    }

    /// The number of a zero-padded name is the number itself.
    #[test]
    fn padded_number_parses(n in 0u64..10_000_000) {
        prop_assert_eq!(sdf_number(&format!("{n:04}")), Some(n));
    }
}

// ── Variable Layout ──────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every element of a 2D field lands at its own (i, j) after a file
    /// pass, so plots are never transposed.
    #[test]
    fn field_elements_keep_their_index(nx in 1usize..24, ny in 1usize..24) {
        let x = Array1::linspace(0.0, 1.0, nx + 1);
        let y = Array1::linspace(0.0, 1.0, ny + 1);
        let field = Array2::from_shape_fn((nx, ny), |(i, j)| (1000 * i + j) as f64);
        let mut w = SdfWriter::new("Epoch2d", 0, 0.0);
        w.add_mesh("grid", "Grid/Grid", &[x, y], &["X", "Y"], &["m", "m"])
            .add_variable("ey", "Electric Field/Ey", "V/m", "grid", &field.into_dyn());
        let snap = Snapshot::from_file(SdfFile::parse(&w.to_bytes()).unwrap(), "p.sdf");
        let ey = snap.variable("Electric_Field_Ey").unwrap();
        prop_assert_eq!(ey.shape(), &[nx, ny]);
        for i in 0..nx {
            for j in 0..ny {
                prop_assert_eq!(ey.data[[i, j]], (1000 * i + j) as f64);
            }
        }
    }
}
