// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — SDF Read Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, Criterion};
use epoch_sdf::reader::SdfFile;
use epoch_sdf::snapshot::Snapshot;
use epoch_sdf::writer::SdfWriter;
use ndarray::{Array1, Array2};
use std::hint::black_box;

fn make_file(nx: usize, ny: usize) -> Vec<u8> {
    let x = Array1::linspace(-1e-5, 1e-5, nx + 1);
    let y = Array1::linspace(-1e-5, 1e-5, ny + 1);
    let ex = Array2::from_shape_fn((nx, ny), |(i, j)| ((i * j) as f64).sin());
    let ne = Array2::from_shape_fn((nx, ny), |(i, j)| 1e24 * (1.0 + (i + j) as f64));
    let mut w = SdfWriter::new("Epoch2d", 100, 5e-14);
    w.add_mesh("grid", "Grid/Grid", &[x, y], &["X", "Y"], &["m", "m"])
        .add_variable("ex", "Electric Field/Ex", "V/m", "grid", &ex.into_dyn())
        .add_variable(
            "number_density/electron",
            "Derived/Number_Density/Electron",
            "1/m^3",
            "grid",
            &ne.into_dyn(),
        );
    w.to_bytes()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("sdf_parse");

    for &(nx, ny) in &[(64, 64), (256, 256), (1024, 512)] {
        let bytes = make_file(nx, ny);
        let label = format!("{}x{}_2vars", nx, ny);
        group.bench_function(&label, |b| {
            b.iter(|| {
                let file = SdfFile::parse(&bytes).expect("parse should succeed");
                let snap = Snapshot::from_file(file, "bench.sdf");
                black_box(snap.variable("Electric_Field_Ex").map(|v| v.data[[0, 0]]).ok());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
