// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Image Resampling
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Nearest, bilinear and bicubic resampling of 2D fields.
//!
//! Output samples span the input index range corner to corner, so the
//! first and last samples of each axis coincide with the input edges.

use std::fmt;
use std::str::FromStr;

use epoch_types::error::EpochError;
use ndarray::{Array2, ArrayView2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    Nearest,
    Bilinear,
    #[default]
    Bicubic,
}

impl Interpolation {
    pub fn name(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Bicubic => "bicubic",
        }
    }
}

impl FromStr for Interpolation {
    type Err = EpochError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "none" => Ok(Interpolation::Nearest),
            "bilinear" => Ok(Interpolation::Bilinear),
            "bicubic" => Ok(Interpolation::Bicubic),
            other => Err(EpochError::Plot(format!(
                "unknown interpolation '{other}' (nearest, bilinear, bicubic)"
            ))),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fractional source position of output sample `i` out of `m`.
fn source_position(i: usize, m: usize, n: usize) -> f64 {
    if m <= 1 || n <= 1 {
        return 0.0;
    }
    i as f64 * (n - 1) as f64 / (m - 1) as f64
}

/// Catmull-Rom weights for fractional offset `t`.
fn cubic_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}

fn clamp_index(i: isize, n: usize) -> usize {
    i.clamp(0, n as isize - 1) as usize
}

fn sample(field: &ArrayView2<f64>, fa: f64, fb: f64, method: Interpolation) -> f64 {
    let (na, nb) = field.dim();
    match method {
        Interpolation::Nearest => {
            let ia = clamp_index(fa.round() as isize, na);
            let ib = clamp_index(fb.round() as isize, nb);
            field[[ia, ib]]
        }
        Interpolation::Bilinear => {
            let ia0 = clamp_index(fa.floor() as isize, na);
            let ib0 = clamp_index(fb.floor() as isize, nb);
            let ia1 = (ia0 + 1).min(na - 1);
            let ib1 = (ib0 + 1).min(nb - 1);
            let ta = (fa - ia0 as f64).clamp(0.0, 1.0);
            let tb = (fb - ib0 as f64).clamp(0.0, 1.0);

            let v00 = field[[ia0, ib0]];
            let v01 = field[[ia0, ib1]];
            let v10 = field[[ia1, ib0]];
            let v11 = field[[ia1, ib1]];
            (1.0 - ta) * ((1.0 - tb) * v00 + tb * v01) + ta * ((1.0 - tb) * v10 + tb * v11)
        }
        Interpolation::Bicubic => {
            let a0 = fa.floor() as isize;
            let b0 = fb.floor() as isize;
            let wa = cubic_weights(fa - a0 as f64);
            let wb = cubic_weights(fb - b0 as f64);
            let row = |ia: usize| -> f64 {
                let at = |ib: usize| field[[ia, ib]];
                wb.iter()
                    .enumerate()
                    .map(|(db, w)| w * extended(b0 + db as isize - 1, nb, &at))
                    .sum()
            };
            wa.iter()
                .enumerate()
                .map(|(da, w)| w * extended(a0 + da as isize - 1, na, &row))
                .sum()
        }
    }
}

/// Value at index `k` of a length-`n` sequence, continued linearly past
/// either end.
fn extended(k: isize, n: usize, at: &dyn Fn(usize) -> f64) -> f64 {
    if n == 1 {
        return at(0);
    }
    if k < 0 {
        let (v0, v1) = (at(0), at(1));
        v0 + k as f64 * (v1 - v0)
    } else if k as usize >= n {
        let (last, prev) = (at(n - 1), at(n - 2));
        last + (k - (n - 1) as isize) as f64 * (last - prev)
    } else {
        at(k as usize)
    }
}

/// Resample `field` onto an `out_a × out_b` grid.
pub fn resample(
    field: ArrayView2<f64>,
    out_a: usize,
    out_b: usize,
    method: Interpolation,
) -> Array2<f64> {
    let (na, nb) = field.dim();
    if na == 0 || nb == 0 {
        return Array2::zeros((out_a, out_b));
    }
    Array2::from_shape_fn((out_a, out_b), |(i, j)| {
        let fa = source_position(i, out_a, na);
        let fb = source_position(j, out_b, nb);
        sample(&field, fa, fb, method)
    })
}

/// Output size along one axis: native for nearest, upsampled otherwise,
/// never more than `cap` samples.
pub fn output_len(n: usize, method: Interpolation, cap: usize) -> usize {
    let target = match method {
        Interpolation::Nearest => n,
        Interpolation::Bilinear | Interpolation::Bicubic => n.max(cap / 2),
    };
    target.clamp(1, cap.max(1))
}
