// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Grid Scan
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Regular grid over a parameter space.
//!
//! With `d` parameters and `n` requested samples, each axis gets the
//! smallest `m` such that `m^d >= n`. The full grid is walked in row-major
//! order (last parameter fastest) and cut off after `n` points.

use epoch_types::error::{EpochError, EpochResult};

use crate::params::{ParameterRange, ParameterSpace, Sample};

#[derive(Debug, Clone)]
pub struct GridScan {
    space: ParameterSpace,
    points_per_axis: usize,
    n_samples: usize,
    next: usize,
}

/// Smallest `m` with `m^dims >= n`.
fn points_per_axis(n: usize, dims: usize) -> usize {
    let mut m = 1usize;
    loop {
        let covered = u32::try_from(dims)
            .ok()
            .and_then(|d| m.checked_pow(d))
            .unwrap_or(usize::MAX);
        if covered >= n {
            return m;
        }
        m += 1;
    }
}

fn axis_value(range: &ParameterRange, k: usize, m: usize) -> f64 {
    if m <= 1 {
        return range.min;
    }
    range.at(k as f64 / (m - 1) as f64)
}

impl GridScan {
    pub fn new(space: ParameterSpace, n_samples: usize) -> EpochResult<Self> {
        space.validate()?;
        if n_samples == 0 {
            return Err(EpochError::Scan("n_samples must be at least 1".into()));
        }
        let points_per_axis = points_per_axis(n_samples, space.len());
        Ok(Self {
            space,
            points_per_axis,
            n_samples,
            next: 0,
        })
    }

    pub fn points_per_axis(&self) -> usize {
        self.points_per_axis
    }

    /// Grid point number `i` (row-major).
    pub fn sample(&self, i: usize) -> Sample {
        let m = self.points_per_axis;
        let d = self.space.len();
        let mut sample = Sample::with_capacity(d);
        let mut stride = (1..d).fold(1usize, |acc, _| acc.saturating_mul(m));
        for (name, range) in self.space.iter() {
            let k = (i / stride) % m;
            sample.insert(name.to_string(), axis_value(range, k, m));
            stride = (stride / m).max(1);
        }
        sample
    }
}

impl Iterator for GridScan {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.next >= self.n_samples {
            return None;
        }
        let sample = self.sample(self.next);
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.n_samples - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for GridScan {}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_params() -> ParameterSpace {
        ParameterSpace::new()
            .with("constant:intens", ParameterRange::log(1.0e22, 1.0e24))
            .with("constant:nel", ParameterRange::log(1.0e20, 1.0e24))
    }

    #[test]
    fn test_points_per_axis() {
        assert_eq!(points_per_axis(4, 2), 2);
        assert_eq!(points_per_axis(5, 2), 3);
        assert_eq!(points_per_axis(9, 2), 3);
        assert_eq!(points_per_axis(1, 3), 1);
        assert_eq!(points_per_axis(7, 1), 7);
    }

    #[test]
    fn test_four_samples_over_two_params() {
        let samples: Vec<Sample> = GridScan::new(two_params(), 4).unwrap().collect();
        assert_eq!(samples.len(), 4);
        let pairs: Vec<(f64, f64)> = samples
            .iter()
            .map(|s| (s["constant:intens"], s["constant:nel"]))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (1.0e22, 1.0e20),
                (1.0e22, 1.0e24),
                (1.0e24, 1.0e20),
                (1.0e24, 1.0e24),
            ]
        );
    }

    #[test]
    fn test_truncated_grid() {
        let scan = GridScan::new(two_params(), 5).unwrap();
        assert_eq!(scan.points_per_axis(), 3);
        assert_eq!(scan.len(), 5);
        let samples: Vec<Sample> = scan.collect();
        // Fifth point is (middle, middle).
        let mid = samples[4]["constant:nel"];
        assert!((mid - 1.0e22).abs() / 1.0e22 < 1e-12);
    }

    #[test]
    fn test_single_sample_uses_min() {
        let samples: Vec<Sample> = GridScan::new(two_params(), 1).unwrap().collect();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0]["constant:intens"], 1.0e22);
        assert_eq!(samples[0]["constant:nel"], 1.0e20);
    }

    #[test]
    fn test_zero_samples_rejected() {
        assert!(GridScan::new(two_params(), 0).is_err());
    }
}
