// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Random Scan
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Monte Carlo sampling of a parameter space.
//!
//! Uniform in value for linear ranges, uniform in `ln(value)` for log
//! ranges. Seeded, so the same seed gives the same campaign.

use epoch_types::error::{EpochError, EpochResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::{ParameterRange, ParameterSpace, Sample};

#[derive(Debug, Clone)]
pub struct RandomScan {
    space: ParameterSpace,
    n_samples: usize,
    drawn: usize,
    rng: StdRng,
}

fn draw(range: &ParameterRange, rng: &mut StdRng) -> f64 {
    if range.log {
        rng.gen_range(range.min.ln()..=range.max.ln()).exp().clamp(range.min, range.max)
    } else {
        rng.gen_range(range.min..=range.max)
    }
}

impl RandomScan {
    pub fn new(space: ParameterSpace, n_samples: usize, seed: u64) -> EpochResult<Self> {
        space.validate()?;
        if n_samples == 0 {
            return Err(EpochError::Scan("n_samples must be at least 1".into()));
        }
        Ok(Self {
            space,
            n_samples,
            drawn: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

impl Iterator for RandomScan {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.drawn >= self.n_samples {
            return None;
        }
        self.drawn += 1;
        let mut sample = Sample::with_capacity(self.space.len());
        for (name, range) in self.space.iter() {
            sample.insert(name.to_string(), draw(range, &mut self.rng));
        }
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.n_samples - self.drawn;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RandomScan {}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> ParameterSpace {
        ParameterSpace::new()
            .with("constant:intens", ParameterRange::log(1.0e22, 1.0e24))
            .with("control:nx", ParameterRange::linear(128.0, 512.0))
    }

    #[test]
    fn test_count_and_bounds() {
        let samples: Vec<Sample> = RandomScan::new(space(), 200, 42).unwrap().collect();
        assert_eq!(samples.len(), 200);
        for s in &samples {
            assert!((1.0e22..=1.0e24).contains(&s["constant:intens"]));
            assert!((128.0..=512.0).contains(&s["control:nx"]));
        }
    }

    #[test]
    fn test_same_seed_same_samples() {
        let a: Vec<Sample> = RandomScan::new(space(), 10, 7).unwrap().collect();
        let b: Vec<Sample> = RandomScan::new(space(), 10, 7).unwrap().collect();
        let c: Vec<Sample> = RandomScan::new(space(), 10, 8).unwrap().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_log_sampling_spreads_over_decades() {
        let samples: Vec<Sample> = RandomScan::new(space(), 500, 3).unwrap().collect();
        let below = samples
            .iter()
            .filter(|s| s["constant:intens"] < 1.0e23)
            .count();
        // Half the draws fall in the lower decade, not ~5% as in linear sampling.
        assert!((150..350).contains(&below), "below = {below}");
    }
}
