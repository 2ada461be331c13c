// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Parameter Space
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scanned parameters, keyed by deck path.
//!
//! ```json
//! {
//!   "constant:intens": { "min": 1.0e22, "max": 1.0e24, "log": true },
//!   "constant:nel":    { "min": 1.0e20, "max": 1.0e24, "log": true }
//! }
//! ```

use std::path::Path;

use epoch_types::error::{EpochError, EpochResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One parameter set: deck path → value.
pub type Sample = IndexMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    /// Sample geometrically between `min` and `max`.
    #[serde(default)]
    pub log: bool,
}

impl ParameterRange {
    pub fn linear(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            log: false,
        }
    }

    pub fn log(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            log: true,
        }
    }

    pub fn validate(&self, name: &str) -> EpochResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(EpochError::Scan(format!(
                "{name}: bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(EpochError::Scan(format!(
                "{name}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if self.log && self.min <= 0.0 {
            return Err(EpochError::Scan(format!(
                "{name}: log sampling needs min > 0, got {}",
                self.min
            )));
        }
        Ok(())
    }

    /// Value at fraction `t ∈ [0, 1]` of the range.
    pub fn at(&self, t: f64) -> f64 {
        if t >= 1.0 {
            return self.max;
        }
        if t <= 0.0 {
            return self.min;
        }
        if self.log {
            let (lo, hi) = (self.min.ln(), self.max.ln());
            (lo + (hi - lo) * t).exp()
        } else {
            self.min + (self.max - self.min) * t
        }
    }
}

/// Ordered mapping of deck path → range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSpace {
    params: IndexMap<String, ParameterRange>,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, range: ParameterRange) -> Self {
        self.params.insert(path.to_string(), range);
        self
    }

    pub fn from_json(text: &str) -> EpochResult<Self> {
        let space: ParameterSpace = serde_json::from_str(text)?;
        space.validate()?;
        Ok(space)
    }

    pub fn from_file(path: impl AsRef<Path>) -> EpochResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> EpochResult<()> {
        if self.params.is_empty() {
            return Err(EpochError::Scan("parameter space is empty".into()));
        }
        for (name, range) in &self.params {
            range.validate(name)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterRange)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_order_and_defaults_log() {
        let space = ParameterSpace::from_json(
            r#"{"constant:nel": {"min": 1e20, "max": 1e24, "log": true},
                "species:Electron:charge": {"min": -2.0, "max": -1.0}}"#,
        )
        .unwrap();
        let names: Vec<&str> = space.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["constant:nel", "species:Electron:charge"]);
        assert!(!space.iter().nth(1).unwrap().1.log);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let bad = [
            ParameterRange::linear(2.0, 1.0),
            ParameterRange::linear(f64::NAN, 1.0),
            ParameterRange::log(0.0, 1.0),
        ];
        for range in bad {
            assert!(range.validate("p").is_err(), "{range:?}");
        }
        assert!(ParameterSpace::new().validate().is_err());
    }

    #[test]
    fn test_at_endpoints_exact() {
        let r = ParameterRange::log(1.0e22, 1.0e24);
        assert_eq!(r.at(0.0), 1.0e22);
        assert_eq!(r.at(1.0), 1.0e24);
        assert!((r.at(0.5) - 1.0e23).abs() / 1.0e23 < 1e-12);
        assert_eq!(ParameterRange::linear(0.0, 4.0).at(0.25), 1.0);
    }
}
