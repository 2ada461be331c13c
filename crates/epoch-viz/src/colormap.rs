// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Colormaps
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Piecewise-linear colormaps sampled from the matplotlib tables.

use std::fmt;
use std::str::FromStr;

use epoch_types::error::EpochError;
use plotters::style::RGBColor;

type Anchor = (f64, [u8; 3]);

const VIRIDIS: &[Anchor] = &[
    (0.000, [68, 1, 84]),
    (0.125, [71, 44, 122]),
    (0.250, [59, 81, 139]),
    (0.375, [44, 113, 142]),
    (0.500, [33, 144, 141]),
    (0.625, [39, 173, 129]),
    (0.750, [92, 200, 99]),
    (0.875, [170, 220, 50]),
    (1.000, [253, 231, 37]),
];

const PLASMA: &[Anchor] = &[
    (0.000, [13, 8, 135]),
    (0.125, [75, 3, 161]),
    (0.250, [125, 3, 168]),
    (0.375, [168, 34, 150]),
    (0.500, [203, 70, 121]),
    (0.625, [229, 107, 93]),
    (0.750, [248, 148, 65]),
    (0.875, [253, 195, 40]),
    (1.000, [240, 249, 33]),
];

const JET: &[Anchor] = &[
    (0.000, [0, 0, 128]),
    (0.125, [0, 0, 255]),
    (0.375, [0, 255, 255]),
    (0.625, [255, 255, 0]),
    (0.875, [255, 0, 0]),
    (1.000, [128, 0, 0]),
];

const GRAY: &[Anchor] = &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    #[default]
    Viridis,
    Jet,
    Plasma,
    Gray,
}

impl Colormap {
    fn anchors(self) -> &'static [Anchor] {
        match self {
            Colormap::Viridis => VIRIDIS,
            Colormap::Jet => JET,
            Colormap::Plasma => PLASMA,
            Colormap::Gray => GRAY,
        }
    }

    /// Colour at `t ∈ [0, 1]`; values outside are clamped, NaN maps to 0.
    pub fn rgb(self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let anchors = self.anchors();
        let upper = anchors
            .iter()
            .position(|(at, _)| *at >= t)
            .unwrap_or(anchors.len() - 1)
            .max(1);
        let (t0, c0) = anchors[upper - 1];
        let (t1, c1) = anchors[upper];
        let w = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * w).round() as u8;
        [mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2])]
    }

    pub fn color(self, t: f64) -> RGBColor {
        let [r, g, b] = self.rgb(t);
        RGBColor(r, g, b)
    }

    pub fn name(self) -> &'static str {
        match self {
            Colormap::Viridis => "viridis",
            Colormap::Jet => "jet",
            Colormap::Plasma => "plasma",
            Colormap::Gray => "gray",
        }
    }
}

impl FromStr for Colormap {
    type Err = EpochError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viridis" => Ok(Colormap::Viridis),
            "jet" => Ok(Colormap::Jet),
            "plasma" => Ok(Colormap::Plasma),
            "gray" | "grey" => Ok(Colormap::Gray),
            other => Err(EpochError::Plot(format!(
                "unknown colormap '{other}' (viridis, jet, plasma, gray)"
            ))),
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mapping from data values to colormap position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Norm {
    #[default]
    Linear,
    /// log10 of the value; non-positive values are masked.
    Log,
}

impl Norm {
    /// Value in normalisation space, NaN when masked.
    pub fn apply(self, v: f64) -> f64 {
        match self {
            Norm::Linear => v,
            Norm::Log if v > 0.0 => v.log10(),
            Norm::Log => f64::NAN,
        }
    }

    /// Back from normalisation space to data units.
    pub fn invert(self, v: f64) -> f64 {
        match self {
            Norm::Linear => v,
            Norm::Log => 10f64.powf(v),
        }
    }
}

impl FromStr for Norm {
    type Err = EpochError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Norm::Linear),
            "log" => Ok(Norm::Log),
            other => Err(EpochError::Plot(format!("unknown norm '{other}' (linear, log)"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_match_tables() {
        assert_eq!(Colormap::Viridis.rgb(0.0), [68, 1, 84]);
        assert_eq!(Colormap::Viridis.rgb(1.0), [253, 231, 37]);
        assert_eq!(Colormap::Jet.rgb(0.5), [128, 255, 128]);
        assert_eq!(Colormap::Gray.rgb(0.5), [128, 128, 128]);
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(Colormap::Plasma.rgb(-3.0), Colormap::Plasma.rgb(0.0));
        assert_eq!(Colormap::Plasma.rgb(7.0), Colormap::Plasma.rgb(1.0));
        assert_eq!(Colormap::Gray.rgb(f64::NAN), [0, 0, 0]);
    }

    #[test]
    fn test_parse_names() {
        for cmap in [Colormap::Viridis, Colormap::Jet, Colormap::Plasma, Colormap::Gray] {
            assert_eq!(cmap.name().parse::<Colormap>().unwrap(), cmap);
        }
        assert_eq!(" Grey ".parse::<Colormap>().unwrap(), Colormap::Gray);
        assert!("rainbow".parse::<Colormap>().is_err());
    }

    #[test]
    fn test_log_norm_masks_non_positive() {
        assert!((Norm::Log.apply(100.0) - 2.0).abs() < 1e-12);
        assert!(Norm::Log.apply(0.0).is_nan());
        assert!(Norm::Log.apply(-5.0).is_nan());
        assert_eq!(Norm::Linear.apply(-5.0), -5.0);
        assert!((Norm::Log.invert(Norm::Log.apply(3.5e21)) - 3.5e21).abs() / 3.5e21 < 1e-12);
        assert_eq!("LOG".parse::<Norm>().unwrap(), Norm::Log);
    }
}
