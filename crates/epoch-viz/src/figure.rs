// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Figure Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! A figure is a canvas with plotting axes and auxiliary regions.
//!
//! Auxiliary regions (colorbars, the frame slider) are owned by the figure
//! and addressed through a [`RegionHandle`]. Clearing an axes leaves its
//! regions alone; a colorbar goes away only through
//! [`Figure::remove_region`].

use epoch_types::error::{EpochError, EpochResult};
use ndarray::Array2;

use crate::colormap::{Colormap, Norm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionHandle(u64);

/// Line data of a 1D plot.
#[derive(Debug, Clone, PartialEq)]
pub struct LineData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// A resampled 2D field ready to be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Values in normalisation space, `[ix, iy]`; NaN is left blank.
    pub values: Array2<f64>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Colour limits in normalisation space.
    pub value_range: (f64, f64),
    pub colormap: Colormap,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    Empty,
    Line(LineData),
    Image(ImageData),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axes {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    pub axes: AxesId,
    pub colormap: Colormap,
    pub norm: Norm,
    /// Limits in normalisation space.
    pub range: (f64, f64),
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub label: String,
    pub value: usize,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Colorbar(Colorbar),
    Slider(Slider),
}

#[derive(Debug, Clone)]
pub struct Figure {
    width: u32,
    height: u32,
    axes: Vec<Axes>,
    regions: Vec<(RegionHandle, Region)>,
    next_handle: u64,
    annotated: bool,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            axes: Vec::new(),
            regions: Vec::new(),
            next_handle: 0,
            annotated: true,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// With annotations off, rendering paints only images, lines, colour
    /// bands and the slider track: no titles, tick labels or slider text.
    pub fn set_annotated(&mut self, annotated: bool) {
        self.annotated = annotated;
    }

    pub fn annotated(&self) -> bool {
        self.annotated
    }

    pub fn add_axes(&mut self) -> AxesId {
        self.axes.push(Axes::default());
        AxesId(self.axes.len() - 1)
    }

    pub fn axes_ids(&self) -> impl Iterator<Item = AxesId> {
        (0..self.axes.len()).map(AxesId)
    }

    pub fn axes(&self, id: AxesId) -> EpochResult<&Axes> {
        self.axes
            .get(id.0)
            .ok_or_else(|| EpochError::Plot(format!("figure has no axes #{}", id.0)))
    }

    pub fn axes_mut(&mut self, id: AxesId) -> EpochResult<&mut Axes> {
        self.axes
            .get_mut(id.0)
            .ok_or_else(|| EpochError::Plot(format!("figure has no axes #{}", id.0)))
    }

    /// Reset title, labels and content. Regions stay attached.
    pub fn clear_axes(&mut self, id: AxesId) -> EpochResult<()> {
        *self.axes_mut(id)? = Axes::default();
        Ok(())
    }

    pub fn set_title(&mut self, id: AxesId, title: impl Into<String>) -> EpochResult<()> {
        self.axes_mut(id)?.title = Some(title.into());
        Ok(())
    }

    fn push_region(&mut self, region: Region) -> RegionHandle {
        let handle = RegionHandle(self.next_handle);
        self.next_handle += 1;
        self.regions.push((handle, region));
        handle
    }

    /// Attach a colorbar to its axes. Fails while the axes still owns one.
    pub fn attach_colorbar(&mut self, colorbar: Colorbar) -> EpochResult<RegionHandle> {
        self.axes(colorbar.axes)?;
        if let Some(existing) = self.colorbar_of(colorbar.axes) {
            return Err(EpochError::Plot(format!(
                "axes #{} already has colorbar {:?}; remove it before plotting again",
                colorbar.axes.0, existing
            )));
        }
        Ok(self.push_region(Region::Colorbar(colorbar)))
    }

    pub fn colorbar_of(&self, axes: AxesId) -> Option<RegionHandle> {
        self.regions.iter().find_map(|(handle, region)| match region {
            Region::Colorbar(cb) if cb.axes == axes => Some(*handle),
            _ => None,
        })
    }

    pub fn colorbar(&self, handle: RegionHandle) -> Option<&Colorbar> {
        match self.region(handle)? {
            Region::Colorbar(cb) => Some(cb),
            Region::Slider(_) => None,
        }
    }

    pub fn region(&self, handle: RegionHandle) -> Option<&Region> {
        self.regions
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, region)| region)
    }

    pub fn regions(&self) -> impl Iterator<Item = (RegionHandle, &Region)> {
        self.regions.iter().map(|(h, r)| (*h, r))
    }

    /// Remove a region, returning it. `None` if it was already gone.
    pub fn remove_region(&mut self, handle: RegionHandle) -> Option<Region> {
        let pos = self.regions.iter().position(|(h, _)| *h == handle)?;
        Some(self.regions.remove(pos).1)
    }

    /// Add the frame slider below the axes.
    pub fn add_slider(&mut self, label: impl Into<String>, max: usize) -> RegionHandle {
        self.push_region(Region::Slider(Slider {
            label: label.into(),
            value: 0,
            max,
        }))
    }

    pub fn slider(&self) -> Option<(RegionHandle, &Slider)> {
        self.regions.iter().find_map(|(handle, region)| match region {
            Region::Slider(s) => Some((*handle, s)),
            Region::Colorbar(_) => None,
        })
    }

    /// Move the slider, clamped to its range. Returns the new value.
    pub fn set_slider(&mut self, handle: RegionHandle, value: usize) -> EpochResult<usize> {
        let slider = self
            .regions
            .iter_mut()
            .find_map(|(h, region)| match region {
                Region::Slider(s) if *h == handle => Some(s),
                _ => None,
            })
            .ok_or_else(|| EpochError::Plot(format!("no slider {handle:?}")))?;
        slider.value = value.min(slider.max);
        Ok(slider.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colorbar(axes: AxesId) -> Colorbar {
        Colorbar {
            axes,
            colormap: Colormap::Viridis,
            norm: Norm::Linear,
            range: (0.0, 1.0),
            label: "V/m".into(),
        }
    }

    #[test]
    fn test_second_colorbar_rejected() {
        let mut fig = Figure::new(600, 500);
        let ax = fig.add_axes();
        let first = fig.attach_colorbar(colorbar(ax)).unwrap();
        assert_eq!(fig.colorbar_of(ax), Some(first));

        let err = fig.attach_colorbar(colorbar(ax)).expect_err("duplicate colorbar");
        assert!(err.to_string().contains("already has colorbar"));
        assert_eq!(fig.regions().count(), 1);
    }

    #[test]
    fn test_remove_then_reattach() {
        let mut fig = Figure::new(600, 500);
        let ax = fig.add_axes();
        let first = fig.attach_colorbar(colorbar(ax)).unwrap();
        assert!(matches!(fig.remove_region(first), Some(Region::Colorbar(_))));
        assert_eq!(fig.remove_region(first), None);
        assert_eq!(fig.colorbar_of(ax), None);

        let second = fig.attach_colorbar(colorbar(ax)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_clear_axes_keeps_regions() {
        let mut fig = Figure::new(600, 500);
        let ax = fig.add_axes();
        fig.set_title(ax, "Frame 3").unwrap();
        let cb = fig.attach_colorbar(colorbar(ax)).unwrap();
        fig.clear_axes(ax).unwrap();
        assert_eq!(fig.axes(ax).unwrap().title, None);
        assert_eq!(fig.colorbar_of(ax), Some(cb));
    }

    #[test]
    fn test_colorbars_are_per_axes() {
        let mut fig = Figure::new(800, 400);
        let left = fig.add_axes();
        let right = fig.add_axes();
        let cb = fig.attach_colorbar(colorbar(left)).unwrap();
        assert_eq!(fig.colorbar_of(right), None);
        assert_eq!(fig.colorbar(cb).map(|c| c.axes), Some(left));
        assert!(fig.attach_colorbar(colorbar(right)).is_ok());
    }

    #[test]
    fn test_slider_clamps() {
        let mut fig = Figure::new(700, 600);
        let ax = fig.add_axes();
        let slider = fig.add_slider("Frame", 9);
        assert_eq!(fig.set_slider(slider, 4).unwrap(), 4);
        assert_eq!(fig.set_slider(slider, 40).unwrap(), 9);
        assert_eq!(fig.slider().map(|(_, s)| s.value), Some(9));
        // The slider is not a colorbar.
        assert_eq!(fig.colorbar_of(ax), None);
        assert!(fig.colorbar(slider).is_none());
    }

    #[test]
    fn test_unknown_axes() {
        let mut fig = Figure::new(600, 500);
        fig.add_axes();
        let mut other = Figure::new(600, 500);
        other.add_axes();
        let foreign = other.add_axes();
        assert!(fig.axes(foreign).is_err());
        assert!(fig.attach_colorbar(colorbar(foreign)).is_err());
    }
}
