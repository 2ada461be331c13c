// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Plot Front End
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Snapshot variables → figure content.
//!
//! `plot_auto` picks the plot from the dimensionality: a line for 1D, an
//! image with colorbar for 2D, and the mid-plane slice along the last axis
//! for 3D.

use epoch_sdf::{Axis, Snapshot, Variable};
use epoch_types::config::RenderConfig;
use epoch_types::error::{EpochError, EpochResult};
use ndarray::{ArrayView2, Axis as ArrayAxis, Ix2};
use tracing::debug;

use crate::colormap::{Colormap, Norm};
use crate::figure::{AxesId, Colorbar, Content, Figure, ImageData, LineData, RegionHandle};
use crate::resample::{output_len, resample, Interpolation};

/// Upper bound on image samples per axis after resampling.
const IMAGE_CAP: usize = 512;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plot2dOptions {
    pub interpolation: Interpolation,
    pub colormap: Colormap,
    pub norm: Norm,
    /// Replaces the default `<name>, t = <time> s` title.
    pub title: Option<String>,
}

impl Plot2dOptions {
    pub fn from_config(render: &RenderConfig) -> EpochResult<Self> {
        Ok(Self {
            interpolation: render.interpolation.parse()?,
            colormap: render.colormap.parse()?,
            norm: if render.log_scale { Norm::Log } else { Norm::Linear },
            title: None,
        })
    }
}

fn axis_label(axis: &Axis) -> String {
    if axis.units.is_empty() {
        axis.label.clone()
    } else {
        format!("{} [{}]", axis.label, axis.units)
    }
}

fn value_label(var: &Variable) -> String {
    if var.units.is_empty() {
        var.name.clone()
    } else {
        format!("{} [{}]", var.name, var.units)
    }
}

fn default_title(snapshot: &Snapshot, var: &Variable) -> String {
    format!("{}, t = {:.3e} s", var.name, snapshot.time())
}

fn axis_extent(axis: &Axis) -> (f64, f64) {
    axis.values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 1.0))
}

/// Line plot of a 1D variable over its mesh axis.
pub fn plot1d(fig: &mut Figure, axes: AxesId, snapshot: &Snapshot, name: &str) -> EpochResult<()> {
    let var = snapshot.variable(name)?;
    if var.ndim() != 1 {
        return Err(EpochError::Plot(format!(
            "plot1d needs a 1D variable, '{}' is {}D",
            var.name,
            var.ndim()
        )));
    }
    let coords = snapshot.axes_for(var);
    let x_axis = &coords[0];

    let target = fig.axes_mut(axes)?;
    target.title = Some(default_title(snapshot, var));
    target.x_label = axis_label(x_axis);
    target.y_label = value_label(var);
    target.content = Content::Line(LineData {
        x: x_axis.values.to_vec(),
        y: var.data.iter().copied().collect(),
    });
    Ok(())
}

/// Image of a 2D field with its own colorbar. Returns the colorbar handle.
pub fn plot2d(
    fig: &mut Figure,
    axes: AxesId,
    snapshot: &Snapshot,
    name: &str,
    opts: &Plot2dOptions,
) -> EpochResult<RegionHandle> {
    let var = snapshot.variable(name)?;
    let field = var
        .data
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| {
            EpochError::Plot(format!(
                "plot2d needs a 2D variable, '{}' is {}D",
                var.name,
                var.ndim()
            ))
        })?;
    let coords = snapshot.axes_for(var);
    let title = opts
        .title
        .clone()
        .unwrap_or_else(|| default_title(snapshot, var));
    image(fig, axes, var, field, (&coords[0], &coords[1]), title, opts)
}

fn image(
    fig: &mut Figure,
    axes: AxesId,
    var: &Variable,
    field: ArrayView2<f64>,
    (x_axis, y_axis): (&Axis, &Axis),
    title: String,
    opts: &Plot2dOptions,
) -> EpochResult<RegionHandle> {
    let normed = field.mapv(|v| opts.norm.apply(v));
    let value_range = normed
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or_else(|| {
            let what = match opts.norm {
                Norm::Linear => "finite",
                Norm::Log => "positive",
            };
            EpochError::Plot(format!("'{}' has no {what} values to plot", var.name))
        })?;

    let (nx, ny) = normed.dim();
    let out_x = output_len(nx, opts.interpolation, IMAGE_CAP);
    let out_y = output_len(ny, opts.interpolation, IMAGE_CAP);
    debug!(
        "{}: {}x{} → {}x{} ({})",
        var.name, nx, ny, out_x, out_y, opts.interpolation
    );
    let values = resample(normed.view(), out_x, out_y, opts.interpolation);

    let handle = fig.attach_colorbar(Colorbar {
        axes,
        colormap: opts.colormap,
        norm: opts.norm,
        range: value_range,
        label: value_label(var),
    })?;

    let target = fig.axes_mut(axes)?;
    target.title = Some(title);
    target.x_label = axis_label(x_axis);
    target.y_label = axis_label(y_axis);
    target.content = Content::Image(ImageData {
        values,
        x_range: axis_extent(x_axis),
        y_range: axis_extent(y_axis),
        value_range,
        colormap: opts.colormap,
    });
    Ok(handle)
}

/// Plot `name` in the form its dimensionality calls for.
///
/// Returns the colorbar handle for image plots.
pub fn plot_auto(
    fig: &mut Figure,
    axes: AxesId,
    snapshot: &Snapshot,
    name: &str,
    opts: &Plot2dOptions,
) -> EpochResult<Option<RegionHandle>> {
    let var = snapshot.variable(name)?;
    match var.ndim() {
        1 => plot1d(fig, axes, snapshot, name).map(|_| None),
        2 => plot2d(fig, axes, snapshot, name, opts).map(Some),
        3 => {
            let nz = var.shape()[2];
            if nz == 0 {
                return Err(EpochError::Plot(format!("'{}' has an empty z axis", var.name)));
            }
            let mid = nz / 2;
            let slice = var
                .data
                .index_axis(ArrayAxis(2), mid)
                .into_dimensionality::<Ix2>()
                .map_err(|e| EpochError::Plot(e.to_string()))?;
            let coords = snapshot.axes_for(var);
            let z = coords[2].values.get(mid).copied().unwrap_or(mid as f64);
            let title = opts.title.clone().unwrap_or_else(|| {
                format!("{} at z = {:.3e}", default_title(snapshot, var), z)
            });
            image(fig, axes, var, slice, (&coords[0], &coords[1]), title, opts).map(Some)
        }
        n => Err(EpochError::Plot(format!(
            "cannot plot '{}': {n}D variables are not supported",
            var.name
        ))),
    }
}

/// Drop the colorbar `axes` owns, clear it and plot `name` again.
pub fn replot(
    fig: &mut Figure,
    axes: AxesId,
    snapshot: &Snapshot,
    name: &str,
    opts: &Plot2dOptions,
) -> EpochResult<Option<RegionHandle>> {
    if let Some(handle) = fig.colorbar_of(axes) {
        fig.remove_region(handle);
    }
    fig.clear_axes(axes)?;
    plot_auto(fig, axes, snapshot, name, opts)
}
