// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Figure Rendering
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Painting a [`Figure`] onto any plotters backend.

use std::path::Path;

use epoch_types::error::{EpochError, EpochResult};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::figure::{Axes, Colorbar, Content, Figure, Slider};

const COLORBAR_STEPS: usize = 128;

pub(crate) fn plot_err<E: std::fmt::Display>(e: E) -> EpochError {
    EpochError::Plot(e.to_string())
}

/// Widen a degenerate range so plotters gets a non-empty span.
pub(crate) fn padded(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        (lo, hi)
    } else {
        let pad = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
        (lo - pad, hi + pad)
    }
}

fn finite_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn draw_axes<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    axes: &Axes,
    annotated: bool,
) -> EpochResult<()> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(10);
    if annotated {
        builder.x_label_area_size(35).y_label_area_size(60);
        if let Some(title) = &axes.title {
            builder.caption(title, ("sans-serif", 16));
        }
    }

    match &axes.content {
        Content::Empty => {
            if let (true, Some(title)) = (annotated, &axes.title) {
                area.titled(title, ("sans-serif", 16)).map_err(plot_err)?;
            }
        }
        Content::Line(line) => {
            let (x0, x1) = finite_bounds(line.x.iter().copied()).unwrap_or((0.0, 1.0));
            let (y0, y1) = finite_bounds(line.y.iter().copied()).unwrap_or((0.0, 1.0));
            let (x0, x1) = padded(x0, x1);
            let (y0, y1) = padded(y0, y1);
            let mut chart = builder
                .build_cartesian_2d(x0..x1, y0..y1)
                .map_err(plot_err)?;
            if annotated {
                chart
                    .configure_mesh()
                    .x_desc(axes.x_label.as_str())
                    .y_desc(axes.y_label.as_str())
                    .y_label_formatter(&|v| format!("{v:.2e}"))
                    .draw()
                    .map_err(plot_err)?;
            }
            let points = line
                .x
                .iter()
                .copied()
                .zip(line.y.iter().copied())
                .filter(|(x, y)| x.is_finite() && y.is_finite());
            chart
                .draw_series(LineSeries::new(points, &BLUE))
                .map_err(plot_err)?;
        }
        Content::Image(image) => {
            let (x0, x1) = padded(image.x_range.0, image.x_range.1);
            let (y0, y1) = padded(image.y_range.0, image.y_range.1);
            let mut chart = builder
                .build_cartesian_2d(x0..x1, y0..y1)
                .map_err(plot_err)?;
            if annotated {
                chart
                    .configure_mesh()
                    .disable_mesh()
                    .x_desc(axes.x_label.as_str())
                    .y_desc(axes.y_label.as_str())
                    .draw()
                    .map_err(plot_err)?;
            }

            let (nx, ny) = image.values.dim();
            let dx = (x1 - x0) / nx.max(1) as f64;
            let dy = (y1 - y0) / ny.max(1) as f64;
            let (lo, hi) = image.value_range;
            let span = if hi > lo { hi - lo } else { 1.0 };
            let cells = image.values.indexed_iter().filter_map(|((i, j), &v)| {
                if !v.is_finite() {
                    return None;
                }
                let color = image.colormap.color((v - lo) / span);
                let corner = (x0 + i as f64 * dx, y0 + j as f64 * dy);
                Some(Rectangle::new(
                    [corner, (corner.0 + dx, corner.1 + dy)],
                    color.filled(),
                ))
            });
            chart.draw_series(cells).map_err(plot_err)?;
        }
    }
    Ok(())
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    colorbar: &Colorbar,
    annotated: bool,
) -> EpochResult<()> {
    let (lo, hi) = padded(colorbar.range.0, colorbar.range.1);
    let norm = colorbar.norm;
    let formatter = move |v: &f64| format!("{:.2e}", norm.invert(*v));

    let mut chart = ChartBuilder::on(area)
        .margin_top(40)
        .margin_bottom(45)
        .margin_right(5)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..1f64, lo..hi)
        .map_err(plot_err)?;
    if annotated {
        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .y_label_formatter(&formatter)
            .y_desc(colorbar.label.as_str())
            .draw()
            .map_err(plot_err)?;
    }

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    let bands = (0..COLORBAR_STEPS).map(|k| {
        let y = lo + k as f64 * step;
        let color = colorbar.colormap.color((k as f64 + 0.5) / COLORBAR_STEPS as f64);
        Rectangle::new([(0.0, y), (1.0, y + step)], color.filled())
    });
    chart.draw_series(bands).map_err(plot_err)?;
    Ok(())
}

fn draw_slider<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    slider: &Slider,
    annotated: bool,
) -> EpochResult<()> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let mid = h / 2;
    let track_start = w * 15 / 100;
    let track_end = w * 85 / 100;

    if annotated {
        area.draw(&Text::new(
            slider.label.clone(),
            (10, mid - 8),
            ("sans-serif", 14).into_font(),
        ))
        .map_err(plot_err)?;
    }
    area.draw(&Rectangle::new(
        [(track_start, mid - 3), (track_end, mid + 3)],
        RGBColor(210, 210, 210).filled(),
    ))
    .map_err(plot_err)?;

    let frac = if slider.max == 0 {
        0.0
    } else {
        slider.value as f64 / slider.max as f64
    };
    let knob = track_start + ((track_end - track_start) as f64 * frac).round() as i32;
    area.draw(&Rectangle::new(
        [(track_start, mid - 3), (knob, mid + 3)],
        RGBColor(31, 119, 180).filled(),
    ))
    .map_err(plot_err)?;
    area.draw(&Circle::new((knob, mid), 7, RGBColor(31, 119, 180).filled()))
        .map_err(plot_err)?;
    if annotated {
        area.draw(&Text::new(
            format!("{}/{}", slider.value, slider.max),
            (track_end + 10, mid - 8),
            ("sans-serif", 14).into_font(),
        ))
        .map_err(plot_err)?;
    }
    Ok(())
}

/// Lay out and paint every axes and region of `fig` onto `root`.
pub fn draw_figure<DB: DrawingBackend>(
    fig: &Figure,
    root: &DrawingArea<DB, Shift>,
) -> EpochResult<()> {
    root.fill(&WHITE).map_err(plot_err)?;
    let (width, height) = root.dim_in_pixel();
    let annotated = fig.annotated();

    let main = match fig.slider() {
        Some((_, slider)) => {
            let slider_h = (height / 8).max(40);
            let (upper, lower) = root.split_vertically(height.saturating_sub(slider_h));
            draw_slider(&lower, slider, annotated)?;
            upper
        }
        None => root.clone(),
    };

    let ids: Vec<_> = fig.axes_ids().collect();
    if ids.is_empty() {
        return Ok(());
    }
    let n_axes = ids.len() as u32;
    let panels = main.split_evenly((1, ids.len()));
    for (panel, id) in panels.iter().zip(ids) {
        let axes = fig.axes(id)?;
        match fig.colorbar_of(id).and_then(|handle| fig.colorbar(handle)) {
            Some(cb) => {
                let (panel_w, _) = panel.dim_in_pixel();
                let bar_w = (width / n_axes / 6).max(80).min(panel_w / 2);
                let (plot_area, bar_area) = panel.split_horizontally(panel_w - bar_w);
                draw_axes(&plot_area, axes, annotated)?;
                draw_colorbar(&bar_area, cb, annotated)?;
            }
            None => draw_axes(panel, axes, annotated)?,
        }
    }
    Ok(())
}

/// Render `fig` to a PNG (or any image format the extension names).
pub fn render_png(fig: &Figure, path: impl AsRef<Path>) -> EpochResult<()> {
    let path = path.as_ref();
    let root = BitMapBackend::new(path, fig.size()).into_drawing_area();
    draw_figure(fig, &root)?;
    root.present().map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_ranges() {
        assert_eq!(padded(1.0, 2.0), (1.0, 2.0));
        assert_eq!(padded(0.0, 0.0), (-0.5, 0.5));
        let (lo, hi) = padded(4.0, 4.0);
        assert!(lo < 4.0 && hi > 4.0);
    }

    #[test]
    fn test_finite_bounds_skips_nan() {
        let v = [f64::NAN, 3.0, -1.0, f64::INFINITY];
        assert_eq!(finite_bounds(v.into_iter()), Some((-1.0, 3.0)));
        assert_eq!(finite_bounds(std::iter::empty()), None);
    }
}
