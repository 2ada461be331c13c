// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Visualisation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Figures, plots and animations for EPOCH snapshots, rendered with plotters.

pub mod animate;
pub mod colormap;
pub mod controller;
pub mod figure;
pub mod plot;
pub mod render;
pub mod resample;

pub use animate::{gif_frames, play, write_frames, write_gif};
pub use colormap::{Colormap, Norm};
pub use controller::{FrameAction, FrameController};
pub use figure::{AxesId, Figure, RegionHandle};
pub use plot::{plot1d, plot2d, plot_auto, replot, Plot2dOptions};
pub use render::{draw_figure, render_png};
pub use resample::Interpolation;
