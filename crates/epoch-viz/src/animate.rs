// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Animation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Frame sequences over a snapshot series: autoplay and GIF export.

use std::path::Path;
use std::time::Duration;

use epoch_sdf::Snapshot;
use epoch_types::error::{EpochError, EpochResult};
use plotters::prelude::*;
use tracing::info;

use crate::figure::Figure;
use crate::plot::{plot2d, replot, Plot2dOptions};
use crate::render::{draw_figure, plot_err, render_png};

/// Frame rate for a pause of `duration` seconds, truncated like
/// `int(1 / duration)` and never below one frame per second.
pub fn gif_fps(duration: f64) -> EpochResult<u32> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(EpochError::Plot(format!(
            "frame duration must be positive, got {duration}"
        )));
    }
    Ok(((1.0 / duration).trunc() as u32).max(1))
}

/// Per-frame delay in milliseconds at `fps`.
pub fn frame_delay_ms(fps: u32) -> u32 {
    (1000.0 / fps.max(1) as f64).round() as u32
}

fn pause(duration: f64) -> EpochResult<Duration> {
    Duration::try_from_secs_f64(duration)
        .map_err(|e| EpochError::Plot(format!("invalid frame duration {duration}: {e}")))
}

fn ensure_frames(snapshots: &[Snapshot]) -> EpochResult<()> {
    if snapshots.is_empty() {
        return Err(EpochError::Plot("no snapshots to animate".into()));
    }
    Ok(())
}

/// Figure for frame `index`: `plot2d` of `variable` titled `Frame <index>`.
pub fn gif_frame(
    snapshot: &Snapshot,
    index: usize,
    variable: &str,
    opts: &Plot2dOptions,
    size: (u32, u32),
) -> EpochResult<Figure> {
    let mut fig = Figure::new(size.0, size.1);
    let ax = fig.add_axes();
    let opts = Plot2dOptions {
        title: Some(format!("Frame {index}")),
        ..opts.clone()
    };
    plot2d(&mut fig, ax, snapshot, variable, &opts)?;
    Ok(fig)
}

/// One [`gif_frame`] per snapshot, titled `Frame 0`, `Frame 1`, ...
pub fn gif_frames(
    snapshots: &[Snapshot],
    variable: &str,
    opts: &Plot2dOptions,
    size: (u32, u32),
) -> EpochResult<Vec<Figure>> {
    ensure_frames(snapshots)?;
    snapshots
        .iter()
        .enumerate()
        .map(|(i, snap)| gif_frame(snap, i, variable, opts, size))
        .collect()
}

/// Encode prepared figures as an animated GIF at `1 / duration` fps.
/// Every figure is drawn at `size`. Returns the number of frames written.
pub fn write_frames(
    frames: &[Figure],
    size: (u32, u32),
    duration: f64,
    path: impl AsRef<Path>,
) -> EpochResult<usize> {
    if frames.is_empty() {
        return Err(EpochError::Plot("no frames to write".into()));
    }
    let path = path.as_ref();
    let fps = gif_fps(duration)?;
    let root = BitMapBackend::gif(path, size, frame_delay_ms(fps))
        .map_err(plot_err)?
        .into_drawing_area();
    for fig in frames {
        draw_figure(fig, &root)?;
        root.present().map_err(plot_err)?;
    }
    info!(
        "Wrote {} frames at {} fps to {}",
        frames.len(),
        fps,
        path.display()
    );
    Ok(frames.len())
}

/// Write an animated GIF with one `plot2d` frame per snapshot.
/// Returns the number of frames written.
pub fn write_gif(
    snapshots: &[Snapshot],
    variable: &str,
    opts: &Plot2dOptions,
    size: (u32, u32),
    duration: f64,
    path: impl AsRef<Path>,
) -> EpochResult<usize> {
    // Validate the rate and build every frame before the encoder touches
    // the output file.
    gif_fps(duration)?;
    let frames = gif_frames(snapshots, variable, opts, size)?;
    write_frames(&frames, size, duration, path)
}

/// Autoplay: re-render each frame with `plot_auto` to `preview`, pausing
/// `duration` seconds between frames. `on_frame` sees every figure after
/// it is written. Returns the number of frames shown.
pub fn play<F>(
    snapshots: &[Snapshot],
    variable: &str,
    opts: &Plot2dOptions,
    size: (u32, u32),
    duration: f64,
    preview: impl AsRef<Path>,
    mut on_frame: F,
) -> EpochResult<usize>
where
    F: FnMut(usize, &Figure),
{
    ensure_frames(snapshots)?;
    let preview = preview.as_ref();
    let wait = pause(duration)?;

    let mut fig = Figure::new(size.0, size.1);
    let ax = fig.add_axes();
    for (i, snap) in snapshots.iter().enumerate() {
        replot(&mut fig, ax, snap, variable, opts)?;
        render_png(&fig, preview)?;
        info!(
            "Frame {}/{}: {} → {}",
            i + 1,
            snapshots.len(),
            snap.path.display(),
            preview.display()
        );
        on_frame(i, &fig);
        if i + 1 < snapshots.len() {
            std::thread::sleep(wait);
        }
    }
    Ok(snapshots.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_from_duration() {
        assert_eq!(gif_fps(0.1).unwrap(), 10);
        assert_eq!(gif_fps(0.05).unwrap(), 20);
        assert_eq!(gif_fps(0.3).unwrap(), 3);
        assert_eq!(gif_fps(2.0).unwrap(), 1);
        assert!(gif_fps(0.0).is_err());
        assert!(gif_fps(f64::NAN).is_err());
    }

    #[test]
    fn test_frame_delay() {
        assert_eq!(frame_delay_ms(10), 100);
        assert_eq!(frame_delay_ms(20), 50);
        assert_eq!(frame_delay_ms(3), 333);
    }

    #[test]
    fn test_pause_rejects_negative() {
        assert!(pause(-1.0).is_err());
        assert_eq!(pause(0.0).unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_empty_series_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = Plot2dOptions::default();
        let err = write_gif(&[], "Electric_Field_Ex", &opts, (600, 500), 0.1, tmp.path().join("a.gif"))
            .expect_err("no frames");
        assert!(err.to_string().contains("no snapshots"));
        assert!(!tmp.path().join("a.gif").exists());

        let err = write_frames(&[], (600, 500), 0.1, tmp.path().join("b.gif")).expect_err("no frames");
        assert!(err.to_string().contains("no frames"));
        assert!(!tmp.path().join("b.gif").exists());
    }
}
