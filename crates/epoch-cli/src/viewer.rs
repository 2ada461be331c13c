// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Keyboard Viewer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Manual frame stepping. Each frame change replots into the same figure
//! and rewrites the preview image.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;
use epoch_sdf::Snapshot;
use epoch_types::error::EpochResult;
use epoch_viz::{
    render_png, replot, AxesId, Figure, FrameAction, FrameController, Plot2dOptions, RegionHandle,
};
use tracing::debug;

pub fn key_action(code: KeyCode) -> Option<FrameAction> {
    match code {
        KeyCode::Right => Some(FrameAction::Next),
        KeyCode::Left => Some(FrameAction::Previous),
        KeyCode::Home => Some(FrameAction::First),
        KeyCode::End => Some(FrameAction::Last),
        KeyCode::Char('q') | KeyCode::Esc => Some(FrameAction::Quit),
        _ => None,
    }
}

/// Raw terminal mode for the lifetime of the guard.
struct RawMode;

impl RawMode {
    fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

pub struct Viewer<'a> {
    snapshots: &'a [Snapshot],
    variable: String,
    opts: Plot2dOptions,
    fig: Figure,
    ax: AxesId,
    slider: Option<RegionHandle>,
    ctl: FrameController,
}

impl<'a> Viewer<'a> {
    /// Viewer on frame 0, already plotted.
    pub fn new(
        snapshots: &'a [Snapshot],
        variable: &str,
        opts: Plot2dOptions,
        size: (u32, u32),
        with_slider: bool,
    ) -> EpochResult<Self> {
        let ctl = FrameController::new(snapshots.len())?;
        let mut fig = Figure::new(size.0, size.1);
        let ax = fig.add_axes();
        let slider = with_slider
            .then(|| fig.add_slider("Frame", snapshots.len().saturating_sub(1)));
        let mut viewer = Viewer {
            snapshots,
            variable: variable.to_string(),
            opts,
            fig,
            ax,
            slider,
            ctl,
        };
        viewer.update()?;
        Ok(viewer)
    }

    pub fn index(&self) -> usize {
        self.ctl.index()
    }

    pub fn figure(&self) -> &Figure {
        &self.fig
    }

    fn update(&mut self) -> EpochResult<()> {
        let i = self.ctl.index();
        let snapshots = self.snapshots;
        let snapshot = &snapshots[i];
        replot(&mut self.fig, self.ax, snapshot, &self.variable, &self.opts)?;
        if let Some(slider) = self.slider {
            self.fig.set_slider(slider, i)?;
        }
        debug!("Showing frame {} ({})", i, snapshot.path.display());
        Ok(())
    }

    /// `None` on quit, otherwise whether the frame changed.
    pub fn apply(&mut self, action: FrameAction) -> EpochResult<Option<bool>> {
        match self.ctl.apply(action) {
            None => Ok(None),
            Some((_, false)) => Ok(Some(false)),
            Some((_, true)) => {
                self.update()?;
                Ok(Some(true))
            }
        }
    }
}

/// Interactive loop: read keys until `q`, re-rendering `preview` on change.
pub fn browse(mut viewer: Viewer<'_>, preview: &Path) -> Result<()> {
    render_png(viewer.figure(), preview)?;
    let total = viewer.snapshots.len();
    println!(
        "Use ← and → (Home/End) to move between frames. Press 'q' to quit. Preview: {}",
        preview.display()
    );

    let _raw = RawMode::enable()?;
    let mut stdout = std::io::stdout();
    write!(stdout, "\rFrame {}/{}   ", viewer.index() + 1, total)?;
    stdout.flush()?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = key_action(key.code) else {
            continue;
        };
        match viewer.apply(action)? {
            None => break,
            Some(true) => {
                render_png(viewer.figure(), preview)?;
                write!(stdout, "\rFrame {}/{}   ", viewer.index() + 1, total)?;
                stdout.flush()?;
            }
            Some(false) => {}
        }
    }
    write!(stdout, "\r\n")?;
    Ok(())
}
