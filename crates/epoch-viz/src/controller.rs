// ─────────────────────────────────────────────────────────────────────
// SCPN EPOCH Tools — Frame Controller
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Current frame of a snapshot sequence, always within `[0, len - 1]`.

use epoch_types::error::{EpochError, EpochResult};

/// What a key press asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    Next,
    Previous,
    First,
    Last,
    Seek(usize),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameController {
    index: usize,
    len: usize,
}

impl FrameController {
    /// Controller over `len` frames, starting at frame 0. There must be
    /// at least one frame.
    pub fn new(len: usize) -> EpochResult<Self> {
        if len == 0 {
            return Err(EpochError::Plot("no frames to step through".into()));
        }
        Ok(Self { index: 0, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame_count(&self) -> usize {
        self.len
    }

    fn last_index(&self) -> usize {
        self.len - 1
    }

    pub fn seek(&mut self, i: usize) -> usize {
        self.index = i.min(self.last_index());
        self.index
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> usize {
        self.seek(self.index.saturating_add(1))
    }

    pub fn previous(&mut self) -> usize {
        self.seek(self.index.saturating_sub(1))
    }

    pub fn first(&mut self) -> usize {
        self.seek(0)
    }

    pub fn last(&mut self) -> usize {
        self.seek(self.last_index())
    }

    /// Apply `action`. `None` means quit; otherwise the new index and
    /// whether it changed.
    pub fn apply(&mut self, action: FrameAction) -> Option<(usize, bool)> {
        let before = self.index;
        let after = match action {
            FrameAction::Next => self.next(),
            FrameAction::Previous => self.previous(),
            FrameAction::First => self.first(),
            FrameAction::Last => self.last(),
            FrameAction::Seek(i) => self.seek(i),
            FrameAction::Quit => return None,
        };
        Some((after, after != before))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping_clamps_at_both_ends() {
        let mut ctl = FrameController::new(3).unwrap();
        assert_eq!(ctl.previous(), 0);
        assert_eq!(ctl.next(), 1);
        assert_eq!(ctl.next(), 2);
        assert_eq!(ctl.next(), 2);
        assert_eq!(ctl.first(), 0);
        assert_eq!(ctl.last(), 2);
        assert_eq!(ctl.seek(99), 2);
    }

    #[test]
    fn test_apply_reports_change() {
        let mut ctl = FrameController::new(2).unwrap();
        assert_eq!(ctl.apply(FrameAction::Previous), Some((0, false)));
        assert_eq!(ctl.apply(FrameAction::Next), Some((1, true)));
        assert_eq!(ctl.apply(FrameAction::Last), Some((1, false)));
        assert_eq!(ctl.apply(FrameAction::Quit), None);
        assert_eq!(ctl.index(), 1);
    }

    #[test]
    fn test_single_frame_and_no_frames() {
        let mut one = FrameController::new(1).unwrap();
        assert_eq!(one.frame_count(), 1);
        assert_eq!(one.next(), 0);
        assert_eq!(one.last(), 0);
        assert_eq!(one.previous(), 0);

        let err = FrameController::new(0).expect_err("zero frames");
        assert!(err.to_string().contains("no frames"));
    }
}
