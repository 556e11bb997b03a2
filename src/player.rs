//! Animation playback: frame advance with input polling between frames.

use embassy_time::Duration;

use crate::Result;
use crate::catalog::Animation;
use crate::config::ScanConfig;
use crate::pins::PinController;
use crate::scanner::MatrixScanner;
use crate::sequencer::CancelToken;
use crate::watcher::InputWatcher;

/// Why [`AnimationPlayer::play_one_cycle`] returned.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PlayEnd {
    /// A qualifying button press was consumed; the caller should advance to
    /// the next animation.
    Advance,
    /// The cancellation token fired; the caller should wind down.
    Cancelled,
}

/// Plays one animation's frames in a loop, checking for input between frames.
///
/// Owns the current frame index. The sequencer owns the animation index; the
/// player never changes which animation it was handed.
pub struct AnimationPlayer {
    scanner: MatrixScanner,
    frame_hold: Duration,
    frame_index: usize,
}

impl AnimationPlayer {
    /// Create a player (and its scanner) from the scan configuration.
    #[must_use]
    pub const fn new(config: &ScanConfig) -> Self {
        Self {
            scanner: MatrixScanner::new(config),
            frame_hold: config.frame_hold,
            frame_index: 0,
        }
    }

    /// Index of the frame most recently rendered (or about to be rendered).
    #[must_use]
    pub const fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Play `animation` from its first frame until a press or cancellation.
    ///
    /// Each iteration renders the current frame for the configured frame hold,
    /// then checks the input watcher and the cancellation token. On a press
    /// the press is consumed and `Advance` returned; the in-progress frame has
    /// already completed its hold by then. Otherwise the frame index advances
    /// modulo the animation length and the loop continues - with no input the
    /// animation loops forever.
    ///
    /// Input is polled only between frames, so a latched press waits at most
    /// one frame hold plus one scan cycle before it is observed. That bound is
    /// the price of keeping the scan uninterrupted; shrink the frame hold if
    /// it matters.
    ///
    /// # Errors
    ///
    /// Propagates pin faults from the scanner; no retry is attempted.
    pub async fn play_one_cycle<P: PinController, const W: usize, const H: usize>(
        &mut self,
        pins: &mut P,
        watcher: &mut InputWatcher,
        animation: Animation<'_, W, H>,
        cancel: &CancelToken,
    ) -> Result<PlayEnd> {
        self.frame_index = 0;
        loop {
            let frame = &animation[self.frame_index];
            self.scanner
                .render_frame(pins, frame, self.frame_hold)
                .await?;
            if watcher.check_and_clear(pins) {
                return Ok(PlayEnd::Advance);
            }
            if cancel.signaled() {
                return Ok(PlayEnd::Cancelled);
            }
            self.frame_index = (self.frame_index + 1) % animation.len();
        }
    }
}
