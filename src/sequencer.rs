//! The top-level run loop: one state per catalog animation, advancing on
//! button presses, forever.

use core::fmt::Write as _;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use heapless::String;

use crate::Result;
use crate::catalog::Catalog;
use crate::config::ScanConfig;
use crate::pins::PinController;
use crate::player::{AnimationPlayer, PlayEnd};
use crate::watcher::InputWatcher;

/// Cooperative stop token for the run loop.
///
/// Signal it to wind the sequencer down at the next frame boundary - tests
/// stop deterministically this way instead of killing the process.
pub type CancelToken = Signal<CriticalSectionRawMutex, ()>;

/// Cycles through the catalog's animations, one press per advance.
///
/// A state machine with one state per animation index: entering a state plays
/// that animation until a press arrives, the transition increments the index
/// modulo the catalog length, and there is no terminal state. Each transition
/// announces `Running animation <index>` for the operator.
pub struct Sequencer {
    player: AnimationPlayer,
    watcher: InputWatcher,
    animation_index: usize,
}

impl Sequencer {
    /// Create a sequencer (and its player and watcher) from the scan
    /// configuration.
    #[must_use]
    pub const fn new(config: &ScanConfig) -> Self {
        Self {
            player: AnimationPlayer::new(config),
            watcher: InputWatcher::new(),
            animation_index: 0,
        }
    }

    /// Index of the currently active animation.
    #[must_use]
    pub const fn animation_index(&self) -> usize {
        self.animation_index
    }

    /// Index of the player's current frame within the active animation.
    #[must_use]
    pub const fn frame_index(&self) -> usize {
        self.player.frame_index()
    }

    /// Run animations until `cancel` fires.
    ///
    /// Starts at animation 0 (or wherever a previous run left off) and blocks
    /// inside each animation until a press advances it. Returns `Ok(())` only
    /// on cancellation; pin faults propagate immediately. Either way the pins
    /// are restored by the controller's scoped release when the caller drops
    /// it (or calls `release_all`), so no exit path leaves the matrix lit.
    ///
    /// # Errors
    ///
    /// Propagates pin faults from rendering; no retry is attempted.
    pub async fn run<P: PinController, const W: usize, const H: usize>(
        &mut self,
        pins: &mut P,
        catalog: &Catalog<'_, W, H>,
        cancel: &CancelToken,
    ) -> Result<()> {
        loop {
            announce(self.animation_index);
            let animation = catalog.animation(self.animation_index);
            let play_end = self
                .player
                .play_one_cycle(pins, &mut self.watcher, animation, cancel)
                .await?;
            match play_end {
                PlayEnd::Advance => {
                    self.animation_index = (self.animation_index + 1) % catalog.len();
                }
                PlayEnd::Cancelled => return Ok(()),
            }
        }
    }
}

/// The operator-facing status line for an animation change.
#[must_use]
pub fn status_line(animation_index: usize) -> String<64> {
    let mut line = String::new();
    write!(line, "Running animation {animation_index}").expect("status line fits");
    line
}

fn announce(animation_index: usize) {
    let line = status_line(animation_index);
    #[cfg(feature = "host")]
    println!("{line}");
    #[cfg(not(feature = "host"))]
    defmt::info!("{=str}", line.as_str());
}
