//! The multiplexed scan engine.
//!
//! Renders one boolean frame onto the matrix by walking the anode lines and
//! driving the matching cathode pattern for each, relying on persistence of
//! vision across a full scan cycle to make all pixels appear lit at once.

use embassy_time::{Duration, Instant, Timer};

use crate::Result;
use crate::config::ScanConfig;
use crate::frame::Frame;
use crate::pins::{CathodeWiring, PinController};

/// Renders frames by time-division multiplexing the matrix lines.
///
/// Invariant: at most one anode line is active at any instant. Each anode is
/// reset before the next is driven, and every cathode returns to the dark
/// baseline between anode steps so residual levels cannot ghost into the next
/// column.
pub struct MatrixScanner {
    multiplex_delay: Duration,
    wiring: CathodeWiring,
}

impl MatrixScanner {
    /// Create a scanner from the scan configuration.
    #[must_use]
    pub const fn new(config: &ScanConfig) -> Self {
        Self {
            multiplex_delay: config.multiplex_delay,
            wiring: config.wiring,
        }
    }

    /// Duration of one full scan cycle over `anode_count` lines.
    #[must_use]
    pub fn cycle_time(&self, anode_count: usize) -> Duration {
        self.multiplex_delay * u32::try_from(anode_count).unwrap_or(u32::MAX)
    }

    /// Repeatedly scan `frame` until `hold` has elapsed.
    ///
    /// Never returns before `hold`; because the elapsed check sits at cycle
    /// boundaries, the overshoot is bounded by one scan cycle. An all-dark
    /// frame still pulses every anode - skipping would only save time, and a
    /// constant cycle keeps brightness uniform across frames.
    ///
    /// Per anode, in wiring order: drive the anode high, set each cathode to
    /// the level the frame asks for (a lit pixel needs the wiring's lit level,
    /// e.g. low for sink wiring), dwell for the multiplex delay, then drop the
    /// anode and restore the dark baseline on every cathode.
    ///
    /// # Errors
    ///
    /// Returns the pin controller's [`Error::PinDrive`](crate::Error::PinDrive)
    /// unchanged; no retry is attempted.
    pub async fn render_frame<P: PinController, const W: usize, const H: usize>(
        &self,
        pins: &mut P,
        frame: &Frame<W, H>,
        hold: Duration,
    ) -> Result<()> {
        let lit = self.wiring.lit_level();
        let dark = self.wiring.dark_level();

        // Start from the dark baseline so whatever the lines held before this
        // call cannot ghost into the first anode step.
        for cathode in 0..H {
            pins.set_cathode(cathode, dark)?;
        }

        let deadline = Instant::now() + hold;
        while Instant::now() < deadline {
            for anode in 0..W {
                pins.set_anode(anode, true)?;
                for cathode in 0..H {
                    let level = if frame[(anode, cathode)] { lit } else { dark };
                    pins.set_cathode(cathode, level)?;
                }
                Timer::after(self.multiplex_delay).await;
                pins.set_anode(anode, false)?;
                for cathode in 0..H {
                    pins.set_cathode(cathode, dark)?;
                }
            }
        }
        Ok(())
    }
}
