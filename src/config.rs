//! Scan timing and wiring configuration.
//!
//! One immutable [`ScanConfig`] value is constructed at startup and handed to
//! the sequencer (and through it the player and scanner). There is no ambient
//! global configuration.

use embassy_time::Duration;

use crate::pins::CathodeWiring;

// ============================================================================
// Constants
// ============================================================================

/// How long each anode line is held active during one scan step.
///
/// Too long creates visible flicker; too short makes the LEDs appear dim from
/// insufficient per-pixel duty cycle. Tunable, not derived.
pub const DEFAULT_MULTIPLEX_DELAY: Duration = Duration::from_millis(2);

/// How long each animation frame is displayed before advancing.
pub const DEFAULT_FRAME_HOLD: Duration = Duration::from_millis(200);

// ============================================================================
// ScanConfig
// ============================================================================

/// Immutable scan configuration.
///
/// The pin identities themselves (ordered anode and cathode arrays, the input
/// pin) are fixed when the pin controller backend is constructed; this value
/// carries everything else an operator would tune before starting.
#[derive(Clone, Copy, Debug)]
pub struct ScanConfig {
    /// Dwell time for each anode during a scan cycle.
    pub multiplex_delay: Duration,
    /// Display time for each animation frame.
    pub frame_hold: Duration,
    /// How the matrix's cathode lines are physically wired.
    pub wiring: CathodeWiring,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            multiplex_delay: DEFAULT_MULTIPLEX_DELAY,
            frame_hold: DEFAULT_FRAME_HOLD,
            wiring: CathodeWiring::Sink,
        }
    }
}
