//! Debounced button input: the background watch routine and the poll-side
//! watcher.
//!
//! The input pin is owned by [`watch_advance_button`], which runs in a
//! background task and latches qualifying presses into a [`PressLatch`]. The
//! scan side polls the latch between frames through [`InputWatcher`]; a press
//! that lands mid-frame is held by the latch until the next poll, never lost,
//! but also never queued - one latched press is one advance.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use embedded_hal_async::digital::Wait;

use crate::pins::PinController;

// ============================================================================
// Constants
// ============================================================================

/// Minimum interval between two reported presses.
///
/// A second physical press (or switch bounce) inside this window is ignored.
pub const ADVANCE_DEBOUNCE: Duration = Duration::from_secs(1);

// ============================================================================
// PressLatch
// ============================================================================

/// Latch carrying debounced press events from the watch task to the scan loop.
///
/// A `Signal` holds at most one pending event, which is exactly the contract:
/// presses are a momentary fact, consumed once observed, never buffered.
pub type PressLatch = Signal<CriticalSectionRawMutex, ()>;

// ============================================================================
// InputWatcher
// ============================================================================

/// Reports whether a qualifying button press occurred since the last check.
///
/// Debounce lives on the pin-controller side (see [`watch_advance_button`]);
/// the watcher only surfaces and clears the latched flag, so a second check in
/// the same cycle does not re-trigger.
#[derive(Debug, Default)]
pub struct InputWatcher;

impl InputWatcher {
    /// Create a new watcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Consume and return the pending press flag.
    pub fn check_and_clear<P: PinController>(&mut self, pins: &mut P) -> bool {
        pins.poll_rising_edge()
    }
}

// ============================================================================
// Background watch routine
// ============================================================================

/// Watch the advance button, latching one press per debounce window.
///
/// Owns the input pin (configured by the caller with a pull-down, so a press
/// pulls the line high). Waits for a rising edge, latches a press, then
/// ignores further edges for `debounce` - the hardware-debounce contract the
/// scan core relies on.
///
/// Embassy tasks cannot be generic, so wrap this in a concrete task for your
/// board's input type and spawn it:
///
/// ```rust,ignore
/// #[embassy_executor::task]
/// async fn advance_button_task(button: Input<'static>) -> ! {
///     watch_advance_button(button, &PRESSES, ADVANCE_DEBOUNCE).await
/// }
/// ```
pub async fn watch_advance_button<B: Wait>(
    mut button: B,
    presses: &PressLatch,
    debounce: Duration,
) -> ! {
    loop {
        if button.wait_for_rising_edge().await.is_err() {
            // A faulted input pin produces no further edges; stop watching
            // rather than spin-reporting phantom presses.
            core::future::pending::<()>().await;
        }
        presses.signal(());
        Timer::after(debounce).await;
    }
}
