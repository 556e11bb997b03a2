//! The pin seam between the scan core and real hardware.
//!
//! The core never touches GPIO directly; it drives lines through the
//! [`PinController`] trait. [`GpioPinController`] implements it over any HAL's
//! output pins and pairs with the button-watch routine in
//! [`crate::watcher`] for the input side. Tests substitute the recording
//! backend from [`crate::host_pins`].

use embedded_hal::digital::OutputPin;

use crate::watcher::PressLatch;
use crate::{Error, Line, Result};

// ============================================================================
// CathodeWiring - How the cathode lines are wired
// ============================================================================

/// Describes how the matrix's cathode lines are physically wired.
///
/// The level that lights a pixel depends on the wiring convention, so the
/// scanner derives its drive levels from this instead of assuming one scheme.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CathodeWiring {
    /// Cathode lines sink current. A pixel lights when its anode is high and
    /// its cathode is driven low; a high cathode keeps the pixel dark. This is
    /// the common breadboard arrangement with resistors on the cathode side.
    Sink,

    /// Cathode lines are wired through inverting drivers, so a pixel lights
    /// when its cathode line is driven high.
    Source,
}

impl CathodeWiring {
    /// The cathode drive level that lights a pixel under an active anode.
    #[must_use]
    pub const fn lit_level(self) -> bool {
        match self {
            Self::Sink => false,
            Self::Source => true,
        }
    }

    /// The baseline cathode drive level that keeps a pixel dark.
    #[must_use]
    pub const fn dark_level(self) -> bool {
        match self {
            Self::Sink => true,
            Self::Source => false,
        }
    }
}

// ============================================================================
// PinController - the hardware seam
// ============================================================================

/// Access to the matrix's output lines and the advance button's press latch.
///
/// Line indices are zero-based: anodes left to right, cathodes top to bottom.
/// Implementations own their pins exclusively; the scan core enforces "at most
/// one anode active" by call ordering, not by locking.
pub trait PinController {
    /// Drive an anode (column-select) line high or low.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PinDrive`] if the underlying pin cannot be driven.
    fn set_anode(&mut self, index: usize, high: bool) -> Result<()>;

    /// Drive a cathode (row) line high or low.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PinDrive`] if the underlying pin cannot be driven.
    fn set_cathode(&mut self, index: usize, high: bool) -> Result<()>;

    /// Surface and clear the debounced rising-edge latch for the advance
    /// button. A second call without a new qualifying press returns `false`.
    fn poll_rising_edge(&mut self) -> bool;

    /// Drive every output line low and release the lines. Runs at most once;
    /// later calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::PinDrive`] encountered. All lines are still
    /// attempted, so a single faulted pin does not leave the rest lit.
    fn release_all(&mut self) -> Result<()>;
}

// ============================================================================
// GpioPinController - HAL-backed pins
// ============================================================================

/// A [`PinController`] over any HAL's GPIO output pins.
///
/// `W` anode pins are listed left to right and `H` cathode pins top to
/// bottom, matching the frame dimensions. Construction drives every line low
/// (matrix dark). Press events arrive through `presses`, a latch fed by
/// [`crate::watcher::watch_advance_button`] running in a background task that
/// owns the input pin.
///
/// The controller releases its lines on drop, so any exit path - an error
/// return or an unwinding panic - leaves the matrix dark rather than stuck on
/// whatever the scan was doing.
///
/// # Example
///
/// ```rust
/// use core::convert::Infallible;
///
/// use embedded_hal::digital::{ErrorType, OutputPin};
/// use matrix_envoy::pins::{GpioPinController, PinController};
/// use matrix_envoy::watcher::PressLatch;
///
/// struct FakePin;
/// impl ErrorType for FakePin {
///     type Error = Infallible;
/// }
/// impl OutputPin for FakePin {
///     fn set_low(&mut self) -> Result<(), Infallible> {
///         Ok(())
///     }
///     fn set_high(&mut self) -> Result<(), Infallible> {
///         Ok(())
///     }
/// }
///
/// let presses = PressLatch::new();
/// let anodes = [FakePin, FakePin, FakePin];
/// let cathodes = [FakePin, FakePin, FakePin];
/// let mut pins = GpioPinController::new(anodes, cathodes, &presses)?;
/// assert!(!pins.poll_rising_edge());
/// # Ok::<(), matrix_envoy::Error>(())
/// ```
pub struct GpioPinController<'a, P, const W: usize, const H: usize>
where
    P: OutputPin,
{
    anodes: [P; W],
    cathodes: [P; H],
    presses: &'a PressLatch,
    released: bool,
}

impl<'a, P, const W: usize, const H: usize> GpioPinController<'a, P, W, H>
where
    P: OutputPin,
{
    /// Take ownership of the output pins and drive every line low.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PinDrive`] if a line cannot be driven to its initial
    /// state.
    pub fn new(anodes: [P; W], cathodes: [P; H], presses: &'a PressLatch) -> Result<Self> {
        let mut controller = Self {
            anodes,
            cathodes,
            presses,
            released: false,
        };
        controller.drive_all_low()?;
        Ok(controller)
    }

    fn drive_all_low(&mut self) -> Result<()> {
        let mut first_error = None;
        for (index, pin) in self.anodes.iter_mut().enumerate() {
            if let Err(error) = drive(pin, false, Line::Anode, index) {
                first_error.get_or_insert(error);
            }
        }
        for (index, pin) in self.cathodes.iter_mut().enumerate() {
            if let Err(error) = drive(pin, false, Line::Cathode, index) {
                first_error.get_or_insert(error);
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl<'a, P, const W: usize, const H: usize> PinController for GpioPinController<'a, P, W, H>
where
    P: OutputPin,
{
    fn set_anode(&mut self, index: usize, high: bool) -> Result<()> {
        drive(&mut self.anodes[index], high, Line::Anode, index)
    }

    fn set_cathode(&mut self, index: usize, high: bool) -> Result<()> {
        drive(&mut self.cathodes[index], high, Line::Cathode, index)
    }

    fn poll_rising_edge(&mut self) -> bool {
        self.presses.try_take().is_some()
    }

    fn release_all(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.drive_all_low()
    }
}

impl<'a, P, const W: usize, const H: usize> Drop for GpioPinController<'a, P, W, H>
where
    P: OutputPin,
{
    fn drop(&mut self) {
        // Last line of defense; a faulted pin cannot be helped here.
        let _ = self.release_all();
    }
}

/// Drive one pin, folding the HAL's error into [`Error::PinDrive`].
fn drive<P: OutputPin>(pin: &mut P, high: bool, line: Line, index: usize) -> Result<()> {
    let outcome = if high { pin.set_high() } else { pin.set_low() };
    outcome.map_err(|_| Error::PinDrive { line, index })
}
