#![cfg(feature = "host")]
//! Instrumented host stand-in for the pin controller.
//!
//! Records every pin operation in order so tests can check the scan
//! invariants (one anode at a time, cathode polarity, ghost resets) without
//! hardware. Presses, cancellation, and pin faults are scripted by
//! operation/poll number, keeping tests deterministic.

use crate::pins::PinController;
use crate::sequencer::CancelToken;
use crate::{Error, Line, Result};

/// One recorded pin operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PinOp {
    /// An anode line was driven (`high` = active).
    Anode {
        /// Zero-based anode index, left to right.
        index: usize,
        /// Level the line was driven to.
        high: bool,
    },
    /// A cathode line was driven.
    Cathode {
        /// Zero-based cathode index, top to bottom.
        index: usize,
        /// Level the line was driven to.
        high: bool,
    },
    /// `release_all` ran (after driving every line low).
    Release,
}

/// A [`PinController`] that records every operation.
///
/// - [`press_on_poll`](Self::press_on_poll) scripts which `poll_rising_edge`
///   calls (zero-based) report a press, standing in for the debounced latch.
/// - [`cancel_on_poll`](Self::cancel_on_poll) fires a cancellation token at a
///   given poll, so run-loop tests stop without process signals.
/// - [`fail_on_op`](Self::fail_on_op) scripts a one-shot fault on the nth
///   output operation, standing in for a hardware failure mid-scan.
///
/// The op log survives the scan, so tests can assert on the teardown trail
/// after `release_all`.
#[derive(Default)]
pub struct RecordingPinController<'a> {
    anode_count: usize,
    cathode_count: usize,
    ops: Vec<PinOp>,
    set_calls: usize,
    polls: usize,
    press_polls: Vec<usize>,
    cancel_poll: Option<(usize, &'a CancelToken)>,
    fail_on_set_call: Option<usize>,
    releases: usize,
}

impl<'a> RecordingPinController<'a> {
    /// Create a recorder for a matrix with the given line counts.
    #[must_use]
    pub fn new(anode_count: usize, cathode_count: usize) -> Self {
        Self {
            anode_count,
            cathode_count,
            ..Self::default()
        }
    }

    /// Report a press on the given zero-based `poll_rising_edge` call.
    pub fn press_on_poll(&mut self, poll: usize) {
        self.press_polls.push(poll);
    }

    /// Signal `cancel` when the given zero-based poll happens.
    pub fn cancel_on_poll(&mut self, poll: usize, cancel: &'a CancelToken) {
        self.cancel_poll = Some((poll, cancel));
    }

    /// Fail the given zero-based output operation (counted across
    /// `set_anode` and `set_cathode`) with a pin fault. One-shot: later
    /// operations succeed again.
    pub fn fail_on_op(&mut self, op: usize) {
        self.fail_on_set_call = Some(op);
    }

    /// Every operation recorded so far, in order.
    #[must_use]
    pub fn ops(&self) -> &[PinOp] {
        &self.ops
    }

    /// How many times `release_all` actually released (0 or 1).
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.releases
    }

    fn check_fault(&mut self, line: Line, index: usize) -> Result<()> {
        let call = self.set_calls;
        self.set_calls += 1;
        if self.fail_on_set_call == Some(call) {
            return Err(Error::PinDrive { line, index });
        }
        Ok(())
    }
}

impl<'a> PinController for RecordingPinController<'a> {
    fn set_anode(&mut self, index: usize, high: bool) -> Result<()> {
        self.check_fault(Line::Anode, index)?;
        self.ops.push(PinOp::Anode { index, high });
        Ok(())
    }

    fn set_cathode(&mut self, index: usize, high: bool) -> Result<()> {
        self.check_fault(Line::Cathode, index)?;
        self.ops.push(PinOp::Cathode { index, high });
        Ok(())
    }

    fn poll_rising_edge(&mut self) -> bool {
        let poll = self.polls;
        self.polls += 1;
        if let Some((cancel_at, cancel)) = self.cancel_poll {
            if poll == cancel_at {
                cancel.signal(());
            }
        }
        self.press_polls.contains(&poll)
    }

    fn release_all(&mut self) -> Result<()> {
        if self.releases > 0 {
            return Ok(());
        }
        self.releases += 1;
        // Teardown bypasses the scripted fault: the final all-low sweep must
        // reach every line even after a scan fault.
        for index in 0..self.anode_count {
            self.ops.push(PinOp::Anode { index, high: false });
        }
        for index in 0..self.cathode_count {
            self.ops.push(PinOp::Cathode { index, high: false });
        }
        self.ops.push(PinOp::Release);
        Ok(())
    }
}
