//! Error and result types used throughout the crate.

use derive_more::Display;

/// Which kind of output line a pin fault occurred on.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Line {
    /// Anode (column-select) line.
    #[display("anode")]
    Anode,
    /// Cathode (row-sink) line.
    #[display("cathode")]
    Cathode,
}

/// Errors reported by matrix operations.
///
/// Configuration errors are detected before the scan loop starts; hardware
/// faults surface from the pin controller mid-operation. Neither is retried -
/// the caller's job is to release the pins and exit.
#[derive(Clone, Copy, Debug, Display, derive_more::Error)]
pub enum Error {
    /// The animation catalog contains no animations.
    #[display("animation catalog is empty")]
    EmptyCatalog,

    /// An animation in the catalog contains no frames.
    #[display("animation {animation_index} has no frames")]
    EmptyAnimation {
        /// Index of the offending animation within the catalog.
        animation_index: usize,
    },

    /// The pin controller failed to drive an output line.
    #[display("failed to drive {line} line {index}")]
    PinDrive {
        /// Which kind of line faulted.
        line: Line,
        /// Zero-based index of the line within its group.
        index: usize,
    },

    /// A background task could not be spawned.
    #[display("task spawn failed: {_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),
}

/// Result type alias using this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
