//! Device abstractions for small multiplexed LED matrices.
//!
//! A matrix of bare LEDs is wired as N anode (column) lines by M cathode (row)
//! lines. Only one anode is ever driven at a time; scanning the anodes quickly
//! while setting the cathode pattern for each column exploits persistence of
//! vision so the whole grid appears lit at once.
//!
//! The crate is split along that idea:
//!
//! - [`frame::Frame`] and [`catalog::Catalog`] hold the on/off pixel data.
//! - [`scanner::MatrixScanner`] renders one frame by walking the anode lines.
//! - [`player::AnimationPlayer`] loops a frame sequence, polling for input
//!   between frames.
//! - [`watcher::InputWatcher`] surfaces debounced button presses.
//! - [`sequencer::Sequencer`] cycles through the catalog, one animation per
//!   press, forever.
//!
//! Hardware access goes through the [`pins::PinController`] trait.
//! [`pins::GpioPinController`] drives any HAL's GPIO output pins; with the
//! `host` feature, [`host_pins::RecordingPinController`] stands in for tests.
//!
//! # Glossary
//!
//! - **Anode line:** the pin sourcing current for one column of the matrix.
//! - **Cathode line:** the pin sinking current for one row of the matrix.
//! - **Scan cycle:** one full pass over all anode lines, rendering one frame.
//! - **Multiplex delay:** how long each anode is held during a scan cycle.
#![cfg_attr(not(feature = "host"), no_std)]

// Compile-time check: need either a board or the host feature
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable the 'host' feature or exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

pub mod catalog;
pub mod config;
mod error;
pub mod frame;
// Host stand-in for the pin controller; excluded from embedded builds
#[cfg(feature = "host")]
pub mod host_pins;
pub mod pins;
pub mod player;
pub mod scanner;
pub mod sequencer;
pub mod watcher;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Line, Result};
