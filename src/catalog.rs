//! Animation catalogs: ordered frame sequences, validated at load time.

use crate::frame::Frame;
use crate::{Error, Result};

/// An ordered, non-empty sequence of frames played in a loop.
///
/// A single-frame animation is a static display.
pub type Animation<'a, const W: usize, const H: usize> = &'a [Frame<W, H>];

/// An immutable, validated catalog of animations.
///
/// Index 0 is the starting animation. The catalog is data only - playback
/// order and timing live in the player and sequencer. Hand-authored catalogs
/// are the most likely place for shape mistakes, so [`Catalog::new`] rejects
/// an empty catalog and empty animations up front; frame dimensions are
/// already pinned to the pin counts by the `W`/`H` parameters.
///
/// # Example
///
/// ```rust
/// use matrix_envoy::catalog::Catalog;
/// use matrix_envoy::frame::Frame;
///
/// let blink: &[Frame<3, 3>] = &[Frame::filled(true), Frame::filled(false)];
/// let steady: &[Frame<3, 3>] = &[Frame::filled(true)];
///
/// let animations = [blink, steady];
/// let catalog = Catalog::new(&animations)?;
/// assert_eq!(catalog.len(), 2);
/// # Ok::<(), matrix_envoy::Error>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Catalog<'a, const W: usize, const H: usize> {
    animations: &'a [Animation<'a, W, H>],
}

impl<'a, const W: usize, const H: usize> Catalog<'a, W, H> {
    /// Validate and wrap a set of animations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCatalog`] for an empty set and
    /// [`Error::EmptyAnimation`] if any animation has no frames.
    pub fn new(animations: &'a [Animation<'a, W, H>]) -> Result<Self> {
        if animations.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        for (animation_index, animation) in animations.iter().enumerate() {
            if animation.is_empty() {
                return Err(Error::EmptyAnimation { animation_index });
            }
        }
        Ok(Self { animations })
    }

    /// Number of animations in the catalog (always at least 1).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.animations.len()
    }

    /// A validated catalog is never empty; present for API completeness.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// The animation at `index`.
    #[must_use]
    pub fn animation(&self, index: usize) -> Animation<'a, W, H> {
        assert!(
            index < self.animations.len(),
            "animation index must be within the catalog"
        );
        self.animations[index]
    }
}
