// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error kinds for the seam editor.
//!
//! The grid and search core never use errors for control flow; these
//! are return-level signals.  Two of them, `NothingHighlighted` and
//! `NothingToUndo`, mark requests that are no-ops rather than faults,
//! and the driver reports them and carries on.

use failure::Fail;
use std::io;

/// Everything that can go wrong while editing.
#[derive(Debug, Fail)]
pub enum Error {
    /// A removal was requested while no seam is highlighted.  The
    /// grid is untouched.
    #[fail(display = "nothing is currently highlighted")]
    NothingHighlighted,

    /// An undo was requested with an empty history.  The grid is
    /// untouched.
    #[fail(display = "nothing to undo")]
    NothingToUndo,

    /// A seam failed the one-pixel-per-row / current-grid-membership
    /// contract.  The grid is untouched.
    #[fail(display = "invalid seam: {}", _0)]
    InvalidSeam(String),

    /// A row chain no longer yields exactly `width` pixels.
    #[fail(display = "row {} yielded {} pixels, expected {}", row, found, expected)]
    StructuralCorruption { row: u32, expected: u32, found: u32 },

    /// The raster buffer does not match the declared dimensions.
    #[fail(display = "raster holds {} pixels, expected {}", found, expected)]
    RasterLengthMismatch { expected: usize, found: usize },

    /// A seam search was requested on a grid with no columns left.
    #[fail(display = "cannot search a grid with no columns")]
    EmptySearchSpace,

    #[fail(display = "{}", _0)]
    Io(#[cause] io::Error),

    #[fail(display = "{}", _0)]
    Image(#[cause] image::ImageError),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Error {
        Error::Image(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
