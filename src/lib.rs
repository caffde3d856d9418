// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reversible seam carving.
//!
//! A seam is a top-to-bottom path through an image, one pixel per
//! row, each step straight down or one column to the side.  This
//! crate finds the seam that maximizes a pluggable scoring rule,
//! paints it a highlight color, removes it to shrink the image, and
//! can undo any of those edits losslessly: removal detaches pixels
//! from the row chains without destroying them, so the undo stack can
//! splice the originals back exactly where they were.

/// My ternary expression handler.  While it may seem redundant, it's
/// surprisingly useful when working with complex logic tables, such
/// as the edge (literally) cases in the seam carving algorithm.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

pub mod error;
pub use error::{Error, Result};

pub mod grid;
pub use grid::{PixelGrid, PixelId, Seam};

pub mod energy;
pub use energy::{brightness, compute_energy};

pub mod seamfinder;
pub use seamfinder::{greenest_seam, lowest_energy_seam};

pub mod seamops;

pub mod history;
pub use history::{EditHistory, EditKind};

pub mod editor;
pub use editor::Editor;
