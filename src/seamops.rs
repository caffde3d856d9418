// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The structural edits the commands are built from: highlight,
//! remove, insert.  The grid does the splicing; the edit history
//! holds whichever seams a later inverse will need.

use crate::error::Result;
use crate::grid::{PixelGrid, Seam};

/// Replace the seam with overlay pixels of `color`, returning the
/// overlay seam.  The caller must retain the original seam to restore
/// the image later.
pub fn highlight(grid: &mut PixelGrid, seam: &Seam, color: [u8; 3]) -> Result<Seam> {
    grid.highlight_seam(seam, color)
}

/// Detach the seam from the grid.  Irreversible unless the caller
/// retains `seam`.
pub fn remove(grid: &mut PixelGrid, seam: &Seam) -> Result<()> {
    grid.remove_seam(seam)
}

/// Splice a previously detached seam back into the grid it came from.
pub fn insert(grid: &mut PixelGrid, seam: &Seam) -> Result<()> {
    grid.insert_seam(seam)
}
