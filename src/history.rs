// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The edit history: a LIFO stack of executed commands.
//!
//! Each command variant carries only the seams its inverse needs.
//! `execute` and `undo` are functions over the grid and the session's
//! currently-highlighted slot rather than stateful objects, so a
//! command's payload is fixed the moment it lands on the stack.
//! There is no redo: an undone command is discarded.

use crate::error::{Error, Result};
use crate::grid::{PixelGrid, Seam};
use crate::seamfinder::{greenest_seam, lowest_energy_seam};
use crate::seamops;

/// Highlight color for the greenest seam.
pub const HIGHLIGHT_GREEN: [u8; 3] = [0, 255, 0];
/// Highlight color for the lowest-energy seam.
pub const HIGHLIGHT_RED: [u8; 3] = [250, 0, 0];

/// The operations a driver can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    HighlightGreenest,
    HighlightLowestEnergy,
    RemoveHighlighted,
}

// An executed edit.  The highlight variants remember both the
// detached original seam and the overlay that replaced it; the
// removal remembers the seam it detached.
#[derive(Debug)]
enum EditCommand {
    HighlightGreenest { original: Seam, highlighted: Seam },
    HighlightLowestEnergy { original: Seam, highlighted: Seam },
    RemoveHighlighted { removed: Seam },
}

/// The undo stack.  One per editing session.
#[derive(Debug, Default)]
pub struct EditHistory {
    stack: Vec<EditCommand>,
}

impl EditHistory {
    pub fn new() -> EditHistory {
        EditHistory { stack: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Run the forward effect of `kind` and push the resulting
    /// command.  Nothing is pushed, and the grid and highlighted
    /// slot are untouched, when the forward effect fails.
    pub fn execute(
        &mut self,
        grid: &mut PixelGrid,
        highlighted: &mut Option<Seam>,
        kind: EditKind,
    ) -> Result<()> {
        let command = match kind {
            EditKind::HighlightGreenest => {
                let original = greenest_seam(grid)?;
                let overlay = seamops::highlight(grid, &original, HIGHLIGHT_GREEN)?;
                *highlighted = Some(overlay.clone());
                EditCommand::HighlightGreenest {
                    original,
                    highlighted: overlay,
                }
            }
            EditKind::HighlightLowestEnergy => {
                let original = lowest_energy_seam(grid)?;
                let overlay = seamops::highlight(grid, &original, HIGHLIGHT_RED)?;
                *highlighted = Some(overlay.clone());
                EditCommand::HighlightLowestEnergy {
                    original,
                    highlighted: overlay,
                }
            }
            EditKind::RemoveHighlighted => match highlighted.take() {
                None => return Err(Error::NothingHighlighted),
                Some(seam) => {
                    if let Err(err) = seamops::remove(grid, &seam) {
                        *highlighted = Some(seam);
                        return Err(err);
                    }
                    EditCommand::RemoveHighlighted { removed: seam }
                }
            },
        };
        self.stack.push(command);
        Ok(())
    }

    /// Pop the most recent command and run its inverse.  Undoing a
    /// highlight clears the highlighted slot; undoing a removal
    /// restores it, so the re-inserted seam can be removed again.
    pub fn undo(&mut self, grid: &mut PixelGrid, highlighted: &mut Option<Seam>) -> Result<()> {
        match self.stack.pop().ok_or(Error::NothingToUndo)? {
            EditCommand::HighlightGreenest {
                original,
                highlighted: overlay,
            }
            | EditCommand::HighlightLowestEnergy {
                original,
                highlighted: overlay,
            } => {
                seamops::remove(grid, &overlay)?;
                seamops::insert(grid, &original)?;
                *highlighted = None;
            }
            EditCommand::RemoveHighlighted { removed } => {
                seamops::insert(grid, &removed)?;
                *highlighted = Some(removed);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid3x3() -> PixelGrid {
        let colors: Vec<[u8; 3]> = (0..9).map(|i| [i as u8 * 20, i as u8, 100]).collect();
        PixelGrid::from_raster(3, 3, &colors).unwrap()
    }

    #[test]
    fn undo_with_empty_history_is_a_reported_noop() {
        let mut grid = grid3x3();
        let mut highlighted = None;
        let mut history = EditHistory::new();
        let before = grid.to_raster().unwrap();
        match history.undo(&mut grid, &mut highlighted).unwrap_err() {
            Error::NothingToUndo => {}
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(grid.to_raster().unwrap(), before);
    }

    #[test]
    fn remove_with_nothing_highlighted_is_a_reported_noop() {
        let mut grid = grid3x3();
        let mut highlighted = None;
        let mut history = EditHistory::new();
        let before = grid.to_raster().unwrap();
        match history
            .execute(&mut grid, &mut highlighted, EditKind::RemoveHighlighted)
            .unwrap_err()
        {
            Error::NothingHighlighted => {}
            other => panic!("unexpected error: {}", other),
        }
        assert!(history.is_empty());
        assert_eq!(grid.to_raster().unwrap(), before);
    }

    #[test]
    fn highlight_then_undo_is_bit_identical() {
        let mut grid = grid3x3();
        let mut highlighted = None;
        let mut history = EditHistory::new();
        let before = grid.to_raster().unwrap();

        history
            .execute(&mut grid, &mut highlighted, EditKind::HighlightGreenest)
            .unwrap();
        assert!(highlighted.is_some());
        assert_ne!(grid.to_raster().unwrap(), before);

        history.undo(&mut grid, &mut highlighted).unwrap();
        assert!(highlighted.is_none());
        assert!(history.is_empty());
        assert_eq!(grid.to_raster().unwrap(), before);
    }

    #[test]
    fn lowest_energy_highlight_paints_red_and_undoes() {
        let mut grid = grid3x3();
        let mut highlighted = None;
        let mut history = EditHistory::new();
        let before = grid.to_raster().unwrap();

        history
            .execute(&mut grid, &mut highlighted, EditKind::HighlightLowestEnergy)
            .unwrap();
        let raster = grid.to_raster().unwrap();
        assert!(raster.iter().any(|&c| c == HIGHLIGHT_RED));

        history.undo(&mut grid, &mut highlighted).unwrap();
        assert_eq!(grid.to_raster().unwrap(), before);
    }

    #[test]
    fn full_cycle_highlight_remove_undo_undo_restores_everything() {
        let mut grid = grid3x3();
        let mut highlighted = None;
        let mut history = EditHistory::new();
        let before = grid.to_raster().unwrap();

        history
            .execute(&mut grid, &mut highlighted, EditKind::HighlightGreenest)
            .unwrap();
        history
            .execute(&mut grid, &mut highlighted, EditKind::RemoveHighlighted)
            .unwrap();
        assert_eq!(grid.width(), 2);
        assert!(highlighted.is_none());
        assert_eq!(history.len(), 2);

        // First undo re-inserts the overlay seam and re-arms it.
        history.undo(&mut grid, &mut highlighted).unwrap();
        assert_eq!(grid.width(), 3);
        assert!(highlighted.is_some());

        // Second undo strips the overlay and restores the original.
        history.undo(&mut grid, &mut highlighted).unwrap();
        assert_eq!(grid.to_raster().unwrap(), before);
        assert!(history.is_empty());
    }

    #[test]
    fn removal_can_be_repeated_after_its_undo() {
        let mut grid = grid3x3();
        let mut highlighted = None;
        let mut history = EditHistory::new();

        history
            .execute(&mut grid, &mut highlighted, EditKind::HighlightGreenest)
            .unwrap();
        history
            .execute(&mut grid, &mut highlighted, EditKind::RemoveHighlighted)
            .unwrap();
        history.undo(&mut grid, &mut highlighted).unwrap();
        history
            .execute(&mut grid, &mut highlighted, EditKind::RemoveHighlighted)
            .unwrap();
        assert_eq!(grid.width(), 2);
    }
}
