// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel grid.
//!
//! Each row of the image is a doubly linked chain of pixels.  Rather
//! than raw pointers, the pixels live in an append-only arena and
//! link to each other by `PixelId`, so a detached pixel keeps a valid
//! handle for as long as the grid lives.  That retention is the whole
//! trick behind lossless undo: removing a seam only unhooks its
//! pixels from the live chains, and the seam itself keeps the ids
//! (and the pixels keep their old neighbor links) needed to splice
//! them back.
//!
//! Structural invariant, maintained by every operation here: for any
//! live pixel `p`, `p.right.left == p` and `p.left.right == p`
//! whenever those neighbors exist, and a live pixel with no left
//! neighbor is its row's head.  Every mutating operation validates
//! the whole seam before touching anything, so a failed call leaves
//! the grid exactly as it found it.

use crate::error::{Error, Result};
use std::collections::HashSet;

/// A stable handle to one pixel in a grid's arena.  Ids are never
/// reused and never invalidated; they are only meaningful to the
/// grid that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelId(u32);

impl PixelId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One pixel: its color, its last-computed energy, and its two
/// intra-row neighbor links.
#[derive(Debug, Clone)]
pub struct Pixel {
    /// Three 8-bit channels, red/green/blue.
    pub color: [u8; 3],
    /// Importance score; recomputed from scratch by every
    /// lowest-energy search.
    pub energy: f64,
    left: Option<PixelId>,
    right: Option<PixelId>,
}

/// An ordered sequence of exactly `height` pixel ids, one per row,
/// top to bottom.  A seam is only meaningful relative to the grid
/// state at the moment it was produced.
pub type Seam = Vec<PixelId>;

/// The grid: an arena of pixels plus one chain head per row.  Row
/// order is fixed for the grid's lifetime; `width` changes only by
/// seam removal and insertion, and may legally reach zero.
#[derive(Debug)]
pub struct PixelGrid {
    arena: Vec<Pixel>,
    heads: Vec<Option<PixelId>>,
    width: u32,
    height: u32,
}

impl PixelGrid {
    /// Build a grid from a row-major raster.  Input order is
    /// preserved exactly.
    pub fn from_raster(width: u32, height: u32, colors: &[[u8; 3]]) -> Result<PixelGrid> {
        let expected = width as usize * height as usize;
        if colors.len() != expected {
            return Err(Error::RasterLengthMismatch {
                expected,
                found: colors.len(),
            });
        }

        let mut grid = PixelGrid {
            arena: Vec::with_capacity(expected),
            heads: vec![None; height as usize],
            width,
            height,
        };

        for row in 0..height as usize {
            let mut previous: Option<PixelId> = None;
            for col in 0..width as usize {
                let id = grid.alloc(colors[row * width as usize + col], previous, None);
                match previous {
                    None => grid.heads[row] = Some(id),
                    Some(prev) => grid.arena[prev.index()].right = Some(id),
                }
                previous = Some(id);
            }
        }
        Ok(grid)
    }

    /// Walk every row head through its right-links and produce a
    /// row-major raster.  Fails if any row chain does not yield
    /// exactly `width` pixels and then end.
    pub fn to_raster(&self) -> Result<Vec<[u8; 3]>> {
        let mut raster = Vec::with_capacity(self.width as usize * self.height as usize);
        for row in 0..self.height as usize {
            let mut count: u32 = 0;
            let mut cursor = self.heads[row];
            while let Some(id) = cursor {
                count += 1;
                if count > self.width {
                    return Err(Error::StructuralCorruption {
                        row: row as u32,
                        expected: self.width,
                        found: count,
                    });
                }
                raster.push(self.arena[id.index()].color);
                cursor = self.arena[id.index()].right;
            }
            if count != self.width {
                return Err(Error::StructuralCorruption {
                    row: row as u32,
                    expected: self.width,
                    found: count,
                });
            }
        }
        Ok(raster)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read access to a pixel.  The id must have been issued by this
    /// grid.
    pub fn pixel(&self, id: PixelId) -> &Pixel {
        &self.arena[id.index()]
    }

    pub(crate) fn pixel_mut(&mut self, id: PixelId) -> &mut Pixel {
        &mut self.arena[id.index()]
    }

    /// The ids of one row's live pixels, left to right.  The walk is
    /// bounded by `width`, so it terminates even on a damaged chain.
    pub fn row_ids(&self, row: u32) -> Vec<PixelId> {
        let mut ids = Vec::with_capacity(self.width as usize);
        let mut cursor = self.heads[row as usize];
        while let Some(id) = cursor {
            if ids.len() == self.width as usize {
                break;
            }
            ids.push(id);
            cursor = self.arena[id.index()].right;
        }
        ids
    }

    /// One row's colors, left to right.
    pub fn row_colors(&self, row: u32) -> Vec<[u8; 3]> {
        self.row_ids(row)
            .into_iter()
            .map(|id| self.arena[id.index()].color)
            .collect()
    }

    /// Detach one seam pixel per row, re-linking its former
    /// neighbors to each other; the row head advances when the head
    /// itself is removed.  Decrements `width`.  The detached pixels'
    /// own links are left untouched, which is what makes a later
    /// `insert_seam` of the same seam possible.
    pub fn remove_seam(&mut self, seam: &Seam) -> Result<()> {
        self.check_seam_shape(seam)?;
        for (row, &id) in seam.iter().enumerate() {
            self.check_attached(row as u32, id)?;
        }

        for (row, &id) in seam.iter().enumerate() {
            let (left, right) = self.neighbors(id);
            match left {
                Some(l) => self.arena[l.index()].right = right,
                None => self.heads[row] = right,
            }
            if let Some(r) = right {
                self.arena[r.index()].left = left;
            }
        }
        self.width -= 1;
        Ok(())
    }

    /// Re-attach a previously detached seam, one pixel per row,
    /// between the neighbors each pixel still remembers.  Increments
    /// `width`.  Only valid for a seam detached from this grid whose
    /// retained neighbors are currently adjacent.
    pub fn insert_seam(&mut self, seam: &Seam) -> Result<()> {
        self.check_seam_shape(seam)?;
        for (row, &id) in seam.iter().enumerate() {
            self.check_insertable(row as u32, id)?;
        }

        for (row, &id) in seam.iter().enumerate() {
            let (left, right) = self.neighbors(id);
            match left {
                Some(l) => self.arena[l.index()].right = Some(id),
                None => self.heads[row] = Some(id),
            }
            if let Some(r) = right {
                self.arena[r.index()].left = Some(id);
            }
        }
        self.width += 1;
        Ok(())
    }

    /// Replace each seam pixel with a freshly allocated overlay pixel
    /// of `color`: the overlay takes over the original's position and
    /// neighbors, and the original is left detached with its links
    /// intact.  A remove and an insert-of-a-substitute in one step;
    /// `width` is unchanged.  Returns the overlay seam.  (The caller
    /// already holds the original seam, and needs to retain it to
    /// restore the image later.)
    pub fn highlight_seam(&mut self, seam: &Seam, color: [u8; 3]) -> Result<Seam> {
        self.check_seam_shape(seam)?;
        for (row, &id) in seam.iter().enumerate() {
            self.check_attached(row as u32, id)?;
        }

        let mut overlays = Vec::with_capacity(seam.len());
        for (row, &id) in seam.iter().enumerate() {
            let (left, right) = self.neighbors(id);
            let overlay = self.alloc(color, left, right);
            match left {
                Some(l) => self.arena[l.index()].right = Some(overlay),
                None => self.heads[row] = Some(overlay),
            }
            if let Some(r) = right {
                self.arena[r.index()].left = Some(overlay);
            }
            overlays.push(overlay);
        }
        Ok(overlays)
    }

    fn alloc(&mut self, color: [u8; 3], left: Option<PixelId>, right: Option<PixelId>) -> PixelId {
        let id = PixelId(self.arena.len() as u32);
        self.arena.push(Pixel {
            color,
            energy: 0.0,
            left,
            right,
        });
        id
    }

    fn neighbors(&self, id: PixelId) -> (Option<PixelId>, Option<PixelId>) {
        let pixel = &self.arena[id.index()];
        (pixel.left, pixel.right)
    }

    // One pixel per row also means no pixel twice: a repeated id
    // would pass the per-row link checks (its neighbors link back no
    // matter which row the entry claims) and then corrupt every row
    // but one.
    fn check_seam_shape(&self, seam: &Seam) -> Result<()> {
        if seam.len() != self.height as usize {
            return Err(Error::InvalidSeam(format!(
                "{} pixels for {} rows",
                seam.len(),
                self.height
            )));
        }
        let mut seen = HashSet::with_capacity(seam.len());
        for (row, &id) in seam.iter().enumerate() {
            if !seen.insert(id) {
                return Err(Error::InvalidSeam(format!(
                    "row {}: pixel appears more than once in the seam",
                    row
                )));
            }
        }
        Ok(())
    }

    fn check_id(&self, row: u32, id: PixelId) -> Result<()> {
        if id.index() >= self.arena.len() {
            return Err(Error::InvalidSeam(format!(
                "row {}: pixel id out of range",
                row
            )));
        }
        Ok(())
    }

    // A pixel is attached when its neighbors link back to it, and a
    // pixel with no left neighbor is its row's head.  This is O(1)
    // per row; it does not walk the chain to prove row membership.
    fn check_attached(&self, row: u32, id: PixelId) -> Result<()> {
        self.check_id(row, id)?;
        let (left, right) = self.neighbors(id);
        match left {
            Some(l) => {
                if self.arena[l.index()].right != Some(id) {
                    return Err(Error::InvalidSeam(format!(
                        "row {}: left neighbor does not link back",
                        row
                    )));
                }
            }
            None => {
                if self.heads[row as usize] != Some(id) {
                    return Err(Error::InvalidSeam(format!(
                        "row {}: pixel with no left neighbor is not the row head",
                        row
                    )));
                }
            }
        }
        if let Some(r) = right {
            if self.arena[r.index()].left != Some(id) {
                return Err(Error::InvalidSeam(format!(
                    "row {}: right neighbor does not link back",
                    row
                )));
            }
        }
        Ok(())
    }

    // A live pixel whose own left neighbor links back to it, or a
    // row head.  Used to keep insertion from anchoring onto a pixel
    // that is itself detached.
    fn anchored(&self, row: u32, id: PixelId) -> bool {
        match self.arena[id.index()].left {
            Some(l) => self.arena[l.index()].right == Some(id),
            None => self.heads[row as usize] == Some(id),
        }
    }

    // A detached pixel can be re-inserted only while the gap it left
    // is still closed: its remembered neighbors must currently be
    // adjacent to each other (or the remembered right must be the
    // row head, or the row must be empty), and the remembered left
    // must still be live itself.
    fn check_insertable(&self, row: u32, id: PixelId) -> Result<()> {
        self.check_id(row, id)?;
        let (left, right) = self.neighbors(id);
        let ok = match (left, right) {
            (Some(l), Some(r)) => {
                self.arena[l.index()].right == Some(r)
                    && self.arena[r.index()].left == Some(l)
                    && self.anchored(row, l)
            }
            (Some(l), None) => self.arena[l.index()].right == None && self.anchored(row, l),
            (None, Some(r)) => {
                self.heads[row as usize] == Some(r) && self.arena[r.index()].left == None
            }
            (None, None) => self.heads[row as usize] == None,
        };
        if !ok {
            return Err(Error::InvalidSeam(format!(
                "row {}: pixel's remembered neighbors are no longer adjacent",
                row
            )));
        }
        Ok(())
    }
}
