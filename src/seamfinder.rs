// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The dynamic-programming seam search.
//!
//! The search maximizes a pluggable per-pixel scoring rule `V`.  The
//! DP core is oblivious to which rule is active; the two instances
//! shipped here are the green channel (`greenest_seam`) and negated
//! energy (`lowest_energy_seam`).
//!
//! Two quirks of the scoring cannot be "fixed" without changing the
//! observable output:
//!
//! * Candidates in the row above are compared with strict `>` in the
//!   fixed order straight, above-left, above-right, so ties keep the
//!   earlier-checked candidate.  Reordering the checks changes which
//!   seam wins on symmetric inputs.
//! * The accumulated score of a cell is `abs(V(current) +
//!   V(predecessor))`, not a running sum along the path.  The final
//!   column is the last-row maximizer of that value, ties leftmost.

use crate::energy::compute_energy;
use crate::error::{Error, Result};
use crate::grid::{Pixel, PixelGrid, PixelId, Seam};
use std::ops::{Index, IndexMut};

// One cell of the search table: the accumulated score at this pixel
// and the column of the predecessor chosen in the row above.
#[derive(Default, Debug, Copy, Clone)]
struct ScoreAndParent {
    score: f64,
    parent: u32,
}

// An addressable two-dimensional field of search cells.  Keep the
// index math in a singular location and never, ever mess with it.
#[derive(Debug)]
struct ScoreMap {
    width: u32,
    cells: Vec<ScoreAndParent>,
}

impl ScoreMap {
    fn new(width: u32, height: u32) -> Self {
        ScoreMap {
            width,
            cells: vec![ScoreAndParent::default(); width as usize * height as usize],
        }
    }

    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

impl Index<(u32, u32)> for ScoreMap {
    type Output = ScoreAndParent;

    fn index(&self, (x, y): (u32, u32)) -> &ScoreAndParent {
        let index = self.get_index(x, y);
        &self.cells[index]
    }
}

impl IndexMut<(u32, u32)> for ScoreMap {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut ScoreAndParent {
        let index = self.get_index(x, y);
        &mut self.cells[index]
    }
}

/// Find the seam maximizing the scoring rule `value`, top to bottom,
/// one pixel per row.  The returned ids reference the live grid.
pub fn seam_maximizing<F>(grid: &PixelGrid, value: F) -> Result<Seam>
where
    F: Fn(&Pixel) -> f64,
{
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        return Err(Error::EmptySearchSpace);
    }
    let rows: Vec<Vec<PixelId>> = (0..height).map(|row| grid.row_ids(row)).collect();
    let v = |id: PixelId| value(grid.pixel(id));

    // A single row degenerates to a scan: the first (leftmost)
    // maximizer wins.
    if height == 1 {
        let row = &rows[0];
        let mut best = row[0];
        let mut max = v(best);
        for &id in &row[1..] {
            if v(id) > max {
                max = v(id);
                best = id;
            }
        }
        return Ok(vec![best]);
    }

    let mut target = ScoreMap::new(width, height);
    let maxcol = width - 1;
    for y in 1..height {
        let above = &rows[(y - 1) as usize];
        let current = &rows[y as usize];
        for x in 0..width {
            let xs = x as usize;
            // Straight-above first, then above-left, then
            // above-right; strict comparisons keep the
            // earlier-checked candidate on ties.
            let mut parent = x;
            let mut max = v(above[xs]);
            if x > 0 && v(above[xs - 1]) > max {
                max = v(above[xs - 1]);
                parent = x - 1;
            }
            if x < maxcol && v(above[xs + 1]) > max {
                max = v(above[xs + 1]);
                parent = x + 1;
            }
            target[(x, y)] = ScoreAndParent {
                score: (v(current[xs]) + max).abs(),
                parent,
            };
        }
    }

    // The bottom-row column with the highest accumulated score,
    // leftmost on ties.
    let last = height - 1;
    let mut seam_col = 0;
    for x in 1..width {
        if target[(x, last)].score > target[(seam_col, last)].score {
            seam_col = x;
        }
    }

    // Working upwards, follow the parent columns to rebuild the
    // seam, then reverse into top-to-bottom order.
    Ok((0..height)
        .rev()
        .fold(Vec::with_capacity(height as usize), |mut acc, y| {
            acc.push(rows[y as usize][seam_col as usize]);
            seam_col = target[(seam_col, y)].parent;
            acc
        })
        .into_iter()
        .rev()
        .collect())
}

/// The seam maximizing the green channel.
pub fn greenest_seam(grid: &PixelGrid) -> Result<Seam> {
    seam_maximizing(grid, |pixel| f64::from(pixel.color[1]))
}

/// The seam minimizing energy: recompute the energy map, then
/// maximize its negation.
pub fn lowest_energy_seam(grid: &mut PixelGrid) -> Result<Seam> {
    compute_energy(grid);
    seam_maximizing(grid, |pixel| -pixel.energy)
}
