// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image.
//!
//! The importance of a pixel is a dual-gradient magnitude over the
//! brightness of its eight neighbors; pixels on the image border get
//! their own brightness instead.  The whole map is recomputed from
//! scratch before every lowest-energy search.

use crate::cq;
use crate::grid::{PixelGrid, PixelId};
use itertools::iproduct;

/// The arithmetic mean of a pixel's three color channels.
pub fn brightness(color: &[u8; 3]) -> f64 {
    (f64::from(color[0]) + f64::from(color[1]) + f64::from(color[2])) / 3.0
}

// The Sobel-style cross term over the three rows around (x, y).  The
// caller guarantees the pixel is interior, so every index here exists.
fn interior_energy(
    grid: &PixelGrid,
    above: &[PixelId],
    current: &[PixelId],
    below: &[PixelId],
    x: usize,
) -> f64 {
    let b = |id: PixelId| brightness(&grid.pixel(id).color);
    let horizontal = b(above[x - 1]) + 2.0 * b(current[x - 1]) + b(below[x - 1])
        - b(above[x + 1])
        - 2.0 * b(current[x + 1])
        - b(below[x + 1]);
    let vertical = b(above[x - 1]) + 2.0 * b(above[x]) + b(above[x + 1])
        - b(below[x - 1])
        - 2.0 * b(below[x])
        - b(below[x + 1]);
    (horizontal * horizontal + vertical * vertical).sqrt()
}

/// Set the `energy` field of every pixel in the grid.
pub fn compute_energy(grid: &mut PixelGrid) {
    let (width, height) = (grid.width() as usize, grid.height() as usize);
    if width == 0 || height == 0 {
        return;
    }
    let rows: Vec<Vec<PixelId>> = (0..grid.height()).map(|row| grid.row_ids(row)).collect();
    let (mw, mh) = (width - 1, height - 1);

    for (y, x) in iproduct!(0..height, 0..width) {
        let id = rows[y][x];
        let e = cq!(
            y == 0 || y == mh || x == 0 || x == mw,
            brightness(&grid.pixel(id).color),
            interior_energy(grid, &rows[y - 1], &rows[y], &rows[y + 1], x)
        );
        grid.pixel_mut(id).energy = e;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(values: &[u8]) -> Vec<[u8; 3]> {
        values.iter().map(|&v| [v, v, v]).collect()
    }

    fn energies(grid: &PixelGrid) -> Vec<Vec<f64>> {
        (0..grid.height())
            .map(|row| {
                grid.row_ids(row)
                    .into_iter()
                    .map(|id| grid.pixel(id).energy)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn brightness_is_the_channel_mean() {
        assert_eq!(brightness(&[1, 2, 3]), 2.0);
        assert_eq!(brightness(&[0, 0, 0]), 0.0);
    }

    #[test]
    fn single_pixel_energy_is_its_brightness() {
        let mut grid = PixelGrid::from_raster(1, 1, &[[30, 60, 90]]).unwrap();
        compute_energy(&mut grid);
        assert_eq!(grid.pixel(grid.row_ids(0)[0]).energy, 60.0);
    }

    #[test]
    fn border_pixels_use_brightness_interior_uses_gradients() {
        // Grayscale values 1..9 so that brightness(v) == v.
        let mut grid = PixelGrid::from_raster(3, 3, &gray(&[1, 2, 3, 4, 5, 6, 7, 8, 9])).unwrap();
        compute_energy(&mut grid);
        let e = energies(&grid);
        assert_eq!(e[0], vec![1.0, 2.0, 3.0]);
        assert_eq!((e[1][0], e[1][2]), (4.0, 6.0));
        assert_eq!(e[2], vec![7.0, 8.0, 9.0]);
        // horizontal = (1 + 2*4 + 7) - (3 + 2*6 + 9) = -8
        // vertical   = (1 + 2*2 + 3) - (7 + 2*8 + 9) = -24
        assert!((e[1][1] - 640f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn uniform_grid_has_zero_interior_energy() {
        let mut grid = PixelGrid::from_raster(3, 3, &gray(&[90; 9])).unwrap();
        compute_energy(&mut grid);
        let e = energies(&grid);
        assert_eq!(e[1][1], 0.0);
        assert_eq!(e[0], vec![90.0, 90.0, 90.0]);
    }
}
