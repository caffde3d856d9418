// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! One editing session: a grid, its undo stack, and the currently
//! highlighted seam, behind the fixed operation vocabulary a driver
//! speaks.  Load and save go through the `image` codec; everything
//! between them is synchronous and exclusively owned.

use crate::error::Result;
use crate::grid::{PixelGrid, Seam};
use crate::history::{EditHistory, EditKind};
use image::RgbImage;
use log::info;
use std::path::Path;

pub struct Editor {
    grid: PixelGrid,
    history: EditHistory,
    highlighted: Option<Seam>,
}

impl Editor {
    /// Wrap an already-built grid in a fresh session.
    pub fn new(grid: PixelGrid) -> Editor {
        Editor {
            grid,
            history: EditHistory::new(),
            highlighted: None,
        }
    }

    /// Decode an image file into a fresh session.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Editor> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        let colors: Vec<[u8; 3]> = img.pixels().map(|p| p.0).collect();
        let grid = PixelGrid::from_raster(width, height, &colors)?;
        info!("loaded a {}x{} image", width, height);
        Ok(Editor::new(grid))
    }

    /// Encode the current grid to an image file; the format follows
    /// the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let raster = self.grid.to_raster()?;
        let (width, height) = (self.grid.width(), self.grid.height());
        let mut img = RgbImage::new(width, height);
        for (i, color) in raster.iter().enumerate() {
            let i = i as u32;
            img.put_pixel(i % width, i / width, image::Rgb(*color));
        }
        img.save(path)?;
        Ok(())
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn highlight_greenest(&mut self) -> Result<()> {
        self.history
            .execute(&mut self.grid, &mut self.highlighted, EditKind::HighlightGreenest)?;
        info!("highlighted the greenest seam");
        Ok(())
    }

    pub fn highlight_lowest_energy_seam(&mut self) -> Result<()> {
        self.history.execute(
            &mut self.grid,
            &mut self.highlighted,
            EditKind::HighlightLowestEnergy,
        )?;
        info!("highlighted the lowest-energy seam");
        Ok(())
    }

    pub fn remove_highlighted(&mut self) -> Result<()> {
        self.history
            .execute(&mut self.grid, &mut self.highlighted, EditKind::RemoveHighlighted)?;
        info!("removed the highlighted seam, width is now {}", self.grid.width());
        Ok(())
    }

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.grid, &mut self.highlighted)?;
        info!("undid the last edit");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    fn sample_image() -> RgbImage {
        RgbImage::from_fn(4, 3, |x, y| Rgb([(x * 50) as u8, (y * 60) as u8, 128]))
    }

    #[test]
    fn load_save_round_trip() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.png");
        let copy = dir.path().join("copy.png");
        sample_image().save(&source).unwrap();

        let editor = Editor::load(&source).unwrap();
        editor.save(&copy).unwrap();

        let reloaded = image::open(&copy).unwrap().to_rgb8();
        assert_eq!(reloaded, sample_image());
    }

    #[test]
    fn highlight_then_undo_is_bit_identical_to_the_load() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.png");
        sample_image().save(&source).unwrap();

        let mut editor = Editor::load(&source).unwrap();
        let before = editor.grid().to_raster().unwrap();
        editor.highlight_greenest().unwrap();
        editor.undo().unwrap();
        assert_eq!(editor.grid().to_raster().unwrap(), before);
    }

    #[test]
    fn remove_shrinks_the_saved_image() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.png");
        let narrowed = dir.path().join("narrowed.png");
        sample_image().save(&source).unwrap();

        let mut editor = Editor::load(&source).unwrap();
        editor.highlight_lowest_energy_seam().unwrap();
        editor.remove_highlighted().unwrap();
        editor.save(&narrowed).unwrap();

        let reloaded = image::open(&narrowed).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (3, 3));
    }
}
