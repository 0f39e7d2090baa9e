//! PNG import and export of tile grids
//!
//! A sample image is read one pixel per tile: each distinct RGBA color
//! becomes one tile value, assigned in sorted color order so repeated
//! loads of the same image produce the same universe. Export walks the
//! generated grid back through the same color table.

use std::path::Path;

use image::{ImageBuffer, Rgba};

use crate::io::error::{Result, WeaveError};
use crate::spatial::grid::{OutputGrid, SampleGrid};
use crate::spatial::tiles::TileValue;

/// A sample grid decoded from a PNG plus its color table
///
/// The palette is indexed by tile id: tile `Single(i)` renders as
/// `palette[i]`.
pub struct SampleImage {
    grid: SampleGrid,
    palette: Vec<[u8; 4]>,
}

impl SampleImage {
    /// Load a sample PNG, mapping distinct colors to tile values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or decoded as an image
    /// - The decoded image has zero width or height
    pub fn from_png_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| WeaveError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba = img.to_rgba8();
        let width = rgba.width() as usize;

        // Deterministic color ordering keeps tile assignments reproducible
        let mut colors: Vec<[u8; 4]> = rgba.pixels().map(|pixel| pixel.0).collect();
        colors.sort_unstable();
        colors.dedup();

        let palette = colors;
        let tiles: Vec<TileValue> = rgba
            .pixels()
            .map(|pixel| {
                let id = palette
                    .binary_search(&pixel.0)
                    .unwrap_or(0);
                TileValue::Single(id as u32)
            })
            .collect();

        let grid = SampleGrid::new(tiles, width)?;
        Ok(Self { grid, palette })
    }

    /// The decoded sample grid
    pub const fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    /// RGBA color per tile id
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Split into the sample grid and its color table
    pub fn into_parts(self) -> (SampleGrid, Vec<[u8; 4]>) {
        (self.grid, self.palette)
    }
}

/// Export a generated grid as a PNG through a color table
///
/// The empty sentinel renders transparent; a composite renders as its
/// bottom layer.
///
/// # Errors
///
/// Returns an error if:
/// - A tile id exceeds the color table
/// - The parent directory cannot be created
/// - The image cannot be saved to the given path
pub fn export_grid_as_png(
    grid: &OutputGrid,
    palette: &[[u8; 4]],
    output_path: &Path,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| WeaveError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    let mut img = ImageBuffer::new(grid.width() as u32, grid.height() as u32);
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let tile = grid.get(col, row).unwrap_or(TileValue::Empty);
            let color = match tile.base_layer() {
                None => [0, 0, 0, 0],
                Some(id) => palette.get(id as usize).copied().ok_or(
                    WeaveError::InvalidTileIndex {
                        index: id as usize,
                        max_tiles: palette.len(),
                    },
                )?,
            };
            img.put_pixel(col as u32, row as u32, Rgba(color));
        }
    }

    img.save(output_path).map_err(|e| WeaveError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}
