// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two-dimensional grids
//!
//! Every stage of the carver works on the same shape of data: an
//! owned, row-major, width-by-height field of small `Copy` values.
//! The image is a field of RGBA pixels, the energy map is a field of
//! RGBA pixels whose red channel means "energy", and the seam
//! digraph is a field of (cumulative energy, parent column) pairs.

use crate::error::{CarveError, Result};
use image::{ImageBuffer, Rgba, RgbaImage};
use std::cmp;
use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field of values.  Both dimensions
/// are always positive and the backing buffer always holds exactly
/// `width * height` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Copy> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

fn check_dimensions(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(CarveError::InvalidDimensions { width, height });
    }
    Ok(width as usize * height as usize)
}

impl<P: Copy> TwoDimensionalMap<P> {
    /// A new map with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: P) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        Ok(TwoDimensionalMap {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Result<Self> {
        let expected = check_dimensions(width, height)?;
        if data.len() != expected {
            return Err(CarveError::BufferSize {
                len: data.len(),
                width,
                height,
                expected,
            });
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    /// Build a map by asking `f` for the value at every `(x, y)`, in
    /// row-major order.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> P,
    {
        let len = check_dimensions(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn check(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(CarveError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Get the value at a single pixel's address.  Addresses outside
    /// the grid are an error, never clamped.
    pub fn get(&self, x: u32, y: u32) -> Result<P> {
        self.check(x, y)?;
        Ok(self.data[self.get_index(x, y)])
    }

    /// Set the value at a single pixel's address.
    pub fn set(&mut self, x: u32, y: u32, value: P) -> Result<()> {
        self.check(x, y)?;
        let index = self.get_index(x, y);
        self.data[index] = value;
        Ok(())
    }

    /// Reallocate to a new size, keeping the overlapping top-left
    /// region and initializing every new cell with `fill`.  On error
    /// the map is left as it was.
    pub fn resize(&mut self, width: u32, height: u32, fill: P) -> Result<()> {
        check_dimensions(width, height)?;
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        let mut resized = TwoDimensionalMap::filled(width, height, fill)?;
        for y in 0..cmp::min(height, self.height) {
            for x in 0..cmp::min(width, self.width) {
                resized[(x, y)] = self[(x, y)];
            }
        }
        *self = resized;
        Ok(())
    }

    /// One row of the map, left to right.  Panics out of range.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Every cell, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.data.iter()
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.data
    }

    /// The value at `(x, y)` with both coordinates pulled back into the
    /// grid, so the border replicates outward.  Only neighborhood
    /// filters should use this; public access goes through `get`.
    #[inline]
    pub(crate) fn clamped(&self, x: i64, y: i64) -> P {
        let x = num_traits::clamp(x, 0, i64::from(self.width) - 1) as u32;
        let y = num_traits::clamp(y, 0, i64::from(self.height) - 1) as u32;
        self[(x, y)]
    }
}

impl<P: Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.  Panics out
    /// of range.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) outside {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.  Panics out
    /// of range.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) outside {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

/// The pixel buffer the whole crate consumes: four independent 8-bit
/// channels per cell, red, green, blue and opacity.
pub type PixelGrid = TwoDimensionalMap<Rgba<u8>>;

/// A [`PixelGrid`] in which, by convention, red, green and blue all
/// carry the same luminance value.
pub type GrayscaleGrid = PixelGrid;

/// A [`PixelGrid`] reused to carry energy rather than color.  The red
/// channel holds the energy of the pixel, clamped to [0, 255]; green
/// and blue mirror it so the map can be written out and looked at;
/// opacity is always 255.  High energy marks a strong edge, which the
/// carver avoids; low energy marks a flat region that is safe to cut.
pub type EnergyMap = PixelGrid;

/// Opaque black, used wherever a new pixel cell needs a defined value.
pub const OPAQUE_BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A grey pixel of the given level, fully opaque.
#[inline]
pub fn grey_pixel(level: u8) -> Rgba<u8> {
    Rgba([level, level, level, 255])
}

impl TwoDimensionalMap<Rgba<u8>> {
    /// Resize the pixel buffer; new cells come up opaque black.
    pub fn resize_buffer(&mut self, width: u32, height: u32) -> Result<()> {
        self.resize(width, height, OPAQUE_BLACK)
    }

    /// Copy a decoded image into a pixel grid.
    pub fn from_image(image: &RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        TwoDimensionalMap::from_vec(width, height, image.pixels().cloned().collect())
    }

    /// Copy the grid back out into something the codecs can write.
    pub fn to_image(&self) -> RgbaImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| self[(x, y)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rejects_zero_dimensions() {
        for &(w, h) in &[(0, 5), (5, 0), (0, 0)] {
            assert_eq!(
                PixelGrid::filled(w, h, OPAQUE_BLACK),
                Err(CarveError::InvalidDimensions {
                    width: w,
                    height: h
                })
            );
        }
        let grid = PixelGrid::filled(5, 5, OPAQUE_BLACK).unwrap();
        assert_eq!(grid.dimensions(), (5, 5));
        assert_eq!(grid.iter().count(), 25);
    }

    #[test]
    fn from_vec_checks_buffer_length() {
        let err = TwoDimensionalMap::from_vec(3, 2, vec![0u8; 5]).unwrap_err();
        assert_eq!(
            err,
            CarveError::BufferSize {
                len: 5,
                width: 3,
                height: 2,
                expected: 6
            }
        );
    }

    #[test]
    fn get_and_set_are_range_checked() {
        let mut grid = PixelGrid::filled(5, 5, OPAQUE_BLACK).unwrap();
        let pixel = Rgba([100, 150, 200, 255]);
        grid.set(1, 1, pixel).unwrap();
        assert_eq!(grid.get(1, 1), Ok(pixel));
        assert!(grid.get(5, 0).is_err());
        assert!(grid.get(0, 5).is_err());
        assert_eq!(
            grid.set(7, 2, pixel),
            Err(CarveError::OutOfRange {
                x: 7,
                y: 2,
                width: 5,
                height: 5
            })
        );
    }

    #[test]
    fn resize_keeps_top_left_and_fills_the_rest() {
        let mut grid = TwoDimensionalMap::from_fn(3, 2, |x, y| (x + 10 * y) as u8).unwrap();
        grid.resize(4, 3, 99).unwrap();
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.row(0), &[0, 1, 2, 99]);
        assert_eq!(grid.row(1), &[10, 11, 12, 99]);
        assert_eq!(grid.row(2), &[99, 99, 99, 99]);

        grid.resize(2, 1, 0).unwrap();
        assert_eq!(grid.row(0), &[0, 1]);
    }

    #[test]
    fn failed_resize_leaves_grid_alone() {
        let mut grid = PixelGrid::filled(5, 5, OPAQUE_BLACK).unwrap();
        assert!(grid.resize_buffer(0, 10).is_err());
        assert!(grid.resize_buffer(10, 0).is_err());
        assert_eq!(grid.dimensions(), (5, 5));
        grid.resize_buffer(10, 10).unwrap();
        assert_eq!(grid.dimensions(), (10, 10));
        assert_eq!(grid.get(9, 9), Ok(OPAQUE_BLACK));
    }

    #[test]
    #[should_panic]
    fn row_past_the_bottom_panics() {
        let grid = TwoDimensionalMap::filled(3, 2, 0u8).unwrap();
        let _ = grid.row(2);
    }

    #[test]
    fn clamped_lookup_replicates_the_border() {
        let grid = TwoDimensionalMap::from_fn(3, 3, |x, y| (x + 3 * y) as u8).unwrap();
        assert_eq!(grid.clamped(-1, -1), 0);
        assert_eq!(grid.clamped(3, 1), 5);
        assert_eq!(grid.clamped(1, 7), 7);
    }

    #[test]
    fn image_round_trip_preserves_pixels() {
        let image = RgbaImage::from_fn(4, 2, |x, y| Rgba([x as u8, y as u8, 7, 200]));
        let grid = PixelGrid::from_image(&image).unwrap();
        assert_eq!(grid.get(3, 1), Ok(Rgba([3, 1, 7, 200])));
        assert_eq!(grid.to_image().into_raw(), image.into_raw());
    }
}
