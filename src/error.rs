// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors raised by the grids and the carving pipeline.
//!
//! Every failure here is local and deterministic: the same input will
//! fail the same way, so nothing in the crate retries.

use failure::Fail;

/// Everything that can go wrong between a pixel grid and a carved image.
#[derive(Debug, Fail, PartialEq, Eq, Clone)]
pub enum CarveError {
    /// A grid was constructed or resized with a zero dimension.
    #[fail(display = "invalid grid dimensions {}x{}: both must be positive", width, height)]
    InvalidDimensions { width: u32, height: u32 },

    /// A backing buffer did not hold exactly `width * height` cells.
    #[fail(display = "buffer holds {} cells, but a {}x{} grid needs {}", len, width, height, expected)]
    BufferSize {
        len: usize,
        width: u32,
        height: u32,
        expected: usize,
    },

    /// A checked pixel access fell outside the grid.
    #[fail(display = "pixel ({}, {}) is outside the {}x{} grid", x, y, width, height)]
    OutOfRange { x: u32, y: u32, width: u32, height: u32 },

    /// The request would carve the image down to nothing.
    #[fail(display = "cannot remove {} seams from an image {} pixels wide", requested, width)]
    TooManySeams { requested: u32, width: u32 },

    /// The image and its energy map have drifted out of step.
    #[fail(
        display = "image is {}x{} but its energy map is {}x{}",
        image_width, image_height, energy_width, energy_height
    )]
    DimensionMismatch {
        image_width: u32,
        image_height: u32,
        energy_width: u32,
        energy_height: u32,
    },

    /// A seam must name exactly one column for every row.
    #[fail(display = "seam has {} entries for a grid {} rows tall", len, height)]
    SeamLength { len: usize, height: u32 },

    /// A seam named a column the grid does not have.
    #[fail(display = "seam column {} in row {} is outside a grid {} wide", x, y, width)]
    SeamColumn { x: u32, y: u32, width: u32 },

    /// Consecutive seam entries may differ by at most one column.
    #[fail(display = "seam jumps from column {} to {} at row {}", from, to, y)]
    DisconnectedSeam { from: u32, to: u32, y: u32 },
}

/// Result alias for everything in this crate.
pub type Result<T> = std::result::Result<T, CarveError>;
