// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Energy here is the gradient magnitude of the image's luminance:
//! the image is reduced to grayscale, convolved once with each of a
//! pair of directional kernels, and the two responses are combined
//! per pixel as `sqrt(gx² + gy²)`.  Strong edges get high energy and
//! are kept; flat regions get low energy and are carved away first.

use crate::error::{CarveError, Result};
use crate::gradient::{convolve, response_with, GradientKernels};
use crate::grayscale::{grayscale, luminance};
use crate::twodmap::{grey_pixel, EnergyMap, PixelGrid};
use itertools::iproduct;

/// (gx, gy) -> Energy
///
/// The rounded Euclidean magnitude of the two gradient responses,
/// clamped to a byte.
#[inline]
pub fn magnitude(gx: u8, gy: u8) -> u8 {
    let (gx, gy) = (f64::from(gx), f64::from(gy));
    num_traits::clamp((gx * gx + gy * gy).sqrt().round(), 0.0, 255.0) as u8
}

/// Combine a horizontal and a vertical gradient grid into an energy
/// map.  Both gradients are read from their red channel.
pub fn combine_gradients(gx: &PixelGrid, gy: &PixelGrid) -> Result<EnergyMap> {
    if gx.dimensions() != gy.dimensions() {
        return Err(CarveError::DimensionMismatch {
            image_width: gx.width(),
            image_height: gx.height(),
            energy_width: gy.width(),
            energy_height: gy.height(),
        });
    }
    Ok(combine(gx, gy))
}

// Callers guarantee `gx` and `gy` share a shape.
fn combine(gx: &PixelGrid, gy: &PixelGrid) -> EnergyMap {
    let (width, height) = gx.dimensions();
    let mut emap = gx.clone();
    for (y, x) in iproduct!(0..height, 0..width) {
        emap[(x, y)] = grey_pixel(magnitude(gx[(x, y)].0[0], gy[(x, y)].0[0]));
    }
    emap
}

/// Compute the energy map of a color image with the Sobel kernels.
pub fn generate_energy_map(image: &PixelGrid) -> EnergyMap {
    generate_energy_map_with(image, &GradientKernels::default())
}

/// Compute the energy map of a color image with any kernel pair.
pub fn generate_energy_map_with(image: &PixelGrid, kernels: &GradientKernels) -> EnergyMap {
    let gray = grayscale(image);
    let gx = convolve(&gray, &kernels.horizontal);
    let gy = convolve(&gray, &kernels.vertical);
    combine(&gx, &gy)
}

/// The energy of one pixel, read straight from the color image.  This
/// is the value [`generate_energy_map_with`] would put at `(x, y)`,
/// without building the grayscale or gradient grids.
pub fn energy_at(image: &PixelGrid, kernels: &GradientKernels, x: u32, y: u32) -> u8 {
    let level = |nx: i64, ny: i64| i32::from(luminance(&image.clamped(nx, ny)));
    magnitude(
        response_with(&kernels.horizontal, x, y, level),
        response_with(&kernels.vertical, x, y, level),
    )
}
