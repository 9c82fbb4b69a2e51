// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Directional gradients
//!
//! Convolves a 3×3 integer kernel over the luminance (red channel) of a
//! grayscale grid.  Neighbor coordinates are clamped to the grid, so
//! the border replicates outward and every output pixel, edges and
//! corners included, gets a real response.  The response is clamped to
//! [0, 255] and written to all three color channels.
//!
//! With the `threaded` feature the rows are split into bands and each
//! band is filled on its own scoped thread.  Every output pixel depends
//! only on a read-only neighborhood of the input, so the result is the
//! same either way.

use crate::twodmap::{grey_pixel, GrayscaleGrid, PixelGrid};
use image::Rgba;

/// A 3×3 convolution kernel, indexed `[row][column]`.
pub type Kernel3 = [[i32; 3]; 3];

/// Horizontal Sobel operator: responds to intensity rising left to right.
pub const SOBEL_HORIZONTAL: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
/// Vertical Sobel operator: responds to intensity rising top to bottom.
pub const SOBEL_VERTICAL: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

pub const SCHARR_HORIZONTAL: Kernel3 = [[-3, 0, 3], [-10, 0, 10], [-3, 0, 3]];
pub const SCHARR_VERTICAL: Kernel3 = [[-3, -10, -3], [0, 0, 0], [3, 10, 3]];

/// The pair of kernels the energy builder convolves with.  Passed in
/// by value wherever it is needed; there is no shared kernel state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradientKernels {
    pub horizontal: Kernel3,
    pub vertical: Kernel3,
}

impl GradientKernels {
    pub const SOBEL: GradientKernels = GradientKernels {
        horizontal: SOBEL_HORIZONTAL,
        vertical: SOBEL_VERTICAL,
    };

    pub const SCHARR: GradientKernels = GradientKernels {
        horizontal: SCHARR_HORIZONTAL,
        vertical: SCHARR_VERTICAL,
    };
}

impl Default for GradientKernels {
    fn default() -> Self {
        GradientKernels::SOBEL
    }
}

/// The clamped response of `kernel` centered at `(x, y)`, reading
/// luminance through `level`.  Shared by the grid convolution and by
/// the single-pixel energy path, which reads luminance straight from
/// a color image.
#[inline]
pub(crate) fn response_with<F>(kernel: &Kernel3, x: u32, y: u32, level: F) -> u8
where
    F: Fn(i64, i64) -> i32,
{
    let (cx, cy) = (i64::from(x), i64::from(y));
    let mut sum = 0;
    for (j, krow) in kernel.iter().enumerate() {
        for (i, weight) in krow.iter().enumerate() {
            sum += weight * level(cx + i as i64 - 1, cy + j as i64 - 1);
        }
    }
    num_traits::clamp(sum, 0, 255) as u8
}

#[inline]
fn response_at(gray: &GrayscaleGrid, kernel: &Kernel3, x: u32, y: u32) -> u8 {
    response_with(kernel, x, y, |nx, ny| i32::from(gray.clamped(nx, ny).0[0]))
}

// Fill a run of whole rows, starting at `first_row`, with responses.
fn fill_band(gray: &GrayscaleGrid, kernel: &Kernel3, band: &mut [Rgba<u8>], first_row: u32) {
    let width = gray.width() as usize;
    for (i, pixel) in band.iter_mut().enumerate() {
        let (x, y) = ((i % width) as u32, first_row + (i / width) as u32);
        *pixel = grey_pixel(response_at(gray, kernel, x, y));
    }
}

#[cfg(not(feature = "threaded"))]
fn fill(gray: &GrayscaleGrid, kernel: &Kernel3, out: &mut [Rgba<u8>]) {
    fill_band(gray, kernel, out, 0);
}

#[cfg(feature = "threaded")]
fn fill(gray: &GrayscaleGrid, kernel: &Kernel3, out: &mut [Rgba<u8>]) {
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    let workers = num_cpus::get().max(1);
    let rows_per_band = ((height + workers - 1) / workers).max(1);

    let outcome = crossbeam::scope(|scope| {
        for (band, chunk) in out.chunks_mut(width * rows_per_band).enumerate() {
            let first_row = (band * rows_per_band) as u32;
            scope.spawn(move |_| fill_band(gray, kernel, chunk, first_row));
        }
    });
    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }
}

/// Convolve `kernel` over a grayscale grid, returning a new grid of
/// the same dimensions with the clamped response in R, G and B and an
/// opacity of 255.
pub fn convolve(gray: &GrayscaleGrid, kernel: &Kernel3) -> PixelGrid {
    let mut out = gray.clone();
    fill(gray, kernel, out.as_mut_slice());
    out
}
