// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grayscale reduction
//!
//! The energy calculation only looks at brightness, so the first step
//! is collapsing each pixel's color to a single luminance value using
//! the Rec. 601 weights.

use crate::twodmap::{GrayscaleGrid, PixelGrid};
use image::Rgba;

/// (Pixel) -> Luminance
///
/// `round(0.299 R + 0.587 G + 0.114 B)`, clamped to a byte.  Opacity
/// plays no part.
#[inline]
pub fn luminance(pixel: &Rgba<u8>) -> u8 {
    let [r, g, b, _] = pixel.0;
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    num_traits::clamp(luma.round(), 0.0, 255.0) as u8
}

#[inline]
fn grey_of(pixel: &Rgba<u8>) -> Rgba<u8> {
    let l = luminance(pixel);
    Rgba([l, l, l, pixel.0[3]])
}

/// Return a grayscale copy of `image`, opacity preserved.  The input
/// is untouched.
pub fn grayscale(image: &PixelGrid) -> GrayscaleGrid {
    let mut grey = image.clone();
    grayscale_in_place(&mut grey);
    grey
}

/// Overwrite every pixel of `image` with its luminance.  The color
/// information is gone afterward; copy first if you need it.
pub fn grayscale_in_place(image: &mut PixelGrid) {
    image
        .as_mut_slice()
        .iter_mut()
        .for_each(|pixel| *pixel = grey_of(pixel));
}
