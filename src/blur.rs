// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Gaussian noise reduction
//!
//! An optional pre-filter for the energy estimator.  Sensor noise
//! shows up to a Sobel kernel as a field of tiny edges; smoothing it
//! away first lets the seams follow the real structure of the image.
//!
//! The blur is separable: one horizontal pass, one vertical pass, each
//! clamping at the border.  Red, green and blue are smoothed; opacity
//! is carried through untouched.

use crate::twodmap::PixelGrid;
use itertools::iproduct;

/// The sigma used when a caller asks for "a blur" without saying how much.
pub const DEFAULT_SIGMA: f32 = 1.0;

/// The smallest odd integer no smaller than `6 * sigma`.
pub fn kernel_size(sigma: f32) -> usize {
    let size = (6.0 * sigma).ceil().max(1.0) as usize;
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Normalized one-dimensional Gaussian taps for `sigma`, centre tap in
/// the middle.
pub fn gaussian_taps(sigma: f32) -> Vec<f32> {
    let size = kernel_size(sigma);
    let radius = (size / 2) as f32;
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - radius;
            (-(d * d) / denom).exp()
        })
        .collect();
    let total: f32 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Blur `image` with a Gaussian of standard deviation `sigma`.  A
/// sigma of zero or less (or NaN) returns an unchanged copy.
pub fn gaussian_blur(image: &PixelGrid, sigma: f32) -> PixelGrid {
    if !(sigma > 0.0) {
        return image.clone();
    }

    let taps = gaussian_taps(sigma);
    let radius = (taps.len() / 2) as i64;
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);

    let smear = |pick: &dyn Fn(i64) -> [f32; 3]| -> [f32; 3] {
        taps.iter().enumerate().fold([0.0; 3], |mut acc, (k, weight)| {
            let sample = pick(k as i64 - radius);
            for c in 0..3 {
                acc[c] += weight * sample[c];
            }
            acc
        })
    };

    let mut across = vec![[0.0f32; 3]; w * h];
    for (y, x) in iproduct!(0..height, 0..width) {
        across[y as usize * w + x as usize] = smear(&|offset: i64| {
            let p = image.clamped(i64::from(x) + offset, i64::from(y)).0;
            [f32::from(p[0]), f32::from(p[1]), f32::from(p[2])]
        });
    }

    let mut out = image.clone();
    for (y, x) in iproduct!(0..height, 0..width) {
        let [r, g, b] = smear(&|offset: i64| {
            let yy = num_traits::clamp(i64::from(y) + offset, 0, height as i64 - 1) as usize;
            across[yy * w + x as usize]
        });
        let channel = |v: f32| num_traits::clamp(v.round(), 0.0, 255.0) as u8;
        let opacity = image[(x, y)].0[3];
        out[(x, y)].0 = [channel(r), channel(g), channel(b), opacity];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twodmap::TwoDimensionalMap;
    use image::Rgba;

    #[test]
    fn kernel_size_is_smallest_odd_cover_of_six_sigma() {
        assert_eq!(kernel_size(1.0), 7);
        assert_eq!(kernel_size(0.5), 3);
        assert_eq!(kernel_size(0.1), 1);
        assert_eq!(kernel_size(1.5), 9);
        assert_eq!(kernel_size(2.0), 13);
    }

    #[test]
    fn taps_are_normalized_and_symmetric() {
        let taps = gaussian_taps(1.0);
        assert_eq!(taps.len(), 7);
        let total: f32 = taps.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert!((taps[0] - taps[6]).abs() < 1e-7);
        assert!(taps[3] > taps[2]);
    }

    #[test]
    fn non_positive_sigma_is_a_no_op() {
        let image = TwoDimensionalMap::from_fn(4, 4, |x, y| Rgba([(x * 60) as u8, (y * 60) as u8, 0, 255]))
            .unwrap();
        assert_eq!(gaussian_blur(&image, 0.0), image);
        assert_eq!(gaussian_blur(&image, -2.0), image);
        assert_eq!(gaussian_blur(&image, std::f32::NAN), image);
    }

    #[test]
    fn uniform_image_is_unchanged() {
        let image = PixelGrid::filled(9, 5, Rgba([40, 120, 250, 128])).unwrap();
        assert_eq!(gaussian_blur(&image, 1.0), image);
    }

    #[test]
    fn a_lone_bright_pixel_spreads_out() {
        let mut image = PixelGrid::filled(9, 9, Rgba([0, 0, 0, 255])).unwrap();
        image.set(4, 4, Rgba([255, 255, 255, 255])).unwrap();
        let blurred = gaussian_blur(&image, 1.0);
        let centre = blurred.get(4, 4).unwrap().0[0];
        let beside = blurred.get(5, 4).unwrap().0[0];
        assert!(centre < 255);
        assert!(beside > 0 && beside < centre);
        assert_eq!(blurred.get(4, 4).unwrap().0[3], 255);
    }
}
