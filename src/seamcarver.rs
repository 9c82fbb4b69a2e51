// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! The seam remover, which contracts an image and its energy map in
//! lock-step, and the carver that drives the find/remove/update loop
//! for as many seams as requested.
//!
//! Nothing the caller owns is touched until every requested seam has
//! come out: the carver works on its own copies and hands back (or
//! swaps in) the finished pair.

use crate::blur::gaussian_blur;
use crate::config::{CarveOptions, EnergyUpdate};
use crate::energy::{energy_at, generate_energy_map_with};
use crate::error::{CarveError, Result};
use crate::seam::Seam;
use crate::seamfinder::{MinimumSeamFinder, SeamFinder};
use crate::twodmap::{grey_pixel, EnergyMap, PixelGrid, TwoDimensionalMap};
use log::{debug, trace};
use std::cmp;

fn check_pair(image: &PixelGrid, energy: &EnergyMap) -> Result<()> {
    if image.dimensions() != energy.dimensions() {
        return Err(CarveError::DimensionMismatch {
            image_width: image.width(),
            image_height: image.height(),
            energy_width: energy.width(),
            energy_height: energy.height(),
        });
    }
    Ok(())
}

fn check_seam(seam: &Seam, width: u32, height: u32) -> Result<()> {
    if seam.len() != height as usize {
        return Err(CarveError::SeamLength {
            len: seam.len(),
            height,
        });
    }
    match seam.iter().position(|&x| x >= width) {
        Some(y) => Err(CarveError::SeamColumn {
            x: seam[y],
            y: y as u32,
            width,
        }),
        None => Ok(()),
    }
}

// Copy every row around its seam column, one narrower.  Works for
// any grid shape, so the image and the energy map share it.
fn contract<P: Copy>(grid: &TwoDimensionalMap<P>, seam: &Seam) -> Result<TwoDimensionalMap<P>> {
    let (width, height) = grid.dimensions();
    let mut cells = Vec::with_capacity((width as usize - 1) * height as usize);
    for y in 0..height {
        let cut = seam[y as usize] as usize;
        let row = grid.row(y);
        cells.extend_from_slice(&row[..cut]);
        cells.extend_from_slice(&row[cut + 1..]);
    }
    TwoDimensionalMap::from_vec(width - 1, height, cells)
}

/// Remove one vertical seam from an image and its energy map, returning
/// both one column narrower.  Left of the seam is copied as-is; right
/// of it shifts left by one.
pub fn remove_vertical_seam(
    image: &PixelGrid,
    energy: &EnergyMap,
    seam: &Seam,
) -> Result<(PixelGrid, EnergyMap)> {
    check_pair(image, energy)?;
    let (width, height) = image.dimensions();
    if width <= 1 {
        return Err(CarveError::TooManySeams {
            requested: 1,
            width,
        });
    }
    check_seam(seam, width, height)?;
    Ok((contract(image, seam)?, contract(energy, seam)?))
}

/// Drives the carving loop: find a seam in the current energy, cut it
/// from both grids, bring the energy up to date, repeat.
#[derive(Clone, Debug)]
pub struct SeamCarver<F = MinimumSeamFinder> {
    options: CarveOptions,
    finder: F,
}

impl SeamCarver<MinimumSeamFinder> {
    /// A carver using the exact dynamic-programming seam finder.
    pub fn new(options: CarveOptions) -> Self {
        SeamCarver::with_finder(options, MinimumSeamFinder)
    }
}

impl Default for SeamCarver<MinimumSeamFinder> {
    fn default() -> Self {
        SeamCarver::new(CarveOptions::default())
    }
}

impl<F: SeamFinder> SeamCarver<F> {
    pub fn with_finder(options: CarveOptions, finder: F) -> Self {
        SeamCarver { options, finder }
    }

    pub fn options(&self) -> &CarveOptions {
        &self.options
    }

    /// The energy map of `image` under this carver's kernels, after
    /// the optional blur.
    pub fn energy_map(&self, image: &PixelGrid) -> EnergyMap {
        if self.options.blurs() {
            let smoothed = gaussian_blur(image, self.options.blur_sigma);
            generate_energy_map_with(&smoothed, &self.options.kernels)
        } else {
            generate_energy_map_with(image, &self.options.kernels)
        }
    }

    /// Carve `num_seams` vertical seams out of `image`, guided at first
    /// by `energy`, and return the narrowed image and its energy map.
    /// The arguments are left as they were.
    ///
    /// Asking for as many seams as the image has columns (or more) is
    /// refused before any work is done.
    pub fn carve(
        &self,
        image: &PixelGrid,
        energy: &EnergyMap,
        num_seams: u32,
    ) -> Result<(PixelGrid, EnergyMap)> {
        check_pair(image, energy)?;
        let original_width = image.width();
        if num_seams >= original_width {
            return Err(CarveError::TooManySeams {
                requested: num_seams,
                width: original_width,
            });
        }

        let mut image = image.clone();
        let mut energy = energy.clone();
        if num_seams == 0 {
            return Ok((image, energy));
        }

        let incremental = self.options.energy_update == EnergyUpdate::Incremental;
        if incremental && self.options.blurs() {
            debug!(
                "blur sigma {} is active; recomputing energy after every seam",
                self.options.blur_sigma
            );
        }
        let incremental = incremental && !self.options.blurs();

        debug!(
            "carving {} seams from a {}x{} image",
            num_seams,
            original_width,
            image.height()
        );
        for n in 0..num_seams {
            let seam = self.finder.find_vertical_seam(&energy)?;
            let (narrowed, contracted) = remove_vertical_seam(&image, &energy, &seam)?;
            energy = if incremental {
                self.patch_energy(&narrowed, contracted, &seam)
            } else {
                self.energy_map(&narrowed)
            };
            image = narrowed;
            trace!(
                "seam {}/{} spans columns {:?}; width now {}",
                n + 1,
                num_seams,
                seam.span(),
                image.width()
            );
        }

        debug_assert_eq!(image.width(), original_width - num_seams);
        debug_assert_eq!(energy.dimensions(), image.dimensions());
        Ok((image, energy))
    }

    /// [`carve`](SeamCarver::carve), replacing the caller's image and
    /// energy map with the results.  On error neither is touched.
    pub fn carve_in_place(
        &self,
        image: &mut PixelGrid,
        energy: &mut EnergyMap,
        num_seams: u32,
    ) -> Result<()> {
        if num_seams == 0 {
            return check_pair(image, energy);
        }
        let (narrowed, refreshed) = self.carve(image, energy, num_seams)?;
        *image = narrowed;
        *energy = refreshed;
        Ok(())
    }

    /// Compute the starting energy and carve, for callers that only
    /// care about the image.
    pub fn carve_image(&self, image: &PixelGrid, num_seams: u32) -> Result<PixelGrid> {
        let energy = self.energy_map(image);
        self.carve(image, &energy, num_seams).map(|(carved, _)| carved)
    }

    // A pixel's energy depends on its 3×3 neighborhood.  After a cut,
    // the only pixels in row `y` whose neighborhood changed lie between
    // one left of the leftmost seam column in rows y-1..=y+1 and the
    // rightmost such column; everything outside that band kept exactly
    // the same neighbors, so its contracted energy is still correct.
    fn patch_energy(&self, image: &PixelGrid, mut energy: EnergyMap, seam: &Seam) -> EnergyMap {
        let (width, height) = image.dimensions();
        for y in 0..height {
            let near = &seam[y.saturating_sub(1) as usize..=cmp::min(y + 1, height - 1) as usize];
            let lo = near.iter().cloned().min().unwrap_or(0);
            let hi = near.iter().cloned().max().unwrap_or(0);
            for x in lo.saturating_sub(1)..=cmp::min(hi, width - 1) {
                energy[(x, y)] = grey_pixel(energy_at(image, &self.options.kernels, x, y));
            }
        }
        energy
    }
}

/// Remove `num_seams` seams with the default carver, replacing `image`
/// and `energy` with their narrowed versions.  Either every seam comes
/// out or nothing changes.
pub fn remove_seams(image: &mut PixelGrid, energy: &mut EnergyMap, num_seams: u32) -> Result<()> {
    SeamCarver::new(CarveOptions::default()).carve_in_place(image, energy, num_seams)
}
