// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::gradient::GradientKernels;

/// How the carver brings the energy map up to date after each seam.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnergyUpdate {
    /// Rebuild the whole energy map from the narrowed image.
    Recompute,
    /// Contract the energy map along with the image and re-evaluate
    /// only the columns around the seam whose neighborhoods changed.
    /// Gives exactly the map `Recompute` would, for less work.  Falls
    /// back to `Recompute` while a blur is configured, since the blur
    /// reaches further than the patched band.
    Incremental,
}

impl Default for EnergyUpdate {
    fn default() -> Self {
        EnergyUpdate::Recompute
    }
}

/// Configuration for a [`SeamCarver`](crate::SeamCarver).
#[derive(Clone, Debug, PartialEq)]
pub struct CarveOptions {
    /// The kernel pair used to estimate energy.
    pub kernels: GradientKernels,

    /// Standard deviation of the Gaussian pre-filter applied before
    /// energy estimation.  Zero or less disables it.  The blur only
    /// feeds the energy estimate; the carved image itself is never
    /// blurred.
    pub blur_sigma: f32,

    /// How energy is refreshed between seams.
    pub energy_update: EnergyUpdate,
}

impl Default for CarveOptions {
    fn default() -> Self {
        Self {
            kernels: GradientKernels::SOBEL,
            blur_sigma: 0.0,
            energy_update: EnergyUpdate::Recompute,
        }
    }
}

impl CarveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_kernels(mut self, kernels: GradientKernels) -> Self {
        self.kernels = kernels;
        self
    }

    pub fn set_blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    pub fn set_energy_update(mut self, update: EnergyUpdate) -> Self {
        self.energy_update = update;
        self
    }

    /// Whether the Gaussian pre-filter is active.
    pub fn blurs(&self) -> bool {
        self.blur_sigma > 0.0
    }
}
