// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sobel-energy seam carving
//!
//! Narrows an image by repeatedly removing the connected top-to-bottom
//! path of pixels with the least total edge energy.  The pieces, in
//! the order the data flows through them:
//!
//! * [`grayscale`]: RGBA to luminance.
//! * [`gradient`]: 3×3 directional kernels, border-clamped.
//! * [`energy`]: gradient magnitude per pixel.
//! * [`seamfinder`]: the dynamic program for the cheapest seam.
//! * [`seamcarver`]: seam removal and the carving loop.
//!
//! [`blur`] is an optional Gaussian pre-filter for the energy estimate.
//! Decoding and encoding files is left to the `image` crate; a decoded
//! [`image::RgbaImage`] goes in through [`PixelGrid::from_image`] and
//! comes back out through [`PixelGrid::to_image`].
//!
//! ```no_run
//! use sobelseam::{generate_energy_map, remove_seams, PixelGrid};
//!
//! # fn main() -> Result<(), failure::Error> {
//! let decoded = image::open("in.png")?.to_rgba();
//! let mut image = PixelGrid::from_image(&decoded)?;
//! let mut energy = generate_energy_map(&image);
//! remove_seams(&mut image, &mut energy, 40)?;
//! image.to_image().save("out.png")?;
//! # Ok(())
//! # }
//! ```

mod ternary;

pub mod blur;
pub mod config;
pub mod energy;
pub mod error;
pub mod gradient;
pub mod grayscale;
pub mod seam;
pub mod seamcarver;
pub mod seamfinder;
pub mod twodmap;

pub use blur::gaussian_blur;
pub use config::{CarveOptions, EnergyUpdate};
pub use energy::{generate_energy_map, generate_energy_map_with};
pub use error::{CarveError, Result};
pub use gradient::{GradientKernels, Kernel3};
pub use grayscale::{grayscale, grayscale_in_place};
pub use seam::Seam;
pub use seamcarver::{remove_seams, remove_vertical_seam, SeamCarver};
pub use seamfinder::{energy_to_vertical_seam, MinimumSeamFinder, SeamFinder};
pub use twodmap::{EnergyMap, GrayscaleGrid, PixelGrid, TwoDimensionalMap};
