// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Minimum-cost vertical seams
//!
//! A forward dynamic program over the energy map.  Every cell of the
//! cumulative table holds the cheapest total energy of any connected
//! path from the top row down to that cell, plus the column in the row
//! above that the path came through.  The cheapest cell in the bottom
//! row is the end of the globally cheapest seam, and following the
//! parent columns back up recovers it.
//!
//! Ties are broken deterministically: among the three cells above, the
//! one straight up wins, then the one to the left, then the one to the
//! right; in the bottom row the leftmost minimum wins.

use crate::cq;
use crate::error::Result;
use crate::seam::Seam;
use crate::twodmap::{EnergyMap, TwoDimensionalMap};

/// This trait defines how the carver asks for seams.  It's a
/// primitive interface, just enough to make room for other seam
/// strategies without touching the carver.
pub trait SeamFinder {
    /// Find the vertical seam to remove next, given the current energy.
    fn find_vertical_seam(&self, energy: &EnergyMap) -> Result<Seam>;
}

/// One cell of the seam digraph.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnergyAndBackPointer {
    /// Cheapest cumulative energy of a path ending here.
    pub energy: u32,
    /// Column, in the row above, that the cheapest path came through.
    /// Row 0 points at itself.
    pub parent: u32,
}

/// Per-pixel minimum path cost with back pointers.  Scratch space for
/// a single seam search.
pub type CumulativeEnergyTable = TwoDimensionalMap<EnergyAndBackPointer>;

// Path totals stop at the ceiling rather than wrapping.
#[inline]
fn accumulate(total: u32, energy: u32) -> u32 {
    total.saturating_add(energy)
}

#[inline]
fn energy_of(energy: &EnergyMap, x: u32, y: u32) -> u32 {
    u32::from(energy[(x, y)].0[0])
}

// Of the (up to) three cells above `x` in row `y`, which is cheapest?
// Straight up is the incumbent, so left and right only win by being
// strictly cheaper, and left is tried first.
#[inline]
fn cheapest_parent(table: &CumulativeEnergyTable, x: u32, y: u32, maxwidth: u32) -> u32 {
    let candidates = [
        cq!(x == 0, None, Some(x - 1)),
        cq!(x == maxwidth, None, Some(x + 1)),
    ];
    candidates
        .iter()
        .flatten()
        .fold(x, |best, &c| cq!(table[(c, y)].energy < table[(best, y)].energy, c, best))
}

/// Build the cumulative energy table for an energy map.
pub fn cumulative_energy(energy: &EnergyMap) -> Result<CumulativeEnergyTable> {
    let (width, height) = energy.dimensions();
    let mut target = CumulativeEnergyTable::filled(width, height, EnergyAndBackPointer::default())?;

    // Populate the first row with their native energies.
    for x in 0..width {
        target[(x, 0)] = EnergyAndBackPointer {
            energy: energy_of(energy, x, 0),
            parent: x,
        };
    }

    let maxwidth = width - 1;
    // For every subsequent row, populate the target cell with the sum
    // of the *lowest adjacent upper energy* and the *x coordinate of
    // that energy*
    for y in 1..height {
        for x in 0..width {
            let parent = cheapest_parent(&target, x, y - 1, maxwidth);
            target[(x, y)] = EnergyAndBackPointer {
                energy: accumulate(target[(parent, y - 1)].energy, energy_of(energy, x, y)),
                parent,
            };
        }
    }
    Ok(target)
}

/// The column in the bottom row where the cheapest seam ends.  Leftmost
/// on ties.
pub fn seam_end(table: &CumulativeEnergyTable) -> u32 {
    let bottom = table.height() - 1;
    (0..table.width())
        .min_by_key(|x| table[(*x, bottom)].energy)
        .unwrap_or(0)
}

/// Given an energy map, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the seam to be removed.
pub fn energy_to_vertical_seam(energy: &EnergyMap) -> Result<Seam> {
    let target = cumulative_energy(energy)?;
    let height = target.height();

    // Working backwards, generate a vec of x coordinates that that map to
    // the seam, reverse and return.
    let mut seam_col = seam_end(&target);
    let mut columns = (0..height)
        .rev()
        .fold(Vec::<u32>::with_capacity(height as usize), |mut acc, y| {
            acc.push(seam_col);
            seam_col = target[(seam_col, y)].parent;
            acc
        });
    columns.reverse();
    Ok(Seam::from_connected(columns))
}

/// The exact, dynamic-programming seam finder.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimumSeamFinder;

impl SeamFinder for MinimumSeamFinder {
    fn find_vertical_seam(&self, energy: &EnergyMap) -> Result<Seam> {
        energy_to_vertical_seam(energy)
    }
}
