// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::error::{CarveError, Result};
use std::ops::Deref;

/// A vertical seam: the column to cut in each row, top to bottom.
/// Consecutive entries never differ by more than one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seam(Vec<u32>);

impl Seam {
    /// Validate a list of columns as a connected vertical path.
    pub fn new(columns: Vec<u32>) -> Result<Self> {
        for (y, pair) in columns.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            if from.max(to) - from.min(to) > 1 {
                return Err(CarveError::DisconnectedSeam {
                    from,
                    to,
                    y: y as u32 + 1,
                });
            }
        }
        Ok(Seam(columns))
    }

    // For paths the finder has already built connected.
    pub(crate) fn from_connected(columns: Vec<u32>) -> Self {
        debug_assert!(columns.windows(2).all(|p| p[0].max(p[1]) - p[0].min(p[1]) <= 1));
        Seam(columns)
    }

    pub fn columns(&self) -> &[u32] {
        &self.0
    }

    /// The leftmost and rightmost columns the seam touches.
    pub fn span(&self) -> Option<(u32, u32)> {
        let lo = self.0.iter().min()?;
        let hi = self.0.iter().max()?;
        Some((*lo, *hi))
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl Deref for Seam {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}
