// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// `cq!(condition, then, otherwise)`: an if/else on one line.
///
/// The seam finder is full of border tables ("no left neighbor in
/// column 0, no right neighbor in the last column") and they read far
/// better as a column of one-liners than as the five-line blocks
/// `cargo fmt` makes of an `if`.  Only the chosen arm is evaluated, so
/// `cq!(x == 0, None, Some(x - 1))` never underflows.
#[doc(hidden)]
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

#[cfg(test)]
mod tests {
    fn left_of(x: u32) -> Option<u32> {
        cq!(x == 0, None, Some(x - 1))
    }

    #[test]
    fn only_the_chosen_arm_runs() {
        assert_eq!(left_of(0), None);
        assert_eq!(left_of(3), Some(2));
    }
}
