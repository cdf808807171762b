use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::num::NonZeroU32;
pub use vec1::vec1;

pub type Int = i64;
pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

pub type Float = f64;

/// Unnormalised relative frequency of a sum.
pub type Weight = f64;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// Which end of a sorted roll a sub-pool keeps.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Selection {
    Best,
    Worst,
}

impl Selection {
    /// Ordering that puts the values to keep first.
    pub fn order(self, a: &Int, b: &Int) -> Ordering {
        match self {
            Self::Best => b.cmp(a),
            Self::Worst => a.cmp(b),
        }
    }

    /// Sorts `values` in place and returns the sum of the first `n`.
    pub fn kept_sum(self, values: &mut [Int], n: usize) -> Int {
        values.sort_unstable_by(|a, b| self.order(a, b));
        values.iter().take(n).fold(0, |acc, &x| acc.saturating_add(x))
    }

    /// Indices of the `n` values to keep; ties go to the earlier index.
    pub fn kept_indices(self, values: &[Int], n: usize) -> Vec<usize> {
        let mut indices: Vec<_> = (0..values.len()).collect();
        indices.sort_by(|&i, &j| self.order(&values[i], &values[j]));
        indices.truncate(n);
        indices
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Best => 'b',
            Self::Worst => 'w',
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.as_char())
    }
}

/// Sum that clamps at the bounds of [Int] instead of wrapping.
pub(crate) fn saturating_sum(values: impl IntoIterator<Item = Int>) -> Int {
    values.into_iter().fold(0, Int::saturating_add)
}

#[cfg(test)]
pub(crate) mod test_utils {
    pub use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    pub const EPSILON: Float = 1e-9;

    pub fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    pub fn nz(x: UInt) -> NonZeroUInt {
        NonZeroUInt::new(x).unwrap()
    }

    #[track_caller]
    pub fn assert_close(actual: Float, expected: Float) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kept_sum() {
        assert_eq!(Selection::Best.kept_sum(&mut [3, 9, 1, 4], 2), 13);
        assert_eq!(Selection::Worst.kept_sum(&mut [3, 9, 1, 4], 2), 4);
        assert_eq!(Selection::Best.kept_sum(&mut [5, 5], 0), 0);
    }

    #[test]
    fn test_kept_indices_ties() {
        assert_eq!(Selection::Best.kept_indices(&[2, 6, 6, 1], 2), vec![1, 2]);
        assert_eq!(Selection::Worst.kept_indices(&[4, 4, 4], 1), vec![0]);
        assert_eq!(Selection::Worst.kept_indices(&[4, 2, 7], 2), vec![1, 0]);
    }
}
