use crate::common::*;
use std::collections::BTreeMap;

/// Unnormalised weights of the reachable sums, in increasing order of sum.
/// Only the sums that were actually observed are stored, so a sampled table
/// over a wide range stays as small as its sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Events {
    entries: Vec<(Int, Weight)>,
    exact: bool,
}

impl Events {
    /// Tables whose largest weight passes this are divided by their total.
    const RESCALE_ABOVE: Weight = 1e250;

    /// Table of consecutive sums starting at `offset`. Zero weights are dropped.
    pub fn from_weights(offset: Int, weights: Vec<Weight>, exact: bool) -> Self {
        let entries = weights
            .into_iter()
            .enumerate()
            .map(|(i, w)| (offset.saturating_add(i as Int), w))
            .collect();
        Self::from_entries(entries, exact)
    }

    pub fn from_map(map: BTreeMap<Int, Weight>, exact: bool) -> Self {
        Self::from_entries(map.into_iter().collect(), exact)
    }

    /// `entries` must be sorted by sum without repeats.
    fn from_entries(mut entries: Vec<(Int, Weight)>, exact: bool) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        let mut ret = Self { entries, exact };
        ret.rescale_if_huge();
        ret
    }

    /// Empirical table counting each observed sum once.
    pub fn sampled(values: impl IntoIterator<Item = Int>) -> Self {
        let mut counts = BTreeMap::new();
        for value in values {
            *counts.entry(value).or_insert(0.0) += 1.0;
        }
        Self::from_map(counts, false)
    }

    pub fn point(value: Int) -> Self {
        Self::from_weights(value, vec![1.0], true)
    }

    /// Weight 1 on each sum in `low..=high`.
    pub fn uniform(low: Int, high: Int) -> Self {
        let len = high.saturating_sub(low).saturating_add(1).max(0) as usize;
        Self::from_weights(low, vec![1.0; len], true)
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// Every stored entry, including any non-finite or negative weight.
    pub fn entries(&self) -> &[(Int, Weight)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight(&self, k: Int) -> Weight {
        self.entries
            .binary_search_by_key(&k, |&(sum, _)| sum)
            .map_or(0.0, |i| self.entries[i].1)
    }

    /// Sums with positive weight, in increasing order.
    pub fn support(&self) -> impl Iterator<Item = (Int, Weight)> + '_ {
        self.entries.iter().copied().filter(|&(_, w)| w > 0.0)
    }

    pub fn total(&self) -> Weight {
        self.entries.iter().map(|&(_, w)| w).sum()
    }

    fn rescale_if_huge(&mut self) {
        let largest = self.entries.iter().map(|&(_, w)| w).fold(0.0, Weight::max);
        if largest > Self::RESCALE_ABOVE && largest.is_finite() {
            let total = self.total();
            log::trace!("rescaling events by {:e}", total);
            for (_, w) in &mut self.entries {
                *w /= total;
            }
        }
    }

    /// Distribution of the sum of two independent tables.
    pub fn convolve(&self, other: &Self) -> Self {
        let exact = self.exact && other.exact;
        let (first, last) = match (self.bounds(), other.bounds()) {
            (Some((a, b)), Some((c, d))) => (a.saturating_add(c), b.saturating_add(d)),
            _ => return Self::from_entries(Vec::new(), exact),
        };

        // A dense buffer is used when it is no larger than the number of products.
        let span = (i128::from(last) - i128::from(first) + 1) as u128;
        let products = (self.len() as u128).saturating_mul(other.len() as u128);
        if span <= products {
            let mut weights = vec![0.0; span as usize];
            for &(a, wa) in &self.entries {
                for &(b, wb) in &other.entries {
                    weights[(a.saturating_add(b) - first) as usize] += wa * wb;
                }
            }
            Self::from_weights(first, weights, exact)
        } else {
            let mut sums = BTreeMap::new();
            for &(a, wa) in &self.entries {
                for &(b, wb) in &other.entries {
                    *sums.entry(a.saturating_add(b)).or_insert(0.0) += wa * wb;
                }
            }
            Self::from_map(sums, exact)
        }
    }

    fn bounds(&self) -> Option<(Int, Int)> {
        Some((self.entries.first()?.0, self.entries.last()?.0))
    }

    /// Distribution of the sum of the `n` values `selection` keeps out of one
    /// independent draw from each table.
    ///
    /// Walks the Cartesian product of the supports with an odometer, so the cost is
    /// the product of the support sizes.
    pub fn select(tables: &[Self], n: usize, selection: Selection) -> Self {
        let exact = tables.iter().all(Self::is_exact);
        let supports: Vec<Vec<(Int, Weight)>> = tables
            .iter()
            .map(|table| {
                let scale = if table.total() > Self::RESCALE_ABOVE.sqrt() {
                    table.total()
                } else {
                    1.0
                };
                table.support().map(|(k, w)| (k, w / scale)).collect()
            })
            .collect();
        if supports.is_empty() || supports.iter().any(Vec::is_empty) {
            return Self::from_weights(0, Vec::new(), exact);
        }

        let mut indices = vec![0; supports.len()];
        let mut values = vec![0; supports.len()];
        let mut sums = BTreeMap::new();
        loop {
            let mut weight = 1.0;
            for ((value, &i), support) in values.iter_mut().zip(&indices).zip(&supports) {
                let (k, w) = support[i];
                *value = k;
                weight *= w;
            }
            let sum = selection.kept_sum(&mut values, n);
            *sums.entry(sum).or_insert(0.0) += weight;

            let mut digit = 0;
            loop {
                if digit == indices.len() {
                    return Self::from_map(sums, exact);
                }
                indices[digit] += 1;
                if indices[digit] < supports[digit].len() {
                    break;
                }
                indices[digit] = 0;
                digit += 1;
            }
        }
    }
}
