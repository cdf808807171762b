use crate::common::*;
use crate::model::Events;
use rand::distributions::{Distribution as RandDistribution, WeightedError, WeightedIndex};
use rand::Rng;
use std::ops::RangeInclusive;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum DistributionError {
    #[error("no sum has a positive weight")]
    EmptySupport,
    #[error("weight of {sum} is not a finite number")]
    NonFiniteWeight { sum: Int },
    #[error("cannot sample: {0}")]
    Sampler(#[from] WeightedError),
}

/// The probability shown for each sum by [Distribution::view].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum View {
    /// Chance of rolling exactly the sum.
    Density,
    /// Chance of rolling the sum or more.
    AtLeast,
    /// Chance of rolling the sum or less.
    AtMost,
}

impl View {
    pub const ALL: [View; 3] = [View::Density, View::AtLeast, View::AtMost];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Density => "exactly",
            Self::AtLeast => "at least",
            Self::AtMost => "at most",
        }
    }
}

/// Probability table of the sums of an expression. Only sums with a positive
/// weight are stored; every other sum has probability zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    sums: Vec<Int>,
    weights: Vec<Weight>,
    total: Weight,
    density: Vec<Float>,
    cumulative: Vec<Float>,
    mean: Float,
    variance: Float,
    exact: bool,
}

impl Distribution {
    pub fn from_events(events: &Events) -> Result<Self, DistributionError> {
        if let Some(&(sum, _)) = events
            .entries()
            .iter()
            .find(|(_, w)| !w.is_finite() || *w < 0.0)
        {
            return Err(DistributionError::NonFiniteWeight { sum });
        }

        let (sums, weights): (Vec<Int>, Vec<Weight>) = events.support().unzip();
        let (min, max) = match (sums.first(), sums.last()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => return Err(DistributionError::EmptySupport),
        };

        let total: Weight = weights.iter().sum();
        if !total.is_finite() {
            return Err(DistributionError::NonFiniteWeight { sum: max });
        }

        let density: Vec<Float> = weights.iter().map(|w| w / total).collect();
        let mut cumulative = Vec::with_capacity(density.len());
        let mut running = 0.0;
        for p in &density {
            running += p;
            cumulative.push(Float::min(running, 1.0));
        }

        let mean: Float = sums.iter().zip(&density).map(|(&k, p)| k as Float * p).sum();
        let variance: Float = sums
            .iter()
            .zip(&density)
            .map(|(&k, p)| p * (k as Float - mean) * (k as Float - mean))
            .sum();

        log::debug!(
            "distribution over {}..={} ({} sums): mean {:.3}, variance {:.3}, exact: {}",
            min,
            max,
            sums.len(),
            mean,
            variance,
            events.is_exact()
        );

        Ok(Self {
            sums,
            weights,
            total,
            density,
            cumulative,
            mean,
            variance,
            exact: events.is_exact(),
        })
    }

    pub fn min(&self) -> Int {
        self.sums[0]
    }

    pub fn max(&self) -> Int {
        self.sums[self.sums.len() - 1]
    }

    /// Lowest through highest sum with a positive weight.
    pub fn support(&self) -> RangeInclusive<Int> {
        self.min()..=self.max()
    }

    /// Sums with a positive weight, in increasing order.
    pub fn sums(&self) -> &[Int] {
        &self.sums
    }

    fn index(&self, k: Int) -> Option<usize> {
        self.sums.binary_search(&k).ok()
    }

    pub fn weight(&self, k: Int) -> Weight {
        self.index(k).map_or(0.0, |i| self.weights[i])
    }

    pub fn density(&self, k: Int) -> Float {
        self.index(k).map_or(0.0, |i| self.density[i])
    }

    /// Chance of a sum no greater than `k`.
    pub fn cumulative_density(&self, k: Int) -> Float {
        let below = self.sums.partition_point(|&sum| sum <= k);
        if below == 0 {
            0.0
        } else if below == self.sums.len() {
            1.0
        } else {
            self.cumulative[below - 1]
        }
    }

    pub fn at_least(&self, k: Int) -> Float {
        if k <= self.min() {
            1.0
        } else if k > self.max() {
            0.0
        } else {
            (1.0 - self.cumulative_density(k - 1)).clamp(0.0, 1.0)
        }
    }

    pub fn at_most(&self, k: Int) -> Float {
        self.cumulative_density(k)
    }

    pub fn probability(&self, view: View, k: Int) -> Float {
        match view {
            View::Density => self.density(k),
            View::AtLeast => self.at_least(k),
            View::AtMost => self.at_most(k),
        }
    }

    /// Every sum with a positive weight paired with its probability under `view`.
    pub fn view(&self, view: View) -> Vec<(Int, Float)> {
        self.sums
            .iter()
            .map(|&k| (k, self.probability(view, k)))
            .collect()
    }

    /// Density of every sum with a positive weight.
    pub fn iter(&self) -> impl Iterator<Item = (Int, Float)> + '_ {
        self.sums.iter().copied().zip(self.density.iter().copied())
    }

    pub fn mean(&self) -> Float {
        self.mean
    }

    pub fn variance(&self) -> Float {
        self.variance
    }

    pub fn std_dev(&self) -> Float {
        self.variance.sqrt()
    }

    /// Sum of the underlying weights, the number of samples for an approximation.
    pub fn total(&self) -> Weight {
        self.total
    }

    /// False when some part of the expression was approximated by simulated rolls
    /// or its exact weights were too small to represent.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn sampler(&self) -> Result<Sampler, DistributionError> {
        Ok(Sampler {
            sums: self.sums.clone(),
            index: WeightedIndex::new(&self.weights)?,
        })
    }
}

/// Draws sums with the frequencies of a [Distribution].
#[derive(Debug, Clone)]
pub struct Sampler {
    sums: Vec<Int>,
    index: WeightedIndex<Weight>,
}

impl RandDistribution<Int> for Sampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Int {
        self.sums[self.index.sample(rng)]
    }
}
