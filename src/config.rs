use std::num::NonZeroUsize;

/// Knobs of the distribution engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Config {
    /// Largest combination bound a sub-pool will enumerate exactly.
    pub exact_cutoff: u64,
    /// Number of simulated rolls used when exact computation is refused.
    pub samples: NonZeroUsize,
    /// Widest range of sums, `maximum - minimum + 1`, a node computes exactly.
    pub max_support: u64,
}

impl Config {
    pub const DEFAULT_EXACT_CUTOFF: u64 = 10_000;
    pub const DEFAULT_SAMPLES: NonZeroUsize = NonZeroUsize::new(10_000).unwrap();
    pub const DEFAULT_MAX_SUPPORT: u64 = 1_000_000;

    pub fn new(exact_cutoff: u64, samples: NonZeroUsize) -> Self {
        Self {
            exact_cutoff,
            samples,
            max_support: Self::DEFAULT_MAX_SUPPORT,
        }
    }

    pub fn with_exact_cutoff(mut self, exact_cutoff: u64) -> Self {
        self.exact_cutoff = exact_cutoff;
        self
    }

    pub fn with_samples(mut self, samples: NonZeroUsize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_max_support(mut self, max_support: u64) -> Self {
        self.max_support = max_support;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXACT_CUTOFF, Self::DEFAULT_SAMPLES)
    }
}
