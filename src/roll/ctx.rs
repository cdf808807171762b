use super::outcome::Outcome;
use super::roller::Roller;
use crate::config::Config;
use crate::distribution::{Distribution, DistributionError};
use crate::model::{Events, Model};

pub type DefaultRoller = rand::prelude::ThreadRng;

/// Engine configuration together with the random source used for rolls and
/// for sampled distributions.
pub struct RollContext<R = DefaultRoller> {
    config: Config,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(config: Config, roller: R) -> Self {
        Self { config, roller }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn roller_mut(&mut self) -> &mut R {
        &mut self.roller
    }

    pub fn into_roller(self) -> R {
        self.roller
    }

    pub fn roll<'a, M: Model + ?Sized>(&mut self, model: &'a M) -> Outcome<'a> {
        model.roll(&mut self.roller)
    }

    /// `n` independent rolls of `model`.
    pub fn rolls<'a, M: Model + ?Sized>(&mut self, model: &'a M, n: usize) -> Vec<Outcome<'a>> {
        (0..n).map(|_| model.roll(&mut self.roller)).collect()
    }

    pub fn events<M: Model + ?Sized>(&mut self, model: &M) -> Events {
        model.events(self)
    }

    /// Whether a table over every sum `model` can reach would be wider than
    /// [Config::max_support].
    pub fn exceeds_support<M: Model + ?Sized>(&self, model: &M) -> bool {
        let span = i128::from(model.maximum()) - i128::from(model.minimum()) + 1;
        span > i128::from(self.config.max_support)
    }

    /// Empirical table of [Config::samples] rolls of `model`.
    pub fn sample<M: Model + ?Sized>(&mut self, model: &M) -> Events {
        let samples = self.config.samples.get();
        let roller = &mut self.roller;
        Events::sampled((0..samples).map(|_| model.roll(&mut *roller).sum()))
    }

    pub fn distribution<M: Model + ?Sized>(
        &mut self,
        model: &M,
    ) -> Result<Distribution, DistributionError> {
        let events = self.events(model);
        log::debug!(
            "{}: {} sums, exact: {}",
            model,
            events.len(),
            events.is_exact()
        );
        Distribution::from_events(&events)
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(Config::default(), rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::*;
    use crate::roll::roller::StepRoller;

    fn mock_roller() -> StepRoller {
        StepRoller::new(nz(10), 1)
    }

    fn check(s: &str, expected: Int) {
        let pool = crate::parse(s).unwrap();
        let mut ctx = RollContext::new(Config::default(), mock_roller());
        assert_eq!(ctx.roll(&pool).sum(), expected);
    }

    #[test]
    fn test_roll_modifiers() {
        check("2", 2);
        check("2+3", 5);
    }

    #[test]
    fn test_roll_dice() {
        check("d20+4", 10 + 4);
        check("2d4", 2 + 3);
        check("8d6", 4 + 5 + 6 + 1 + 2 + 3 + 4 + 5);
    }

    #[test]
    fn test_roll_sub_pools() {
        check("b1o(2d20)", 11);
        check("w1o(2d20)", 10);
        check("b2o(3d6)+1", 5 + 6 + 1);
        check("d6!3", 4);
    }

    #[test]
    fn test_rolls() {
        let pool = crate::parse("b1o(2d20)+d4").unwrap();
        let mut ctx = RollContext::new(Config::default(), rng());
        let outcomes = ctx.rolls(&pool, 1000);
        assert_eq!(outcomes.len(), 1000);
        for outcome in &outcomes {
            assert!((2..=24).contains(&outcome.sum()));
        }
    }

    #[test]
    fn test_distribution() {
        let pool = crate::parse("2d6").unwrap();
        let mut ctx = RollContext::new(Config::default(), rng());
        let dist = ctx.distribution(&pool).unwrap();
        assert!(dist.is_exact());
        assert_close(dist.density(7), 6.0 / 36.0);
        assert_close(dist.mean(), 7.0);
    }

    #[test]
    fn test_wide_die_is_sampled() {
        let pool = crate::parse("d1000000000").unwrap();
        let mut ctx = RollContext::new(Config::default(), rng());
        assert!(ctx.exceeds_support(&pool));
        let dist = ctx.distribution(&pool).unwrap();
        assert!(!dist.is_exact());
        assert_eq!(dist.total(), 10_000.0);
        assert!(dist.sums().len() <= Config::DEFAULT_SAMPLES.get());
        assert!(dist.min() >= 1 && dist.max() <= 1_000_000_000);
    }

    #[test]
    fn test_max_support_is_configurable() {
        let pool = crate::parse("3d6").unwrap();
        let mut ctx = RollContext::new(Config::default().with_max_support(15), rng());
        assert!(ctx.exceeds_support(&pool));
        assert!(!ctx.distribution(&pool).unwrap().is_exact());

        let mut ctx = RollContext::new(Config::default().with_max_support(16), rng());
        assert!(!ctx.exceeds_support(&pool));
        assert!(ctx.distribution(&pool).unwrap().is_exact());
    }

    #[test]
    fn test_default_context() {
        let pool = crate::parse("d4").unwrap();
        let mut ctx = RollContext::default();
        let x = ctx.roll(&pool).sum();
        assert!((1..=4).contains(&x));
    }
}
