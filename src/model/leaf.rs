use super::{Events, Model};
use crate::common::*;
use crate::roll::{Outcome, OutcomeValue, RollContext, Roller, Source};
use std::fmt;

/// A constant term.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Modifier {
    value: Int,
}

impl Modifier {
    pub const fn new(value: Int) -> Self {
        Self { value }
    }

    pub const fn value(&self) -> Int {
        self.value
    }
}

impl Model for Modifier {
    fn minimum(&self) -> Int {
        self.value
    }

    fn maximum(&self) -> Int {
        self.value
    }

    fn roll<R: Roller + ?Sized>(&self, _: &mut R) -> Outcome<'_> {
        Outcome::new(Source::Modifier(self), OutcomeValue::Constant(self.value))
    }

    fn events<R: Roller>(&self, _: &mut RollContext<R>) -> Events {
        Events::point(self.value)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// A fair die numbered `1..=faces`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Die {
    faces: NonZeroUInt,
}

impl Die {
    pub const fn new(faces: NonZeroUInt) -> Self {
        Self { faces }
    }

    pub const fn faces(&self) -> NonZeroUInt {
        self.faces
    }
}

impl Model for Die {
    fn minimum(&self) -> Int {
        1
    }

    fn maximum(&self) -> Int {
        self.faces.get().into()
    }

    fn roll<R: Roller + ?Sized>(&self, roller: &mut R) -> Outcome<'_> {
        let value = Int::from(roller.draw(self.faces));
        Outcome::new(Source::Die(self), OutcomeValue::Rolled(vec1![value]))
    }

    fn events<R: Roller>(&self, ctx: &mut RollContext<R>) -> Events {
        if ctx.exceeds_support(self) {
            log::debug!("{}: too many faces for an exact table, sampling", self);
            return ctx.sample(self);
        }
        Events::uniform(1, self.maximum())
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.faces)
    }
}

/// A die that rolls again and adds whenever it shows its highest face,
/// for at most `chain` draws in total.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ExplodingDie {
    faces: NonZeroUInt,
    chain: NonZeroUInt,
}

impl ExplodingDie {
    pub const fn new(faces: NonZeroUInt, chain: NonZeroUInt) -> Self {
        Self { faces, chain }
    }

    pub const fn faces(&self) -> NonZeroUInt {
        self.faces
    }

    pub const fn chain(&self) -> NonZeroUInt {
        self.chain
    }

    /// Closed form of the chain: `k` maximum draws followed by a lower draw `v`
    /// reach `k * faces + v` with weight `faces^(chain - k - 1)`, and the all-maximum
    /// chain reaches `faces * chain` with weight 1. The weights sum to `faces^chain`.
    fn chain_events(&self) -> Events {
        let faces = self.faces.get();
        let chain = self.chain.get();
        let f = Weight::from(faces);

        // Once `faces^(chain - 1)` leaves the range of f64 the same ratios are emitted
        // divided by `faces^chain`.
        let normalised = !f.powf(Weight::from(chain - 1)).is_finite();
        let weight_after = |k: UInt| {
            if normalised {
                f.powf(-Weight::from(k + 1))
            } else {
                f.powf(Weight::from(chain - k - 1))
            }
        };
        let all_maximum = if normalised {
            f.powf(-Weight::from(chain))
        } else {
            1.0
        };

        let faces_int = Int::from(faces);
        let mut weights = Vec::new();
        for k in 0..chain {
            let w = weight_after(k);
            weights.extend(std::iter::repeat(w).take(faces as usize - 1));
            if k + 1 < chain {
                // the maximum face itself continues the chain
                weights.push(0.0);
            }
        }
        weights.push(all_maximum);

        debug_assert_eq!(weights.len() as Int, faces_int.saturating_mul(chain.into()));
        // Long chains underflow to zero and lose their highest sums.
        let exact = !normalised || all_maximum > 0.0;
        if !exact {
            log::debug!("{}: weights of long chains underflow", self);
        }
        Events::from_weights(1, weights, exact)
    }
}

impl Model for ExplodingDie {
    fn minimum(&self) -> Int {
        1
    }

    fn maximum(&self) -> Int {
        Int::from(self.faces.get()).saturating_mul(self.chain.get().into())
    }

    fn roll<R: Roller + ?Sized>(&self, roller: &mut R) -> Outcome<'_> {
        let faces = self.faces.get();
        let mut draws = vec1![Int::from(roller.draw(self.faces))];
        while *draws.last() == Int::from(faces) && draws.len() < self.chain.get() as usize {
            draws.push(roller.draw(self.faces).into());
        }
        Outcome::new(Source::ExplodingDie(self), OutcomeValue::Rolled(draws))
    }

    fn events<R: Roller>(&self, ctx: &mut RollContext<R>) -> Events {
        if ctx.exceeds_support(self) {
            log::debug!("{}: chain too long for an exact table, sampling", self);
            return ctx.sample(self);
        }
        self.chain_events()
    }
}

impl fmt::Display for ExplodingDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}!{}", self.faces, self.chain)
    }
}
