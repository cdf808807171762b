use super::stringify::SimpleStringifier;
use crate::common::*;
use crate::model::{Die, ExplodingDie, Modifier, Pool, SubPool};
use std::fmt;

/// The node an [Outcome] was rolled from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Source<'a> {
    Modifier(&'a Modifier),
    Die(&'a Die),
    ExplodingDie(&'a ExplodingDie),
    Pool(&'a Pool),
    SubPool(&'a SubPool),
}

impl Source<'_> {
    /// Face count of a die source.
    pub fn faces(&self) -> Option<NonZeroUInt> {
        match self {
            Self::Die(d) => Some(d.faces()),
            Self::ExplodingDie(d) => Some(d.faces()),
            _ => None,
        }
    }

    pub fn explodes(&self) -> bool {
        matches!(self, Self::ExplodingDie(_))
    }
}

impl fmt::Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modifier(x) => fmt::Display::fmt(x, f),
            Self::Die(x) => fmt::Display::fmt(x, f),
            Self::ExplodingDie(x) => fmt::Display::fmt(x, f),
            Self::Pool(x) => fmt::Display::fmt(x, f),
            Self::SubPool(x) => fmt::Display::fmt(x, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeValue<'a> {
    Constant(Int),
    /// Every draw of a die, in order. Only exploding dice draw more than once.
    Rolled(NonEmpty<Int>),
    /// One outcome per component, in the order they were written.
    Group(Vec<Outcome<'a>>),
}

/// A single roll of an expression, shaped like the expression itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<'a> {
    pub source: Source<'a>,
    pub value: OutcomeValue<'a>,
    kept: bool,
}

impl<'a> Outcome<'a> {
    pub fn new(source: Source<'a>, value: OutcomeValue<'a>) -> Self {
        Self {
            source,
            value,
            kept: true,
        }
    }

    /// False when an enclosing sub-pool did not select this outcome.
    pub fn kept(&self) -> bool {
        self.kept
    }

    pub fn drop(&mut self) {
        self.kept = false;
    }

    /// Value of this outcome whether or not it was kept.
    pub fn sum(&self) -> Int {
        match &self.value {
            OutcomeValue::Constant(x) => *x,
            OutcomeValue::Rolled(draws) => saturating_sum(draws.iter().copied()),
            OutcomeValue::Group(children) => saturating_sum(children.iter().map(Outcome::total)),
        }
    }

    /// Contribution of this outcome to its parent.
    pub fn total(&self) -> Int {
        if self.kept {
            self.sum()
        } else {
            0
        }
    }

    pub fn children(&self) -> &[Outcome<'a>] {
        match &self.value {
            OutcomeValue::Group(children) => children.as_slice(),
            _ => &[],
        }
    }

    pub fn kept_children(&self) -> impl Iterator<Item = &Outcome<'a>> + '_ {
        self.children().iter().filter(|x| x.kept)
    }

    pub fn draws(&self) -> Option<&[Int]> {
        match &self.value {
            OutcomeValue::Rolled(draws) => Some(draws.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SimpleStringifier::new().stringify(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::*;

    #[test]
    fn test_leaf_outcomes() {
        let m = Modifier::new(-2);
        let outcome = Outcome::new(Source::Modifier(&m), OutcomeValue::Constant(-2));
        assert_eq!(outcome.sum(), -2);
        assert!(outcome.children().is_empty());
        assert_eq!(outcome.draws(), None);
        assert_eq!(outcome.source.faces(), None);

        let d = ExplodingDie::new(nz(6), nz(3));
        let outcome = Outcome::new(Source::ExplodingDie(&d), OutcomeValue::Rolled(vec1![6, 6, 2]));
        assert_eq!(outcome.sum(), 14);
        assert_eq!(outcome.source.faces(), Some(nz(6)));
        assert!(outcome.source.explodes());
        assert_eq!(outcome.source.to_string(), "d6!3");
    }

    #[test]
    fn test_dropped_children_do_not_count() {
        let d = Die::new(nz(6));
        let pool = Pool::new(vec1![d.into(), d.into()]);
        let mut low = Outcome::new(Source::Die(&d), OutcomeValue::Rolled(vec1![2]));
        let high = Outcome::new(Source::Die(&d), OutcomeValue::Rolled(vec1![5]));
        low.drop();
        assert_eq!(low.sum(), 2);
        assert_eq!(low.total(), 0);

        let group = Outcome::new(Source::Pool(&pool), OutcomeValue::Group(vec![low, high]));
        assert_eq!(group.sum(), 5);
        assert_eq!(group.kept_children().count(), 1);
    }
}
