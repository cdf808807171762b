use super::{fmt_joined, Events, Model, Node};
use crate::common::*;
use crate::roll::{Outcome, OutcomeValue, RollContext, Roller, Source};
use std::fmt;
use thiserror::Error;

/// Independent components whose rolls are added together.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    children: NonEmpty<Node>,
}

impl Pool {
    pub fn new(children: NonEmpty<Node>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn into_children(self) -> NonEmpty<Node> {
        self.children
    }
}

impl Model for Pool {
    fn minimum(&self) -> Int {
        saturating_sum(self.children.iter().map(Model::minimum))
    }

    fn maximum(&self) -> Int {
        saturating_sum(self.children.iter().map(Model::maximum))
    }

    fn roll<R: Roller + ?Sized>(&self, roller: &mut R) -> Outcome<'_> {
        let rolls = self.children.iter().map(|child| child.roll(&mut *roller)).collect();
        Outcome::new(Source::Pool(self), OutcomeValue::Group(rolls))
    }

    fn events<R: Roller>(&self, ctx: &mut RollContext<R>) -> Events {
        if ctx.exceeds_support(self) {
            log::debug!(
                "{}: {} sums exceed the support limit of {}, sampling",
                self,
                i128::from(self.maximum()) - i128::from(self.minimum()) + 1,
                ctx.config().max_support
            );
            return ctx.sample(self);
        }
        let mut events = self.children.first().events(ctx);
        for child in self.children.iter().skip(1) {
            events = events.convolve(&child.events(ctx));
            log::trace!("convolved {}: {} sums", child, events.len());
        }
        events
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_joined(&self.children, f)
    }
}

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[error("cannot keep {requested} of {available} components; a sub-pool must be smaller than its pool")]
pub struct SubPoolSizeError {
    pub requested: usize,
    pub available: usize,
}

/// Rolls every component but only adds the `n` highest ([Selection::Best]) or
/// lowest ([Selection::Worst]) results.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPool {
    children: NonEmpty<Node>,
    n: usize,
    selection: Selection,
}

impl SubPool {
    pub fn new(
        children: NonEmpty<Node>,
        n: usize,
        selection: Selection,
    ) -> Result<Self, SubPoolSizeError> {
        if n >= children.len() {
            return Err(SubPoolSizeError {
                requested: n,
                available: children.len(),
            });
        }
        Ok(Self {
            children,
            n,
            selection,
        })
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Upper bound on the number of combinations exact enumeration visits.
    pub fn combinations(&self) -> u128 {
        self.children.iter().fold(1, |acc: u128, child| {
            let max = u128::try_from(child.maximum()).unwrap_or(0).max(1);
            acc.saturating_mul(max)
        })
    }

    fn kept_bound(&self, bounds: impl Iterator<Item = Int>) -> Int {
        let mut bounds: Vec<_> = bounds.collect();
        self.selection.kept_sum(&mut bounds, self.n)
    }
}

impl Model for SubPool {
    fn minimum(&self) -> Int {
        self.kept_bound(self.children.iter().map(Model::minimum))
    }

    fn maximum(&self) -> Int {
        self.kept_bound(self.children.iter().map(Model::maximum))
    }

    fn roll<R: Roller + ?Sized>(&self, roller: &mut R) -> Outcome<'_> {
        let mut rolls: Vec<_> = self.children.iter().map(|child| child.roll(&mut *roller)).collect();
        let values: Vec<_> = rolls.iter().map(Outcome::sum).collect();
        let kept = self.selection.kept_indices(&values, self.n);
        for (i, roll) in rolls.iter_mut().enumerate() {
            if !kept.contains(&i) {
                roll.drop();
            }
        }
        Outcome::new(Source::SubPool(self), OutcomeValue::Group(rolls))
    }

    fn events<R: Roller>(&self, ctx: &mut RollContext<R>) -> Events {
        let combinations = self.combinations();
        let cutoff = ctx.config().exact_cutoff;
        if combinations > u128::from(cutoff) || ctx.exceeds_support(self) {
            log::debug!(
                "{}: {} combinations against a cutoff of {}, sampling {} rolls",
                self,
                combinations,
                cutoff,
                ctx.config().samples
            );
            return ctx.sample(self);
        }

        let tables: Vec<_> = self.children.iter().map(|child| child.events(ctx)).collect();
        Events::select(&tables, self.n, self.selection)
    }
}

impl fmt::Display for SubPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}o(", self.selection, self.n)?;
        fmt_joined(&self.children, f)?;
        f.write_str(")")
    }
}
