mod events;
mod leaf;
mod pool;

pub use events::Events;
pub use leaf::{Die, ExplodingDie, Modifier};
pub use pool::{Pool, SubPool, SubPoolSizeError};

use crate::common::Int;
use crate::distribution::{Distribution, DistributionError};
use crate::roll::{DefaultRoller, Outcome, RollContext, Roller};
use std::fmt;

/// Capabilities shared by every node of an expression tree.
#[enum_dispatch::enum_dispatch]
pub trait Model: fmt::Display {
    /// Smallest sum a roll can produce.
    fn minimum(&self) -> Int;

    /// Largest sum a roll can produce.
    fn maximum(&self) -> Int;

    /// Draws one outcome, mirroring the structure of the node.
    fn roll<R: Roller + ?Sized>(&self, roller: &mut R) -> Outcome<'_>;

    /// Weight of every reachable sum. Exact unless enumeration was too large
    /// for the context's configuration.
    fn events<R: Roller>(&self, ctx: &mut RollContext<R>) -> Events;

    /// Canonical text that parses back into an equivalent node.
    fn textual_form(&self) -> String {
        self.to_string()
    }

    /// Distribution with the default configuration and the thread-local random source.
    fn distribution(&self) -> Result<Distribution, DistributionError> {
        RollContext::<DefaultRoller>::default().distribution(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Model)]
pub enum Node {
    Modifier(Modifier),
    Die(Die),
    ExplodingDie(ExplodingDie),
    Pool(Pool),
    SubPool(SubPool),
}

impl fmt::Display for Node {
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

pub(crate) fn fmt_joined(children: &[Node], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str("+")?;
        }
        fmt::Display::fmt(child, f)?;
    }
    Ok(())
}
