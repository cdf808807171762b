//! Dice pool expressions: parse them, roll them, and compute the probability of
//! every sum they can produce.
//!
//! ```
//! use dice_hist::Model;
//!
//! let pool = dice_hist::parse("b1o(2d12)+3").unwrap();
//! assert_eq!(pool.textual_form(), "b1o(d12+d12)+3");
//! assert_eq!((pool.minimum(), pool.maximum()), (4, 15));
//!
//! let dist = dice_hist::histogram("2d6").unwrap();
//! assert!((dist.density(7) - 6.0 / 36.0).abs() < 1e-12);
//! ```

pub mod common;
pub mod config;
pub mod distribution;
pub mod error;
pub mod model;
pub mod parse;
pub mod roll;

pub use common::Selection;
pub use config::Config;
pub use distribution::{Distribution, DistributionError, Sampler, View};
pub use error::Error;
pub use model::{Die, Events, ExplodingDie, Model, Modifier, Node, Pool, SubPool, SubPoolSizeError};
pub use parse::{Expression, ParseError, ParseErrorKind};
pub use roll::{
    DefaultRoller, MarkdownStringifier, Outcome, OutcomeValue, RollContext, Roller,
    SimpleStringifier, Source, Stringify,
};

/// Parses a pool expression. A trailing `;` comment is accepted and discarded.
pub fn parse(s: &str) -> Result<Pool, ParseError> {
    parse_expression(s).map(|expr| expr.pool)
}

/// Parses a pool expression along with the text after its `;` comment marker.
pub fn parse_expression(s: &str) -> Result<Expression<'_>, ParseError> {
    parse::parse(s)
}

/// Distribution of the sums of `s` with the default configuration.
pub fn histogram(s: &str) -> Result<Distribution, Error> {
    let pool = parse(s)?;
    Ok(pool.distribution()?)
}
