mod ctx;
mod outcome;
pub(crate) mod roller;
mod stringify;

pub use ctx::{DefaultRoller, RollContext};
pub use outcome::{Outcome, OutcomeValue, Source};
pub use roller::Roller;
pub use stringify::{MarkdownStringifier, SimpleStringifier, Stringify};
