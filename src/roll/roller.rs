use crate::common::{NonZeroUInt, UInt};
use rand::Rng;

/// Source of single die draws.
pub trait Roller {
    /// A uniform draw from `1..=faces`.
    fn draw(&mut self, faces: NonZeroUInt) -> UInt;
}

impl<R: Rng + ?Sized> Roller for R {
    fn draw(&mut self, faces: NonZeroUInt) -> UInt {
        self.gen_range(1..=faces.get())
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
