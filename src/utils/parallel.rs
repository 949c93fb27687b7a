//! Conditional parallel iteration.
//!
//! With the `parallel` feature, Rayon's iterator traits are re-exported unchanged. Without
//! it, a serial shim provides `par_iter()` on anything iterable by reference so batch code
//! is written once and compiles either way.

#[cfg(feature = "parallel")]
pub use rayon::prelude::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

#[cfg(not(feature = "parallel"))]
pub use self::serial::*;

#[cfg(not(feature = "parallel"))]
mod serial {
    pub use std::iter::Iterator as ParallelIterator;
    pub use std::iter::Iterator as IndexedParallelIterator;

    /// Serial stand-in for Rayon's `par_iter()`.
    pub trait IntoParallelRefIterator<'data> {
        type Item;
        type Iter: Iterator<Item = Self::Item>;
        fn par_iter(&'data self) -> Self::Iter;
    }

    impl<'data, I: 'data + ?Sized> IntoParallelRefIterator<'data> for I
    where
        &'data I: IntoIterator,
    {
        type Item = <&'data I as IntoIterator>::Item;
        type Iter = <&'data I as IntoIterator>::IntoIter;
        fn par_iter(&'data self) -> Self::Iter {
            self.into_iter()
        }
    }
}
