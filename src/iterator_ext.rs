//! Extension methods for iterators over [`Try`] values.
//!
//! Collecting an iterator of `Try`s into a `Try<Vec<_>>` stops at the first
//! failure (see the [`FromIterator`] impl on [`Try`]). The methods here cover
//! the other common needs: keeping only the successes, only the failures, or
//! processing every item and splitting the outcomes.
//!
//! ```rust
//! use attempt::{Try, iterator_ext::IteratorExt};
//!
//! let inputs = ["1", "2", "three", "4", "five"];
//!
//! let (numbers, errors) = inputs
//!     .iter()
//!     .map(|s| Try::of(|| s.parse::<u8>()))
//!     .partition_tries_vec();
//!
//! assert_eq!(numbers, [1, 2, 4]);
//! assert_eq!(errors.len(), 2);
//! ```

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{Error, Try};

/// Extension methods for iterators over [`Try`] values.
pub trait IteratorExt<T>: Sized + Iterator<Item = Try<T>> {
    /// Yields the values of the successes, skipping failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use attempt::{Try, iterator_ext::IteratorExt};
    ///
    /// let sizes: Vec<u32> = ["10", "x", "30"]
    ///     .iter()
    ///     .map(|s| Try::of(|| s.parse::<u32>()))
    ///     .successes()
    ///     .collect();
    /// assert_eq!(sizes, [10, 30]);
    /// ```
    fn successes(self) -> Successes<Self> {
        Successes { iter: self }
    }

    /// Yields the errors of the failures, skipping successes.
    fn failures(self) -> Failures<Self> {
        Failures { iter: self }
    }

    /// Consumes the whole iterator, collecting values into `C` and errors into
    /// a `Vec`.
    ///
    /// Unlike collecting into a `Try<C>`, this does not stop at the first
    /// failure.
    fn partition_tries<C>(self) -> (C, Vec<Error>)
    where
        C: Default + Extend<T>,
    {
        let mut values = C::default();
        let mut errors = Vec::new();
        for item in self {
            match item {
                Try::Success(value) => values.extend(Some(value)),
                Try::Failure(error) => errors.push(error),
            }
        }
        (values, errors)
    }

    /// Same as [`partition_tries`](IteratorExt::partition_tries), collecting
    /// the values into a `Vec`.
    fn partition_tries_vec(self) -> (Vec<T>, Vec<Error>) {
        self.partition_tries()
    }
}

impl<I, T> IteratorExt<T> for I where I: Iterator<Item = Try<T>> {}

/// Iterator over the values of successes, created by
/// [`IteratorExt::successes`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Successes<I> {
    iter: I,
}

impl<I, T> Iterator for Successes<I>
where
    I: Iterator<Item = Try<T>>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.iter.by_ref().find_map(Try::to_option)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, T> FusedIterator for Successes<I> where I: FusedIterator<Item = Try<T>> {}

/// Iterator over the errors of failures, created by
/// [`IteratorExt::failures`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Failures<I> {
    iter: I,
}

impl<I, T> Iterator for Failures<I>
where
    I: Iterator<Item = Try<T>>,
{
    type Item = Error;

    fn next(&mut self) -> Option<Error> {
        self.iter.by_ref().find_map(|item| match item {
            Try::Success(_) => None,
            Try::Failure(error) => Some(error),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

impl<I, T> FusedIterator for Failures<I> where I: FusedIterator<Item = Try<T>> {}

#[cfg(test)]
mod tests {
    use alloc::{collections::BTreeSet, string::ToString, vec};

    use super::*;

    fn outcomes() -> Vec<Try<i32>> {
        vec![
            Try::success(3),
            Try::failure(Error::msg("first")),
            Try::success(1),
            Try::success(3),
            Try::failure(Error::msg("second")),
        ]
    }

    #[test]
    fn test_successes_and_failures() {
        let values: Vec<i32> = outcomes().into_iter().successes().collect();
        assert_eq!(values, [3, 1, 3]);

        let messages: Vec<_> = outcomes()
            .into_iter()
            .failures()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(messages, ["first", "second"]);
    }

    #[test]
    fn test_partition_tries_processes_every_item() {
        let (values, errors): (BTreeSet<i32>, _) = outcomes().into_iter().partition_tries();
        assert_eq!(values.into_iter().collect::<Vec<_>>(), [1, 3]);
        assert_eq!(errors.len(), 2);

        let (values, errors) = outcomes().into_iter().partition_tries_vec();
        assert_eq!(values, [3, 1, 3]);
        assert_eq!(errors[1].to_string(), "second");
    }
}
