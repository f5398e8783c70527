//! Balanced grid sizing for laying out sample panels.
//!
//! Given an item count `n`, [`rectangle`] returns two integers `(a, b)` with
//! `a <= b` and `a * b >= n` that are as close to each other as possible,
//! so that `n` items can be arranged in a near-square grid.
//!
//! The search does not look at arbitrary divisor pairs. It splits the
//! multiset of prime factors of `n` into two groups and multiplies each
//! group out:
//!
//! 1. **Factorize** ([`factor::factorize`]): trial division by the primes up
//!    to 101; a leftover below `103 * 103` is itself prime.
//! 2. **Skip primes**: a prime count has only the degenerate `1 x p` split,
//!    so the count is bumped to `n + 1` (repeatedly) and the grid gets spare
//!    slots instead.
//! 3. **Partition** ([`partition::best_partition`]): exhaustive search over
//!    all bin assignments, minimizing the difference of the two products.
//!
//! # Examples
//!
//! ```
//! use snapzone_layout::rectangle;
//!
//! assert_eq!(rectangle(12).unwrap(), (3, 4));
//! assert_eq!(rectangle(36).unwrap(), (6, 6));
//! // 7 is prime, so the grid is sized for 8 items
//! assert_eq!(rectangle(7).unwrap(), (2, 4));
//! ```
//!
//! # Limits
//!
//! Counts with at most one prime factor above 101 are handled, which covers
//! every count below `103 * 103 = 10609`. Counts with two or more such
//! factors (e.g. `103 * 107`) are rejected with [`LayoutError::DomainLimit`].

pub use self::{
    factor::{LARGEST_PRIME, factorize},
    partition::best_partition,
};

pub mod factor;
pub mod partition;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LayoutError {
    #[display("cannot factorize {value}: remainder {remainder} has several prime factors above 101")]
    DomainLimit { value: u64, remainder: u64 },
    #[display("no grid can hold {value} items")]
    Overflow { value: u64 },
}

/// Computes a near-square grid `(a, b)` for `items` cells.
///
/// The result is sorted ascending (`a <= b`) and always satisfies
/// `a * b >= items`. Prime counts are rounded up to the next composite
/// count, so the grid may have spare cells.
///
/// `rectangle(0)` is `(0, 0)` and `rectangle(1)` is `(1, 1)`.
///
/// # Examples
///
/// ```
/// # use snapzone_layout::rectangle;
/// let (rows, columns) = rectangle(100).unwrap();
/// assert_eq!((rows, columns), (10, 10));
///
/// // 11 and 12: 11 is prime, 12 = 2 * 2 * 3
/// assert_eq!(rectangle(11).unwrap(), rectangle(12).unwrap());
/// ```
pub fn rectangle(items: u64) -> Result<(u64, u64), LayoutError> {
    if items == 0 {
        return Ok((0, 0));
    }

    let mut count = items;
    let factors = loop {
        let factors = factorize(count)?;
        if factors.len() != 1 {
            break factors;
        }
        log::debug!("{count} is prime, sizing grid for {} items", count + 1);
        count = count
            .checked_add(1)
            .ok_or(LayoutError::Overflow { value: items })?;
    };

    let (bin1, bin2) = best_partition(&factors);
    Ok((bin1.min(bin2), bin1.max(bin2)))
}
