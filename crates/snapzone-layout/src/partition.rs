//! Two-bin partition of a factor list with the most similar products.

use std::collections::BTreeSet;

/// Factor count above which [`best_partition`] stops enumerating every bin
/// assignment and searches the set of distinct subset products instead.
///
/// The exhaustive search visits `2^k` leaves for `k` factors. Counts with
/// more than 20 prime factors (all of them at least 2) are above one
/// million, far beyond the sample counts this crate sizes grids for.
pub const EXHAUSTIVE_FACTOR_LIMIT: usize = 20;

/// Splits `factors` into two bins whose products differ the least.
///
/// Returns the two bin products. Their order is unspecified; callers that
/// need `(short, long)` sort them. An empty factor list yields `(1, 1)`.
///
/// # Examples
///
/// ```
/// use snapzone_layout::best_partition;
///
/// let (a, b) = best_partition(&[2, 2, 3]);
/// assert_eq!((a.min(b), a.max(b)), (3, 4));
/// ```
#[must_use]
pub fn best_partition(factors: &[u64]) -> (u64, u64) {
    if factors.len() > EXHAUSTIVE_FACTOR_LIMIT {
        log::debug!(
            "{} factors, switching to subset-product search",
            factors.len()
        );
        subset_product_partition(factors)
    } else {
        exhaustive_partition(factors, 1, 1)
    }
}

/// Tries every assignment of the remaining factors to `bin1` or `bin2`.
///
/// On equal differences the assignment that put the current factor into
/// `bin2` wins.
fn exhaustive_partition(factors: &[u64], bin1: u64, bin2: u64) -> (u64, u64) {
    let Some((&next, remaining)) = factors.split_first() else {
        return (bin1, bin2);
    };

    let p1 = exhaustive_partition(remaining, bin1 * next, bin2);
    let p2 = exhaustive_partition(remaining, bin1, bin2 * next);
    if p1.0.abs_diff(p1.1) < p2.0.abs_diff(p2.1) {
        p1
    } else {
        p2
    }
}

/// Finds the optimum through the distinct products reachable by subsets.
///
/// Repeated factors collapse into the same product, so the set stays at the
/// divisor count of the full product.
fn subset_product_partition(factors: &[u64]) -> (u64, u64) {
    let total = factors.iter().product::<u64>();
    let mut products = BTreeSet::from([1_u64]);
    for &factor in factors {
        let extended = products.iter().map(|p| p * factor).collect::<Vec<_>>();
        products.extend(extended);
    }

    // the largest product not exceeding its complement is the closest split
    let short = products
        .iter()
        .copied()
        .take_while(|&p| p <= total / p)
        .last()
        .unwrap_or(1);
    (short, total / short)
}
