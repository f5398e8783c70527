//! Prime factorization by trial division over a fixed prime table.

use crate::LayoutError;

/// Primes used for trial division, ascending.
pub const PRIMES: [u64; 26] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101,
];

/// The largest prime in the trial division table.
pub const LARGEST_PRIME: u64 = PRIMES[PRIMES.len() - 1];

/// Square of the first prime after [`LARGEST_PRIME`]. A remainder below this
/// bound with no factor in the table is itself prime.
pub const PRIME_REMAINDER_BOUND: u64 = 103 * 103;

/// Returns the prime factors of `value` in ascending order.
///
/// Each pass walks the prime table from the largest prime down and divides
/// out every prime that divides the remainder once; passes repeat until the
/// remainder is 1. A pass that divides nothing leaves a remainder without
/// factors up to [`LARGEST_PRIME`]. Below [`PRIME_REMAINDER_BOUND`] that
/// remainder is a prime and becomes the last factor; otherwise it is a
/// product of at least two larger primes, reported as
/// [`LayoutError::DomainLimit`].
///
/// `factorize(1)` is empty. `factorize(0)` is a domain error.
///
/// # Examples
///
/// ```
/// use snapzone_layout::factorize;
///
/// assert_eq!(factorize(360).unwrap(), vec![2, 2, 2, 3, 3, 5]);
/// assert_eq!(factorize(97).unwrap(), vec![97]);
/// assert_eq!(factorize(2 * 103).unwrap(), vec![2, 103]);
/// assert!(factorize(103 * 107).is_err());
/// ```
pub fn factorize(value: u64) -> Result<Vec<u64>, LayoutError> {
    if value == 0 {
        return Err(LayoutError::DomainLimit {
            value,
            remainder: 0,
        });
    }

    let mut remainder = value;
    let mut factors = vec![];
    while remainder != 1 {
        let before = remainder;
        for &prime in PRIMES.iter().rev() {
            if remainder.is_multiple_of(prime) {
                factors.push(prime);
                remainder /= prime;
            }
        }
        if remainder == before {
            if remainder >= PRIME_REMAINDER_BOUND {
                return Err(LayoutError::DomainLimit { value, remainder });
            }
            factors.push(remainder);
            break;
        }
    }

    factors.sort_unstable();
    Ok(factors)
}
