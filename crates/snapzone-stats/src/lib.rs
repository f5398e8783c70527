//! Online statistics primitives for the snapzone workspace.
//!
//! This crate provides the building blocks the dataset aggregator is made of:
//!
//! - **Readings**: a tagged numeric value that keeps unparsable source values
//!   visible instead of relying on float NaN propagation
//! - **Range accumulation**: single-pass min/max/average/count with an
//!   acceptance window
//! - **Frequency tables**: exact-match counters sorted by key on output
//!
//! # Modules
//!
//! - [`reading`]: Lenient numeric parsing and the [`Reading`](reading::Reading) type
//! - [`range`]: Bounded running range accumulators
//! - [`frequency`]: Pooled occurrence counts
//!
//! # Examples
//!
//! ## Pooling readings from several columns
//!
//! ```
//! use snapzone_stats::{frequency::FrequencyTable, range::RangeAccumulator, reading::Reading};
//!
//! let raw = ["0", "1", "2", "1", "NA"];
//!
//! let mut counts = FrequencyTable::new();
//! let mut range = RangeAccumulator::unbounded();
//! for value in raw.map(Reading::parse) {
//!     counts.add(value);
//!     range.add(value);
//! }
//!
//! assert_eq!(counts.get(&Reading::Number(1.0)), 2);
//! assert_eq!(counts.get(&Reading::NotANumber), 1);
//! assert_eq!(range.summary().count, 4);
//! ```

pub mod frequency;
pub mod range;
pub mod reading;
