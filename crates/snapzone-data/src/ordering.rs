//! Logical ordering of the marker columns.
//!
//! The physical marker order of the table is captured once when the table is
//! loaded. Projection uses a separate *active* order, which reorder
//! strategies can rearrange and truncate without touching the table.
//!
//! Six color-linked markers get special treatment: the color strategies pull
//! them out of the marker list and insert them as one block at the start,
//! middle or end. Their current positions are always available through
//! [`SnpOrdering::color_linked_positions`].
//!
//! ```
//! use snapzone_data::ordering::{ReorderStrategy, SnpOrdering};
//!
//! let original = ["m1", "c1", "m2", "c2", "m3"].map(str::to_owned).to_vec();
//! let color_linked = ["c1", "c2", "c3", "c4", "c5", "c6"].map(str::to_owned);
//! let mut ordering = SnpOrdering::new(original, color_linked);
//! assert_eq!(ordering.color_linked_positions()[..2], [Some(1), Some(3)]);
//!
//! ordering.reorder(ReorderStrategy::ColorStart, 0);
//! assert_eq!(
//!     ordering.active_order(),
//!     ["c1", "c2", "c3", "c4", "c5", "c6", "m1", "m2", "m3"]
//! );
//! assert_eq!(ordering.color_linked_positions()[0], Some(0));
//! ```

use std::{array, convert::Infallible, fmt, str::FromStr};

use crate::{
    schema::{COLOR_LINKED_COUNT, Schema},
    table::Table,
};

/// How [`SnpOrdering::reorder`] arranges the active marker order.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderStrategy {
    /// Physical order.
    #[default]
    Default,
    /// Color-linked markers first.
    ColorStart,
    /// Color-linked markers in the middle.
    ColorMiddle,
    /// Color-linked markers last.
    ColorEnd,
    /// Lexicographic by marker name.
    Alnum,
}

impl ReorderStrategy {
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::ColorStart,
        Self::ColorMiddle,
        Self::ColorEnd,
        Self::Alnum,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::ColorStart => "color_start",
            Self::ColorMiddle => "color_middle",
            Self::ColorEnd => "color_end",
            Self::Alnum => "alnum",
        }
    }

    /// Selects a strategy by position; out-of-range indices wrap around.
    #[must_use]
    pub fn from_index(index: i64) -> Self {
        selector_index(&Self::ALL, index)
    }

    /// Selects a strategy by name or numeric index.
    ///
    /// Empty or unrecognized names select [`ReorderStrategy::Default`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        selector_name(&Self::ALL, name, Self::name)
    }
}

impl FromStr for ReorderStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for ReorderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks `options[index mod len]`, wrapping negative indices too.
pub(crate) fn selector_index<T: Copy, const N: usize>(options: &[T; N], index: i64) -> T {
    let len = i64::try_from(N).unwrap_or(i64::MAX);
    let wrapped = usize::try_from(index.rem_euclid(len)).unwrap_or(0);
    options[wrapped]
}

/// Matches `name` against option names, then as a numeric index; falls back
/// to the first option.
pub(crate) fn selector_name<T: Copy, const N: usize>(
    options: &[T; N],
    name: &str,
    name_of: impl Fn(T) -> &'static str,
) -> T {
    let name = name.trim();
    if let Some(option) = options.iter().copied().find(|o| name_of(*o) == name) {
        return option;
    }
    match name.parse::<i64>() {
        Ok(index) => selector_index(options, index),
        Err(_) => options[0],
    }
}

/// Original and active marker orders plus color-linked marker positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpOrdering {
    original: Vec<String>,
    color_linked: [String; COLOR_LINKED_COUNT],
    active: Vec<String>,
    color_linked_positions: [Option<usize>; COLOR_LINKED_COUNT],
}

impl SnpOrdering {
    #[must_use]
    pub fn new(original: Vec<String>, color_linked: [String; COLOR_LINKED_COUNT]) -> Self {
        let mut ordering = Self {
            active: original.clone(),
            original,
            color_linked,
            color_linked_positions: [None; COLOR_LINKED_COUNT],
        };
        ordering.update_positions();
        ordering
    }

    /// Captures the physical marker block of `table`.
    ///
    /// The block is the inclusive column range `schema.marker_block`, clamped
    /// to the columns the table actually has.
    #[must_use]
    pub fn from_table(table: &Table, schema: &Schema) -> Self {
        let columns = table.columns();
        let (first, last) = schema.marker_block;
        let end = last.saturating_add(1).min(columns.len());
        if end <= last {
            log::warn!(
                "marker block {first}..={last} exceeds the {} table columns, truncating",
                columns.len()
            );
        }
        let original = columns.get(first..end).unwrap_or_default().to_vec();
        Self::new(original, schema.color_linked_markers.clone())
    }

    /// Marker names in physical column order.
    #[must_use]
    pub fn original_order(&self) -> &[String] {
        &self.original
    }

    /// Marker names used for projection.
    #[must_use]
    pub fn active_order(&self) -> &[String] {
        &self.active
    }

    #[must_use]
    pub fn color_linked_names(&self) -> &[String; COLOR_LINKED_COUNT] {
        &self.color_linked
    }

    /// Position of each color-linked marker in the active order, `None` when
    /// the marker is not part of it.
    #[must_use]
    pub fn color_linked_positions(&self) -> [Option<usize>; COLOR_LINKED_COUNT] {
        self.color_linked_positions
    }

    /// Rebuilds the active order from the original order.
    ///
    /// `limit <= 0` means no limit. For the plain strategies the first
    /// `limit` original markers are kept; the color strategies keep the first
    /// `limit - 6` markers that are not color-linked and add all six
    /// color-linked markers as one block. Without a limit every original
    /// marker is kept.
    pub fn reorder(&mut self, strategy: ReorderStrategy, limit: i64) {
        let limit = usize::try_from(limit).ok().filter(|&l| l > 0);
        let (all_cap, non_color_cap) = match limit {
            Some(limit) => (limit, limit.saturating_sub(COLOR_LINKED_COUNT)),
            None => (usize::MAX, usize::MAX),
        };

        let capped_all = self.original.iter().take(all_cap).cloned();
        let capped_non_color = self
            .original
            .iter()
            .filter(|name| !self.color_linked.contains(name))
            .take(non_color_cap)
            .cloned();

        self.active = match strategy {
            ReorderStrategy::Default => capped_all.collect(),
            ReorderStrategy::Alnum => {
                let mut names = capped_all.collect::<Vec<_>>();
                names.sort_unstable();
                names
            }
            ReorderStrategy::ColorStart
            | ReorderStrategy::ColorMiddle
            | ReorderStrategy::ColorEnd => {
                let mut names = capped_non_color.collect::<Vec<_>>();
                let at = match strategy {
                    ReorderStrategy::ColorStart => 0,
                    ReorderStrategy::ColorMiddle => names.len() / 2,
                    _ => names.len(),
                };
                names.splice(at..at, self.color_linked.iter().cloned());
                names
            }
        };
        self.update_positions();

        log::debug!(
            "reordered markers with {strategy} (limit {limit:?}): {} active, color-linked at {:?}",
            self.active.len(),
            self.color_linked_positions
        );
    }

    fn update_positions(&mut self) {
        self.color_linked_positions = array::from_fn(|i| {
            self.active
                .iter()
                .position(|name| *name == self.color_linked[i])
        });
    }
}
