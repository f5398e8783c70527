use std::{collections::HashMap, hash::Hash};

/// Exact-match occurrence counter.
///
/// Keys are counted in a hash map with no defined iteration order; the only
/// ordered view is [`FrequencyTable::sorted`], which sorts by key on read.
///
/// # Examples
///
/// ```
/// use snapzone_stats::frequency::FrequencyTable;
///
/// let mut table = FrequencyTable::new();
/// for category in ["W", "Y", "W", "FR"] {
///     table.add(category.to_owned());
/// }
/// assert_eq!(
///     table.sorted(),
///     vec![("FR".to_owned(), 1), ("W".to_owned(), 2), ("Y".to_owned(), 1)]
/// );
/// assert_eq!(table.total(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    counts: HashMap<K, u64>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<K> FrequencyTable<K>
where
    K: Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    #[must_use]
    pub fn get(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Returns `(key, count)` pairs in ascending key order.
    #[must_use]
    pub fn sorted(&self) -> Vec<(K, u64)>
    where
        K: Ord + Clone,
    {
        let mut entries = self
            .counts
            .iter()
            .map(|(k, c)| (k.clone(), *c))
            .collect::<Vec<_>>();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}

impl<K> Extend<K> for FrequencyTable<K>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::Reading;

    #[test]
    fn test_empty() {
        let table = FrequencyTable::<u32>::new();
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert!(table.sorted().is_empty());
    }

    #[test]
    fn test_numeric_keys_sort_by_value() {
        let mut table = FrequencyTable::new();
        table.extend([10.0, 2.0, 2.0, -1.0].map(Reading::Number));
        table.add(Reading::NotANumber);
        assert_eq!(
            table.sorted(),
            vec![
                (Reading::Number(-1.0), 1),
                (Reading::Number(2.0), 2),
                (Reading::Number(10.0), 1),
                (Reading::NotANumber, 1),
            ]
        );
    }

    #[test]
    fn test_string_keys_sort_as_strings() {
        let mut table = FrequencyTable::new();
        table.extend(["10", "9", "1"].map(str::to_owned));
        let keys = table.sorted().into_iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, ["1", "10", "9"]);
    }

    #[test]
    fn test_get_and_len() {
        let mut table = FrequencyTable::new();
        table.extend([1, 1, 1, 2]);
        assert_eq!(table.get(&1), 3);
        assert_eq!(table.get(&3), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 4);
    }
}
