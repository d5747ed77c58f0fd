use std::collections::BTreeSet;

use crate::element::Element;

/// Indices of a buffer that failed a predicate.
///
/// `last` is the largest failing index, not a container length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureSet {
    len: usize,
    failed: BTreeSet<usize>,
}

impl FailureSet {
    fn new(len: usize) -> Self {
        Self {
            len,
            failed: BTreeSet::new(),
        }
    }

    /// Length of the scanned buffer.
    pub fn domain_len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn count(&self) -> usize {
        self.failed.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.failed.contains(&index)
    }

    pub fn first(&self) -> Option<usize> {
        self.failed.first().copied()
    }

    pub fn last(&self) -> Option<usize> {
        self.failed.last().copied()
    }

    /// Failing indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.failed.iter().copied()
    }
}

/// Evaluate `predicate(i, actual[i])` for every index in ascending order.
///
/// Never short-circuits; the predicate sees each index exactly once.
pub fn scan<T, P>(actual: &[T], mut predicate: P) -> FailureSet
where
    T: Element,
    P: FnMut(usize, T) -> bool,
{
    let mut failures = FailureSet::new(actual.len());
    for (i, &value) in actual.iter().enumerate() {
        if !predicate(i, value) {
            failures.failed.insert(i);
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_pass() {
        let set = scan(&[1u32, 2, 3], |_, _| true);
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
        assert_eq!(set.last(), None);
        assert_eq!(set.domain_len(), 3);
    }

    #[test]
    fn test_records_every_failure() {
        let set = scan(&[0u8, 9, 2, 9, 4], |_, v| v != 9);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(set.first(), Some(1));
        assert_eq!(set.last(), Some(3));
        assert_eq!(set.count(), 2);
        assert!(set.contains(3));
        assert!(!set.contains(4));
    }

    #[test]
    fn test_visits_each_index_once_in_order() {
        let mut seen = Vec::new();
        let _ = scan(&[5i16; 6], |i, _| {
            seen.push(i);
            i % 2 == 0
        });
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_buffer() {
        let empty: [f32; 0] = [];
        let set = scan(&empty, |_, _| false);
        assert!(set.is_empty());
    }
}
