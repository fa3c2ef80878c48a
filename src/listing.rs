//! Deterministic ordering and ephemeral indices.
//!
//! The object graph is an unordered map, so records come out of the resolvers in arbitrary order.
//! A [`Listing`] sorts them by a per-type key and numbers them from 0. The numbers are only
//! meaningful against the listing that assigned them.

use crate::{Error, Result};

/// Provides the ordering key of a record.
pub trait SortKey {
    /// The primary key; compared lexicographically.
    fn sort_key(&self) -> &str;

    /// The record's object path, used to break ties between equal keys.
    fn path(&self) -> &str;
}

/// An ordered list of records, indexed by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    records: Vec<T>,
}

impl<T: SortKey> Listing<T> {
    /// Orders `records` by [`SortKey::sort_key`], then by path.
    pub fn new(mut records: Vec<T>) -> Self {
        records.sort_by(|a, b| {
            a.sort_key()
                .cmp(b.sort_key())
                .then_with(|| a.path().cmp(b.path()))
        });
        Self { records }
    }
}

impl<T> Listing<T> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Yields every record together with its index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.records.iter().enumerate()
    }

    /// Returns the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorKind::InvalidSelection`][crate::ErrorKind::InvalidSelection] error if
    /// `index` is negative or not smaller than the length of the listing.
    pub fn select(&self, index: i64) -> Result<&T> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.records.get(i))
            .ok_or_else(|| {
                Error::invalid_selection(format!(
                    "{} is out of range (0..{})",
                    index,
                    self.records.len()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Rec(&'static str, &'static str);

    impl SortKey for Rec {
        fn sort_key(&self) -> &str {
            self.0
        }

        fn path(&self) -> &str {
            self.1
        }
    }

    #[test]
    fn sorted_by_key() {
        let listing = Listing::new(vec![Rec("hci1", "/b"), Rec("hci0", "/a"), Rec("hci10", "/c")]);
        let keys = listing.iter().map(|(_, r)| r.0).collect::<Vec<_>>();
        assert_eq!(keys, ["hci0", "hci1", "hci10"]);
    }

    #[test]
    fn independent_of_input_order() {
        let recs = vec![
            Rec("CC", "/x/3"),
            Rec("AA", "/x/1"),
            Rec("BB", "/x/2"),
            Rec("AA", "/x/0"),
            Rec("", "/x/4"),
        ];
        let mut reversed = recs.clone();
        reversed.reverse();
        let mut rotated = recs.clone();
        rotated.rotate_left(2);

        let expected = Listing::new(recs);
        assert_eq!(Listing::new(reversed), expected);
        assert_eq!(Listing::new(rotated), expected);

        let order = expected.iter().map(|(i, r)| (i, r.1)).collect::<Vec<_>>();
        assert_eq!(
            order,
            [(0, "/x/4"), (1, "/x/0"), (2, "/x/1"), (3, "/x/2"), (4, "/x/3")]
        );
    }

    #[test]
    fn select_bounds() {
        let listing = Listing::new(vec![Rec("a", "/a"), Rec("b", "/b")]);
        assert_eq!(listing.select(0).unwrap(), &Rec("a", "/a"));
        assert_eq!(listing.select(1).unwrap(), &Rec("b", "/b"));

        for index in [2, -1, i64::MIN, i64::MAX] {
            let err = listing.select(index).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidSelection);
        }
        assert_eq!(
            listing.select(2).unwrap_err().to_string(),
            "2 is out of range (0..2)"
        );

        let empty = Listing::<Rec>::new(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(
            empty.select(0).unwrap_err().kind(),
            ErrorKind::InvalidSelection
        );
    }
}
