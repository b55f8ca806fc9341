use std::ops::{BitAnd, BitOr};

use smallvec::SmallVec;

use crate::TermId;

/// A sorted set of [`TermId`]s
///
/// Each term can occur only once in the group, so a `TermGroup` is
/// deduplicated by construction. It is used for the parents and children of
/// a term as well as for the (deduplicated) term set of an individual.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermGroup {
    ids: SmallVec<[TermId; 8]>,
}

impl TermGroup {
    /// Constructs a new, empty [`TermGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`TermGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`TermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`TermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`TermId`] to the group
    ///
    /// Returns whether the `TermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `TermId`, true is returned.
    /// - If the group already contained this `TermId`, false is returned.
    pub fn insert(&mut self, id: TermId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Adds a new [`TermId`] to the end of the group without checking
    /// uniqueness or sort order
    ///
    /// Callers must guarantee that `id` is larger than every ID already
    /// present, otherwise `contains` lookups will silently fail.
    fn insert_unchecked(&mut self, id: TermId) {
        self.ids.push(id);
    }

    /// Returns `true` if the group contains the [`TermId`]
    pub fn contains(&self, id: &TermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an Iterator of the [`TermId`]s inside the group
    pub fn iter(&self) -> TermIds<'_> {
        TermIds::new(self.ids.iter())
    }
}

impl FromIterator<TermId> for TermGroup {
    fn from_iter<T: IntoIterator<Item = TermId>>(iter: T) -> Self {
        let mut group = TermGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl From<Vec<TermId>> for TermGroup {
    fn from(ids: Vec<TermId>) -> Self {
        ids.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a TermGroup {
    type Item = TermId;
    type IntoIter = TermIds<'a>;

    fn into_iter(self) -> TermIds<'a> {
        self.iter()
    }
}

/// An iterator over [`TermId`]s
pub struct TermIds<'a> {
    inner: std::slice::Iter<'a, TermId>,
}

impl<'a> TermIds<'a> {
    fn new(inner: std::slice::Iter<'a, TermId>) -> Self {
        Self { inner }
    }
}

impl Iterator for TermIds<'_> {
    type Item = TermId;
    fn next(&mut self) -> Option<TermId> {
        self.inner.next().copied()
    }
}

impl BitOr for &TermGroup {
    type Output = TermGroup;

    fn bitor(self, rhs: &TermGroup) -> TermGroup {
        let mut group = TermGroup::with_capacity(self.len() + rhs.len());
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        for id in &large.ids {
            group.insert_unchecked(*id);
        }
        for id in &small.ids {
            group.insert(*id);
        }
        group
    }
}

impl BitAnd for &TermGroup {
    type Output = TermGroup;

    fn bitand(self, rhs: &TermGroup) -> TermGroup {
        let mut group = TermGroup::with_capacity(self.len());
        let (large, small) = if self.len() > rhs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };

        for id in &small.ids {
            if large.contains(id) {
                group.insert_unchecked(*id);
            }
        }
        group
    }
}
