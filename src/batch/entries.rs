//! Keyed-entry view over sequences and maps.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A collection that can be taken apart into ordered `(key, value)` entries
/// and put back together with new values.
///
/// Sequences use the element position as key; maps use their own keys.
/// `rebuild` receives entries in the order `into_entries` produced them
/// (possibly with some removed) and must keep that order where the target
/// collection has one.
pub trait Entries: Sized {
    type Key;
    type Value;
    type Rebuilt<U>;

    fn into_entries(self) -> Vec<(Self::Key, Self::Value)>;

    fn rebuild<U>(entries: Vec<(Self::Key, U)>) -> Self::Rebuilt<U>;
}

impl<T> Entries for Vec<T> {
    type Key = usize;
    type Value = T;
    type Rebuilt<U> = Vec<U>;

    fn into_entries(self) -> Vec<(usize, T)> {
        self.into_iter().enumerate().collect()
    }

    fn rebuild<U>(entries: Vec<(usize, U)>) -> Vec<U> {
        entries.into_iter().map(|(_, v)| v).collect()
    }
}

/// Borrowed sequences hand out `&T`, leaving the caller's data untouched.
impl<'a, T> Entries for &'a [T] {
    type Key = usize;
    type Value = &'a T;
    type Rebuilt<U> = Vec<U>;

    fn into_entries(self) -> Vec<(usize, &'a T)> {
        self.iter().enumerate().collect()
    }

    fn rebuild<U>(entries: Vec<(usize, U)>) -> Vec<U> {
        entries.into_iter().map(|(_, v)| v).collect()
    }
}

impl<K, V, S> Entries for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    type Key = K;
    type Value = V;
    type Rebuilt<U> = HashMap<K, U, S>;

    fn into_entries(self) -> Vec<(K, V)> {
        self.into_iter().collect()
    }

    fn rebuild<U>(entries: Vec<(K, U)>) -> HashMap<K, U, S> {
        entries.into_iter().collect()
    }
}

impl<K: Ord, V> Entries for BTreeMap<K, V> {
    type Key = K;
    type Value = V;
    type Rebuilt<U> = BTreeMap<K, U>;

    fn into_entries(self) -> Vec<(K, V)> {
        self.into_iter().collect()
    }

    fn rebuild<U>(entries: Vec<(K, U)>) -> BTreeMap<K, U> {
        entries.into_iter().collect()
    }
}
