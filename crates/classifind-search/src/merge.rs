//! Order-preserving union and reordering of result lists.

use std::collections::HashSet;

use classifind_core::ProductRecord;

use crate::key::key_of;

/// Concatenates `lists` in order, dropping any record whose key was already
/// emitted. Earlier lists win ties; records without a key are always kept.
#[must_use]
pub fn merge<I>(lists: I) -> Vec<ProductRecord>
where
    I: IntoIterator<Item = Vec<ProductRecord>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for list in lists {
        for record in list {
            match key_of(&record) {
                Some(key) => {
                    if seen.insert(key) {
                        merged.push(record);
                    }
                }
                None => merged.push(record),
            }
        }
    }

    merged
}

/// Moves records whose key appears in `priority_keys` to the front, keeping
/// `list` order within both partitions. Each priority key is consumed by its
/// first match.
#[must_use]
pub fn prioritize(list: Vec<ProductRecord>, priority_keys: &[String]) -> Vec<ProductRecord> {
    if priority_keys.is_empty() {
        return list;
    }

    let mut pending: HashSet<&str> = priority_keys.iter().map(String::as_str).collect();
    let mut front = Vec::new();
    let mut rest = Vec::new();

    for record in list {
        let hit = key_of(&record).is_some_and(|key| pending.remove(key.as_str()));
        if hit {
            front.push(record);
        } else {
            rest.push(record);
        }
    }

    front.extend(rest);
    front
}

/// Folds a fresh result set into the list already on display.
///
/// Displayed records keep their position and win duplicate keys; new records
/// are appended. When `priority_keys` is given (see region search), matching
/// records are then moved to the front.
#[must_use]
pub fn merge_into_current(
    existing: Vec<ProductRecord>,
    incoming: Vec<ProductRecord>,
    priority_keys: Option<&[String]>,
) -> Vec<ProductRecord> {
    let merged = merge([existing, incoming]);
    match priority_keys {
        Some(keys) => prioritize(merged, keys),
        None => merged,
    }
}
