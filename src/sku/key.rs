//! Combination key codec
//!
//! A set of attribute-value ids is keyed by the ids sorted ascending and
//! joined with [`KEY_DELIMITER`]. Any permutation of the same set produces the
//! same key, which is what lets a sparse caller map line up with the dense
//! table.

use crate::error::{SkuError, SkuResult};
use crate::sku::ValueId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const KEY_DELIMITER: char = ';';

/// Canonical, order-independent key for a set of value ids
///
/// Deserialization goes through [`CombinationKey::parse`], so a stored
/// `"11;1"` comes back as `"1;11"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CombinationKey(String);

impl CombinationKey {
    /// Encode ids in any order
    pub fn encode(ids: &[ValueId]) -> Self {
        let mut sorted = ids.to_vec();
        sorted.sort_unstable();
        Self::from_sorted(&sorted)
    }

    /// Encode ids already sorted ascending
    fn from_sorted(ids: &[ValueId]) -> Self {
        let mut key = String::with_capacity(ids.len() * 4);
        for (index, id) in ids.iter().enumerate() {
            if index > 0 {
                key.push(KEY_DELIMITER);
            }
            key.push_str(&id.to_string());
        }
        Self(key)
    }

    /// Re-canonicalize a caller-built key such as `"11;1"`
    pub fn parse(raw: &str) -> SkuResult<Self> {
        let mut ids = Vec::new();
        for token in decode(raw) {
            let id = token.trim().parse::<ValueId>().map_err(|e| SkuError::MalformedKey {
                key: raw.to_string(),
                reason: format!("'{}': {}", token, e),
            })?;
            ids.push(id);
        }
        Ok(Self::encode(&ids))
    }

    /// Ids in ascending order
    pub fn ids(&self) -> Vec<ValueId> {
        decode(&self.0)
            .into_iter()
            .filter_map(|token| token.parse().ok())
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of ids in the key
    pub fn arity(&self) -> usize {
        decode(&self.0).len()
    }
}

impl TryFrom<String> for CombinationKey {
    type Error = SkuError;

    fn try_from(raw: String) -> SkuResult<Self> {
        Self::parse(&raw)
    }
}

impl From<CombinationKey> for String {
    fn from(key: CombinationKey) -> Self {
        key.0
    }
}

impl fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a key into its id tokens
pub fn decode(key: &str) -> Vec<&str> {
    if key.is_empty() {
        return Vec::new();
    }
    key.split(KEY_DELIMITER).collect()
}

/// Every combination of size 1..N-1 drawn from `items`
///
/// The full set and the empty set are excluded, so N items yield 2^N - 2
/// combinations. Each size is walked with an inclusion-flag vector stepped to
/// the next combination in lexicographic order rather than by recursion.
pub fn all_sub_combinations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let n = items.len();
    let mut result = Vec::new();
    if n < 2 {
        return result;
    }

    for size in 1..n {
        let mut flags = vec![false; n];
        flags[..size].fill(true);

        loop {
            result.push(
                items
                    .iter()
                    .zip(&flags)
                    .filter(|(_, included)| **included)
                    .map(|(item, _)| item.clone())
                    .collect(),
            );

            if !next_flags(&mut flags) {
                break;
            }
        }
    }

    result
}

/// Step the flags to the next combination of the same size
///
/// Finds the lowest `i` with `flags[i]` set and `flags[i + 1]` clear, moves
/// that bit up, and packs the bits below `i` into the lowest positions.
/// Returns false once every set bit sits at the top end.
fn next_flags(flags: &mut [bool]) -> bool {
    let pivot = match (0..flags.len().saturating_sub(1)).find(|&i| flags[i] && !flags[i + 1]) {
        Some(i) => i,
        None => return false,
    };

    flags[pivot] = false;
    flags[pivot + 1] = true;

    let ones_below = flags[..pivot].iter().filter(|flag| **flag).count();
    for (index, flag) in flags[..pivot].iter_mut().enumerate() {
        *flag = index < ones_below;
    }

    true
}
