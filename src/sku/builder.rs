/// Lookup table construction
///
/// Two passes, run once per initialization:
/// 1. `densify` walks the cartesian product of all dimensions and fills in a
///    zero-stock placeholder for every complete combination the caller left
///    out.
/// 2. `expand_partials` folds every complete combination into each of its
///    proper sub-combinations so that any partial selection resolves with a
///    single hash lookup.
///
/// The cost is exponential in the dimension count; callers bound it through
/// `SkuConfig`.

use crate::sku::attribute::{cartesian_size, AttributeDimension};
use crate::sku::key::{all_sub_combinations, CombinationKey};
use crate::sku::record::CombinationRecord;
use crate::sku::ValueId;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Sparse caller input: complete combinations only
pub type SparseModels<T> = FxHashMap<CombinationKey, CombinationRecord<T>>;

/// Complete combinations in cartesian walk order
pub type DenseModels<T> = Vec<(CombinationKey, CombinationRecord<T>)>;

/// Precomputed table of complete and partial combinations
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable<T> {
    entries: FxHashMap<CombinationKey, CombinationRecord<T>>,
    complete_keys: Vec<CombinationKey>,
    dimension_count: usize,
}

impl<T> Default for LookupTable<T> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
            complete_keys: Vec::new(),
            dimension_count: 0,
        }
    }
}

impl<T> LookupTable<T> {
    pub fn get(&self, key: &CombinationKey) -> Option<&CombinationRecord<T>> {
        self.entries.get(key)
    }

    /// Look up by ids in any order
    pub fn get_ids(&self, ids: &[ValueId]) -> Option<&CombinationRecord<T>> {
        self.entries.get(&CombinationKey::encode(ids))
    }

    pub fn contains(&self, key: &CombinationKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Total entries, complete and partial
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of complete combinations (the cartesian product size)
    pub fn complete_len(&self) -> usize {
        self.complete_keys.len()
    }

    /// Complete combination keys in cartesian walk order
    pub fn complete_keys(&self) -> &[CombinationKey] {
        &self.complete_keys
    }

    pub fn is_complete(&self, key: &CombinationKey) -> bool {
        key.arity() == self.dimension_count && self.entries.contains_key(key)
    }

    pub fn dimension_count(&self) -> usize {
        self.dimension_count
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CombinationKey, &CombinationRecord<T>)> {
        self.entries.iter()
    }
}

/// Fill in every complete combination of the dimensions
///
/// Records present in `sparse` are copied; absent combinations get a
/// placeholder. The walk is seeded by each value of the first dimension. A
/// dimension without values empties the product.
pub fn densify<T: Clone>(
    dimensions: &[AttributeDimension],
    sparse: &SparseModels<T>,
) -> DenseModels<T> {
    let (first, rest) = match dimensions.split_first() {
        Some(split) => split,
        None => return Vec::new(),
    };

    let capacity = usize::try_from(cartesian_size(dimensions)).unwrap_or(usize::MAX);
    let mut dense = Vec::with_capacity(capacity.min(1 << 20));
    let mut ids = Vec::with_capacity(dimensions.len());

    for value in &first.values {
        ids.push(value.id);
        walk(rest, &mut ids, sparse, &mut dense);
        ids.pop();
    }

    dense
}

fn walk<T: Clone>(
    remaining: &[AttributeDimension],
    ids: &mut Vec<ValueId>,
    sparse: &SparseModels<T>,
    dense: &mut DenseModels<T>,
) {
    match remaining.split_first() {
        None => {
            let key = CombinationKey::encode(ids);
            let record = match sparse.get(&key) {
                Some(record) => {
                    let mut record = record.clone();
                    record.stock_list.clear();
                    record.price_list.clear();
                    record
                }
                None => CombinationRecord::placeholder(),
            };
            dense.push((key, record));
        }
        Some((dimension, rest)) => {
            for value in &dimension.values {
                ids.push(value.id);
                walk(rest, ids, sparse, dense);
                ids.pop();
            }
        }
    }
}

/// Expand complete combinations into the partial-combination table
pub fn expand_partials<T: Clone>(dense: DenseModels<T>) -> LookupTable<T> {
    let dimension_count = dense.first().map(|(key, _)| key.arity()).unwrap_or(0);

    let mut entries: FxHashMap<CombinationKey, CombinationRecord<T>> =
        FxHashMap::with_capacity_and_hasher(dense.len(), Default::default());

    for (key, record) in &dense {
        for subset in all_sub_combinations(&key.ids()) {
            match entries.entry(CombinationKey::encode(&subset)) {
                Entry::Occupied(mut aggregate) => {
                    aggregate.get_mut().accumulate(record.stock, record.price);
                }
                Entry::Vacant(slot) => {
                    slot.insert(CombinationRecord::aggregate_from(record));
                }
            }
        }
    }

    let complete_keys = dense.iter().map(|(key, _)| key.clone()).collect();
    // Partial keys have fewer ids than complete ones, so nothing is overwritten
    entries.extend(dense);

    LookupTable {
        entries,
        complete_keys,
        dimension_count,
    }
}

/// Densify then expand; the one-time precomputation behind `initialize`
pub fn build_lookup_table<T: Clone>(
    dimensions: &[AttributeDimension],
    sparse: &SparseModels<T>,
) -> LookupTable<T> {
    let mut table = expand_partials(densify(dimensions, sparse));
    table.dimension_count = dimensions.len();

    for key in sparse.keys() {
        if !table.is_complete(key) {
            log::warn!("Ignoring SKU record '{}': not a complete combination of the attributes", key);
        }
    }

    log::debug!(
        "Built SKU lookup table: {} dimensions, {} complete combinations, {} partial keys",
        dimensions.len(),
        table.complete_len(),
        table.len() - table.complete_len()
    );

    table
}
