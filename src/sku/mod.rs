/// SKU Combination Engine
///
/// Resolves product attribute selections (Color, Size, ...) against stock and
/// price. The full table of complete and partial combinations is computed once
/// at initialization; every selection change afterwards is answered with hash
/// lookups only.
///
/// Typical flow:
/// 1. `initialize` with the dimensions and the caller's complete SKU records
/// 2. `select` / `unselect` as the shopper taps values
/// 3. `refresh_state_data` to grey out values that lead nowhere
/// 4. `get_model` for the price/stock of the current selection

pub mod attribute;
pub mod builder;
pub mod catalog;
pub mod key;
pub mod record;
pub mod selection;

pub use attribute::{AttributeDimension, AttributeValue, DimensionId, SelectableState, ValueId};
pub use builder::{build_lookup_table, densify, expand_partials, LookupTable, SparseModels};
pub use catalog::{SkuCatalog, SkuEntry};
pub use key::{all_sub_combinations, CombinationKey, KEY_DELIMITER};
pub use record::CombinationRecord;
pub use selection::SelectionState;

use crate::config::SkuConfig;
use crate::error::{SkuError, SkuResult};
use rustc_hash::{FxHashMap, FxHashSet};

/// Public facade over the lookup table and the selection tracker
#[derive(Debug, Clone)]
pub struct SkuEngine<T> {
    config: SkuConfig,
    dimensions: Vec<AttributeDimension>,
    table: LookupTable<T>,
    selection: SelectionState,
}

impl<T> Default for SkuEngine<T> {
    fn default() -> Self {
        Self::new(SkuConfig::default())
    }
}

impl<T> SkuEngine<T> {
    pub fn new(config: SkuConfig) -> Self {
        Self {
            config,
            dimensions: Vec::new(),
            table: LookupTable::default(),
            selection: SelectionState::new(),
        }
    }

    pub fn config(&self) -> &SkuConfig {
        &self.config
    }

    pub fn dimensions(&self) -> &[AttributeDimension] {
        &self.dimensions
    }

    pub fn table(&self) -> &LookupTable<T> {
        &self.table
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Restore a saved selection from value ids
    ///
    /// Clears the current selection, then picks for each dimension the first
    /// of its values whose id appears in `value_ids`. Ids that match nothing
    /// are ignored.
    pub fn auto_select_attr(&mut self, value_ids: &[ValueId]) {
        self.selection.clear();
        for dimension in &self.dimensions {
            if let Some(value) = dimension.values.iter().find(|value| value_ids.contains(&value.id)) {
                self.selection.select(dimension.id, value.id);
            }
        }
    }

    /// Choose `value` for `dimension`
    pub fn select(&mut self, dimension: DimensionId, value: ValueId) -> SkuResult<()> {
        if self.config.validate_selection {
            self.check_membership(dimension, value)?;
        }
        self.selection.select(dimension, value);
        Ok(())
    }

    pub fn unselect(&mut self, dimension: DimensionId) -> Option<ValueId> {
        self.selection.unselect(dimension)
    }

    /// Tap semantics: select the value, or unselect it when already chosen
    ///
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, dimension: DimensionId, value: ValueId) -> SkuResult<bool> {
        if self.selection.is_selected(dimension, value) {
            self.selection.unselect(dimension);
            Ok(false)
        } else {
            self.select(dimension, value)?;
            Ok(true)
        }
    }

    pub fn is_any_selected(&self) -> bool {
        self.selection.is_any_selected()
    }

    pub fn is_all_selected(&self) -> bool {
        self.selection.is_fully_selected(self.dimensions.len())
    }

    pub fn selected_value_ids(&self) -> Vec<ValueId> {
        self.selection.selected_ids()
    }

    /// Dimensions still waiting for a choice, in declaration order
    pub fn unselected_dimensions(&self) -> Vec<&AttributeDimension> {
        self.dimensions
            .iter()
            .filter(|dimension| self.selection.selected(dimension.id).is_none())
            .collect()
    }

    /// Recompute every value's selectable state for the current selection
    pub fn refresh_state_data(&mut self) -> &[AttributeDimension] {
        self.selection.refresh_state_data(&mut self.dimensions, &self.table);
        &self.dimensions
    }

    /// Record for the current selection; `None` when nothing is selected
    pub fn get_model(&self) -> Option<&CombinationRecord<T>> {
        self.selection.get_model(&self.table)
    }

    fn check_membership(&self, dimension: DimensionId, value: ValueId) -> SkuResult<()> {
        let owner = self
            .dimensions
            .iter()
            .find(|candidate| candidate.id == dimension)
            .ok_or(SkuError::UnknownDimension { dimension })?;

        if owner.contains(value) {
            Ok(())
        } else {
            Err(SkuError::ValueNotInDimension { dimension, value })
        }
    }
}

impl<T: Clone> SkuEngine<T> {
    /// Validate input, build the lookup table and clear the selection
    ///
    /// On error the engine keeps its previous state.
    pub fn initialize<I>(&mut self, dimensions: Vec<AttributeDimension>, models: I) -> SkuResult<()>
    where
        I: IntoIterator<Item = (CombinationKey, CombinationRecord<T>)>,
    {
        validate_dimensions(&dimensions, &self.config)?;

        let mut sparse = SparseModels::default();
        for (key, record) in models {
            if !record.price.is_finite() || record.price < 0.0 {
                return Err(SkuError::InvalidPrice {
                    key: key.to_string(),
                    price: record.price,
                });
            }
            if sparse.insert(key.clone(), record).is_some() {
                log::warn!("Duplicate SKU record for '{}', keeping the last one", key);
            }
        }

        let table = build_lookup_table(&dimensions, &sparse);
        log::info!(
            "SKU engine initialized: {} dimensions, {} records supplied, {} table entries",
            dimensions.len(),
            sparse.len(),
            table.len()
        );

        self.dimensions = dimensions;
        self.table = table;
        self.selection.clear();
        Ok(())
    }

    pub fn initialize_from_catalog(&mut self, catalog: SkuCatalog<T>) -> SkuResult<()> {
        let (dimensions, models) = catalog.into_parts();
        self.initialize(dimensions, models)
    }
}

/// Reject input that would silently corrupt the table
fn validate_dimensions(dimensions: &[AttributeDimension], config: &SkuConfig) -> SkuResult<()> {
    if dimensions.len() > config.max_dimensions {
        return Err(SkuError::TooManyDimensions {
            count: dimensions.len(),
            limit: config.max_dimensions,
        });
    }

    let mut dimension_ids = FxHashSet::default();
    let mut owners: FxHashMap<ValueId, DimensionId> = FxHashMap::default();

    for dimension in dimensions {
        if !dimension_ids.insert(dimension.id) {
            return Err(SkuError::DuplicateDimensionId { dimension: dimension.id });
        }
        if dimension.values.is_empty() {
            return Err(SkuError::EmptyDimension {
                dimension: dimension.id,
                name: dimension.name.clone(),
            });
        }
        for value in &dimension.values {
            if let Some(first) = owners.insert(value.id, dimension.id) {
                return Err(SkuError::DuplicateValueId {
                    value: value.id,
                    first,
                    second: dimension.id,
                });
            }
        }
    }

    let combinations = attribute::cartesian_size(dimensions);
    if combinations > config.max_combinations as u128 {
        return Err(SkuError::TooManyCombinations {
            count: combinations,
            limit: config.max_combinations,
        });
    }

    Ok(())
}
