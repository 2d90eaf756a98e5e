//! Selection state tracking
//!
//! Holds at most one chosen value per dimension and answers, for every value
//! of every dimension, whether picking it still leads to something in stock.
//! No membership validation happens here; `SkuEngine` does that.

use crate::sku::attribute::{AttributeDimension, DimensionId, SelectableState, ValueId};
use crate::sku::builder::LookupTable;
use crate::sku::key::CombinationKey;
use crate::sku::record::CombinationRecord;
use std::collections::BTreeMap;
use std::iter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeMap<DimensionId, ValueId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `dimension`, replacing any earlier choice
    pub fn select(&mut self, dimension: DimensionId, value: ValueId) {
        self.selected.insert(dimension, value);
    }

    /// Clear the choice for one dimension, returning it
    pub fn unselect(&mut self, dimension: DimensionId) -> Option<ValueId> {
        self.selected.remove(&dimension)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self, dimension: DimensionId) -> Option<ValueId> {
        self.selected.get(&dimension).copied()
    }

    pub fn is_selected(&self, dimension: DimensionId, value: ValueId) -> bool {
        self.selected(dimension) == Some(value)
    }

    pub fn is_any_selected(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_fully_selected(&self, dimension_count: usize) -> bool {
        self.selected.len() == dimension_count
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// (dimension, value) pairs ordered by dimension id
    pub fn iter(&self) -> impl Iterator<Item = (DimensionId, ValueId)> + '_ {
        self.selected.iter().map(|(dimension, value)| (*dimension, *value))
    }

    pub fn selected_ids(&self) -> Vec<ValueId> {
        self.selected.values().copied().collect()
    }

    /// Key of the current selection
    pub fn key(&self) -> CombinationKey {
        CombinationKey::encode(&self.selected_ids())
    }

    /// Ids of the selection with `value` substituted in for `dimension`
    fn hypothetical_ids(&self, dimension: DimensionId, value: ValueId) -> Vec<ValueId> {
        self.selected
            .iter()
            .filter(|(id, _)| **id != dimension)
            .map(|(_, value)| *value)
            .chain(iter::once(value))
            .collect()
    }

    /// Recompute every value's selectable state
    ///
    /// With nothing chosen in other dimensions a value is selectable when its
    /// own single-value aggregate has stock. Once another dimension is pinned,
    /// the value is judged by the combination it would form with the current
    /// choices instead.
    pub fn refresh_state_data<T>(&self, dimensions: &mut [AttributeDimension], table: &LookupTable<T>) {
        for dimension in dimensions.iter_mut() {
            let dimension_id = dimension.id;
            let others_selected = self.selected.keys().any(|id| *id != dimension_id);

            for value in dimension.values.iter_mut() {
                let key = if others_selected {
                    CombinationKey::encode(&self.hypothetical_ids(dimension_id, value.id))
                } else {
                    CombinationKey::encode(&[value.id])
                };

                value.selectable_state = match resolve(table, &key) {
                    Some(record) if record.is_available() => SelectableState::Selectable,
                    _ => SelectableState::NotSelectable,
                };
            }
        }
    }

    /// Record for the current (full or partial) selection
    pub fn get_model<'a, T>(&self, table: &'a LookupTable<T>) -> Option<&'a CombinationRecord<T>> {
        if self.selected.is_empty() {
            return None;
        }
        resolve(table, &self.key())
    }
}

/// Table lookup for a selection-derived key
///
/// The table covers every legitimate selection, so a miss means an id that is
/// not part of the attribute set.
fn resolve<'a, T>(table: &'a LookupTable<T>, key: &CombinationKey) -> Option<&'a CombinationRecord<T>> {
    let record = table.get(key);
    if record.is_none() {
        log::warn!("Selection key '{}' not found in SKU lookup table", key);
    }
    debug_assert!(record.is_some(), "selection key '{}' missing from lookup table", key);
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sku::attribute::AttributeValue;
    use crate::sku::builder::{build_lookup_table, SparseModels};

    const COLOR: DimensionId = 100;
    const SIZE: DimensionId = 200;

    fn dimensions() -> Vec<AttributeDimension> {
        vec![
            AttributeDimension::new(
                COLOR,
                "Color",
                vec![AttributeValue::new(1, "Red"), AttributeValue::new(2, "Blue")],
            ),
            AttributeDimension::new(
                SIZE,
                "Size",
                vec![AttributeValue::new(10, "S"), AttributeValue::new(11, "L")],
            ),
        ]
    }

    fn table() -> LookupTable<()> {
        let mut models = SparseModels::default();
        models.insert(CombinationKey::encode(&[1, 10]), CombinationRecord::new(5, 9.99));
        models.insert(CombinationKey::encode(&[1, 11]), CombinationRecord::new(0, 9.99));
        models.insert(CombinationKey::encode(&[2, 10]), CombinationRecord::new(3, 8.5));
        models.insert(CombinationKey::encode(&[2, 11]), CombinationRecord::new(0, 8.5));
        build_lookup_table(&dimensions(), &models)
    }

    fn states(dimensions: &[AttributeDimension]) -> Vec<(ValueId, SelectableState)> {
        dimensions
            .iter()
            .flat_map(|dimension| dimension.values.iter())
            .map(|value| (value.id, value.selectable_state))
            .collect()
    }

    #[test]
    fn test_select_replaces_previous_choice() {
        let mut selection = SelectionState::new();
        selection.select(COLOR, 1);
        selection.select(COLOR, 2);
        assert_eq!(selection.selected(COLOR), Some(2));
        assert_eq!(selection.len(), 1);
        assert!(selection.is_selected(COLOR, 2));
        assert!(!selection.is_selected(COLOR, 1));
    }

    #[test]
    fn test_unselect_only_clears_one_dimension() {
        let mut selection = SelectionState::new();
        selection.select(COLOR, 1);
        selection.select(SIZE, 10);
        assert!(selection.is_fully_selected(2));

        assert_eq!(selection.unselect(COLOR), Some(1));
        assert_eq!(selection.unselect(COLOR), None);
        assert!(selection.is_any_selected());
        assert!(!selection.is_fully_selected(2));
        assert_eq!(selection.selected(SIZE), Some(10));
    }

    #[test]
    fn test_refresh_without_selection_uses_standalone_stock() {
        let mut dims = dimensions();
        SelectionState::new().refresh_state_data(&mut dims, &table());
        assert_eq!(
            states(&dims),
            vec![
                (1, SelectableState::Selectable),
                (2, SelectableState::Selectable),
                (10, SelectableState::Selectable),
                (11, SelectableState::NotSelectable),
            ]
        );
    }

    #[test]
    fn test_refresh_narrows_by_other_dimensions() {
        let mut dims = dimensions();
        let mut selection = SelectionState::new();
        selection.select(COLOR, 1);
        selection.refresh_state_data(&mut dims, &table());

        let states = states(&dims);
        // Own dimension: only other selections count, so Red/Blue keep their baseline
        assert_eq!(states[0], (1, SelectableState::Selectable));
        assert_eq!(states[1], (2, SelectableState::Selectable));
        assert_eq!(states[2], (10, SelectableState::Selectable));
        assert_eq!(states[3], (11, SelectableState::NotSelectable));
    }

    #[test]
    fn test_refresh_checks_substituted_combination() {
        let mut models = SparseModels::default();
        models.insert(CombinationKey::encode(&[1, 10]), CombinationRecord::<()>::new(2, 1.0));
        models.insert(CombinationKey::encode(&[2, 11]), CombinationRecord::new(4, 1.0));
        let table = build_lookup_table(&dimensions(), &models);

        let mut dims = dimensions();
        let mut selection = SelectionState::new();
        selection.select(COLOR, 1);
        selection.select(SIZE, 10);
        selection.refresh_state_data(&mut dims, &table);

        // Blue pairs with S (sold out), L pairs with Red (sold out)
        assert_eq!(
            states(&dims),
            vec![
                (1, SelectableState::Selectable),
                (2, SelectableState::NotSelectable),
                (10, SelectableState::Selectable),
                (11, SelectableState::NotSelectable),
            ]
        );
    }

    #[test]
    fn test_get_model() {
        let table = table();
        let mut selection = SelectionState::new();
        assert!(selection.get_model(&table).is_none());

        selection.select(COLOR, 2);
        let partial = selection.get_model(&table).unwrap();
        assert_eq!(partial.stock_list, vec![3, 0]);

        selection.select(SIZE, 10);
        let complete = selection.get_model(&table).unwrap();
        assert_eq!(complete.stock, 3);
        assert_eq!(complete.price, 8.5);
    }
}
