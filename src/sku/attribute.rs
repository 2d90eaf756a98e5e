/// Attribute dimensions and their selectable values
///
/// Plain data. A dimension is one axis of product configuration (Color,
/// Size); its values are the options a shopper can tap. Value ids are unique
/// across the whole attribute set, not just within a dimension.

use serde::{Deserialize, Serialize};

/// Dimension identifier
pub type DimensionId = u32;

/// Attribute value identifier (globally unique)
pub type ValueId = u32;

/// Whether a value may currently be picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectableState {
    #[default]
    Selectable,
    NotSelectable,
}

/// One option within a dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: ValueId,
    pub label: String,
    /// Recomputed on every refresh
    #[serde(default)]
    pub selectable_state: SelectableState,
}

impl AttributeValue {
    pub fn new(id: ValueId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            selectable_state: SelectableState::Selectable,
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable_state == SelectableState::Selectable
    }
}

/// One axis of product configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDimension {
    pub id: DimensionId,
    pub name: String,
    pub values: Vec<AttributeValue>,
}

impl AttributeDimension {
    pub fn new(id: DimensionId, name: impl Into<String>, values: Vec<AttributeValue>) -> Self {
        Self {
            id,
            name: name.into(),
            values,
        }
    }

    /// Find a value of this dimension by id
    pub fn value(&self, id: ValueId) -> Option<&AttributeValue> {
        self.values.iter().find(|value| value.id == id)
    }

    pub fn contains(&self, id: ValueId) -> bool {
        self.value(id).is_some()
    }

    /// Ids of the values that may currently be picked
    pub fn selectable_ids(&self) -> Vec<ValueId> {
        self.values
            .iter()
            .filter(|value| value.is_selectable())
            .map(|value| value.id)
            .collect()
    }
}

/// Number of complete combinations the dimensions span
///
/// Widened so that oversized inputs can be reported instead of overflowing.
pub fn cartesian_size(dimensions: &[AttributeDimension]) -> u128 {
    if dimensions.is_empty() {
        return 0;
    }
    dimensions
        .iter()
        .map(|dimension| dimension.values.len() as u128)
        .fold(1u128, |acc, count| acc.saturating_mul(count))
}
