/// Serializable catalog input
///
/// A catalog document carries the attribute dimensions and the complete SKU
/// records in one place, so a data source can hand the engine plain JSON.

use crate::error::{SkuErrorContext, SkuResult};
use crate::sku::attribute::{AttributeDimension, ValueId};
use crate::sku::key::CombinationKey;
use crate::sku::record::CombinationRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One complete SKU: the value ids it combines plus stock and price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuEntry<T> {
    pub ids: Vec<ValueId>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub price: f64,
    pub payload: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuCatalog<T> {
    pub dimensions: Vec<AttributeDimension>,
    #[serde(default = "Vec::new")]
    pub skus: Vec<SkuEntry<T>>,
}

impl<T: DeserializeOwned> SkuCatalog<T> {
    pub fn from_json_str(raw: &str) -> SkuResult<Self> {
        serde_json::from_str(raw).catalog_context("invalid catalog JSON")
    }

    pub fn load(path: impl AsRef<Path>) -> SkuResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }
}

impl<T> SkuCatalog<T> {
    /// Split into dimensions and canonically keyed records
    pub fn into_parts(self) -> (Vec<AttributeDimension>, Vec<(CombinationKey, CombinationRecord<T>)>) {
        let models = self
            .skus
            .into_iter()
            .map(|entry| {
                let mut record = CombinationRecord::new(entry.stock, entry.price);
                record.payload = entry.payload;
                (CombinationKey::encode(&entry.ids), record)
            })
            .collect();
        (self.dimensions, models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkuError;

    const CATALOG: &str = r#"{
        "dimensions": [
            {"id": 1, "name": "Color", "values": [{"id": 1, "label": "Red"}, {"id": 2, "label": "Blue"}]},
            {"id": 2, "name": "Size", "values": [{"id": 10, "label": "S"}, {"id": 11, "label": "L"}]}
        ],
        "skus": [
            {"ids": [10, 1], "stock": 5, "price": 9.99, "payload": "RED-S"},
            {"ids": [2, 10], "stock": 3, "price": 8.5}
        ]
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog: SkuCatalog<String> = SkuCatalog::from_json_str(CATALOG).unwrap();
        assert_eq!(catalog.dimensions.len(), 2);
        assert_eq!(catalog.skus.len(), 2);
        assert_eq!(catalog.skus[1].payload, None);

        let (dimensions, models) = catalog.into_parts();
        assert_eq!(dimensions[1].values[1].label, "L");
        assert_eq!(models[0].0.as_str(), "1;10");
        assert_eq!(models[0].1.payload.as_deref(), Some("RED-S"));
        assert_eq!(models[1].1.stock, 3);
    }

    #[test]
    fn test_missing_skus_defaults_to_empty() {
        let catalog: SkuCatalog<()> =
            SkuCatalog::from_json_str(r#"{"dimensions": []}"#).unwrap();
        assert!(catalog.skus.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let result = SkuCatalog::<()>::from_json_str("{\"dimensions\": 3}");
        assert!(matches!(result, Err(SkuError::Catalog(_))));
    }
}
