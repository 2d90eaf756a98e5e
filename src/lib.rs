pub mod config;
pub mod error;
pub mod sku;

pub use config::SkuConfig;
pub use error::{SkuError, SkuResult};
pub use sku::{
    AttributeDimension, AttributeValue, CombinationKey, CombinationRecord, DimensionId,
    LookupTable, SelectableState, SelectionState, SkuCatalog, SkuEngine, ValueId,
};
