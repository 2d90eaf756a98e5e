/// Stock/price records keyed by attribute combinations
///
/// Complete-combination records come from the caller or are zero-stock
/// placeholders. Partial-combination records are aggregates built during
/// expansion; their `stock_list`/`price_list` hold one entry per complete
/// combination consistent with the partial key.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRecord<T> {
    pub stock: u32,
    pub price: f64,
    pub payload: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stock_list: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_list: Vec<f64>,
}

impl<T> CombinationRecord<T> {
    pub fn new(stock: u32, price: f64) -> Self {
        Self {
            stock,
            price,
            payload: None,
            stock_list: Vec::new(),
            price_list: Vec::new(),
        }
    }

    pub fn with_payload(mut self, payload: T) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Zero-stock, zero-price stand-in for a combination the caller omitted
    pub fn placeholder() -> Self {
        Self::new(0, 0.0)
    }

    /// Start an aggregate for a partial key from one complete record
    ///
    /// A partial selection does not identify a single SKU, so the payload is
    /// not carried over.
    pub fn aggregate_from(record: &CombinationRecord<T>) -> Self {
        Self {
            stock: record.stock,
            price: record.price,
            payload: None,
            stock_list: vec![record.stock],
            price_list: vec![record.price],
        }
    }

    /// Fold another complete combination into this aggregate
    ///
    /// `stock` tracks the total across all folded combinations. `price` is
    /// the lowest price among in-stock combinations, or among all of them
    /// while none is in stock, so zero-price placeholders never undercut a
    /// real offer. The raw lists keep every entry.
    pub fn accumulate(&mut self, stock: u32, price: f64) {
        let had_stock = self.is_available();
        self.stock_list.push(stock);
        self.price_list.push(price);
        self.stock = self.stock.saturating_add(stock);

        match (had_stock, stock > 0) {
            (false, true) => self.price = price,
            (true, false) => {}
            _ => self.price = f64::min(self.price, price),
        }
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// True for partial-combination aggregates
    pub fn is_aggregate(&self) -> bool {
        !self.stock_list.is_empty()
    }

    pub fn min_price(&self) -> f64 {
        self.price_list.iter().copied().fold(self.price, f64::min)
    }

    pub fn max_price(&self) -> f64 {
        self.price_list.iter().copied().fold(self.price, f64::max)
    }

    /// (lowest, highest) price reachable from this combination
    pub fn price_range(&self) -> (f64, f64) {
        (self.min_price(), self.max_price())
    }

    /// Price range restricted to combinations that are in stock
    pub fn available_price_range(&self) -> Option<(f64, f64)> {
        if !self.is_aggregate() {
            return self.is_available().then_some((self.price, self.price));
        }

        self.stock_list
            .iter()
            .zip(&self.price_list)
            .filter(|(stock, _)| **stock > 0)
            .map(|(_, price)| *price)
            .fold(None, |range, price| match range {
                None => Some((price, price)),
                Some((low, high)) => Some((f64::min(low, price), f64::max(high, price))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let record: CombinationRecord<()> = CombinationRecord::placeholder();
        assert_eq!(record.stock, 0);
        assert_eq!(record.price, 0.0);
        assert!(!record.is_available());
        assert!(!record.is_aggregate());
    }

    #[test]
    fn test_aggregate_accumulation() {
        let first = CombinationRecord::new(5, 9.99).with_payload("SKU-RED-S");
        let mut aggregate = CombinationRecord::aggregate_from(&first);
        assert_eq!(aggregate.payload, None);

        aggregate.accumulate(0, 12.5);
        aggregate.accumulate(3, 7.0);

        assert_eq!(aggregate.stock_list, vec![5, 0, 3]);
        assert_eq!(aggregate.price_list, vec![9.99, 12.5, 7.0]);
        assert_eq!(aggregate.stock, 8);
        assert_eq!(aggregate.price, 7.0);
        assert_eq!(aggregate.price_range(), (7.0, 12.5));
    }

    #[test]
    fn test_available_price_range_skips_sold_out() {
        let mut aggregate = CombinationRecord::<()>::aggregate_from(&CombinationRecord::new(0, 1.0));
        aggregate.accumulate(2, 4.0);
        aggregate.accumulate(1, 6.0);
        assert_eq!(aggregate.available_price_range(), Some((4.0, 6.0)));

        let sold_out = CombinationRecord::<()>::new(0, 3.0);
        assert_eq!(sold_out.available_price_range(), None);
    }

    #[test]
    fn test_aggregate_price_ignores_sold_out_placeholders() {
        let mut aggregate = CombinationRecord::<()>::aggregate_from(&CombinationRecord::placeholder());
        assert_eq!(aggregate.price, 0.0);

        aggregate.accumulate(3, 5.0);
        aggregate.accumulate(0, 0.0);
        assert_eq!(aggregate.price, 5.0);
        assert_eq!(aggregate.price_list, vec![0.0, 5.0, 0.0]);
        assert_eq!(aggregate.available_price_range(), Some((5.0, 5.0)));

        aggregate.accumulate(1, 4.5);
        assert_eq!(aggregate.price, 4.5);
    }

    #[test]
    fn test_aggregate_price_falls_back_when_nothing_in_stock() {
        let mut aggregate = CombinationRecord::<()>::aggregate_from(&CombinationRecord::new(0, 8.0));
        aggregate.accumulate(0, 6.0);
        assert_eq!(aggregate.price, 6.0);
        assert_eq!(aggregate.available_price_range(), None);
    }

    #[test]
    fn test_lists_omitted_from_json_when_empty() {
        let record = CombinationRecord::new(2, 1.5).with_payload(42u32);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"stock":2,"price":1.5,"payload":42}"#);
    }
}
