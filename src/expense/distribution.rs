//! Price distribution buckets

use crate::error::{GroceryError, GroceryResult};
use crate::models::{GroceryItem, Money};

/// Ascending lower edges of price buckets
///
/// With edges `[0, 2, 5]` the buckets are `[0, 2)`, `[2, 5)` and `5+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBuckets {
    edges: Vec<Money>,
}

impl PriceBuckets {
    /// Edges must be non-empty, start at zero and strictly increase
    pub fn new(edges: Vec<Money>) -> GroceryResult<Self> {
        match edges.first() {
            None => {
                return Err(GroceryError::Config(
                    "price buckets need at least one edge".into(),
                ))
            }
            Some(first) if !first.is_zero() => {
                return Err(GroceryError::Config(format!(
                    "price buckets must start at 0, got {}",
                    first
                )))
            }
            Some(_) => {}
        }

        if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(GroceryError::Config(
                "price bucket edges must be strictly increasing".into(),
            ));
        }

        Ok(Self { edges })
    }

    pub fn edges(&self) -> &[Money] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Index of the bucket a price falls into
    pub fn index_of(&self, price: Money) -> usize {
        self.edges
            .iter()
            .rposition(|edge| price >= *edge)
            .unwrap_or(0)
    }

    /// Display label, e.g. `$2.00-$5.00` or `$20.00+`
    pub fn label(&self, index: usize) -> String {
        match (self.edges.get(index), self.edges.get(index + 1)) {
            (Some(low), Some(high)) => format!("{}-{}", low, high),
            (Some(low), None) => format!("{}+", low),
            _ => String::new(),
        }
    }
}

/// Count items per price bucket, every bucket reported in ascending order
pub fn price_distribution<'a>(
    items: impl IntoIterator<Item = &'a GroceryItem>,
    buckets: &PriceBuckets,
) -> Vec<(String, usize)> {
    let mut counts = vec![0usize; buckets.len()];
    for item in items {
        counts[buckets.index_of(item.price_per_unit)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (buckets.label(i), count))
        .collect()
}
