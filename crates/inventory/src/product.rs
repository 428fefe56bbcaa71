use serde::{Deserialize, Serialize};

use stockroom_core::Money;

use crate::catalog::ItemId;

/// A row on the inventory page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryProduct {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub stock: u32,
    pub price: Money,
}

impl InventoryProduct {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: impl Into<String>,
        stock: u32,
        price: Money,
    ) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            category: category.into(),
            stock,
            price,
        }
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.stock)
    }

    /// Case-insensitive substring match against name or category.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

/// Products listed on the inventory page.
pub fn sample_products() -> Vec<InventoryProduct> {
    vec![
        InventoryProduct::new(1, "Product A", "Electronics", 50, Money::from_cents(9999)),
        InventoryProduct::new(2, "Product B", "Clothing", 100, Money::from_cents(4999)),
        InventoryProduct::new(3, "Product C", "Home", 25, Money::from_cents(14999)),
    ]
}

/// Stock badge shown next to a product's stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    /// More than 50 units.
    Healthy,
    /// 11 to 50 units.
    Low,
    /// 10 units or fewer.
    Critical,
}

impl StockLevel {
    pub fn classify(stock: u32) -> Self {
        match stock {
            s if s > 50 => StockLevel::Healthy,
            s if s > 10 => StockLevel::Low,
            _ => StockLevel::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockLevel::Healthy => "healthy",
            StockLevel::Low => "low",
            StockLevel::Critical => "critical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(StockLevel::classify(100), StockLevel::Healthy);
        assert_eq!(StockLevel::classify(51), StockLevel::Healthy);
        assert_eq!(StockLevel::classify(50), StockLevel::Low);
        assert_eq!(StockLevel::classify(11), StockLevel::Low);
        assert_eq!(StockLevel::classify(10), StockLevel::Critical);
        assert_eq!(StockLevel::classify(0), StockLevel::Critical);
    }

    #[test]
    fn sample_products_cover_two_levels() {
        let levels: Vec<StockLevel> = sample_products().iter().map(|p| p.stock_level()).collect();
        assert_eq!(
            levels,
            vec![StockLevel::Low, StockLevel::Healthy, StockLevel::Low]
        );
    }
}
