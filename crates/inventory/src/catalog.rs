use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Money};

/// Catalog item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A purchasable item. Immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub stock_on_hand: u32,
}

impl CatalogItem {
    pub fn new(id: u32, name: impl Into<String>, unit_price: Money, stock_on_hand: u32) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            unit_price,
            stock_on_hand,
        }
    }

    /// Selector label, e.g. `Product A - $10.99 (Stock: 100)`.
    pub fn option_label(&self) -> String {
        format!(
            "{} - {} (Stock: {})",
            self.name, self.unit_price, self.stock_on_hand
        )
    }
}

/// Immutable, ordered list of purchasable items.
///
/// Ids and names are unique (names ignoring ASCII case), so a name lookup
/// resolves to at most one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> DomainResult<Self> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for item in &items {
            let name = item.name.trim();
            if name.is_empty() {
                return Err(DomainError::validation("catalog item name cannot be empty"));
            }
            if !ids.insert(item.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate catalog item id {}",
                    item.id
                )));
            }
            if !names.insert(name.to_ascii_lowercase()) {
                return Err(DomainError::conflict(format!(
                    "duplicate catalog item name {name:?}"
                )));
            }
        }

        tracing::debug!(items = items.len(), "catalog loaded");
        Ok(Self { items })
    }

    /// The three-item catalog offered on the purchase order page.
    pub fn sample() -> Self {
        Self {
            items: vec![
                CatalogItem::new(1, "Product A", Money::from_cents(1099), 100),
                CatalogItem::new(2, "Product B", Money::from_cents(1599), 75),
                CatalogItem::new(3, "Product C", Money::from_cents(2099), 50),
            ],
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Look up by name, ignoring surrounding whitespace and ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<&CatalogItem> {
        let name = name.trim();
        self.items
            .iter()
            .find(|item| item.name.trim().eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
