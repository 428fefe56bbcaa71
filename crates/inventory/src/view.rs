//! Inventory page state: the product list and the search box.

use crate::product::{InventoryProduct, sample_products};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryView {
    products: Vec<InventoryProduct>,
    search_term: String,
}

impl Default for InventoryView {
    fn default() -> Self {
        Self::new(sample_products())
    }
}

impl InventoryView {
    pub fn new(products: Vec<InventoryProduct>) -> Self {
        Self {
            products,
            search_term: String::new(),
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        tracing::debug!(term = %self.search_term, "inventory search updated");
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    pub fn products(&self) -> &[InventoryProduct] {
        &self.products
    }

    /// Products whose name or category contains the search term, ignoring
    /// case. An empty term matches everything. Order is preserved.
    ///
    /// The term is trimmed first, so `" home "` finds `Home` and a
    /// whitespace-only term counts as empty.
    pub fn filtered(&self) -> Vec<&InventoryProduct> {
        let needle = self.search_term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| needle.is_empty() || p.matches_lowercase(&needle))
            .collect()
    }
}
