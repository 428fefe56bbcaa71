//! Inventory domain module.
//!
//! The purchasable catalog plus the inventory page's product list, stock
//! classification and search filter. Pure in-memory logic (no IO).

pub mod catalog;
pub mod product;
pub mod view;

pub use catalog::{Catalog, CatalogItem, ItemId};
pub use product::{InventoryProduct, StockLevel, sample_products};
pub use view::InventoryView;
