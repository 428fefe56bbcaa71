//! Sales tracking domain module.
//!
//! Static sample figures for the sales page plus the date range selector.

pub mod report;

pub use report::{DailySales, DateRange, SalesReport, SalesView, TopProduct};
