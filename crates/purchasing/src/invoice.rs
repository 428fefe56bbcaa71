use core::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::{DraftId, Money};

use crate::draft::OrderLine;

/// Printable invoice for a purchase order draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub draft_id: DraftId,
    pub lines: Vec<OrderLine>,
    pub issued_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(draft_id: DraftId, lines: Vec<OrderLine>, issued_at: DateTime<Utc>) -> Self {
        Self {
            draft_id,
            lines,
            issued_at,
        }
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .lines
            .iter()
            .map(|l| l.name.len())
            .max()
            .unwrap_or(0)
            .max("Item".len());

        writeln!(f, "INVOICE")?;
        writeln!(f, "Draft:  {}", self.draft_id)?;
        writeln!(f, "Issued: {}", self.issued_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<name_width$}  {:>12}  {:>6}  {:>14}",
            "Item", "Price", "Qty", "Total"
        )?;
        writeln!(f, "{}", "-".repeat(name_width + 40))?;
        for line in &self.lines {
            writeln!(
                f,
                "{:<name_width$}  {:>12}  {:>6}  {:>14}",
                line.name,
                line.unit_price.to_string(),
                line.quantity,
                line.line_total().to_string()
            )?;
        }
        writeln!(f, "{}", "-".repeat(name_width + 40))?;
        write!(
            f,
            "{:<width$}  {:>14}",
            "Total",
            self.total().to_string(),
            width = name_width + 24
        )
    }
}
