use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, Money};

/// Reporting window offered by the sales page selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    ThisYear,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [
        DateRange::ThisWeek,
        DateRange::ThisMonth,
        DateRange::ThisQuarter,
        DateRange::ThisYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::ThisWeek => "This Week",
            DateRange::ThisMonth => "This Month",
            DateRange::ThisQuarter => "This Quarter",
            DateRange::ThisYear => "This Year",
        }
    }
}

impl core::fmt::Display for DateRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DateRange {
    type Err = DomainError;

    /// Accepts `week`, `this week`, `This Week`, `this_week`, and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        let key = normalized.strip_prefix("this ").unwrap_or(&normalized);
        match key {
            "week" => Ok(DateRange::ThisWeek),
            "month" => Ok(DateRange::ThisMonth),
            "quarter" => Ok(DateRange::ThisQuarter),
            "year" => Ok(DateRange::ThisYear),
            _ => Err(DomainError::validation(format!(
                "unknown date range {s:?} (expected week, month, quarter or year)"
            ))),
        }
    }
}

/// Revenue for one day of the sales chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub label: String,
    pub revenue: Money,
}

/// Row of the "Top Selling Products" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub units_sold: u32,
    pub revenue: Money,
}

/// Figures shown on the sales page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesReport {
    pub daily: Vec<DailySales>,
    pub top_products: Vec<TopProduct>,
    pub average_order_value: Money,
    /// Conversion rate in basis points (320 = 3.2%).
    pub conversion_rate_bps: u32,
}

impl SalesReport {
    pub fn sample() -> Self {
        let daily = [
            ("Mon", 12_000),
            ("Tue", 19_000),
            ("Wed", 3_000),
            ("Thu", 5_000),
            ("Fri", 2_000),
            ("Sat", 3_000),
            ("Sun", 15_000),
        ]
        .into_iter()
        .map(|(label, dollars)| DailySales {
            label: label.to_string(),
            revenue: Money::from_dollars(dollars),
        })
        .collect();

        let top_products = [
            ("Product A", 1200, 24_000),
            ("Product B", 800, 16_000),
            ("Product C", 600, 12_000),
            ("Product D", 400, 8_000),
            ("Product E", 200, 4_000),
        ]
        .into_iter()
        .map(|(name, units_sold, dollars)| TopProduct {
            name: name.to_string(),
            units_sold,
            revenue: Money::from_dollars(dollars),
        })
        .collect();

        Self {
            daily,
            top_products,
            average_order_value: Money::from_dollars(120),
            conversion_rate_bps: 320,
        }
    }

    /// Sum of the daily series.
    pub fn total_sales(&self) -> Money {
        self.daily.iter().map(|d| d.revenue).sum()
    }

    /// Conversion rate formatted as a percentage, e.g. `3.2%`.
    pub fn conversion_rate(&self) -> String {
        let whole = self.conversion_rate_bps / 100;
        let frac = self.conversion_rate_bps % 100;
        if frac % 10 == 0 {
            format!("{whole}.{}%", frac / 10)
        } else {
            format!("{whole}.{frac:02}%")
        }
    }

    /// Top products ordered by revenue, highest first.
    pub fn ranked_products(&self) -> Vec<&TopProduct> {
        let mut ranked: Vec<&TopProduct> = self.top_products.iter().collect();
        ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        ranked
    }
}

/// Sales page state: the selected range and the report it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesView {
    date_range: DateRange,
    report: SalesReport,
}

impl Default for SalesView {
    fn default() -> Self {
        Self::new(SalesReport::sample())
    }
}

impl SalesView {
    pub fn new(report: SalesReport) -> Self {
        Self {
            date_range: DateRange::default(),
            report,
        }
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    // The sample data set has one series; the range only changes the heading.
    pub fn set_date_range(&mut self, range: DateRange) {
        tracing::debug!(range = %range, "sales date range changed");
        self.date_range = range;
    }

    pub fn report(&self) -> &SalesReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sales_is_derived_from_daily_series() {
        let report = SalesReport::sample();
        assert_eq!(report.daily.len(), 7);
        assert_eq!(report.total_sales(), Money::from_dollars(59_000));
        assert_eq!(report.total_sales().to_string(), "$59,000.00");
    }

    #[test]
    fn conversion_rate_formats_as_percentage() {
        let mut report = SalesReport::sample();
        assert_eq!(report.conversion_rate(), "3.2%");
        report.conversion_rate_bps = 1275;
        assert_eq!(report.conversion_rate(), "12.75%");
        report.conversion_rate_bps = 5;
        assert_eq!(report.conversion_rate(), "0.05%");
    }

    #[test]
    fn ranked_products_are_sorted_by_revenue() {
        let mut report = SalesReport::sample();
        report.top_products.reverse();
        let names: Vec<&str> = report
            .ranked_products()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Product A", "Product B", "Product C", "Product D", "Product E"]
        );
    }

    #[test]
    fn date_range_parses_loose_spellings() {
        assert_eq!("week".parse::<DateRange>().unwrap(), DateRange::ThisWeek);
        assert_eq!("This Month".parse::<DateRange>().unwrap(), DateRange::ThisMonth);
        assert_eq!("this_quarter".parse::<DateRange>().unwrap(), DateRange::ThisQuarter);
        assert_eq!(" YEAR ".parse::<DateRange>().unwrap(), DateRange::ThisYear);
        assert!(matches!(
            "decade".parse::<DateRange>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn view_defaults_to_this_week() {
        let mut view = SalesView::default();
        assert_eq!(view.date_range(), DateRange::ThisWeek);
        view.set_date_range(DateRange::ThisYear);
        assert_eq!(view.date_range().label(), "This Year");
    }
}
