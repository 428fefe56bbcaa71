//! Dashboard page: KPI cards and chart datasets.

use serde::Serialize;

/// Summary tile at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

/// A single-series chart: one value per label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub title: &'static str,
    pub kind: ChartKind,
    pub series_label: &'static str,
    pub points: Vec<(&'static str, u64)>,
}

impl Chart {
    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|(_, v)| *v).max().unwrap_or(0)
    }

    pub fn sum(&self) -> u64 {
        self.points.iter().map(|(_, v)| *v).sum()
    }

    /// Share of each point in the total, in whole percent (rounded down).
    pub fn shares(&self) -> Vec<(&'static str, u64)> {
        let sum = self.sum();
        self.points
            .iter()
            .map(|(label, v)| (*label, if sum == 0 { 0 } else { v * 100 / sum }))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<KpiCard>,
    pub charts: Vec<Chart>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::sample()
    }
}

impl DashboardView {
    pub fn sample() -> Self {
        let cards = vec![
            KpiCard {
                title: "Total Sales",
                value: "$24,000".to_string(),
            },
            KpiCard {
                title: "Total Inventory",
                value: "1,234".to_string(),
            },
            KpiCard {
                title: "Recent Orders",
                value: "56".to_string(),
            },
        ];

        let charts = vec![
            Chart {
                title: "Sales Overview",
                kind: ChartKind::Bar,
                series_label: "Sales",
                points: vec![
                    ("Jan", 12),
                    ("Feb", 19),
                    ("Mar", 3),
                    ("Apr", 5),
                    ("May", 2),
                    ("Jun", 3),
                ],
            },
            Chart {
                title: "Stock Status",
                kind: ChartKind::Pie,
                series_label: "Items",
                points: vec![("In Stock", 300), ("Low Stock", 50), ("Out of Stock", 100)],
            },
            Chart {
                title: "Order Trends",
                kind: ChartKind::Line,
                series_label: "Orders",
                points: vec![
                    ("Mon", 65),
                    ("Tue", 59),
                    ("Wed", 80),
                    ("Thu", 81),
                    ("Fri", 56),
                    ("Sat", 55),
                    ("Sun", 40),
                ],
            },
        ];

        Self { cards, charts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_three_cards_and_three_charts() {
        let view = DashboardView::sample();
        let titles: Vec<&str> = view.cards.iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["Total Sales", "Total Inventory", "Recent Orders"]);

        let kinds: Vec<ChartKind> = view.charts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChartKind::Bar, ChartKind::Pie, ChartKind::Line]);
    }

    #[test]
    fn pie_shares_are_percentages_of_the_sum() {
        let view = DashboardView::sample();
        let stock = &view.charts[1];
        assert_eq!(stock.sum(), 450);
        assert_eq!(
            stock.shares(),
            vec![("In Stock", 66), ("Low Stock", 11), ("Out of Stock", 22)]
        );
    }

    #[test]
    fn empty_chart_has_zero_max_and_shares() {
        let chart = Chart {
            title: "Empty",
            kind: ChartKind::Pie,
            series_label: "x",
            points: vec![("a", 0)],
        };
        assert_eq!(chart.max_value(), 0);
        assert_eq!(chart.shares(), vec![("a", 0)]);
    }
}
