//! Plain-text rendering of pages for the console.

use std::fmt::Write as _;

use chrono::Local;

use stockroom_events::{Event, EventLog};
use stockroom_inventory::InventoryView;
use stockroom_purchasing::{DraftEvent, OrderEditor};
use stockroom_sales::{DateRange, SalesView};

use crate::notifications::NotificationFeed;
use crate::overview::{Chart, ChartKind, DashboardView};
use crate::profile::UserProfile;
use crate::routes::{Route, sidebar};

const BAR_WIDTH: u64 = 30;

/// Input prompt shown after every block of console output.
pub const PROMPT: &str = "> ";

/// `text` followed by the input prompt, so asynchronous output such as a
/// notification alert does not leave the user without one.
pub fn with_prompt(text: &str) -> String {
    format!("{text}{PROMPT}")
}

/// Left-aligned table with a header rule. Columns size to their widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&widths, headers.iter().copied()));
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(&widths, row.iter().map(String::as_str)));
        out.push('\n');
    }
    out
}

fn format_row<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let width = widths.get(i).copied().unwrap_or(0);
        let _ = write!(line, "{cell:<width$}");
    }
    line.trim_end().to_string()
}

/// The sidebar on one line, active page in brackets.
pub fn sidebar_bar(active: Route) -> String {
    sidebar(active)
        .iter()
        .map(|item| {
            if item.active {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn chart(chart: &Chart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", chart.title, chart.series_label);

    let label_width = chart
        .points
        .iter()
        .map(|(l, _)| l.len())
        .max()
        .unwrap_or(0);

    match chart.kind {
        ChartKind::Pie => {
            for (label, share) in chart.shares() {
                let _ = writeln!(out, "  {label:<label_width$}  {share:>3}%");
            }
        }
        ChartKind::Bar | ChartKind::Line => {
            let max = chart.max_value().max(1);
            let glyph = if chart.kind == ChartKind::Bar { "#" } else { "*" };
            for (label, value) in &chart.points {
                let len = usize::try_from(value * BAR_WIDTH / max).unwrap_or(0);
                let _ = writeln!(
                    out,
                    "  {label:<label_width$}  {:<bar$}  {value}",
                    glyph.repeat(len),
                    bar = BAR_WIDTH as usize
                );
            }
        }
    }
    out
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut out = String::from("Dashboard\n\n");
    for card in &view.cards {
        let _ = writeln!(out, "  {:<16} {}", card.title, card.value);
    }
    for c in &view.charts {
        out.push('\n');
        out.push_str(&chart(c));
    }
    out
}

pub fn inventory(view: &InventoryView) -> String {
    let mut out = String::from("Inventory Management\n\n");
    let term = view.search_term();
    if term.is_empty() {
        out.push_str("Search: (none)\n\n");
    } else {
        let _ = writeln!(out, "Search: {term:?}\n");
    }

    let rows: Vec<Vec<String>> = view
        .filtered()
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.category.clone(),
                format!("{} ({})", p.stock, p.stock_level().as_str()),
                p.price.to_string(),
            ]
        })
        .collect();

    if rows.is_empty() {
        out.push_str("No products match the search.\n");
    } else {
        out.push_str(&table(&["Product", "Category", "Stock", "Price"], &rows));
    }
    out
}

pub fn sales(view: &SalesView) -> String {
    let report = view.report();
    let mut out = String::from("Sales Tracking\n\n");

    let ranges: Vec<String> = DateRange::ALL
        .iter()
        .map(|r| {
            if *r == view.date_range() {
                format!("[{r}]")
            } else {
                r.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "Range: {}\n", ranges.join(" | "));

    let _ = writeln!(out, "  {:<20} {}", "Total Sales", report.total_sales());
    let _ = writeln!(
        out,
        "  {:<20} {}",
        "Average Order Value", report.average_order_value
    );
    let _ = writeln!(out, "  {:<20} {}", "Conversion Rate", report.conversion_rate());

    let max = report
        .daily
        .iter()
        .map(|d| d.revenue.cents())
        .max()
        .unwrap_or(0)
        .max(1);
    let _ = writeln!(out, "\nSales Overview ({})", view.date_range());
    for day in &report.daily {
        let len = usize::try_from(day.revenue.cents() * BAR_WIDTH / max).unwrap_or(0);
        let _ = writeln!(
            out,
            "  {:<3}  {:<bar$}  {}",
            day.label,
            "*".repeat(len),
            day.revenue,
            bar = BAR_WIDTH as usize
        );
    }

    out.push_str("\nTop Selling Products\n");
    let rows: Vec<Vec<String>> = report
        .ranked_products()
        .iter()
        .map(|p| vec![p.name.clone(), p.units_sold.to_string(), p.revenue.to_string()])
        .collect();
    out.push_str(&table(&["Product", "Sales", "Revenue"], &rows));
    out
}

pub fn purchase_orders(editor: &OrderEditor) -> String {
    let mut out = String::from("Purchase Order\n\n");

    out.push_str("Catalog:\n");
    for item in editor.catalog().iter() {
        let marker = if editor.selection().map(|s| s.id) == Some(item.id) {
            ">"
        } else {
            " "
        };
        let _ = writeln!(out, " {marker} {}", item.option_label());
    }
    let selected = editor
        .selection()
        .map(|i| i.name.as_str())
        .unwrap_or("(none)");
    let _ = writeln!(
        out,
        "Selected: {selected}   Quantity: {}\n",
        editor.quantity_input()
    );

    if editor.lines().is_empty() {
        out.push_str("No items on this order yet.\n");
    } else {
        let rows: Vec<Vec<String>> = editor
            .lines()
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let quantity = if editor.exceeds_stock(line) {
                    format!("{} (exceeds stock)", line.quantity)
                } else {
                    line.quantity.to_string()
                };
                vec![
                    (i + 1).to_string(),
                    line.name.clone(),
                    line.unit_price.to_string(),
                    quantity,
                    line.line_total().to_string(),
                ]
            })
            .collect();
        out.push_str(&table(&["#", "Item", "Price", "Quantity", "Total"], &rows));
    }

    let _ = writeln!(out, "\nTotal: {}", editor.calculate_total());
    if !editor.saved_orders().is_empty() {
        let _ = writeln!(out, "Saved orders: {}", editor.saved_orders().len());
    }
    out
}

pub fn profile(profile: &UserProfile) -> String {
    let mut out = String::from("Profile\n\n");
    let _ = writeln!(out, "  ({})  {}", profile.initials(), profile.name);
    let _ = writeln!(out, "  Email:    {}", profile.email);
    let _ = writeln!(out, "  Role:     {}", profile.role);
    let _ = writeln!(out, "  Location: {}", profile.location);
    out
}

pub fn notifications(feed: &NotificationFeed) -> String {
    let mut out = format!("Notifications ({})\n", feed.len());
    if feed.is_empty() {
        out.push_str("  nothing new\n");
        return out;
    }
    for (i, n) in feed.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, n.message);
    }
    out
}

/// One line per applied draft event: sequence, local time, summary, type.
pub fn history(log: &EventLog<DraftEvent>) -> String {
    if log.is_empty() {
        return "No changes yet.\n".to_string();
    }

    let mut out = String::new();
    for recorded in log.iter() {
        let text = match &recorded.payload {
            DraftEvent::LineAdded(e) => format!("added {} x{}", e.name, e.quantity),
            DraftEvent::LineQuantityIncreased(e) => {
                format!("line {} +{}", e.index + 1, e.added)
            }
            DraftEvent::LineQuantityChanged(e) => {
                format!("line {} quantity {} -> {}", e.index + 1, e.from, e.to)
            }
            DraftEvent::LineRemoved(e) => format!("removed line {}", e.index + 1),
        };
        let event = &recorded.payload;
        let _ = writeln!(
            out,
            "  {:>3}  {}  {text}  ({})",
            recorded.sequence_number,
            event.occurred_at().with_timezone(&Local).format("%H:%M:%S"),
            event.event_type()
        );
    }
    out
}

pub fn help() -> String {
    [
        "Commands:",
        "  goto <page>            dashboard | inventory | sales | purchase-orders | profile (or a path)",
        "  show                   redraw the current page",
        "  search [text]          filter inventory by name or category (no text clears)",
        "  range <r>              sales range: week | month | quarter | year",
        "  select <item>          choose a catalog item",
        "  qty <n>                set the quantity input",
        "  add [item [n]]         add the selection, or the named item",
        "  inc <line> / dec <line>  adjust a line by one",
        "  set <line> <n>         set a line's quantity",
        "  rm <line>              remove a line",
        "  save | print | export  snapshot, invoice, or JSON of the order",
        "  history                changes made to the order",
        "  notifications          open or close the notification panel",
        "  dismiss <n|id>         dismiss a notification",
        "  help | quit",
    ]
    .join("\n")
        + "\n"
}
