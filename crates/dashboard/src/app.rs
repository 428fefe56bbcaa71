//! Console application state and command execution.

use std::fmt::Write as _;

use stockroom_core::{DomainError, DomainResult, NotificationId};
use stockroom_inventory::{Catalog, InventoryView};
use stockroom_purchasing::OrderEditor;
use stockroom_sales::SalesView;

use crate::command::{Command, DismissTarget};
use crate::notifications::{Notification, NotificationFeed};
use crate::overview::DashboardView;
use crate::profile::UserProfile;
use crate::render;
use crate::routes::Route;

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(String),
    Quit,
}

/// All page state for one console session.
///
/// Page state lives for the whole session, so leaving and returning to a
/// page keeps its search term, date range, or draft.
#[derive(Debug, Clone)]
pub struct App {
    route: Route,
    inventory: InventoryView,
    sales: SalesView,
    orders: OrderEditor,
    dashboard: DashboardView,
    profile: UserProfile,
    notifications: NotificationFeed,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

impl App {
    pub fn new(start_route: Route) -> Self {
        Self {
            route: start_route,
            inventory: InventoryView::default(),
            sales: SalesView::default(),
            orders: OrderEditor::new(Catalog::sample()),
            dashboard: DashboardView::sample(),
            profile: UserProfile::sample(),
            notifications: NotificationFeed::new(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn inventory(&self) -> &InventoryView {
        &self.inventory
    }

    pub fn sales(&self) -> &SalesView {
        &self.sales
    }

    pub fn orders(&self) -> &OrderEditor {
        &self.orders
    }

    pub fn notifications(&self) -> &NotificationFeed {
        &self.notifications
    }

    /// Parse and run one console line.
    pub fn execute_line(&mut self, line: &str) -> DomainResult<Outcome> {
        let command = Command::parse(line)?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> DomainResult<Outcome> {
        tracing::debug!(?command, route = %self.route, "executing command");

        let output = match command {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Help => render::help(),
            Command::Show => self.render(),
            Command::Goto(route) => {
                self.route = route;
                tracing::info!(%route, "navigated");
                self.render()
            }
            Command::Search(term) => {
                self.route = Route::Inventory;
                if term.trim().is_empty() {
                    self.inventory.clear_search();
                } else {
                    self.inventory.set_search_term(term);
                }
                self.render()
            }
            Command::Range(range) => {
                self.route = Route::Sales;
                self.sales.set_date_range(range);
                self.render()
            }
            Command::Select(name) => {
                self.orders.select(&name)?;
                self.route = Route::PurchaseOrders;
                self.render()
            }
            Command::Quantity(raw) => {
                self.orders.set_quantity_input(&raw)?;
                self.route = Route::PurchaseOrders;
                self.render()
            }
            Command::Add => {
                self.orders.add_item()?;
                self.route = Route::PurchaseOrders;
                self.render()
            }
            Command::AddNamed { name, quantity } => {
                self.orders.add_named(&name, quantity)?;
                self.route = Route::PurchaseOrders;
                self.render()
            }
            Command::Increment(index) => {
                self.orders.increment(index)?;
                self.route = Route::PurchaseOrders;
                self.render()
            }
            Command::Decrement(index) => {
                self.orders.decrement(index)?;
                self.route = Route::PurchaseOrders;
                self.render()
            }
            Command::SetQuantity { index, quantity } => {
                self.orders.update_quantity(index, quantity)?;
                self.route = Route::PurchaseOrders;
                self.render()
            }
            Command::Remove(index) => {
                self.orders.remove_item(index)?;
                self.route = Route::PurchaseOrders;
                self.render()
            }
            Command::Save => {
                let saved = self.orders.save()?;
                format!(
                    "Saved order {} ({} lines, total {})\n",
                    saved.order_id,
                    saved.lines.len(),
                    saved.total
                )
            }
            Command::Print => format!("{}\n", self.orders.invoice()?),
            Command::Export => {
                let json = self
                    .orders
                    .export_json()
                    .map_err(|e| DomainError::invariant(format!("export failed: {e}")))?;
                format!("{json}\n")
            }
            Command::History => render::history(self.orders.history()),
            Command::ToggleNotifications => {
                self.notifications.toggle();
                self.render()
            }
            Command::Dismiss(target) => {
                let id = self.resolve_notification(target)?;
                if !self.notifications.dismiss(id) {
                    return Err(DomainError::not_found(format!("notification {id}")));
                }
                self.render()
            }
        };

        Ok(Outcome::Render(output))
    }

    fn resolve_notification(&self, target: DismissTarget) -> DomainResult<NotificationId> {
        match target {
            DismissTarget::Id(id) => Ok(id),
            DismissTarget::Position(position) => self
                .notifications
                .get(position)
                .map(|n| n.id)
                .ok_or_else(|| {
                    DomainError::not_found(format!("notification #{}", position + 1))
                }),
        }
    }

    /// Add an incoming notification and return the one-line alert to show.
    pub fn receive_notification(&mut self, notification: Notification) -> String {
        let alert = format!("(!) {}\n", notification.message);
        self.notifications.push(notification);
        alert
    }

    /// The current page under the sidebar, plus the notification panel when open.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}    Notifications: {}",
            render::sidebar_bar(self.route),
            self.notifications.len()
        );
        out.push('\n');

        let page = match self.route {
            Route::Dashboard => render::dashboard(&self.dashboard),
            Route::Inventory => render::inventory(&self.inventory),
            Route::Sales => render::sales(&self.sales),
            Route::PurchaseOrders => render::purchase_orders(&self.orders),
            Route::Profile => render::profile(&self.profile),
        };
        out.push_str(&page);

        if self.notifications.is_open() {
            out.push('\n');
            out.push_str(&render::notifications(&self.notifications));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_sales::DateRange;

    fn rendered(outcome: Outcome) -> String {
        match outcome {
            Outcome::Render(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn starts_on_the_requested_route() {
        let app = App::new(Route::Profile);
        assert_eq!(app.route(), Route::Profile);
        assert!(app.render().contains("Jordan Lee"));
    }

    #[test]
    fn page_state_survives_navigation() {
        let mut app = App::default();
        app.execute(Command::Search("home".to_string())).unwrap();
        app.execute(Command::Range(DateRange::ThisYear)).unwrap();
        app.execute(Command::Goto(Route::Inventory)).unwrap();

        assert_eq!(app.inventory().search_term(), "home");
        assert_eq!(app.sales().date_range(), DateRange::ThisYear);
    }

    #[test]
    fn order_commands_switch_to_the_order_page() {
        let mut app = App::default();
        let text = rendered(
            app.execute(Command::AddNamed {
                name: "Product A".to_string(),
                quantity: 2,
            })
            .unwrap(),
        );
        assert_eq!(app.route(), Route::PurchaseOrders);
        assert!(text.contains("Total: $21.98"));
    }

    #[test]
    fn failed_command_leaves_route_and_order_state() {
        let mut app = App::default();
        app.execute(Command::AddNamed {
            name: "Product B".to_string(),
            quantity: 1,
        })
        .unwrap();
        app.execute(Command::Goto(Route::Sales)).unwrap();

        let err = app
            .execute(Command::SetQuantity {
                index: 0,
                quantity: 0,
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(app.orders().lines()[0].quantity, 1);
        assert_eq!(app.route(), Route::Sales);

        for line in ["select Product Z", "rm 3", "qty abc", "dec 1"] {
            assert!(app.execute_line(line).is_err(), "{line:?} was accepted");
            assert_eq!(app.route(), Route::Sales, "{line:?} changed the page");
        }
    }

    #[test]
    fn dismiss_by_position_and_unknown_target() {
        let mut app = App::default();
        app.receive_notification(Notification::new("one"));
        app.receive_notification(Notification::new("two"));

        app.execute(Command::Dismiss(DismissTarget::Position(0)))
            .unwrap();
        let left: Vec<&str> = app
            .notifications()
            .iter()
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(left, vec!["two"]);

        assert!(matches!(
            app.execute(Command::Dismiss(DismissTarget::Position(4))),
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            app.execute(Command::Dismiss(DismissTarget::Id(NotificationId::new()))),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn open_panel_lists_notifications() {
        let mut app = App::default();
        let alert = app.receive_notification(Notification::new("restock arrived"));
        assert!(alert.contains("restock arrived"));

        let closed = app.render();
        assert!(closed.contains("Notifications: 1"));
        assert!(!closed.contains("1. restock arrived"));

        let open = rendered(app.execute(Command::ToggleNotifications).unwrap());
        assert!(open.contains("1. restock arrived"));
    }

    #[test]
    fn quit_is_reported() {
        let mut app = App::default();
        assert_eq!(app.execute_line("quit").unwrap(), Outcome::Quit);
    }
}
