use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::DomainError;

/// Navigable pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    #[default]
    Dashboard,
    Inventory,
    Sales,
    PurchaseOrders,
    Profile,
}

impl Route {
    /// Sidebar order.
    pub const ALL: [Route; 5] = [
        Route::Dashboard,
        Route::Inventory,
        Route::Sales,
        Route::PurchaseOrders,
        Route::Profile,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Inventory => "/inventory",
            Route::Sales => "/sales",
            Route::PurchaseOrders => "/purchase-orders",
            Route::Profile => "/profile",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Inventory => "Inventory",
            Route::Sales => "Sales",
            Route::PurchaseOrders => "Purchase Orders",
            Route::Profile => "Profile",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = DomainError;

    /// Accepts a path (`/sales`) or a page name (`sales`, `Purchase Orders`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Some(route) = Route::from_path(raw) {
            return Ok(route);
        }

        let name = raw
            .trim_start_matches('/')
            .to_ascii_lowercase()
            .replace([' ', '_'], "-");
        match name.as_str() {
            "" | "dashboard" | "home" => Ok(Route::Dashboard),
            "inventory" => Ok(Route::Inventory),
            "sales" => Ok(Route::Sales),
            "purchase-orders" | "orders" | "po" => Ok(Route::PurchaseOrders),
            "profile" => Ok(Route::Profile),
            _ => Err(DomainError::not_found(format!("route {raw:?}"))),
        }
    }
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub route: Route,
    pub label: &'static str,
    pub active: bool,
}

/// Sidebar entries with `active` marked.
pub fn sidebar(active: Route) -> Vec<MenuItem> {
    Route::ALL
        .into_iter()
        .map(|route| MenuItem {
            route,
            label: route.title(),
            active: route == active,
        })
        .collect()
}
