//! Drives the console the way a user would, one line at a time.

use std::time::Duration;

use tokio::sync::mpsc;

use stockroom_core::DomainError;
use stockroom_dashboard::{App, NotificationTicker, Outcome, Route};

fn run(app: &mut App, line: &str) -> String {
    match app.execute_line(line) {
        Ok(Outcome::Render(text)) => text,
        Ok(Outcome::Quit) => panic!("{line:?} quit the session"),
        Err(e) => panic!("{line:?} failed: {e}"),
    }
}

#[test]
fn purchase_order_walkthrough() {
    let mut app = App::default();

    run(&mut app, "select product a");
    run(&mut app, "qty 2");
    let page = run(&mut app, "add");
    assert!(page.contains("Total: $21.98"));
    assert!(page.contains("[Purchase Orders]"));

    let page = run(&mut app, "add Product A 1");
    assert!(page.contains("Total: $32.97"));
    assert_eq!(app.orders().lines().len(), 1);

    let err = app.execute_line("set 1 -5").unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(app.orders().lines()[0].quantity, 3);

    let page = run(&mut app, "rm 1");
    assert!(page.contains("No items on this order yet."));
    assert!(page.contains("Total: $0.00"));

    let history = run(&mut app, "history");
    assert!(history.contains("added Product A x2"));
    assert!(history.contains("removed line 1"));
}

#[test]
fn save_print_and_export_a_draft() {
    let mut app = App::default();
    assert!(app.execute_line("save").is_err());
    assert!(app.execute_line("print").is_err());

    run(&mut app, "add Product B 2");
    run(&mut app, "add Product C");

    let saved = run(&mut app, "save");
    assert!(saved.contains("2 lines"));
    assert!(saved.contains("$52.97"));

    let invoice = run(&mut app, "print");
    assert!(invoice.starts_with("INVOICE"));
    assert!(invoice.trim_end().ends_with("$52.97"));

    let json: serde_json::Value = serde_json::from_str(&run(&mut app, "export")).unwrap();
    assert_eq!(json["total"], 5297);
    assert_eq!(json["lines"].as_array().map(Vec::len), Some(2));
}

#[test]
fn inventory_search_and_sales_range() {
    let mut app = App::new(Route::Dashboard);

    let page = run(&mut app, "search electronics");
    assert!(page.contains("Product A"));
    assert!(!page.contains("Product B"));

    let page = run(&mut app, "search");
    assert!(page.contains("Product B"));
    assert!(page.contains("Search: (none)"));

    let page = run(&mut app, "range month");
    assert!(page.contains("[This Month]"));
    assert!(page.contains("$59,000.00"));
}

#[test]
fn bad_input_is_reported_and_ignored() {
    let mut app = App::default();
    run(&mut app, "add Product C 2");

    for line in ["qty abc", "qty 0", "set 1 0", "rm 9", "add Product Z", "goto /nowhere", "frobnicate"] {
        assert!(app.execute_line(line).is_err(), "{line:?} was accepted");
    }

    assert_eq!(app.orders().lines()[0].quantity, 2);
    assert_eq!(app.orders().quantity_input(), 1);
}

#[tokio::test(start_paused = true)]
async fn ticker_feeds_the_notification_panel() {
    let mut app = App::default();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let ticker = NotificationTicker::spawn(Duration::from_secs(10), tx);

    for _ in 0..2 {
        let notification = rx.recv().await.unwrap();
        let alert = app.receive_notification(notification);
        assert!(alert.contains("New notification at "));
    }
    ticker.shutdown().await;

    let page = run(&mut app, "notifications");
    assert!(page.contains("Notifications (2)"));

    run(&mut app, "dismiss 1");
    assert_eq!(app.notifications().len(), 1);
    assert!(app.execute_line("dismiss 5").is_err());
}
