//! Purchase order editor: selection + quantity inputs wrapped around a draft.

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::{Aggregate, DomainError, DomainResult, DraftId, Money, OrderId};
use stockroom_events::EventLog;
use stockroom_inventory::{Catalog, CatalogItem, ItemId};

use crate::draft::{
    AddItem, DraftCommand, DraftEvent, OrderDraft, OrderLine, RemoveLine, UpdateQuantity,
};
use crate::invoice::Invoice;

/// Quantity input value after a reset.
pub const DEFAULT_QUANTITY: u32 = 1;

/// In-memory snapshot taken by "Save Order". Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedOrder {
    pub order_id: OrderId,
    pub draft_id: DraftId,
    pub lines: Vec<OrderLine>,
    pub total: Money,
    pub saved_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct DraftExport<'a> {
    draft_id: DraftId,
    lines: &'a [OrderLine],
    total: Money,
}

/// State behind the purchase order page.
///
/// Every mutating call either succeeds or returns an error with all state
/// (draft, inputs, history) left as it was.
#[derive(Debug, Clone)]
pub struct OrderEditor {
    catalog: Catalog,
    draft: OrderDraft,
    selection: Option<ItemId>,
    quantity_input: u32,
    history: EventLog<DraftEvent>,
    saved: Vec<SavedOrder>,
}

impl OrderEditor {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            draft: OrderDraft::new(DraftId::new()),
            selection: None,
            quantity_input: DEFAULT_QUANTITY,
            history: EventLog::new(),
            saved: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn lines(&self) -> &[OrderLine] {
        self.draft.lines()
    }

    pub fn history(&self) -> &EventLog<DraftEvent> {
        &self.history
    }

    pub fn saved_orders(&self) -> &[SavedOrder] {
        &self.saved
    }

    // -- inputs -------------------------------------------------------------

    pub fn selection(&self) -> Option<&CatalogItem> {
        self.selection.and_then(|id| self.catalog.get(id))
    }

    /// Choose an item in the selector by name.
    pub fn select(&mut self, name: &str) -> DomainResult<&CatalogItem> {
        let item = self
            .catalog
            .find_by_name(name)
            .ok_or_else(|| DomainError::not_found(format!("catalog item {:?}", name.trim())))?;
        self.selection = Some(item.id);
        Ok(item)
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn quantity_input(&self) -> u32 {
        self.quantity_input
    }

    /// Set the quantity box from raw text.
    ///
    /// Non-numeric or sub-1 input is rejected and the previous value kept.
    pub fn set_quantity_input(&mut self, raw: &str) -> DomainResult<u32> {
        let parsed: i64 = raw.trim().parse().map_err(|_| {
            tracing::warn!(input = raw, "rejected non-numeric quantity");
            DomainError::validation(format!("quantity must be a whole number, got {raw:?}"))
        })?;
        if parsed < 1 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        let quantity =
            u32::try_from(parsed).map_err(|_| DomainError::validation("quantity is too large"))?;
        self.quantity_input = quantity;
        Ok(quantity)
    }

    fn reset_inputs(&mut self) {
        self.selection = None;
        self.quantity_input = DEFAULT_QUANTITY;
    }

    // -- line edits ---------------------------------------------------------

    /// "Add Item" with the current selection and quantity input.
    ///
    /// Fails with a validation error when nothing is selected.
    pub fn add_item(&mut self) -> DomainResult<&OrderLine> {
        let item = self
            .selection()
            .cloned()
            .ok_or_else(|| DomainError::validation("no item selected"))?;
        let quantity = i64::from(self.quantity_input);
        self.add(item, quantity)
    }

    /// Add `quantity` of the item named `name`, merging into an existing line.
    ///
    /// An empty name is treated as "no selection".
    pub fn add_named(&mut self, name: &str, quantity: i64) -> DomainResult<&OrderLine> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("no item selected"));
        }
        let item = self
            .catalog
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("catalog item {:?}", name.trim())))?;
        self.add(item, quantity)
    }

    fn add(&mut self, item: CatalogItem, quantity: i64) -> DomainResult<&OrderLine> {
        let item_id = item.id;
        let cmd = DraftCommand::AddItem(AddItem {
            draft_id: self.draft.id_typed(),
            item,
            quantity,
            occurred_at: Utc::now(),
        });
        self.execute(cmd)?;
        self.reset_inputs();

        let index = self
            .draft
            .position_of(item_id)
            .ok_or_else(|| DomainError::invariant("added line is missing from draft"))?;
        let line = &self.draft.lines()[index];
        tracing::debug!(item = %line.name, quantity = line.quantity, "line added");
        Ok(line)
    }

    /// Delete the line at `index`; the others keep their relative order.
    pub fn remove_item(&mut self, index: usize) -> DomainResult<OrderLine> {
        let removed = self
            .draft
            .line(index)
            .cloned()
            .ok_or_else(|| self.missing_line(index))?;
        self.execute(DraftCommand::RemoveLine(RemoveLine {
            draft_id: self.draft.id_typed(),
            index,
            occurred_at: Utc::now(),
        }))?;
        tracing::debug!(item = %removed.name, index, "line removed");
        Ok(removed)
    }

    /// Replace the quantity at `index`.
    ///
    /// `new_quantity <= 0` is rejected and the line stays as it is; lines are
    /// only ever removed by `remove_item`.
    pub fn update_quantity(&mut self, index: usize, new_quantity: i64) -> DomainResult<()> {
        let result = self.execute(DraftCommand::UpdateQuantity(UpdateQuantity {
            draft_id: self.draft.id_typed(),
            index,
            quantity: new_quantity,
            occurred_at: Utc::now(),
        }));
        if let Err(DomainError::Validation(reason)) = &result {
            tracing::warn!(index, new_quantity, %reason, "quantity update rejected");
        }
        result.map(|_| ())
    }

    /// The "+" control.
    pub fn increment(&mut self, index: usize) -> DomainResult<()> {
        let current = self.current_quantity(index)?;
        self.update_quantity(index, current + 1)
    }

    /// The "-" control. On a line with quantity 1 this is rejected and the
    /// line is kept.
    pub fn decrement(&mut self, index: usize) -> DomainResult<()> {
        let current = self.current_quantity(index)?;
        self.update_quantity(index, current - 1)
    }

    fn current_quantity(&self, index: usize) -> DomainResult<i64> {
        self.draft
            .line(index)
            .map(|l| i64::from(l.quantity))
            .ok_or_else(|| self.missing_line(index))
    }

    fn missing_line(&self, index: usize) -> DomainError {
        DomainError::not_found(format!(
            "line {index} (draft has {} lines)",
            self.draft.len()
        ))
    }

    fn execute(&mut self, cmd: DraftCommand) -> DomainResult<Vec<DraftEvent>> {
        let events = self.draft.execute(&cmd)?;
        self.history.append(events.iter().cloned());
        Ok(events)
    }

    // -- derived ------------------------------------------------------------

    /// Σ price × quantity over the current lines.
    pub fn calculate_total(&self) -> Money {
        self.draft.total()
    }

    /// Whether the line orders more than the catalog has on hand.
    pub fn exceeds_stock(&self, line: &OrderLine) -> bool {
        self.catalog
            .get(line.item_id)
            .is_some_and(|item| line.quantity > item.stock_on_hand)
    }

    // -- save / print / export ----------------------------------------------

    /// "Save Order": snapshot the draft in memory. The draft is kept.
    pub fn save(&mut self) -> DomainResult<&SavedOrder> {
        if self.draft.is_empty() {
            return Err(DomainError::validation("cannot save an empty purchase order"));
        }

        let saved = SavedOrder {
            order_id: OrderId::new(),
            draft_id: self.draft.id_typed(),
            lines: self.draft.lines().to_vec(),
            total: self.draft.total(),
            saved_at: Utc::now(),
        };
        tracing::info!(
            order_id = %saved.order_id,
            lines = saved.lines.len(),
            total = %saved.total,
            "purchase order saved"
        );
        self.saved.push(saved);

        self.saved
            .last()
            .ok_or_else(|| DomainError::invariant("saved order is missing"))
    }

    /// "Print Invoice": a printable rendition of the current draft.
    pub fn invoice(&self) -> DomainResult<Invoice> {
        if self.draft.is_empty() {
            return Err(DomainError::validation("nothing to print: purchase order is empty"));
        }
        Ok(Invoice::new(
            self.draft.id_typed(),
            self.draft.lines().to_vec(),
            Utc::now(),
        ))
    }

    /// Pretty JSON of the current draft (id, lines, total).
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&DraftExport {
            draft_id: self.draft.id_typed(),
            lines: self.draft.lines(),
            total: self.draft.total(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::AggregateRoot;

    fn editor() -> OrderEditor {
        OrderEditor::new(Catalog::sample())
    }

    fn quantities(editor: &OrderEditor) -> Vec<(String, u32)> {
        editor
            .lines()
            .iter()
            .map(|l| (l.name.clone(), l.quantity))
            .collect()
    }

    #[test]
    fn walkthrough_add_merge_reject_remove() {
        let mut editor = editor();

        editor.add_named("Product A", 2).unwrap();
        assert_eq!(quantities(&editor), vec![("Product A".to_string(), 2)]);
        assert_eq!(editor.calculate_total().to_string(), "$21.98");

        editor.add_named("Product A", 1).unwrap();
        assert_eq!(quantities(&editor), vec![("Product A".to_string(), 3)]);
        assert_eq!(editor.calculate_total().to_string(), "$32.97");

        let err = editor.update_quantity(0, -5).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(editor.lines()[0].quantity, 3);

        editor.remove_item(0).unwrap();
        assert!(editor.lines().is_empty());
        assert_eq!(editor.calculate_total(), Money::ZERO);
    }

    #[test]
    fn add_without_selection_is_rejected_and_changes_nothing() {
        let mut editor = editor();
        editor.set_quantity_input("4").unwrap();

        let err = editor.add_item().unwrap_err();
        assert_eq!(err, DomainError::validation("no item selected"));
        assert!(editor.lines().is_empty());
        assert_eq!(editor.quantity_input(), 4);
        assert!(editor.history().is_empty());

        assert!(matches!(
            editor.add_named("  ", 1).unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[test]
    fn successful_add_resets_inputs() {
        let mut editor = editor();
        editor.select("Product B").unwrap();
        editor.set_quantity_input("3").unwrap();

        let line = editor.add_item().unwrap();
        assert_eq!(line.quantity, 3);
        assert!(editor.selection().is_none());
        assert_eq!(editor.quantity_input(), DEFAULT_QUANTITY);
    }

    #[test]
    fn failed_add_keeps_inputs() {
        let mut editor = editor();
        editor.select("Product A").unwrap();
        editor.add_named("Product A", i64::from(u32::MAX)).unwrap();

        editor.select("Product A").unwrap();
        editor.set_quantity_input("2").unwrap();
        assert!(editor.add_item().is_err());
        assert_eq!(editor.selection().map(|i| i.id), Some(ItemId(1)));
        assert_eq!(editor.quantity_input(), 2);
    }

    #[test]
    fn unknown_item_is_not_found() {
        let mut editor = editor();
        assert!(matches!(
            editor.select("Product Z").unwrap_err(),
            DomainError::NotFound(_)
        ));
        assert!(matches!(
            editor.add_named("Product Z", 1).unwrap_err(),
            DomainError::NotFound(_)
        ));
    }

    #[test]
    fn non_numeric_quantity_input_keeps_previous_value() {
        let mut editor = editor();
        editor.set_quantity_input("5").unwrap();

        for bad in ["abc", "", "2.5", "0", "-1"] {
            assert!(editor.set_quantity_input(bad).is_err(), "accepted {bad:?}");
            assert_eq!(editor.quantity_input(), 5);
        }
    }

    #[test]
    fn decrement_at_one_keeps_the_line() {
        let mut editor = editor();
        editor.add_named("Product C", 1).unwrap();

        assert!(editor.decrement(0).is_err());
        assert_eq!(quantities(&editor), vec![("Product C".to_string(), 1)]);

        editor.increment(0).unwrap();
        editor.increment(0).unwrap();
        editor.decrement(0).unwrap();
        assert_eq!(editor.lines()[0].quantity, 2);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut editor = editor();
        editor.add_named("Product A", 1).unwrap();
        editor.add_named("Product B", 1).unwrap();
        editor.add_named("Product C", 1).unwrap();

        let removed = editor.remove_item(1).unwrap();
        assert_eq!(removed.name, "Product B");
        let names: Vec<&str> = editor.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Product A", "Product C"]);

        assert!(matches!(
            editor.remove_item(5).unwrap_err(),
            DomainError::NotFound(_)
        ));
        assert_eq!(editor.lines().len(), 2);
    }

    #[test]
    fn stock_overrun_is_flagged_not_rejected() {
        let mut editor = editor();
        editor.add_named("Product C", 51).unwrap();
        let line = editor.lines()[0].clone();
        assert!(editor.exceeds_stock(&line));

        editor.update_quantity(0, 50).unwrap();
        let line = editor.lines()[0].clone();
        assert!(!editor.exceeds_stock(&line));
    }

    #[test]
    fn history_records_applied_events_in_order() {
        let mut editor = editor();
        editor.add_named("Product A", 1).unwrap();
        editor.add_named("Product A", 1).unwrap();
        editor.update_quantity(0, 9).unwrap();
        let _ = editor.update_quantity(0, 0);
        editor.remove_item(0).unwrap();

        let kinds: Vec<&str> = editor
            .history()
            .iter()
            .map(|r| match r.payload {
                DraftEvent::LineAdded(_) => "added",
                DraftEvent::LineQuantityIncreased(_) => "increased",
                DraftEvent::LineQuantityChanged(_) => "changed",
                DraftEvent::LineRemoved(_) => "removed",
            })
            .collect();
        assert_eq!(kinds, vec!["added", "increased", "changed", "removed"]);
        assert_eq!(editor.history().last_sequence(), editor.draft().version());
    }

    #[test]
    fn save_snapshots_without_clearing() {
        let mut editor = editor();
        assert!(editor.save().is_err());

        editor.add_named("Product B", 2).unwrap();
        let saved = editor.save().unwrap().clone();
        assert_eq!(saved.total, Money::from_cents(3198));
        assert_eq!(saved.lines.len(), 1);
        assert_eq!(editor.saved_orders().len(), 1);
        assert_eq!(editor.lines().len(), 1);
    }

    #[test]
    fn export_contains_lines_and_total() {
        let mut editor = editor();
        editor.add_named("Product A", 2).unwrap();

        let json: serde_json::Value = serde_json::from_str(&editor.export_json().unwrap()).unwrap();
        assert_eq!(json["total"], 2198);
        assert_eq!(json["lines"][0]["name"], "Product A");
        assert_eq!(json["lines"][0]["quantity"], 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(usize, i64),
            Update(usize, i64),
            Remove(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0usize..3, -3i64..20).prop_map(|(i, q)| Op::Add(i, q)),
                (0usize..5, -3i64..20).prop_map(|(i, q)| Op::Update(i, q)),
                (0usize..5).prop_map(Op::Remove),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: after any sequence of edits the lines match a plain
            /// `(item, quantity)` model that merges adds, ignores rejected
            /// updates, and removes by position. The total is checked
            /// against that model rather than against the editor's lines.
            #[test]
            fn edits_match_a_reference_model(
                ops in prop::collection::vec(op(), 0..40)
            ) {
                let mut editor = editor();
                let catalog: Vec<(ItemId, u64)> = editor
                    .catalog()
                    .iter()
                    .map(|i| (i.id, i.unit_price.cents()))
                    .collect();
                let names: Vec<String> =
                    editor.catalog().iter().map(|i| i.name.clone()).collect();
                let mut model: Vec<(ItemId, u32)> = Vec::new();

                for op in ops {
                    match op {
                        Op::Add(i, q) => {
                            let accepted = editor.add_named(&names[i], q).is_ok();
                            prop_assert_eq!(accepted, q >= 1);
                            if accepted {
                                let id = catalog[i].0;
                                let added = u32::try_from(q).unwrap();
                                match model.iter_mut().find(|(item, _)| *item == id) {
                                    Some((_, quantity)) => *quantity += added,
                                    None => model.push((id, added)),
                                }
                            }
                        }
                        Op::Update(i, q) => {
                            let accepted = editor.update_quantity(i, q).is_ok();
                            prop_assert_eq!(accepted, i < model.len() && q >= 1);
                            if accepted {
                                model[i].1 = u32::try_from(q).unwrap();
                            }
                        }
                        Op::Remove(i) => {
                            let accepted = editor.remove_item(i).is_ok();
                            prop_assert_eq!(accepted, i < model.len());
                            if accepted {
                                model.remove(i);
                            }
                        }
                    }
                }

                let actual: Vec<(ItemId, u32)> =
                    editor.lines().iter().map(|l| (l.item_id, l.quantity)).collect();
                prop_assert_eq!(&actual, &model);

                let expected: u64 = model
                    .iter()
                    .map(|(id, quantity)| {
                        let price = catalog.iter().find(|(c, _)| c == id).unwrap().1;
                        price * u64::from(*quantity)
                    })
                    .sum();
                prop_assert_eq!(editor.calculate_total().cents(), expected);
                prop_assert_eq!(editor.history().last_sequence(), editor.draft().version());
            }
        }
    }
}
