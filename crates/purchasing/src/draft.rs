use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Aggregate, AggregateRoot, DomainError, DraftId, Money};
use stockroom_events::Event;
use stockroom_inventory::{CatalogItem, ItemId};

/// One (item, quantity) pairing within a draft.
///
/// `name` and `unit_price` are copied from the catalog entry when the line is
/// first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    /// Always >= 1.
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Aggregate root: OrderDraft.
///
/// Lines keep insertion order and there is at most one line per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    id: DraftId,
    lines: Vec<OrderLine>,
    version: u64,
}

impl OrderDraft {
    pub fn new(id: DraftId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> DraftId {
        self.id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&OrderLine> {
        self.lines.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Position of the line for `item_id`, if any.
    pub fn position_of(&self, item_id: ItemId) -> Option<usize> {
        self.lines.iter().position(|l| l.item_id == item_id)
    }

    /// Σ unit_price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}

impl AggregateRoot for OrderDraft {
    type Id = DraftId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
///
/// Appends a line, or grows the existing line for the same item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub draft_id: DraftId,
    pub item: CatalogItem,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateQuantity (replace the quantity of one line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuantity {
    pub draft_id: DraftId,
    pub index: usize,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveLine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLine {
    pub draft_id: DraftId,
    pub index: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftCommand {
    AddItem(AddItem),
    UpdateQuantity(UpdateQuantity),
    RemoveLine(RemoveLine),
}

/// Event: LineAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub draft_id: DraftId,
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineQuantityIncreased (an item already on the draft was added again).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineQuantityIncreased {
    pub draft_id: DraftId,
    pub index: usize,
    pub item_id: ItemId,
    pub added: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineQuantityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineQuantityChanged {
    pub draft_id: DraftId,
    pub index: usize,
    pub item_id: ItemId,
    pub from: u32,
    pub to: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRemoved {
    pub draft_id: DraftId,
    pub index: usize,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftEvent {
    LineAdded(LineAdded),
    LineQuantityIncreased(LineQuantityIncreased),
    LineQuantityChanged(LineQuantityChanged),
    LineRemoved(LineRemoved),
}

impl Event for DraftEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DraftEvent::LineAdded(_) => "purchasing.draft.line_added",
            DraftEvent::LineQuantityIncreased(_) => "purchasing.draft.line_quantity_increased",
            DraftEvent::LineQuantityChanged(_) => "purchasing.draft.line_quantity_changed",
            DraftEvent::LineRemoved(_) => "purchasing.draft.line_removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DraftEvent::LineAdded(e) => e.occurred_at,
            DraftEvent::LineQuantityIncreased(e) => e.occurred_at,
            DraftEvent::LineQuantityChanged(e) => e.occurred_at,
            DraftEvent::LineRemoved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for OrderDraft {
    type Command = DraftCommand;
    type Event = DraftEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            DraftEvent::LineAdded(e) => {
                self.lines.push(OrderLine {
                    item_id: e.item_id,
                    name: e.name.clone(),
                    unit_price: e.unit_price,
                    quantity: e.quantity,
                });
            }
            DraftEvent::LineQuantityIncreased(e) => {
                if let Some(line) = self.lines.get_mut(e.index) {
                    line.quantity = line.quantity.saturating_add(e.added);
                }
            }
            DraftEvent::LineQuantityChanged(e) => {
                if let Some(line) = self.lines.get_mut(e.index) {
                    line.quantity = e.to;
                }
            }
            DraftEvent::LineRemoved(e) => {
                if e.index < self.lines.len() {
                    self.lines.remove(e.index);
                }
            }
        }

        // +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            DraftCommand::AddItem(cmd) => self.handle_add(cmd),
            DraftCommand::UpdateQuantity(cmd) => self.handle_update(cmd),
            DraftCommand::RemoveLine(cmd) => self.handle_remove(cmd),
        }
    }
}

impl OrderDraft {
    fn ensure_draft_id(&self, draft_id: DraftId) -> Result<(), DomainError> {
        if self.id != draft_id {
            return Err(DomainError::invariant("draft_id mismatch"));
        }
        Ok(())
    }

    fn ensure_line(&self, index: usize) -> Result<&OrderLine, DomainError> {
        self.lines.get(index).ok_or_else(|| {
            DomainError::not_found(format!(
                "line {index} (draft has {} lines)",
                self.lines.len()
            ))
        })
    }

    fn positive_quantity(quantity: i64) -> Result<u32, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        u32::try_from(quantity).map_err(|_| DomainError::validation("quantity is too large"))
    }

    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<DraftEvent>, DomainError> {
        self.ensure_draft_id(cmd.draft_id)?;
        let quantity = Self::positive_quantity(cmd.quantity)?;

        if let Some(index) = self.position_of(cmd.item.id) {
            let existing = &self.lines[index];
            if existing.quantity.checked_add(quantity).is_none() {
                return Err(DomainError::validation("quantity is too large"));
            }
            return Ok(vec![DraftEvent::LineQuantityIncreased(
                LineQuantityIncreased {
                    draft_id: cmd.draft_id,
                    index,
                    item_id: cmd.item.id,
                    added: quantity,
                    occurred_at: cmd.occurred_at,
                },
            )]);
        }

        Ok(vec![DraftEvent::LineAdded(LineAdded {
            draft_id: cmd.draft_id,
            item_id: cmd.item.id,
            name: cmd.item.name.clone(),
            unit_price: cmd.item.unit_price,
            quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateQuantity) -> Result<Vec<DraftEvent>, DomainError> {
        self.ensure_draft_id(cmd.draft_id)?;
        let line = self.ensure_line(cmd.index)?;
        let quantity = Self::positive_quantity(cmd.quantity)?;

        if line.quantity == quantity {
            return Ok(Vec::new());
        }

        Ok(vec![DraftEvent::LineQuantityChanged(LineQuantityChanged {
            draft_id: cmd.draft_id,
            index: cmd.index,
            item_id: line.item_id,
            from: line.quantity,
            to: quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveLine) -> Result<Vec<DraftEvent>, DomainError> {
        self.ensure_draft_id(cmd.draft_id)?;
        let line = self.ensure_line(cmd.index)?;

        Ok(vec![DraftEvent::LineRemoved(LineRemoved {
            draft_id: cmd.draft_id,
            index: cmd.index,
            item_id: line.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
