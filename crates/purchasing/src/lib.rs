//! Purchasing domain module (purchase order drafts).
//!
//! The order draft is an event-driven aggregate; the editor wraps it with the
//! selection and quantity inputs of the purchase order page. Everything is
//! in-memory and synchronous.

pub mod draft;
pub mod editor;
pub mod invoice;

pub use draft::{
    AddItem, DraftCommand, DraftEvent, LineAdded, LineQuantityChanged, LineQuantityIncreased,
    LineRemoved, OrderDraft, OrderLine, RemoveLine, UpdateQuantity,
};
pub use editor::{DEFAULT_QUANTITY, OrderEditor, SavedOrder};
pub use invoice::Invoice;
