//! Shared record model and batch payload parsing for MarkLens endpoints.

mod batch;
mod record;

pub use batch::{BatchError, batch_items, batch_records};
pub use record::{InputItem, Record};
