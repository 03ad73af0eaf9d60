//! The menu engine: item store, query editing, matching, pagination and
//! the navigation state machine driven by frontend events.

pub mod icon;
pub mod item;
pub mod matcher;
pub mod query;
pub mod session;
pub mod tokenizer;
pub mod viewport;

pub use item::{
  Item,
  ItemId,
  ItemStore,
};
pub use session::{
  Event,
  Options,
  Outcome,
  Session,
};
