//! Reconciliation engine and the session object driving it.
//!
//! [`reconcile`] is a pure function over two record sets.
//! [`ValidationSession`] owns the loaded sides, the latest result and its
//! cursor, and exposes the load / reconcile / navigate / export operations a
//! presentation layer needs.

#![deny(unsafe_code)]

pub mod engine;
pub mod session;
pub mod view;

pub use engine::reconcile;
pub use session::ValidationSession;
pub use view::{EMPTY_NOTES, GroupView, IDENTIFIER_LABEL, NOTES_LABEL, ViewRow};
