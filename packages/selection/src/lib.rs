//! # Selection crate: focus and multi-select state for list views
//!
//! Framework-agnostic state shared by every list-rendering component of the
//! application. Components register a [`SelectionFocusProvider`] with a
//! [`FocusCoordinator`], which tracks the one focused document, the set of
//! multi-selected documents and the preview slot.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`clock`] | Monotonic time source used to debounce focus updates |
//! | [`coordinator`] | [`FocusCoordinator`], the owner of the focus, selection and preview slots |
//! | [`focus`] | [`Doc`], [`FocusSelection`], [`SelectDirection`] and the provider trait |
//! | [`list`] | [`ListSelectionProvider`], the provider used by list components |
//!
//! Everything here is single-threaded (`Rc` / `RefCell`) and meant to run on
//! the UI event loop.

pub mod clock;
pub mod coordinator;
pub mod focus;
pub mod list;

pub use clock::{Clock, ManualClock, SystemClock};
pub use coordinator::{FocusCoordinator, FOCUS_DEBOUNCE};
pub use focus::{Doc, FocusSelection, SelectDirection, SelectionFocusProvider};
pub use list::{ListSelection, ListSelectionProvider};
