//! # Focus coordinator: owner of the focus, selection and preview slots
//!
//! [`FocusCoordinator`] replaces module-level stores with one explicit state
//! owner that is handed to components (see the `ui` crate for the Dioxus
//! context wiring). Each slot is a [`tokio::sync::watch`] channel: writes go
//! through the coordinator, reads are snapshots or subscriptions.
//!
//! ## Focus debounce
//!
//! Keyboard repeat and re-entrant list updates can fire several focus changes
//! in the same burst. A focus update arriving less than [`FOCUS_DEBOUNCE`]
//! after the previous effective one is dropped, except when it clears focus.
//! Time is read from the injected [`Clock`].
//!
//! ## Selection pruning
//!
//! Every focus update that carries a provider drops selected documents the
//! provider does not list, whether or not the focus change itself went
//! through the debounce.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::watch;

use crate::clock::{Clock, SystemClock};
use crate::focus::{Doc, FocusSelection, SelectDirection, SelectionFocusProvider};

/// Minimum spacing between two effective focus updates.
pub const FOCUS_DEBOUNCE: Duration = Duration::from_millis(25);

struct Slots<D: Doc> {
    focus: watch::Sender<FocusSelection<D>>,
    selection: watch::Sender<Vec<D>>,
    preview: watch::Sender<Option<D>>,
    last_applied: Cell<Option<Duration>>,
    clock: Rc<dyn Clock>,
}

/// Shared handle to the focus, selection and preview state.
///
/// Cloning is cheap; all clones observe and mutate the same slots.
pub struct FocusCoordinator<D: Doc> {
    slots: Rc<Slots<D>>,
}

impl<D: Doc> Clone for FocusCoordinator<D> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<D: Doc> Default for FocusCoordinator<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Doc> FocusCoordinator<D> {
    /// Coordinator driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock::new()))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            slots: Rc::new(Slots {
                focus: watch::Sender::new(FocusSelection::empty()),
                selection: watch::Sender::new(Vec::new()),
                preview: watch::Sender::new(None),
                last_applied: Cell::new(None),
                clock,
            }),
        }
    }

    /// Set the focused document and its provider. `None` clears focus.
    pub fn update_focus(&self, selection: Option<FocusSelection<D>>) {
        let now = self.slots.clock.now();
        let effective = match (&selection, self.slots.last_applied.get()) {
            (None, _) | (_, None) => true,
            (Some(_), Some(last)) => now.saturating_sub(last) >= FOCUS_DEBOUNCE,
        };
        let provider = selection.as_ref().and_then(|s| s.provider.clone());

        if effective {
            let next = selection.unwrap_or_default();
            let focus = next.focus.clone();
            self.slots.last_applied.set(Some(now));
            self.slots.focus.send_replace(next);
            self.slots.preview.send_if_modified(|preview| {
                if preview.is_none() {
                    return false;
                }
                *preview = focus;
                true
            });
        } else {
            tracing::trace!("focus update coalesced");
        }

        if let Some(provider) = provider {
            self.prune_selection(provider.as_ref());
        }
    }

    /// Clear focus if `provider` is the one holding it.
    pub fn release<P: ?Sized>(&self, provider: &P) {
        let held = self.slots.focus.borrow().is_held_by(provider);
        if held {
            self.update_focus(None);
        }
    }

    /// Add `docs` to the selection (`add == true`) or remove them.
    pub fn update_selection(&self, docs: &[D], add: bool) {
        let ids: HashSet<&str> = docs.iter().map(Doc::id).collect();
        self.slots.selection.send_modify(|selection| {
            selection.retain(|doc| !ids.contains(doc.id()));
            if add {
                let mut seen = HashSet::new();
                selection.extend(docs.iter().filter(|doc| seen.insert(doc.id())).cloned());
            }
        });
    }

    /// Open (`Some`) or close (`None`) the preview slot.
    pub fn set_preview(&self, doc: Option<D>) {
        self.slots.preview.send_replace(doc);
    }

    /// Position of the focused document inside its provider's list.
    pub fn current(&self) -> Option<usize> {
        let selection = self.focus();
        selection.provider.as_ref()?.current(&selection)
    }

    /// Ask the focused list to move forward. `false` if nothing handled it.
    pub fn next(&self, direction: Option<SelectDirection>) -> bool {
        let provider = self.slots.focus.borrow().provider.clone();
        provider.is_some_and(|p| p.next(direction))
    }

    /// Ask the focused list to move backward. `false` if nothing handled it.
    pub fn prev(&self, direction: Option<SelectDirection>) -> bool {
        let provider = self.slots.focus.borrow().provider.clone();
        provider.is_some_and(|p| p.prev(direction))
    }

    pub fn focus(&self) -> FocusSelection<D> {
        self.slots.focus.borrow().clone()
    }

    pub fn selection(&self) -> Vec<D> {
        self.slots.selection.borrow().clone()
    }

    pub fn preview(&self) -> Option<D> {
        self.slots.preview.borrow().clone()
    }

    pub fn subscribe_focus(&self) -> watch::Receiver<FocusSelection<D>> {
        self.slots.focus.subscribe()
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<Vec<D>> {
        self.slots.selection.subscribe()
    }

    pub fn subscribe_preview(&self) -> watch::Receiver<Option<D>> {
        self.slots.preview.subscribe()
    }

    fn prune_selection(&self, provider: &dyn SelectionFocusProvider<D>) {
        let known: HashSet<String> = provider.docs().iter().map(|d| d.id().to_owned()).collect();
        self.slots.selection.send_if_modified(|selection| {
            let before = selection.len();
            selection.retain(|doc| known.contains(doc.id()));
            selection.len() != before
        });
    }
}
