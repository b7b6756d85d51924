//! # List selection provider
//!
//! [`ListSelectionProvider`] is the [`SelectionFocusProvider`] used by list
//! components. The component hands it the documents it renders plus two
//! callbacks that move the highlight, and keeps the returned
//! [`ListSelection`] alive for as long as it is mounted. Dropping the guard
//! gives up the list's focus claim.

use std::cell::RefCell;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use tokio::sync::watch;

use crate::coordinator::FocusCoordinator;
use crate::focus::{Doc, FocusSelection, SelectDirection, SelectionFocusProvider};

type SelectCallback = Box<dyn Fn(usize, Option<SelectDirection>)>;

/// Provider backing one rendered list.
pub struct ListSelectionProvider<D: Doc> {
    this: Weak<Self>,
    coordinator: FocusCoordinator<D>,
    docs: RefCell<Vec<D>>,
    current: watch::Receiver<FocusSelection<D>>,
    select_next: SelectCallback,
    select_prev: SelectCallback,
}

impl<D: Doc> ListSelectionProvider<D> {
    /// Register a new list with `coordinator`.
    ///
    /// `select_next` / `select_prev` receive the index the move starts from
    /// and the optional axis.
    pub fn new(
        coordinator: FocusCoordinator<D>,
        select_next: impl Fn(usize, Option<SelectDirection>) + 'static,
        select_prev: impl Fn(usize, Option<SelectDirection>) + 'static,
    ) -> ListSelection<D> {
        let current = coordinator.subscribe_focus();
        let provider = Rc::new_cyclic(|this| Self {
            this: this.clone(),
            coordinator,
            docs: RefCell::new(Vec::new()),
            current,
            select_next: Box::new(select_next),
            select_prev: Box::new(select_prev),
        });
        ListSelection { provider }
    }

    /// Whether this list currently holds the focus.
    pub fn has_focus(&self) -> bool {
        self.current.borrow().is_held_by(self)
    }

    fn current_focus(&self) -> FocusSelection<D> {
        self.current.borrow().clone()
    }

    fn claim(&self, doc: D) {
        let Some(this) = self.this.upgrade() else {
            tracing::debug!("list provider dropped before claiming focus");
            return;
        };
        self.coordinator
            .update_focus(Some(FocusSelection::new(doc, this)));
    }
}

impl<D: Doc> SelectionFocusProvider<D> for ListSelectionProvider<D> {
    fn next(&self, direction: Option<SelectDirection>) -> bool {
        if self.docs.borrow().is_empty() {
            return false;
        }
        let from = self.current(&self.current_focus()).unwrap_or(0);
        (self.select_next)(from, direction);
        true
    }

    fn prev(&self, direction: Option<SelectDirection>) -> bool {
        let len = self.docs.borrow().len();
        if len == 0 {
            return false;
        }
        let from = self.current(&self.current_focus()).unwrap_or(len - 1);
        (self.select_prev)(from, direction);
        true
    }

    fn update(&self, docs: Vec<D>) {
        *self.docs.borrow_mut() = docs;

        // Keep the focus on something this list still shows
        let focus = self.current_focus();
        let claim = {
            let docs = self.docs.borrow();
            match docs.first() {
                Some(first) if self.current(&focus).is_none() => Some(first.clone()),
                _ => None,
            }
        };
        if let Some(first) = claim {
            self.claim(first);
        }
    }

    fn current(&self, selection: &FocusSelection<D>) -> Option<usize> {
        let id = selection.focus_id()?;
        self.docs.borrow().iter().position(|doc| doc.id() == id)
    }

    fn update_focus(&self, doc: D) {
        self.claim(doc);
    }

    fn update_selection(&self, docs: &[D], add: bool) {
        self.coordinator.update_selection(docs, add);
    }

    fn docs(&self) -> Vec<D> {
        self.docs.borrow().clone()
    }
}

/// Owning handle for a registered list. Dropping it releases the focus.
pub struct ListSelection<D: Doc> {
    provider: Rc<ListSelectionProvider<D>>,
}

impl<D: Doc> ListSelection<D> {
    /// The provider as a trait object, e.g. for building a [`FocusSelection`].
    pub fn provider(&self) -> Rc<dyn SelectionFocusProvider<D>> {
        self.provider.clone()
    }

    /// Give up the focus if this list holds it. Safe to call repeatedly.
    pub fn release(&self) {
        self.provider.coordinator.release(self.provider.as_ref());
    }
}

impl<D: Doc> Deref for ListSelection<D> {
    type Target = ListSelectionProvider<D>;

    fn deref(&self) -> &Self::Target {
        &self.provider
    }
}

impl<D: Doc> Drop for ListSelection<D> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::coordinator::FOCUS_DEBOUNCE;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
    }

    impl Doc for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn notes(ids: &[&str]) -> Vec<Note> {
        ids.iter().map(|id| Note { id: id.to_string() }).collect()
    }

    type Moves = Rc<RefCell<Vec<(&'static str, usize, Option<SelectDirection>)>>>;

    struct Fixture {
        coordinator: FocusCoordinator<Note>,
        clock: Rc<ManualClock>,
        moves: Moves,
    }

    impl Fixture {
        fn new() -> Self {
            let clock = Rc::new(ManualClock::new());
            Self {
                coordinator: FocusCoordinator::with_clock(clock.clone()),
                clock,
                moves: Rc::default(),
            }
        }

        fn list(&self) -> ListSelection<Note> {
            let next_moves = self.moves.clone();
            let prev_moves = self.moves.clone();
            ListSelectionProvider::new(
                self.coordinator.clone(),
                move |from, dir| next_moves.borrow_mut().push(("next", from, dir)),
                move |from, dir| prev_moves.borrow_mut().push(("prev", from, dir)),
            )
        }

        fn tick(&self) {
            self.clock.advance(FOCUS_DEBOUNCE);
        }

        fn focused(&self) -> Option<String> {
            self.coordinator.focus().focus.map(|n| n.id)
        }
    }

    #[test]
    fn test_first_update_claims_first_document() {
        let fx = Fixture::new();
        let list = fx.list();

        list.update(notes(&["a", "b", "c"]));

        assert_eq!(fx.focused().as_deref(), Some("a"));
        assert!(list.has_focus());
        assert_eq!(fx.coordinator.current(), Some(0));
    }

    #[test]
    fn test_empty_update_does_not_claim() {
        let fx = Fixture::new();
        let list = fx.list();

        list.update(Vec::new());

        assert_eq!(fx.focused(), None);
        assert!(!list.has_focus());
    }

    #[test]
    fn test_removed_focus_moves_to_new_first() {
        let fx = Fixture::new();
        let list = fx.list();
        list.update(notes(&["a", "b", "c"]));

        fx.tick();
        list.update_focus(Note { id: "b".into() });
        assert_eq!(fx.focused().as_deref(), Some("b"));

        fx.tick();
        list.update(notes(&["c", "d"]));
        assert_eq!(fx.focused().as_deref(), Some("c"));
    }

    #[test]
    fn test_present_focus_is_kept() {
        let fx = Fixture::new();
        let list = fx.list();
        list.update(notes(&["a", "b"]));

        fx.tick();
        list.update_focus(Note { id: "b".into() });

        fx.tick();
        list.update(notes(&["x", "b", "y"]));
        assert_eq!(fx.focused().as_deref(), Some("b"));
        assert_eq!(fx.coordinator.current(), Some(1));
    }

    #[test]
    fn test_navigation_from_nothing_uses_boundaries() {
        let fx = Fixture::new();
        let list = fx.list();
        list.update(notes(&["a", "b", "c"]));

        // Focus elsewhere so this list resolves no current index
        fx.tick();
        fx.coordinator.update_focus(None);

        assert!(list.next(Some(SelectDirection::Vertical)));
        assert!(list.prev(Some(SelectDirection::Horizontal)));

        assert_eq!(
            *fx.moves.borrow(),
            vec![
                ("next", 0, Some(SelectDirection::Vertical)),
                ("prev", 2, Some(SelectDirection::Horizontal)),
            ]
        );
    }

    #[test]
    fn test_navigation_from_focused_index() {
        let fx = Fixture::new();
        let list = fx.list();
        list.update(notes(&["a", "b", "c"]));

        fx.tick();
        list.update_focus(Note { id: "b".into() });

        assert!(fx.coordinator.next(None));
        assert!(fx.coordinator.prev(Some(SelectDirection::Vertical)));
        assert_eq!(
            *fx.moves.borrow(),
            vec![("next", 1, None), ("prev", 1, Some(SelectDirection::Vertical))]
        );
    }

    #[test]
    fn test_navigation_on_empty_list_declines() {
        let fx = Fixture::new();
        let list = fx.list();

        assert!(!list.next(None));
        assert!(!list.prev(None));
        assert!(fx.moves.borrow().is_empty());
    }

    #[test]
    fn test_dropping_focused_list_clears_focus() {
        let fx = Fixture::new();
        let list = fx.list();
        list.update(notes(&["a"]));
        assert!(fx.focused().is_some());

        drop(list);
        let focus = fx.coordinator.focus();
        assert!(focus.focus.is_none());
        assert!(focus.provider.is_none());
    }

    #[test]
    fn test_release_is_idempotent() {
        let fx = Fixture::new();
        let list = fx.list();
        list.update(notes(&["a"]));

        list.release();
        list.release();
        assert_eq!(fx.focused(), None);

        // The list can claim focus again afterwards
        fx.tick();
        list.update(notes(&["a", "b"]));
        assert_eq!(fx.focused().as_deref(), Some("a"));
    }

    #[test]
    fn test_dropping_other_list_keeps_focus() {
        let fx = Fixture::new();
        let sidebar = fx.list();
        let main = fx.list();
        sidebar.update(notes(&["s1"]));

        fx.tick();
        main.update(notes(&["m1"]));
        assert!(main.has_focus());

        drop(sidebar);
        assert_eq!(fx.focused().as_deref(), Some("m1"));
    }

    #[test]
    fn test_switching_lists_prunes_selection() {
        let fx = Fixture::new();
        let first = fx.list();
        let second = fx.list();

        first.update(notes(&["a", "b", "c"]));
        first.update_selection(&notes(&["a", "b"]), true);
        assert_eq!(fx.coordinator.selection().len(), 2);

        fx.tick();
        second.update(notes(&["b", "z"]));
        assert!(second.has_focus());
        assert_eq!(fx.coordinator.selection(), notes(&["b"]));
    }

    #[test]
    fn test_callback_can_move_focus() {
        let fx = Fixture::new();
        let list = Rc::new(RefCell::new(None::<Rc<dyn SelectionFocusProvider<Note>>>));
        let docs = notes(&["a", "b", "c"]);

        let handle = list.clone();
        let all = docs.clone();
        let guard = ListSelectionProvider::new(
            fx.coordinator.clone(),
            move |from, _| {
                let target = all[(from + 1).min(all.len() - 1)].clone();
                if let Some(provider) = handle.borrow().as_ref() {
                    provider.update_focus(target);
                }
            },
            |_, _| {},
        );
        *list.borrow_mut() = Some(guard.provider());
        guard.update(docs);

        fx.tick();
        assert!(fx.coordinator.next(Some(SelectDirection::Vertical)));
        assert_eq!(fx.focused().as_deref(), Some("b"));

        list.borrow_mut().take();
    }
}
