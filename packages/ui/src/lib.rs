//! This crate contains the Dioxus bindings shared by list views.
//!
//! The focus coordinator lives in context: the app root calls
//! [`provide_focus_coordinator`] once, list components register through
//! [`use_list_selection`], and anything that renders focus or selection
//! state reads it with [`use_focus`], [`use_selection`] or [`use_preview`].

mod focus;
pub use focus::{
    provide_focus_coordinator, use_focus, use_focus_coordinator, use_list_selection, use_preview,
    use_selection,
};

pub use selection::{
    Doc, FocusCoordinator, FocusSelection, ListSelection, SelectDirection, SelectionFocusProvider,
};

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use selection::{ListSelectionProvider, ManualClock, FOCUS_DEBOUNCE};

    use super::{Doc, FocusCoordinator, SelectionFocusProvider};

    #[derive(Clone, Debug, PartialEq)]
    struct Row(String);

    impl Doc for Row {
        fn id(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_list_updates_through_crate_exports() {
        let clock = Rc::new(ManualClock::new());
        let coordinator = FocusCoordinator::<Row>::with_clock(clock.clone());
        let list = ListSelectionProvider::new(coordinator.clone(), |_, _| {}, |_, _| {});

        list.update(vec![Row("a".into()), Row("b".into())]);
        assert_eq!(coordinator.focus().focus_id(), Some("a"));

        clock.advance(FOCUS_DEBOUNCE);
        list.update_focus(Row("b".into()));
        assert_eq!(coordinator.focus().focus_id(), Some("b"));
        assert_eq!(list.current(&coordinator.focus()), Some(1));
    }
}
