//! Focus coordinator context and hooks.

use std::rc::Rc;

use dioxus::prelude::*;
use selection::{Doc, FocusCoordinator, FocusSelection, ListSelection, ListSelectionProvider, SelectDirection};
use tokio::sync::watch;

/// Create the coordinator for documents of type `D` and provide it to all
/// child components.
pub fn provide_focus_coordinator<D: Doc>() -> FocusCoordinator<D> {
    use_context_provider(FocusCoordinator::<D>::new)
}

/// Get the coordinator provided by an ancestor.
pub fn use_focus_coordinator<D: Doc>() -> FocusCoordinator<D> {
    use_context::<FocusCoordinator<D>>()
}

/// The focused document and its provider. Updates when focus changes.
pub fn use_focus<D: Doc>() -> Signal<FocusSelection<D>> {
    let coordinator = use_focus_coordinator::<D>();
    use_watched(move || coordinator.subscribe_focus())
}

/// The multi-selected documents.
pub fn use_selection<D: Doc>() -> Signal<Vec<D>> {
    let coordinator = use_focus_coordinator::<D>();
    use_watched(move || coordinator.subscribe_selection())
}

/// The document shown in the preview panel, if it is open.
pub fn use_preview<D: Doc>() -> Signal<Option<D>> {
    let coordinator = use_focus_coordinator::<D>();
    use_watched(move || coordinator.subscribe_preview())
}

/// Register the calling component as a selectable list.
///
/// The provider is created on first render. Its focus claim is released when
/// the component is dropped.
pub fn use_list_selection<D: Doc>(
    select_next: impl Fn(usize, Option<SelectDirection>) + 'static,
    select_prev: impl Fn(usize, Option<SelectDirection>) + 'static,
) -> Rc<ListSelection<D>> {
    let coordinator = use_focus_coordinator::<D>();
    let list = use_hook(move || {
        Rc::new(ListSelectionProvider::new(coordinator, select_next, select_prev))
    });

    let registered = list.clone();
    use_drop(move || registered.release());

    list
}

/// Mirror a watch channel into a signal owned by the current component.
fn use_watched<T: Clone + 'static>(subscribe: impl FnOnce() -> watch::Receiver<T>) -> Signal<T> {
    use_hook(move || {
        let mut updates = subscribe();
        let mut value = Signal::new(updates.borrow_and_update().clone());
        spawn(async move {
            while updates.changed().await.is_ok() {
                let current = updates.borrow_and_update().clone();
                value.set(current);
            }
        });
        value
    })
}
