//! # Focus model: documents, focus selections and the provider capability
//!
//! A [`FocusSelection`] pairs the focused document with the provider of the
//! list that claimed it. Providers implement [`SelectionFocusProvider`], the
//! only way the coordinator learns which documents a list shows and where
//! the focused one sits inside it.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// A document that can be focused or selected. Only its id matters here.
pub trait Doc: Clone + 'static {
    fn id(&self) -> &str;
}

/// Axis used by keyboard navigation.
///
/// - `Vertical`: next is the item below, prev the item above.
/// - `Horizontal`: next is the item on the right, prev the item on the left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectDirection {
    Vertical,
    Horizontal,
}

/// Navigation and selection capability registered by a list component.
///
/// `next` and `prev` are optional: the default implementations decline by
/// returning `false`, which the coordinator reports back to the caller.
pub trait SelectionFocusProvider<D: Doc> {
    /// Move focus forward along `direction`.
    fn next(&self, direction: Option<SelectDirection>) -> bool {
        let _ = direction;
        false
    }

    /// Move focus backward along `direction`.
    fn prev(&self, direction: Option<SelectDirection>) -> bool {
        let _ = direction;
        false
    }

    /// Replace the documents shown by the list.
    fn update(&self, docs: Vec<D>);

    /// Index of `selection`'s focused document inside this list.
    fn current(&self, selection: &FocusSelection<D>) -> Option<usize>;

    /// Focus `doc`. The selection set is not changed.
    fn update_focus(&self, doc: D);

    /// Add or remove `docs` from the selection set. Focus is not changed.
    fn update_selection(&self, docs: &[D], add: bool);

    /// All selectable documents of the list.
    fn docs(&self) -> Vec<D>;
}

/// The focused document and the provider that owns it.
#[derive(Clone)]
pub struct FocusSelection<D: Doc> {
    pub focus: Option<D>,
    pub provider: Option<Rc<dyn SelectionFocusProvider<D>>>,
}

impl<D: Doc> FocusSelection<D> {
    pub fn new(focus: D, provider: Rc<dyn SelectionFocusProvider<D>>) -> Self {
        Self {
            focus: Some(focus),
            provider: Some(provider),
        }
    }

    pub fn empty() -> Self {
        Self {
            focus: None,
            provider: None,
        }
    }

    pub fn focus_id(&self) -> Option<&str> {
        self.focus.as_ref().map(Doc::id)
    }

    /// Whether `provider` is the one that claimed this focus.
    pub fn is_held_by<P: ?Sized>(&self, provider: &P) -> bool {
        self.provider
            .as_ref()
            .is_some_and(|p| std::ptr::addr_eq(Rc::as_ptr(p), provider as *const P))
    }
}

impl<D: Doc> Default for FocusSelection<D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<D: Doc> fmt::Debug for FocusSelection<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusSelection")
            .field("focus", &self.focus_id())
            .field("provider", &self.provider.is_some())
            .finish()
    }
}
