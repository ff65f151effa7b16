//! # Opaque Renderables
//!
//! [`View`] is the Dioxus instantiation of the core's opaque renderable `V`:
//! a caller closure producing an [`Element`]. Views are mounted through
//! [`ViewHost`] so that any hooks the closure calls get their own scope.

use std::fmt;
use std::rc::Rc;

use dioxus::prelude::*;

/// Caller-supplied renderable
#[derive(Clone)]
pub struct View(Rc<dyn Fn() -> Element>);

impl View {
    pub fn new(render: impl Fn() -> Element + 'static) -> Self {
        Self(Rc::new(render))
    }

    pub fn render(&self) -> Element {
        (self.0)()
    }
}

impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("View(..)")
    }
}

/// Mount a [`View`] in its own component scope
#[component]
pub fn ViewHost(view: View) -> Element {
    view.render()
}

// ============================================================================
// Concrete Types
// ============================================================================

/// Options passed to `open_dialog`
pub type DialogOptions = dialog_core::DialogOptions<View>;

/// Complete dialog configuration
pub type DialogConfig = dialog_core::DialogConfig<View>;

/// One form field
pub type FieldSpec = dialog_core::FieldSpec<View>;

/// Cancel or submit action
pub type ActionButton = dialog_core::ActionButton<View>;

/// Text or a caller view
pub type Content = dialog_core::Content<View>;

/// Render text or a caller view
pub fn render_content(content: &Content) -> Element {
    match content {
        dialog_core::Content::Text(text) => rsx! { "{text}" },
        dialog_core::Content::View(view) => rsx! {
            ViewHost { view: view.clone() }
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
