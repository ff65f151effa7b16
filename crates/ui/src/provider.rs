//! # Dialog Provider
//!
//! Owns one [`DialogStore`] per mount and hands descendants a
//! [`DialogHandle`] through context. The handle is the only way application
//! code touches the dialog: `open_dialog` and `close_dialog`.
//!
//! ## Features
//!
//! - Independent providers never share state
//! - Calls outside a provider degrade to logged no-ops
//! - Session-guarded close/reset for asynchronous callers
//!

use dialog_core::{DialogDefaults, DialogStore, Phase};
use dioxus::prelude::*;

use crate::shell::DialogShell;
use crate::view::{DialogOptions, View};

/// Store shared between the provider, the shell and the form
pub type StoreSignal = Signal<DialogStore<View>>;

// ============================================================================
// Dialog Handle
// ============================================================================

/// Cheap, copyable access to the nearest provider's dialog
#[derive(Clone, Copy, PartialEq)]
pub struct DialogHandle {
    store: Option<StoreSignal>,
}

impl DialogHandle {
    pub(crate) fn attached(store: StoreSignal) -> Self {
        Self { store: Some(store) }
    }

    /// Handle that is not connected to any provider; every operation is a no-op
    pub fn detached() -> Self {
        Self { store: None }
    }

    pub fn is_attached(&self) -> bool {
        self.store.is_some()
    }

    /// Open the dialog, replacing whatever it currently shows
    pub fn open_dialog(&self, options: DialogOptions) {
        self.apply("open_dialog", |store| store.open(options));
    }

    /// Request the dialog to close; it animates out before resetting
    pub fn close_dialog(&self) {
        self.apply("close_dialog", |store| store.close());
    }

    /// Close only if `generation` is still the session on screen
    pub(crate) fn close_session(&self, generation: u64) {
        self.apply("close_session", |store| store.close_session(generation));
    }

    /// Backdrop click; ignored unless dismissible and not submitting
    pub(crate) fn dismiss(&self) {
        self.apply("dismiss", |store| store.dismiss());
    }

    /// Exit transition of `generation` finished
    pub(crate) fn exit_complete(&self, generation: u64) {
        self.apply("exit_complete", |store| store.exit_complete(generation));
    }

    pub(crate) fn set_submitting(&self, generation: u64, submitting: bool) {
        self.apply("set_submitting", |store| {
            store.set_submitting(generation, submitting)
        });
    }

    /// `generation` is on screen and not closing (`false` when detached)
    pub fn is_open_session(&self, generation: u64) -> bool {
        self.store
            .is_some_and(|store| store.read().is_open_session(generation))
    }

    /// Current phase (`Closed` for a detached handle)
    pub fn phase(&self) -> Phase {
        self.store
            .map(|store| store.read().phase())
            .unwrap_or_default()
    }

    pub fn is_open(&self) -> bool {
        self.phase() == Phase::Open
    }

    fn apply<R>(
        &self,
        operation: &str,
        f: impl FnOnce(&mut DialogStore<View>) -> R,
    ) -> Option<R> {
        match self.store {
            Some(mut store) => Some(f(&mut store.write())),
            None => {
                tracing::warn!("{} called outside of a DialogProvider; ignoring", operation);
                None
            }
        }
    }
}

/// Get the nearest provider's dialog handle
///
/// Outside a [`DialogProvider`] this returns a detached handle whose
/// operations log a warning and do nothing.
pub fn use_dialog() -> DialogHandle {
    try_use_context::<DialogHandle>().unwrap_or_else(DialogHandle::detached)
}

// ============================================================================
// Provider Component
// ============================================================================

/// Mounts a dialog store and its shell around `children`
#[component]
pub fn DialogProvider(#[props(default)] defaults: DialogDefaults, children: Element) -> Element {
    let store = use_signal(move || DialogStore::new(defaults));
    let handle = use_context_provider(|| DialogHandle::attached(store));

    rsx! {
        {children}
        DialogShell { store, handle }
    }
}

// ============================================================================
// Tests
// ============================================================================
