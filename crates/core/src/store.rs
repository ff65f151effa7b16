//! Dialog State Store
//!
//! Holds the current dialog configuration and drives it through a three
//! state machine:
//!
//! ```text
//!            open(cfg)                close()
//!   Closed ───────────▶ Open ───────────────▶ Closing
//!     ▲                 │  ▲                    │
//!     │                 └──┘ open(cfg)          │ reset / exit_complete
//!     └─────────────────────────────────────────┘
//! ```
//!
//! `Closed` always holds the default configuration. `close` keeps the
//! configuration so the shell can animate out with the last content; only
//! `reset`, raised once the exit transition finished, restores defaults.
//!
//! Every `open` starts a new session generation. Asynchronous work tied to
//! a session (a pending submit, an exit timer) carries its generation and
//! is ignored once the store has moved on.

use uuid::Uuid;

use crate::config::{DialogDefaults, ReopenPolicy};
use crate::dialog::{DialogConfig, DialogOptions};

// ============================================================================
// Phase
// ============================================================================

/// Lifecycle phase of the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Open,
    /// Closed logically, exit transition still running
    Closing,
}

impl Phase {
    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Closed => "Closed",
            Phase::Open => "Open",
            Phase::Closing => "Closing",
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Transition requests accepted by the store
#[derive(Debug, Clone)]
pub enum DialogAction<V> {
    Open(DialogOptions<V>),
    Close,
    Reset,
}

impl<V> DialogAction<V> {
    pub fn name(&self) -> &'static str {
        match self {
            DialogAction::Open(_) => "open",
            DialogAction::Close => "close",
            DialogAction::Reset => "reset",
        }
    }
}

/// Outcome of a dispatched action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
    /// `false` when the action was not legal in `from` and was ignored
    pub applied: bool,
}

impl Transition {
    fn applied(from: Phase, to: Phase) -> Self {
        Self {
            from,
            to,
            applied: true,
        }
    }

    fn ignored(phase: Phase) -> Self {
        Self {
            from: phase,
            to: phase,
            applied: false,
        }
    }
}

// ============================================================================
// Dialog State
// ============================================================================

/// `{ is_open } ∪ DialogConfig`, plus the session generation
#[derive(Debug, Clone, PartialEq)]
pub struct DialogState<V> {
    pub phase: Phase,
    pub generation: u64,
    pub config: DialogConfig<V>,
    /// The session's form is waiting on its submit handler
    pub submitting: bool,
}

impl<V> DialogState<V> {
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Whether the shell should be mounted (open or animating out)
    pub fn is_visible(&self) -> bool {
        self.phase != Phase::Closed
    }
}

// ============================================================================
// Dialog Store
// ============================================================================

/// Single-writer owner of one provider's dialog state
#[derive(Debug)]
pub struct DialogStore<V> {
    id: Uuid,
    defaults: DialogDefaults,
    state: DialogState<V>,
}

impl<V: Clone> DialogStore<V> {
    /// Create a store holding the default configuration
    pub fn new(defaults: DialogDefaults) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!("Dialog store {} created", id);
        Self {
            id,
            state: DialogState {
                phase: Phase::Closed,
                generation: 0,
                config: DialogConfig::from_defaults(&defaults),
                submitting: false,
            },
            defaults,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn defaults(&self) -> &DialogDefaults {
        &self.defaults
    }

    pub fn state(&self) -> &DialogState<V> {
        &self.state
    }

    pub fn config(&self) -> &DialogConfig<V> {
        &self.state.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// `generation` is the session on screen and it has not started closing
    pub fn is_open_session(&self, generation: u64) -> bool {
        self.state.is_open() && self.state.generation == generation
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    /// The state a freshly reset store holds
    pub fn default_state(&self) -> DialogState<V> {
        DialogState {
            phase: Phase::Closed,
            generation: self.state.generation,
            config: DialogConfig::from_defaults(&self.defaults),
            submitting: false,
        }
    }

    /// Apply a transition request
    pub fn dispatch(&mut self, action: DialogAction<V>) -> Transition {
        let from = self.state.phase;
        let name = action.name();

        let transition = match action {
            DialogAction::Open(options) => {
                let base = match (from, self.defaults.reopen_policy) {
                    (Phase::Closed, _) | (_, ReopenPolicy::Replace) => {
                        DialogConfig::from_defaults(&self.defaults)
                    }
                    (_, ReopenPolicy::Merge) => self.state.config.clone(),
                };
                self.state.config = options.apply_to(base);
                self.state.phase = Phase::Open;
                self.state.generation += 1;
                self.state.submitting = false;
                tracing::info!(
                    "Dialog {} opened (session {})",
                    self.id,
                    self.state.generation
                );
                Transition::applied(from, Phase::Open)
            }
            DialogAction::Close => match from {
                Phase::Open => {
                    self.state.phase = Phase::Closing;
                    tracing::info!("Dialog {} closing (session {})", self.id, self.state.generation);
                    Transition::applied(from, Phase::Closing)
                }
                _ => Transition::ignored(from),
            },
            DialogAction::Reset => match from {
                Phase::Closing => {
                    self.state = self.default_state();
                    tracing::debug!("Dialog {} reset to defaults", self.id);
                    Transition::applied(from, Phase::Closed)
                }
                Phase::Closed => Transition::applied(from, Phase::Closed),
                Phase::Open => Transition::ignored(from),
            },
        };

        if !transition.applied {
            tracing::debug!(
                "Dialog {} ignored '{}' while {}",
                self.id,
                name,
                from.display_name()
            );
        }
        transition
    }

    pub fn open(&mut self, options: DialogOptions<V>) -> Transition {
        self.dispatch(DialogAction::Open(options))
    }

    pub fn close(&mut self) -> Transition {
        self.dispatch(DialogAction::Close)
    }

    pub fn reset(&mut self) -> Transition {
        self.dispatch(DialogAction::Reset)
    }

    /// Close only if `generation` is still the current session
    pub fn close_session(&mut self, generation: u64) -> Transition {
        if generation != self.state.generation {
            tracing::debug!(
                "Dialog {} ignored close for stale session {}",
                self.id,
                generation
            );
            return Transition::ignored(self.state.phase);
        }
        self.close()
    }

    /// Backdrop dismissal
    ///
    /// Closes like `close`, but only when the dialog is dismissible and its
    /// form is not waiting on a submit.
    pub fn dismiss(&mut self) -> Transition {
        if !self.state.config.dialog_props.dismissible {
            return Transition::ignored(self.state.phase);
        }
        if self.state.submitting {
            tracing::debug!(
                "Dialog {} ignored dismiss while session {} is submitting",
                self.id,
                self.state.generation
            );
            return Transition::ignored(self.state.phase);
        }
        self.close()
    }

    /// Record whether the form of `generation` has a submit in flight
    pub fn set_submitting(&mut self, generation: u64, submitting: bool) -> bool {
        if generation != self.state.generation || self.state.phase == Phase::Closed {
            return false;
        }
        self.state.submitting = submitting;
        true
    }

    /// Exit transition of `generation` finished; reset if it is still current
    pub fn exit_complete(&mut self, generation: u64) -> Transition {
        if generation != self.state.generation {
            tracing::debug!(
                "Dialog {} ignored exit of stale session {}",
                self.id,
                generation
            );
            return Transition::ignored(self.state.phase);
        }
        self.reset()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::ActionButton;
    use crate::field::FieldSpec;
    use crate::types::{Content, DialogProps};
    use pretty_assertions::assert_eq;

    type Store = DialogStore<&'static str>;
    type Options = DialogOptions<&'static str>;

    fn store() -> Store {
        Store::new(DialogDefaults::default())
    }

    #[test]
    fn test_new_store_is_closed_with_defaults() {
        let store = store();
        assert_eq!(store.phase(), Phase::Closed);
        assert!(!store.is_open());
        assert_eq!(store.state(), &store.default_state());
    }

    #[test]
    fn test_open_sets_config() {
        let mut store = store();
        let t = store.open(Options::new().title("T"));
        assert_eq!(t, Transition::applied(Phase::Closed, Phase::Open));
        assert!(store.is_open());
        assert_eq!(store.config().title, Content::text("T"));
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn test_close_keeps_content_until_exit_complete() {
        let mut store = store();
        store.open(Options::new().title("Goodbye").field("name", FieldSpec::text("Ann")));
        store.close();

        assert_eq!(store.phase(), Phase::Closing);
        assert!(!store.is_open());
        assert!(store.state().is_visible());
        assert_eq!(store.config().title, Content::text("Goodbye"));
        assert!(store.config().fields.contains_key("name"));
    }

    #[test]
    fn test_reset_restores_defaults_and_is_idempotent() {
        let mut store = store();
        store.open(Options::new().title("T").field("qty", FieldSpec::number(1)));
        store.close();

        let t = store.reset();
        assert!(t.applied);
        assert_eq!(store.state(), &store.default_state());

        let snapshot = store.state().clone();
        store.reset();
        store.reset();
        assert_eq!(store.state(), &snapshot);
    }

    #[test]
    fn test_reset_ignored_while_open() {
        let mut store = store();
        store.open(Options::new().title("Still here"));
        let t = store.reset();
        assert!(!t.applied);
        assert!(store.is_open());
        assert_eq!(store.config().title, Content::text("Still here"));
    }

    #[test]
    fn test_close_ignored_when_closed() {
        let mut store = store();
        let t = store.close();
        assert!(!t.applied);
        assert_eq!(store.phase(), Phase::Closed);
    }

    #[test]
    fn test_reopen_replace_falls_back_to_defaults() {
        let mut store = store();
        store.open(Options::new().title("First").cancel_button(ActionButton::Hidden));
        store.open(Options::new().content_text("Second body"));

        assert!(store.is_open());
        assert_eq!(store.generation(), 2);
        assert_eq!(store.config().title, Content::text("Dialog Title"));
        assert_eq!(store.config().cancel_button, ActionButton::label("Cancel"));
        assert_eq!(store.config().content_text, Some(Content::text("Second body")));
    }

    #[test]
    fn test_reopen_merge_keeps_previous_values() {
        let defaults = DialogDefaults::default().with_reopen_policy(ReopenPolicy::Merge);
        let mut store = Store::new(defaults);
        store.open(Options::new().title("First").cancel_button(ActionButton::Hidden));
        store.open(Options::new().content_text("Second body"));

        assert_eq!(store.config().title, Content::text("First"));
        assert!(store.config().cancel_button.is_hidden());
        assert_eq!(store.config().content_text, Some(Content::text("Second body")));
    }

    #[test]
    fn test_merge_policy_starts_from_defaults_when_closed() {
        let defaults = DialogDefaults::default().with_reopen_policy(ReopenPolicy::Merge);
        let mut store = Store::new(defaults);
        store.open(Options::new().title("First"));
        store.close();
        store.reset();
        store.open(Options::new());
        assert_eq!(store.config().title, Content::text("Dialog Title"));
    }

    #[test]
    fn test_reopen_while_closing() {
        let mut store = store();
        store.open(Options::new().title("First"));
        store.close();
        let t = store.open(Options::new().title("Second"));
        assert_eq!(t, Transition::applied(Phase::Closing, Phase::Open));
        assert_eq!(store.config().title, Content::text("Second"));
    }

    #[test]
    fn test_stale_exit_complete_is_ignored() {
        let mut store = store();
        store.open(Options::new().title("First"));
        let first = store.generation();
        store.close();
        store.open(Options::new().title("Second"));

        let t = store.exit_complete(first);
        assert!(!t.applied);
        assert!(store.is_open());
        assert_eq!(store.config().title, Content::text("Second"));

        store.close();
        assert!(store.exit_complete(store.generation()).applied);
        assert_eq!(store.phase(), Phase::Closed);
    }

    #[test]
    fn test_stale_close_session_is_ignored() {
        let mut store = store();
        store.open(Options::new());
        let first = store.generation();
        store.open(Options::new().title("Second"));

        assert!(!store.close_session(first).applied);
        assert!(store.is_open());
        assert!(store.close_session(store.generation()).applied);
        assert_eq!(store.phase(), Phase::Closing);
    }

    fn dismissible() -> Options {
        Options::new().dialog_props(DialogProps {
            dismissible: true,
            ..DialogProps::default()
        })
    }

    #[test]
    fn test_dismiss_requires_dismissible() {
        let mut store = store();
        store.open(Options::new());
        assert!(!store.dismiss().applied);
        assert!(store.is_open());

        store.open(dismissible());
        assert!(store.dismiss().applied);
        assert_eq!(store.phase(), Phase::Closing);
    }

    #[test]
    fn test_dismiss_ignored_while_submitting() {
        let mut store = store();
        store.open(dismissible());
        let session = store.generation();
        assert!(store.set_submitting(session, true));

        assert!(!store.dismiss().applied);
        assert!(store.is_open());

        // A rejected submit re-enables dismissal
        store.set_submitting(session, false);
        assert!(store.dismiss().applied);
    }

    #[test]
    fn test_submitting_flag_is_per_session() {
        let mut store = store();
        store.open(dismissible());
        let first = store.generation();
        store.set_submitting(first, true);

        store.open(dismissible());
        assert!(!store.is_submitting());
        assert!(!store.set_submitting(first, true));
        assert!(!store.is_submitting());

        store.close();
        store.reset();
        assert!(!store.set_submitting(store.generation(), true));
    }

    #[test]
    fn test_is_open_session() {
        let mut store = store();
        store.open(Options::new());
        let first = store.generation();
        assert!(store.is_open_session(first));

        store.close();
        assert!(!store.is_open_session(first));

        store.open(Options::new());
        assert!(!store.is_open_session(first));
        assert!(store.is_open_session(store.generation()));
    }

    #[test]
    fn test_independent_stores() {
        let mut a = store();
        let b = store();
        a.open(Options::new().title("A"));
        assert!(a.is_open());
        assert!(!b.is_open());
        assert_ne!(a.id(), b.id());
    }
}
