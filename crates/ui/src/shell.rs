//! # Dialog Shell
//!
//! Renders the modal chrome for the provider's current state: backdrop,
//! container, and either the caller's custom content or the generated
//! form. While the store is `Closing` the last configuration stays on
//! screen with the exit animation applied. The animation length comes from
//! `exit_duration_ms`, and the shell reports exit-complete for the session
//! when the container's fade-out transition ends. A timer slightly longer
//! than the transition covers windows that never deliver `transitionend`
//! (zero duration, hidden window).

use std::time::Duration;

use dialog_core::{DialogProps, Phase};
use dioxus::html::{HasTransitionData, SerializedTransitionData};
use dioxus::prelude::*;

use crate::form::DialogForm;
use crate::provider::{DialogHandle, StoreSignal};
use crate::view::ViewHost;

/// Slack on top of `exit_duration_ms` before the fallback timer fires
const EXIT_GRACE_MS: u64 = 100;

/// Property whose transition end marks the container as faded out
const EXIT_PROPERTY: &str = "opacity";

// ============================================================================
// Shell Component
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct DialogShellProps {
    /// Store owned by the enclosing provider
    pub store: StoreSignal,

    /// Handle into the same store
    pub handle: DialogHandle,
}

/// Modal container bound to the provider's dialog state
#[component]
pub fn DialogShell(props: DialogShellProps) -> Element {
    let store = props.store;
    let handle = props.handle;

    // Fallback in case the transition end never arrives
    use_effect(move || {
        let current = store.read();
        if current.phase() != Phase::Closing {
            return;
        }
        let generation = current.generation();
        let delay = Duration::from_millis(current.defaults().exit_duration_ms + EXIT_GRACE_MS);
        drop(current);

        spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!("Exit timer of session {} elapsed", generation);
            handle.exit_complete(generation);
        });
    });

    let current = store.read();
    let state = current.state();
    if !state.is_visible() {
        return rsx! {};
    }

    let phase = state.phase;
    let generation = state.generation;
    let config = &state.config;
    let container_class = build_container_class(&config.dialog_props, phase);
    let root_style = exit_style(current.defaults().exit_duration_ms);

    rsx! {
        div {
            class: "dialog-root",
            class: if phase == Phase::Closing { "dialog-root-closing" } else { "" },
            style: "{root_style}",
            role: "presentation",

            // Backdrop
            div {
                class: "dialog-backdrop",
                onclick: move |_| handle.dismiss(),
            }

            // Dialog container
            div {
                class: "{container_class}",
                role: "dialog",
                onclick: move |e| e.stop_propagation(),
                ontransitionend: move |e: TransitionEvent| {
                    if is_exit_transition(phase, &SerializedTransitionData::from(&*e.data()).property_name()) {
                        tracing::debug!("Exit transition of session {} finished", generation);
                        handle.exit_complete(generation);
                    }
                },

                if let Some(content) = &config.custom_content {
                    ViewHost { view: content.clone() }
                } else {
                    DialogForm {
                        key: "{generation}",
                        config: config.clone(),
                        generation,
                        handle,
                    }
                }
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Inline custom property driving the CSS exit transition
fn exit_style(exit_duration_ms: u64) -> String {
    format!("--dialog-exit: {}ms;", exit_duration_ms)
}

/// The container finished fading out for a closing session
fn is_exit_transition(phase: Phase, property: &str) -> bool {
    phase == Phase::Closing && property == EXIT_PROPERTY
}

/// Build the container class string
fn build_container_class(props: &DialogProps, phase: Phase) -> String {
    let mut classes = vec![
        "dialog-paper".to_string(),
        format!("dialog-max-{}", props.max_width.as_str()),
    ];

    if props.full_width {
        classes.push("dialog-full-width".to_string());
    }

    if phase == Phase::Closing {
        classes.push("dialog-paper-closing".to_string());
    }

    if let Some(extra) = &props.class {
        classes.push(extra.clone());
    }

    classes.join(" ")
}

// ============================================================================
// Tests
// ============================================================================
