//! Unidirectional state flow for the view layer.
//!
//! ```text
//! refine / page arrival ──→ ViewIntent ──→ ViewReducer ──→ ViewState ──→ observers
//! ```
//!
//! The coordinator is the only caller of the reducer; observers only ever
//! see states the reducer produced.

/// Something that can change the view: a selection change or a page arrival.
pub trait Intent: Send + 'static {}

/// Snapshot handed to observers.
///
/// Cloned out on every publish and compared to skip no-op updates.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Pure `(State, Intent) -> State` transition.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
