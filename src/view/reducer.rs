use crate::view::intent::ViewIntent;
use crate::view::mvi::Reducer;
use crate::view::state::{Phase, Selection, ViewState};

pub struct ViewReducer;

impl Reducer for ViewReducer {
    type State = ViewState;
    type Intent = ViewIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ViewIntent::Load => ViewState::loading(state.selection),
            ViewIntent::Refine { query, page } => {
                if query != state.selection.query {
                    // A new query always starts on the first page
                    ViewState::loading(Selection::new(query, 0))
                } else if page != state.selection.page {
                    ViewState::loading(Selection::new(query, page))
                } else {
                    state
                }
            }
            ViewIntent::Loaded { selection, result } => {
                if selection != state.selection {
                    return state;
                }
                ViewState {
                    selection,
                    result: Some(result),
                    phase: Phase::Ready,
                }
            }
        }
    }
}
