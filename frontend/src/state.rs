use std::rc::Rc;

use todo_shared::controller::{perform, plan, Plan};
use todo_shared::{Command, TodoAction, TodoListState};
use yew::prelude::*;

use crate::services::api::ApiService;

/// `TodoListState` adapted to `use_reducer`
#[derive(Debug, Default, PartialEq)]
pub struct TodoListStore(pub TodoListState);

impl Reducible for TodoListStore {
    type Action = TodoAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let state = Rc::try_unwrap(self)
            .map(|store| store.0)
            .unwrap_or_else(|shared| shared.0.clone());
        Rc::new(TodoListStore(state.reduce(action)))
    }
}

/// Run one command against the gateway. `on_confirmed` fires once the
/// backend has acknowledged it.
pub fn execute(
    state: &TodoListState,
    dispatcher: UseReducerDispatcher<TodoListStore>,
    command: Command,
    on_confirmed: impl FnOnce() + 'static,
) {
    match plan(state, command) {
        Plan::Skip => {}
        Plan::Reject(operation) => {
            dispatcher.dispatch(TodoAction::Started(operation));
            dispatcher.dispatch(TodoAction::Failed(operation));
        }
        Plan::Send(request) => {
            dispatcher.dispatch(TodoAction::Started(request.operation()));
            wasm_bindgen_futures::spawn_local(async move {
                let action = perform(&ApiService, request).await;
                let confirmed = !matches!(action, TodoAction::Failed(_));
                dispatcher.dispatch(action);
                if confirmed {
                    on_confirmed();
                }
            });
        }
    }
}
