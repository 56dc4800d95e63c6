use todo_shared::{Command, TodoAction};
use uuid::Uuid;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::todo_item::TodoItem;
use crate::state::{execute, TodoListStore};

#[function_component(TodoList)]
pub fn todo_list() -> Html {
    let store = use_reducer(TodoListStore::default);
    let new_text = use_state(String::new);

    // Initial fetch
    {
        let store = store.clone();
        use_effect_with((), move |_| {
            execute(&store.0, store.dispatcher(), Command::Refresh, || ());
            || ()
        });
    }

    let on_new_input = {
        let new_text = new_text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_text.set(input.value());
        })
    };

    let on_add = {
        let store = store.clone();
        let new_text = new_text.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let clear_input = {
                let new_text = new_text.clone();
                move || new_text.set(String::new())
            };
            execute(
                &store.0,
                store.dispatcher(),
                Command::Add((*new_text).clone()),
                clear_input,
            );
        })
    };

    let on_toggle = {
        let store = store.clone();
        Callback::from(move |id: Uuid| {
            execute(&store.0, store.dispatcher(), Command::Toggle(id), || ());
        })
    };

    let on_delete = {
        let store = store.clone();
        Callback::from(move |id: Uuid| {
            execute(&store.0, store.dispatcher(), Command::Delete(id), || ());
        })
    };

    let on_begin_edit = {
        let store = store.clone();
        Callback::from(move |(id, text): (Uuid, String)| {
            store.dispatch(TodoAction::BeginEdit { id, text });
        })
    };

    let on_edit_input = {
        let store = store.clone();
        Callback::from(move |text: String| {
            store.dispatch(TodoAction::EditChanged(text));
        })
    };

    let on_save = {
        let store = store.clone();
        Callback::from(move |()| {
            execute(&store.0, store.dispatcher(), Command::SaveEdit, || ());
        })
    };

    let state = &store.0;

    html! {
        <div class="todo-container">
            <h1>{ "Todo List" }</h1>

            if let Some(error) = &state.error {
                <p class="error">{ error }</p>
            }

            <form class="todo-form" onsubmit={on_add}>
                <input
                    type="text"
                    placeholder="Add a new todo"
                    value={(*new_text).clone()}
                    oninput={on_new_input}
                />
                <button type="submit">{ "Add New Task" }</button>
            </form>

            if state.loading {
                <p class="loading">{ "Loading..." }</p>
            } else {
                <ul class="todo-list">
                    { for state.todos.iter().map(|todo| {
                        let draft = state
                            .editing
                            .as_ref()
                            .filter(|draft| draft.id == todo.id)
                            .map(|draft| draft.text.clone());

                        html! {
                            <TodoItem
                                key={todo.id.to_string()}
                                todo={todo.clone()}
                                {draft}
                                on_toggle={on_toggle.clone()}
                                on_delete={on_delete.clone()}
                                on_begin_edit={on_begin_edit.clone()}
                                on_edit_input={on_edit_input.clone()}
                                on_save={on_save.clone()}
                            />
                        }
                    })}
                </ul>
            }
        </div>
    }
}
