use todo_shared::Todo;
use uuid::Uuid;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TodoItemProps {
    pub todo: Todo,
    /// Draft text when this row is in edit mode
    pub draft: Option<String>,
    pub on_toggle: Callback<Uuid>,
    pub on_delete: Callback<Uuid>,
    pub on_begin_edit: Callback<(Uuid, String)>,
    pub on_edit_input: Callback<String>,
    pub on_save: Callback<()>,
}

#[function_component(TodoItem)]
pub fn todo_item(props: &TodoItemProps) -> Html {
    let todo = &props.todo;
    let id = todo.id;

    if let Some(draft) = &props.draft {
        let on_input = {
            let on_edit_input = props.on_edit_input.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_edit_input.emit(input.value());
            })
        };
        let on_save = props.on_save.reform(|_: MouseEvent| ());

        return html! {
            <li class="todo-item editing">
                <div class="todo-edit">
                    <input type="text" value={draft.clone()} oninput={on_input} />
                    <button onclick={on_save}>{ "Save" }</button>
                </div>
            </li>
        };
    }

    let on_toggle = props.on_toggle.reform(move |_: Event| id);
    let on_delete = props.on_delete.reform(move |_: MouseEvent| id);
    let on_begin_edit = {
        let text = todo.text.clone();
        props
            .on_begin_edit
            .reform(move |_: MouseEvent| (id, text.clone()))
    };

    html! {
        <li class="todo-item">
            <div class="todo-content">
                <input
                    type="checkbox"
                    class="todo-checkbox"
                    checked={todo.completed}
                    onchange={on_toggle}
                />
                <span class={classes!("todo-text", todo.completed.then_some("line-through"))}>
                    { &todo.text }
                </span>
            </div>
            <div class="todo-actions">
                <button onclick={on_begin_edit}>{ "Edit" }</button>
                <button onclick={on_delete}>{ "Delete" }</button>
            </div>
        </li>
    }
}
