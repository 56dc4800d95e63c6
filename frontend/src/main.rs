mod components;
mod services;
mod state;

use yew::prelude::*;

use crate::components::todo_list::TodoList;

#[function_component(App)]
fn app() -> Html {
    html! {
        <main class="app">
            <TodoList />
        </main>
    }
}

fn main() {
    // Initialize tracing
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}
