use leptos::prelude::*;
use schema_builder::EditorSession;

mod components;

use components::field_editor::FieldList;
use components::schema_preview::SchemaPreview;

const TITLE: &str = "JSON Schema Builder";

#[component]
pub fn App() -> impl IntoView {
    // Starts with one unnamed string field
    let session = RwSignal::new(EditorSession::default());

    view! {
        <div class="min-h-screen bg-gray-100 p-8">
            <div class="max-w-3xl mx-auto space-y-6">
                <h1 class="text-2xl font-bold text-gray-800">{TITLE}</h1>
                <FieldList session=session />
                <SchemaPreview session=session />
            </div>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
