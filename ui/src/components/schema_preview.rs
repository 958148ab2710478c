use leptos::prelude::*;
use schema_builder::EditorSession;

/// Live JSON preview of the compiled schema
#[component]
pub fn SchemaPreview(session: RwSignal<EditorSession>) -> impl IntoView {
    let compiled = Memo::new(move |_| {
        session.with(|s| {
            let compiled = s.compile();
            (
                compiled.schema.to_pretty_json(s.options().indent),
                compiled
                    .duplicates
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>(),
            )
        })
    });

    view! {
        <div class="bg-white border border-gray-200 rounded-lg shadow-sm p-4">
            <h2 class="text-lg font-semibold text-gray-700 mb-2">"JSON Preview"</h2>
            <pre class="p-3 bg-gray-900 text-green-400 rounded text-sm overflow-x-auto">
                {move || compiled.with(|(json, _)| json.clone())}
            </pre>
            <Show when=move || compiled.with(|(_, duplicates)| !duplicates.is_empty())>
                <ul class="mt-2 text-xs text-yellow-700 space-y-1">
                    {move || {
                        compiled.with(|(_, duplicates)| {
                            duplicates
                                .iter()
                                .map(|key| view! { <li>{format!("Duplicate key '{}': the later field wins", key)}</li> })
                                .collect_view()
                        })
                    }}
                </ul>
            </Show>
        </div>
    }
}
