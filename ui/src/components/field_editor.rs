//! Field Editor Component
//!
//! One card per top-level field; nested fields render their children
//! recursively, each row addressed by its path in the forest.

use leptos::prelude::*;
use schema_builder::{EditCommand, EditorSession, FieldPath, FieldType};

use super::apply_edit;

/// Top-level field cards plus the "Add Field" button
#[component]
pub fn FieldList(session: RwSignal<EditorSession>) -> impl IntoView {
    let add_field = move |_| {
        apply_edit(session, EditCommand::Append { parent: FieldPath::root() });
    };

    view! {
        <div class="space-y-3">
            <For
                each={move || (0..session.with(|s| s.forest().len())).collect::<Vec<_>>()}
                key=|index| *index
                children=move |index| {
                    view! {
                        <div class="bg-white border border-gray-200 rounded-lg shadow-sm p-4">
                            <FieldRow session=session path=FieldPath::new(vec![index]) depth=0 />
                        </div>
                    }
                }
            />
            <button
                type="button"
                class="px-4 py-2 text-sm text-white bg-blue-600 hover:bg-blue-700 rounded"
                on:click=add_field
            >
                "Add Field"
            </button>
        </div>
    }
}

/// Editor for the field at `path`, and for its children when nested
#[component]
pub fn FieldRow(
    session: RwSignal<EditorSession>,
    path: FieldPath,
    depth: usize,
) -> AnyView {
    let path_stored = StoredValue::new(path);

    // Rows are keyed by position, so read the node through the path each time
    let key = move || {
        session.with(|s| {
            s.forest()
                .get(&path_stored.get_value())
                .map(|node| node.key().to_string())
                .unwrap_or_default()
        })
    };
    let field_type = move || {
        session.with(|s| {
            s.forest()
                .get(&path_stored.get_value())
                .map(|node| node.field_type())
                .unwrap_or_default()
        })
    };
    let child_count = move || {
        session.with(|s| {
            s.forest()
                .get(&path_stored.get_value())
                .map(|node| node.children().len())
                .unwrap_or(0)
        })
    };

    let shade_class = if depth % 2 == 0 { "bg-white" } else { "bg-gray-50" };

    view! {
        <div class=format!("space-y-2 rounded {}", shade_class)>
            <div class="flex gap-2 items-center">
                <input
                    type="text"
                    class="flex-1 px-2 py-1 text-sm border border-gray-300 rounded focus:ring-blue-500"
                    placeholder="Field name"
                    prop:value=key
                    on:input=move |ev| {
                        apply_edit(session, EditCommand::SetKey {
                            path: path_stored.get_value(),
                            key: event_target_value(&ev),
                        });
                    }
                />

                <select
                    class="w-32 px-2 py-1 text-sm border border-gray-300 rounded focus:ring-blue-500"
                    on:change=move |ev| {
                        match event_target_value(&ev).parse::<FieldType>() {
                            Ok(ty) => apply_edit(session, EditCommand::SetType {
                                path: path_stored.get_value(),
                                ty,
                            }),
                            Err(e) => log::warn!("{}", e),
                        }
                    }
                >
                    {FieldType::ALL
                        .into_iter()
                        .map(move |ty| {
                            view! {
                                <option value=ty.as_str() prop:selected=move || field_type() == ty>
                                    {ty.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>

                <button
                    type="button"
                    class="px-2 py-1 text-sm text-red-600 hover:bg-red-50 rounded"
                    on:click=move |_| {
                        apply_edit(session, EditCommand::Remove { path: path_stored.get_value() });
                    }
                >
                    "Delete"
                </button>
            </div>

            <Show when=move || field_type().is_nested()>
                <div class="ml-4 pl-3 border-l-2 border-gray-200 space-y-2">
                    <For
                        each={move || (0..child_count()).collect::<Vec<_>>()}
                        key=|index| *index
                        children=move |index| {
                            view! {
                                <FieldRow
                                    session=session
                                    path=path_stored.get_value().child(index)
                                    depth=depth + 1
                                />
                            }
                        }
                    />
                    <button
                        type="button"
                        class="px-2 py-0.5 text-xs text-blue-600 hover:bg-blue-50 rounded"
                        on:click=move |_| {
                            apply_edit(session, EditCommand::Append { parent: path_stored.get_value() });
                        }
                    >
                        "Add Nested Field"
                    </button>
                </div>
            </Show>
        </div>
    }
    .into_any()
}
