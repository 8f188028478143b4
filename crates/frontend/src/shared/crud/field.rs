use client::reference::RefOption;
use client::CrudModule;
use contracts::domain::common::Resource;
use contracts::shared::form::{FieldKind, FormField};
use contracts::shared::payload::FileUpload;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

/// One labelled input of the edit dialog, bound to the open draft.
#[component]
pub fn DialogField<R: Resource>(
    module: RwSignal<CrudModule<R>>,
    field: FormField<R::Draft>,
) -> impl IntoView {
    let name = field.name;
    let value = move || {
        module.with(|m| m.dialog().draft().map(|d| field.read(d)).unwrap_or_default())
    };
    let visible = move || {
        module.with(|m| m.dialog().draft().map(|d| field.is_visible(d)).unwrap_or(false))
    };
    let disabled = move || module.with(|m| m.dialog().is_submitting());
    let set = move |input: String| module.update(|m| m.edit_field(name, input));

    let input = move || match field.kind {
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Password
        | FieldKind::Number
        | FieldKind::Date => {
            let input_type = match field.kind {
                FieldKind::Email => "email",
                FieldKind::Password => "password",
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                _ => "text",
            };
            view! {
                <input
                    type=input_type
                    id=name
                    step=(input_type == "number").then_some("any")
                    prop:value=value
                    on:input=move |ev| set(event_target_value(&ev))
                    disabled=disabled
                />
            }
            .into_any()
        }
        FieldKind::TextArea => view! {
            <textarea
                id=name
                rows="4"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
                disabled=disabled
            ></textarea>
        }
        .into_any(),
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                id=name
                prop:checked=move || value() == "true"
                on:change=move |ev| {
                    set(event_target_checked(&ev).to_string());
                }
                disabled=disabled
            />
        }
        .into_any(),
        FieldKind::Choice(choices) => view! {
            <select id=name prop:value=value on:change=move |ev| set(event_target_value(&ev)) disabled=disabled>
                {choices
                    .iter()
                    .map(|choice| {
                        let v = choice.value;
                        view! {
                            <option value=v prop:selected=move || { value() == v }>
                                {choice.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Reference(endpoint) => {
            let options: Vec<RefOption> = module.with_untracked(|m| {
                m.references()
                    .data()
                    .map(|d| d.options(endpoint).to_vec())
                    .unwrap_or_default()
            });
            view! {
                <select id=name prop:value=value on:change=move |ev| set(event_target_value(&ev)) disabled=disabled>
                    <option value="" prop:selected=move || { value().is_empty() }>"---------"</option>
                    {options
                        .into_iter()
                        .map(|option| {
                            let id = option.id.to_string();
                            let id_for_selected = id.clone();
                            view! {
                                <option value=id prop:selected=move || { value() == id_for_selected }>
                                    {option.label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            }
            .into_any()
        }
        FieldKind::File { .. } => view! {
            <div class="file-field">
                <input
                    type="file"
                    id=name
                    on:change=move |ev| {
                        let input: HtmlInputElement = event_target(&ev);
                        let Some(file) = input.files().and_then(|files| files.get(0)) else {
                            return;
                        };
                        spawn_local(async move {
                            match read_upload(file).await {
                                Ok(upload) => {
                                    module.try_update(|m| m.attach_file(name, upload));
                                }
                                Err(e) => log::error!("Failed to read '{}': {}", name, e),
                            }
                        });
                    }
                    disabled=disabled
                />
                <span class="file-field__current">
                    {move || {
                        let current = value();
                        if current.is_empty() { "Sin archivo".to_string() } else { current }
                    }}
                </span>
            </div>
        }
        .into_any(),
    };

    view! {
        <Show when=visible>
            <div class="form-group">
                <label for=name>{field.label}</label>
                {input()}
            </div>
        </Show>
    }
}

async fn read_upload(file: web_sys::File) -> Result<FileUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(FileUpload::new(file.name(), file.type_(), bytes))
}
