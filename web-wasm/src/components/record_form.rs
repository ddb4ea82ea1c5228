//! Create/edit modal form
//!
//! Works on a JSON object draft of the record so one form serves every kind.
//! Inputs follow the field name: dates, numbers, status and password get
//! their own controls.

use bfp_admin_common::validation::{is_date_field, is_numeric_field, FieldError};
use bfp_admin_common::RecordKind;
use leptos::prelude::*;
use serde_json::{Map, Value};

/// "badge_number" -> "Badge Number"
pub fn field_label(field: &str) -> String {
    if field == "personnel_id" {
        return "Employee ID".to_string();
    }
    field
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Input text of a draft value
pub fn draft_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Store typed input back into the draft. Numeric fields keep unparseable
/// text so validation can report it.
pub fn set_draft_value(draft: &mut Map<String, Value>, field: &str, input: String) {
    let value = if is_numeric_field(field) {
        match input.trim() {
            "" => Value::Null,
            text => text
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(input.clone())),
        }
    } else {
        Value::String(input)
    };
    draft.insert(field.to_string(), value);
}

fn input_type(field: &str) -> &'static str {
    if is_date_field(field) {
        "date"
    } else if is_numeric_field(field) {
        "number"
    } else if field == "password" {
        "password"
    } else if field == "email" {
        "email"
    } else {
        "text"
    }
}

#[component]
pub fn RecordForm(
    kind: RecordKind,
    editing: Signal<bool>,
    draft: RwSignal<Map<String, Value>>,
    errors: Signal<Vec<FieldError>>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let required = kind.required_fields();

    let fields = kind
        .form_fields()
        .iter()
        .copied()
        .map(|field| {
            let control = if field == "status" {
                view! {
                    <select
                        id=field
                        on:change=move |ev| draft.update(|d| set_draft_value(d, field, event_target_value(&ev)))
                    >
                        {kind
                            .status_values()
                            .iter()
                            .copied()
                            .map(|label| {
                                view! {
                                    <option
                                        value=label
                                        selected={move || draft.with(|d| draft_text(d.get(field))) == label}
                                    >
                                        {label}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                }
                    .into_any()
            } else {
                view! {
                    <input
                        type={input_type(field)}
                        id=field
                        prop:value=move || draft.with(|d| draft_text(d.get(field)))
                        on:input=move |ev| draft.update(|d| set_draft_value(d, field, event_target_value(&ev)))
                    />
                }
                    .into_any()
            };
            let marker = if required.contains(&field) { " *" } else { "" };

            view! {
                <div class="form-group">
                    <label for=field>{field_label(field)}{marker}</label>
                    {control}
                    {move || {
                        errors
                            .get()
                            .into_iter()
                            .filter(|e| e.field == field)
                            .map(|e| view! { <span class="field-error">{e.message}</span> })
                            .collect_view()
                    }}
                </div>
            }
        })
        .collect_view();

    view! {
        <form
            class="record-form"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <h3>
                {move || format!("{} {}", if editing.get() { "Edit" } else { "New" }, kind.label())}
            </h3>
            {fields}
            {move || {
                errors
                    .get()
                    .into_iter()
                    .filter(|e| e.field.is_empty())
                    .map(|e| view! { <p class="form-error">{e.message}</p> })
                    .collect_view()
            }}
            <div class="form-actions">
                <button type="submit" class="btn btn-primary">"Save"</button>
                <button type="button" class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
