//! Record list screen
//!
//! One generic screen per record kind: summary cards, search and dropdown
//! filters, the table with row actions, pagination and the modal form.
//! State lives in a `RecordList`; every successful write refetches the whole
//! collection, every failed write raises an alert and leaves rows alone.

use super::pagination::Pagination;
use super::record_form::RecordForm;
use super::summary_cards::SummaryCards;
use crate::api::leave;
use crate::api::source::{require_row, DataSource};
use bfp_admin_common::credentials::{encode_salt, SALT_BYTES};
use bfp_admin_common::query::{decode_rows, mutation_body};
use bfp_admin_common::status::ApprovalStatus;
use bfp_admin_common::validation::{check_form, check_unique, FieldError};
use bfp_admin_common::{
    Award, BackendError, ClearanceRequest, Equipment, FetchOutcome, FormState, Inspection, LeaveBalance, LeaveRequest,
    ListRecord, MutationOutcome, Personnel, Query, RecordKind, RecordList, RecruitmentCandidate, TrainingRecord,
};
use gloo::{console, dialogs};
use leptos::prelude::*;
use leptos::task::spawn_local;
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::{Map, Value};

type Rows<R> = RwSignal<RecordList<R>>;

/// Random salt from `crypto.getRandomValues`
fn fresh_salt() -> Result<String, String> {
    let mut bytes = [0u8; SALT_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| format!("random source unavailable: {}", e))?;
    Ok(encode_salt(&bytes))
}

fn to_draft<R: ListRecord>(record: &R) -> Map<String, Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn form_error(message: impl Into<String>) -> Vec<FieldError> {
    vec![FieldError { field: String::new(), message: message.into() }]
}

fn refetch<R: ListRecord + Send + Sync + 'static>(list: Rows<R>, source: DataSource) {
    list.update(|l| l.begin_fetch());
    spawn_local(async move {
        let kind = R::KIND;
        let result = source
            .select(kind.table(), &Query::for_kind(kind))
            .await
            .and_then(decode_rows::<R>);
        if let Some(FetchOutcome::Failed(err)) = list.try_update(|l| l.finish_fetch(result)) {
            console::error!(format!("{}: fetch failed: {}", kind.table(), err));
        }
    });
}

fn complete<R: ListRecord + Send + Sync + 'static>(
    list: Rows<R>,
    source: DataSource,
    result: Result<(), BackendError>,
) {
    match list.try_update(|l| l.finish_mutation(result)) {
        Some(MutationOutcome::Refetch) => refetch(list, source),
        Some(MutationOutcome::Failed(message)) => {
            console::warn!(format!("{}: {}", R::KIND.table(), message));
            list.update(|l| {
                l.take_alert();
            });
            dialogs::alert(&message);
        }
        None => {}
    }
}

fn submit<R: ListRecord + Send + Sync + 'static>(
    list: Rows<R>,
    source: DataSource,
    draft: Map<String, Value>,
    errors: RwSignal<Vec<FieldError>>,
) {
    let kind = R::KIND;
    let problems = check_form(kind, &draft);
    if !problems.is_empty() {
        errors.set(problems);
        return;
    }

    let editing = list.with_untracked(|l| match l.form() {
        FormState::Edit(r) => r.id().map(str::to_string),
        _ => None,
    });
    let mut record: R = match serde_json::from_value(Value::Object(draft)) {
        Ok(r) => r,
        Err(e) => return errors.set(form_error(e.to_string())),
    };
    let sealed = fresh_salt().and_then(|salt| record.seal_secrets(&salt).map_err(|e| e.to_string()));
    if let Err(e) = sealed {
        return errors.set(form_error(e));
    }

    let others: Vec<R> = list.with_untracked(|l| {
        l.records()
            .iter()
            .filter(|r| editing.is_none() || r.id() != editing.as_deref())
            .cloned()
            .collect()
    });
    if let Err(e) = check_unique(&record, &others) {
        let field = R::UNIQUE_FIELD.unwrap_or_default().to_string();
        return errors.set(vec![FieldError { field, message: e.to_string() }]);
    }

    let body = match mutation_body(&record) {
        Ok(body) => body,
        Err(e) => return errors.set(form_error(e.to_string())),
    };
    errors.set(Vec::new());

    spawn_local(async move {
        let result = match editing {
            Some(id) => source
                .update(kind.table(), &id, body)
                .await
                .and_then(|found| require_row(found, kind.table(), &id)),
            None => source.insert(kind.table(), body).await.map(|_| ()),
        };
        complete(list, source, result);
    });
}

fn delete_row<R: ListRecord + Send + Sync + 'static>(list: Rows<R>, source: DataSource, id: String) {
    if !dialogs::confirm(&format!("Delete this {} record?", R::KIND.label().to_lowercase())) {
        return;
    }
    spawn_local(async move {
        let table = R::KIND.table();
        let result = source
            .delete(table, &id)
            .await
            .and_then(|found| require_row(found, table, &id));
        complete(list, source, result);
    });
}

fn set_status<R: ListRecord + Send + Sync + 'static>(list: Rows<R>, source: DataSource, id: String, status: String) {
    spawn_local(async move {
        let table = R::KIND.table();
        let result = source
            .update(table, &id, serde_json::json!({ "status": status }))
            .await
            .and_then(|found| require_row(found, table, &id));
        complete(list, source, result);
    });
}

/// Approve or reject a row of the leave screen.
fn review_leave<R: ListRecord + Send + Sync + 'static>(list: Rows<R>, source: DataSource, id: String, approve: bool) {
    let Some(row) = list.with_untracked(|l| l.find(&id).cloned()) else {
        return;
    };
    let request = match serde_json::to_value(&row).and_then(serde_json::from_value::<LeaveRequest>) {
        Ok(request) => request,
        Err(e) => return dialogs::alert(&e.to_string()),
    };
    spawn_local(async move {
        let result = if approve {
            leave::approve(&source, &request).await
        } else {
            leave::reject(&source, &id).await
        };
        complete(list, source, result);
    });
}

pub fn record_list_view<R>(source: Signal<DataSource>) -> impl IntoView
where
    R: ListRecord + Default + Send + Sync + 'static,
{
    let kind = R::KIND;
    let list: Rows<R> = RwSignal::new(RecordList::new());
    let draft = RwSignal::new(Map::new());
    let errors = RwSignal::new(Vec::<FieldError>::new());

    Effect::new(move |_| refetch(list, source.get()));

    let open_create = move |_| {
        let template = R::default();
        draft.set(to_draft(&template));
        errors.set(Vec::new());
        list.update(|l| l.open_create(template));
    };

    let row_view = move |row: R| {
        let id = row.id().unwrap_or_default().to_string();
        let cells = kind
            .columns()
            .iter()
            .map(|c| view! { <td>{row.cell(c.key)}</td> })
            .collect_view();
        let pending = kind == RecordKind::Leave && row.field("status") == ApprovalStatus::Pending.label();
        let current_status = row.field("status");

        let edit_id = id.clone();
        let delete_id = id.clone();
        let status_id = id.clone();
        let approve_id = id.clone();
        let reject_id = id;

        view! {
            <tr>
                {cells}
                <td class="row-actions">
                    <button
                        class="btn btn-small"
                        on:click=move |_| {
                            if list.try_update(|l| l.open_edit(&edit_id)) == Some(true) {
                                draft.set(list.with_untracked(|l| l.form().record().map(to_draft).unwrap_or_default()));
                                errors.set(Vec::new());
                            }
                        }
                    >
                        "Edit"
                    </button>
                    <button
                        class="btn btn-small btn-danger"
                        on:click=move |_| delete_row(list, source.get_untracked(), delete_id.clone())
                    >
                        "Delete"
                    </button>
                    <Show when=move || !kind.status_values().is_empty()>
                        <select
                            class="status-select"
                            on:change={
                                let status_id = status_id.clone();
                                move |ev| set_status(list, source.get_untracked(), status_id.clone(), event_target_value(&ev))
                            }
                        >
                            {kind
                                .status_values()
                                .iter()
                                .copied()
                                .map(|label| view! { <option value=label selected={label == current_status}>{label}</option> })
                                .collect_view()}
                        </select>
                    </Show>
                    <Show when=move || pending>
                        <button
                            class="btn btn-small btn-primary"
                            on:click={
                                let approve_id = approve_id.clone();
                                move |_| review_leave(list, source.get_untracked(), approve_id.clone(), true)
                            }
                        >
                            "Approve"
                        </button>
                        <button
                            class="btn btn-small btn-tertiary"
                            on:click={
                                let reject_id = reject_id.clone();
                                move |_| review_leave(list, source.get_untracked(), reject_id.clone(), false)
                            }
                        >
                            "Reject"
                        </button>
                    </Show>
                </td>
            </tr>
        }
    };

    view! {
        <section class="record-list">
            <SummaryCards
                counts=Signal::derive(move || list.with(|l| l.summary()))
                active=Signal::derive(move || list.with(|l| l.filter().card.clone()))
                on_select=Callback::new(move |key: String| list.update(|l| l.set_card(key)))
            />

            <div class="list-toolbar">
                <input
                    type="search"
                    class="search-input"
                    placeholder={format!("Search {}...", kind.label().to_lowercase())}
                    prop:value=move || list.with(|l| l.filter().search.clone())
                    on:input=move |ev| list.update(|l| l.set_search(event_target_value(&ev)))
                />
                {kind
                    .dropdown_filters()
                    .iter()
                    .map(|dropdown| {
                        let field = dropdown.field;
                        view! {
                            <select on:change=move |ev| list.update(|l| l.set_dropdown(field, event_target_value(&ev)))>
                                <option value="all">{format!("All {}", dropdown.label)}</option>
                                {dropdown
                                    .options
                                    .iter()
                                    .copied()
                                    .map(|option| view! { <option value=option>{option}</option> })
                                    .collect_view()}
                            </select>
                        }
                    })
                    .collect_view()}
                <button class="btn btn-secondary" on:click=move |_| list.update(|l| l.clear_filters())>
                    "Clear filters"
                </button>
                <button class="btn btn-secondary" on:click=move |_| refetch(list, source.get_untracked())>
                    "Refresh"
                </button>
                <button class="btn btn-primary" on:click=open_create>
                    {format!("Add {}", kind.label())}
                </button>
            </div>

            <table class="data-table">
                <thead>
                    <tr>
                        {kind.columns().iter().map(|c| view! { <th>{c.label}</th> }).collect_view()}
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = list.with(|l| l.visible());
                        if rows.is_empty() {
                            let message = if list.with(|l| l.is_loading()) {
                                "Loading...".to_string()
                            } else {
                                format!("No {} found.", kind.label().to_lowercase())
                            };
                            view! {
                                <tr>
                                    <td class="empty-state" colspan={(kind.columns().len() + 1).to_string()}>
                                        {message}
                                    </td>
                                </tr>
                            }
                                .into_any()
                        } else {
                            rows.into_iter().map(row_view).collect_view().into_any()
                        }
                    }}
                </tbody>
            </table>

            <Pagination
                controls=Signal::derive(move || list.with(|l| l.controls()))
                on_page=Callback::new(move |page: usize| list.update(|l| l.set_page(page)))
            />

            <Show when=move || list.with(|l| l.form().is_open())>
                <div class="modal-backdrop">
                    <div class="modal">
                        <RecordForm
                            kind=kind
                            editing=Signal::derive(move || list.with(|l| matches!(l.form(), FormState::Edit(_))))
                            draft=draft
                            errors=errors.into()
                            on_submit=Callback::new(move |_: ()| submit(list, source.get_untracked(), draft.get_untracked(), errors))
                            on_cancel=Callback::new(move |_: ()| {
                                errors.set(Vec::new());
                                list.update(|l| l.close_form());
                            })
                        />
                    </div>
                </div>
            </Show>
        </section>
    }
}

/// The list screen of `kind`.
pub fn screen(kind: RecordKind, source: Signal<DataSource>) -> AnyView {
    untrack(move || match kind {
        RecordKind::Personnel => record_list_view::<Personnel>(source).into_any(),
        RecordKind::Leave => record_list_view::<LeaveRequest>(source).into_any(),
        RecordKind::Clearance => record_list_view::<ClearanceRequest>(source).into_any(),
        RecordKind::Award => record_list_view::<Award>(source).into_any(),
        RecordKind::Inspection => record_list_view::<Inspection>(source).into_any(),
        RecordKind::Equipment => record_list_view::<Equipment>(source).into_any(),
        RecordKind::Recruitment => record_list_view::<RecruitmentCandidate>(source).into_any(),
        RecordKind::Training => record_list_view::<TrainingRecord>(source).into_any(),
        RecordKind::LeaveBalance => record_list_view::<LeaveBalance>(source).into_any(),
    })
}
