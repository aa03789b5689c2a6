//! Supervisor feedback screen: computed daily metrics plus the three
//! fields a manager may edit (quota and both comment columns).

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::components::route_guard::RouteGuard;
use crate::components::top_nav::TopNav;
use crate::net::feedback::{self, FeedbackFilters};
use crate::net::types::{FeedbackRecord, FeedbackUpdate};

/// Build the partial update for one edited row: only fields that differ
/// from the stored record go on the wire.
pub(crate) fn build_update(
    record: &FeedbackRecord,
    quota: &str,
    supervisor_comments: &str,
    manager_comments: &str,
) -> Result<FeedbackUpdate, String> {
    let mut update = FeedbackUpdate::default();

    let quota = quota.trim();
    if !quota.is_empty() {
        let parsed: f64 =
            quota.parse().map_err(|_| format!("'{quota}' is not a valid quota"))?;
        if (parsed - record.daily_quota).abs() > f64::EPSILON {
            update.daily_quota = Some(parsed);
        }
    }
    if supervisor_comments != record.supervisor_comments.as_deref().unwrap_or_default() {
        update.supervisor_comments = Some(supervisor_comments.to_owned());
    }
    if manager_comments != record.manager_comments.as_deref().unwrap_or_default() {
        update.manager_comments = Some(manager_comments.to_owned());
    }
    Ok(update)
}

#[component]
pub fn FeedbackPage() -> impl IntoView {
    view! {
        <RouteGuard>
            <TopNav/>
            <main class="dashboard">
                <ErrorBanner/>
                <FeedbackContent/>
            </main>
        </RouteGuard>
    }
}

#[component]
fn FeedbackContent() -> impl IntoView {
    let filters = RwSignal::new(FeedbackFilters::default());

    let supervisors = LocalResource::new(move || {
        let date = filters.get().date;
        async move { feedback::fetch_supervisors(date.as_deref()).await.unwrap_or_default() }
    });
    let records = LocalResource::new(move || {
        let filters = filters.get();
        async move { feedback::fetch_records(&filters).await }
    });

    let on_saved = Callback::new(move |()| records.refetch());

    view! {
        <div class="filters-panel">
            <label class="filters-panel__field">
                "Date"
                <input
                    type="date"
                    prop:value=move || filters.get().date.unwrap_or_default()
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        filters.update(|f| f.date = if raw.is_empty() { None } else { Some(raw) });
                    }
                />
            </label>
            <label class="filters-panel__field">
                "Supervisor"
                <select
                    prop:value=move || filters.get().supervisor.unwrap_or_default()
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        filters
                            .update(|f| {
                                f.supervisor = if raw.is_empty() { None } else { Some(raw) };
                            });
                    }
                >
                    <option value="">"All supervisors"</option>
                    {move || {
                        supervisors
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|name| view! { <option value=name.clone()>{name.clone()}</option> })
                            .collect::<Vec<_>>()
                    }}
                </select>
            </label>
            <button class="btn" on:click=move |_| records.refetch()>"Refresh"</button>
        </div>

        <Suspense fallback=move || view! { <p>"Loading feedback..."</p> }>
            {move || {
                records
                    .get()
                    .map(|result| match result {
                        Ok((rows, _)) if rows.is_empty() => {
                            view! { <p class="empty">"No feedback for these filters."</p> }
                                .into_any()
                        }
                        Ok((rows, _)) => {
                            view! {
                                <div class="feedback-list">
                                    {rows
                                        .into_iter()
                                        .map(|record| {
                                            view! {
                                                <FeedbackRow record=record on_saved=on_saved/>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </div>
                            }
                                .into_any()
                        }
                        Err(err) => {
                            view! { <p class="load-error">{err.to_string()}</p> }.into_any()
                        }
                    })
            }}
        </Suspense>
    }
}

/// One editable feedback record.
#[component]
fn FeedbackRow(record: FeedbackRecord, on_saved: Callback<()>) -> impl IntoView {
    let quota = RwSignal::new(record.daily_quota.to_string());
    let supervisor_comments =
        RwSignal::new(record.supervisor_comments.clone().unwrap_or_default());
    let manager_comments = RwSignal::new(record.manager_comments.clone().unwrap_or_default());
    let saving = RwSignal::new(false);
    let row_message = RwSignal::new(None::<String>);

    let record = StoredValue::new(record);

    let on_save = move |_| {
        if saving.get() {
            return;
        }
        let built = record.with_value(|record| {
            build_update(
                record,
                &quota.get(),
                &supervisor_comments.get(),
                &manager_comments.get(),
            )
        });
        match built {
            Err(msg) => row_message.set(Some(msg)),
            Ok(update) if update.is_empty() => {
                row_message.set(Some("Nothing changed.".to_owned()));
            }
            Ok(update) => {
                saving.set(true);
                row_message.set(None);
                let id = record.with_value(|r| r.id);
                #[cfg(feature = "hydrate")]
                leptos::task::spawn_local(async move {
                    match feedback::update_record(id, &update).await {
                        Ok(_) => on_saved.run(()),
                        Err(err) => row_message.set(Some(err.to_string())),
                    }
                    saving.set(false);
                });
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = (id, update);
                }
            }
        }
    };

    view! {
        <article class="feedback-row">
            <header class="feedback-row__header">
                <h3>{record.with_value(|r| r.supervisor.clone())}</h3>
                <span class="feedback-row__zone">
                    {record.with_value(|r| r.zone.clone().unwrap_or_default())}
                </span>
                <span class="feedback-row__date">
                    {record.with_value(|r| r.report_date.clone())}
                </span>
            </header>
            <dl class="feedback-row__metrics">
                <div>
                    <dt>"Headcount"</dt>
                    <dd>{record.with_value(|r| r.headcount.unwrap_or_default())}</dd>
                </div>
                <div>
                    <dt>"With sales"</dt>
                    <dd>{record.with_value(|r| r.sellers_with_sales.unwrap_or_default())}</dd>
                </div>
                <div>
                    <dt>"Orders"</dt>
                    <dd>{record.with_value(|r| r.distinct_orders.unwrap_or_default())}</dd>
                </div>
                <div>
                    <dt>"Quota coverage"</dt>
                    <dd>
                        {record
                            .with_value(|r| {
                                r.quota_coverage_pct
                                    .map(|p| format!("{p:.1}%"))
                                    .unwrap_or_default()
                            })}
                    </dd>
                </div>
            </dl>
            <div class="feedback-row__edit">
                <label>
                    "Daily quota"
                    <input
                        type="number"
                        min="0"
                        prop:value=move || quota.get()
                        on:input=move |ev| quota.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Supervisor comments"
                    <textarea
                        prop:value=move || supervisor_comments.get()
                        on:input=move |ev| supervisor_comments.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <label>
                    "Manager comments"
                    <textarea
                        prop:value=move || manager_comments.get()
                        on:input=move |ev| manager_comments.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button class="btn btn--primary" on:click=on_save disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
                <Show when=move || row_message.get().is_some()>
                    <p class="feedback-row__message">
                        {move || row_message.get().unwrap_or_default()}
                    </p>
                </Show>
            </div>
        </article>
    }
}
