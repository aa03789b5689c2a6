//! Shared filter controls for the report screens.

use leptos::prelude::*;

use crate::net::reports::ReportFilters;

fn none_if_empty(raw: String) -> Option<String> {
    if raw.is_empty() { None } else { Some(raw) }
}

/// Date, zone, and supervisor filters plus a refresh button.
///
/// Changing the zone resets the supervisor: the supervisor vocabulary is
/// zone-scoped and a stale pick would silently filter to nothing.
#[component]
pub fn FiltersPanel(
    filters: RwSignal<ReportFilters>,
    zones: LocalResource<Vec<String>>,
    supervisors: LocalResource<Vec<String>>,
    on_refresh: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filters-panel">
            <label class="filters-panel__field">
                "Date"
                <input
                    type="date"
                    prop:value=move || filters.get().date.unwrap_or_default()
                    on:change=move |ev| {
                        filters.update(|f| f.date = none_if_empty(event_target_value(&ev)));
                    }
                />
            </label>
            <label class="filters-panel__field">
                "Zone"
                <select
                    prop:value=move || filters.get().zone.unwrap_or_default()
                    on:change=move |ev| {
                        filters
                            .update(|f| {
                                f.zone = none_if_empty(event_target_value(&ev));
                                f.supervisor = None;
                            });
                    }
                >
                    <option value="">"All zones"</option>
                    {move || {
                        zones
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|zone| view! { <option value=zone.clone()>{zone.clone()}</option> })
                            .collect::<Vec<_>>()
                    }}
                </select>
            </label>
            <label class="filters-panel__field">
                "Supervisor"
                <select
                    prop:value=move || filters.get().supervisor.unwrap_or_default()
                    on:change=move |ev| {
                        filters.update(|f| f.supervisor = none_if_empty(event_target_value(&ev)));
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
            <button class="btn" on:click=move |_| on_refresh.run(())>
                "Refresh"
            </button>
        </div>
    }
}
