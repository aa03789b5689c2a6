//! Seller roster screen with search, per-zone stats, and CSV export.

#[cfg(test)]
#[path = "sellers_test.rs"]
mod sellers_test;

use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::components::route_guard::RouteGuard;
use crate::components::stat_card::StatCard;
use crate::components::top_nav::TopNav;
use crate::net::sellers::{self, RosterFilters};
use crate::net::types::Seller;
use crate::util::csv;
use crate::util::dates::display_date;

pub(crate) const ROSTER_PAGE_SIZE: u32 = 50;

/// Aggregates the original backend leaves to the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RosterStats {
    pub total: u32,
    pub with_sales: u32,
    pub without_sales: u32,
    pub regular_sales: u32,
    pub flex_sales: u32,
}

pub(crate) fn roster_stats(rows: &[Seller]) -> RosterStats {
    let total = u32::try_from(rows.len()).unwrap_or(u32::MAX);
    let with_sales = u32::try_from(rows.iter().filter(|s| s.total_sales > 0).count())
        .unwrap_or(u32::MAX);
    RosterStats {
        total,
        with_sales,
        without_sales: total - with_sales,
        regular_sales: rows.iter().map(|s| s.regular_sales).sum(),
        flex_sales: rows.iter().map(|s| s.flex_sales).sum(),
    }
}

pub(crate) fn roster_csv(rows: &[Seller]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|s| {
            vec![
                s.seller_id.clone(),
                s.name.clone(),
                s.role.clone(),
                s.zone.clone(),
                s.supervisor.clone(),
                s.tenure_cluster.clone(),
                display_date(&s.start_date),
                s.regular_sales.to_string(),
                s.flex_sales.to_string(),
                s.total_sales.to_string(),
            ]
        })
        .collect();
    csv::csv_document(
        &[
            "Seller ID", "Name", "Role", "Zone", "Supervisor", "Tenure", "Start Date",
            "Regular Sales", "Flex Sales", "Total Sales",
        ],
        &body,
    )
}

#[component]
pub fn SellersPage() -> impl IntoView {
    view! {
        <RouteGuard>
            <TopNav/>
            <main class="dashboard">
                <ErrorBanner/>
                <RosterContent/>
            </main>
        </RouteGuard>
    }
}

#[component]
fn RosterContent() -> impl IntoView {
    let filters = RwSignal::new(RosterFilters {
        per_page: Some(ROSTER_PAGE_SIZE),
        page: Some(1),
        ..RosterFilters::default()
    });

    let roster = LocalResource::new(move || {
        let filters = filters.get();
        async move { sellers::fetch_roster(&filters).await }
    });

    let export = move |_| {
        if let Some(Ok(page)) = roster.get_untracked() {
            csv::download_csv("seller-roster", &roster_csv(&page.data));
        }
    };

    let prev_page = move |_| {
        filters.update(|f| f.page = Some(f.page.unwrap_or(1).saturating_sub(1).max(1)));
    };
    let next_page = move |_| {
        filters.update(|f| f.page = Some(f.page.unwrap_or(1) + 1));
    };

    view! {
        <div class="filters-panel">
            <label class="filters-panel__field">
                "Search"
                <input
                    type="text"
                    placeholder="Name or seller ID"
                    prop:value=move || filters.get().search.unwrap_or_default()
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        filters
                            .update(|f| {
                                f.search = if raw.is_empty() { None } else { Some(raw) };
                                f.page = Some(1);
                            });
                    }
                />
            </label>
            <label class="filters-panel__field">
                "Date"
                <input
                    type="date"
                    prop:value=move || filters.get().date.unwrap_or_default()
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        filters
                            .update(|f| {
                                f.date = if raw.is_empty() { None } else { Some(raw) };
                                f.page = Some(1);
                            });
                    }
                />
            </label>
            <button class="btn" on:click=move |_| roster.refetch()>"Refresh"</button>
        </div>

        <Suspense fallback=move || view! { <p>"Loading roster..."</p> }>
            {move || {
                roster
                    .get()
                    .map(|result| match result {
                        Ok(page) => {
                            let stats = roster_stats(&page.data);
                            let label = page
                                .pagination
                                .as_ref()
                                .map(|p| {
                                    format!(
                                        "Page {} of {} ({} sellers)",
                                        p.page,
                                        p.total_pages.max(1),
                                        p.total_records,
                                    )
                                })
                                .unwrap_or_default();
                            view! {
                                <section class="dashboard__stats">
                                    <StatCard label="On page" value=stats.total.to_string()/>
                                    <StatCard
                                        label="With sales"
                                        value=stats.with_sales.to_string()
                                    />
                                    <StatCard
                                        label="Without sales"
                                        value=stats.without_sales.to_string()
                                    />
                                    <StatCard
                                        label="Regular / flex"
                                        value=format!(
                                            "{} / {}",
                                            stats.regular_sales,
                                            stats.flex_sales,
                                        )
                                    />
                                </section>
                                <section class="dashboard__section">
                                    <header class="dashboard__section-header">
                                        <h2>"Sellers"</h2>
                                        <button class="btn" on:click=export>"Export CSV"</button>
                                    </header>
                                    <RosterTable rows=page.data/>
                                    <div class="pager">
                                        <button class="btn" on:click=prev_page>"Previous"</button>
                                        <span class="pager__label">{label}</span>
                                        <button class="btn" on:click=next_page>"Next"</button>
                                    </div>
                                </section>
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

#[component]
fn RosterTable(rows: Vec<Seller>) -> impl IntoView {
    view! {
        <table class="data-table data-table--wide">
            <thead>
                <tr>
                    <th>"Name"</th>
                    <th>"Role"</th>
                    <th>"Zone"</th>
                    <th>"Supervisor"</th>
                    <th>"Tenure"</th>
                    <th>"Start date"</th>
                    <th class="data-table__num">"Regular"</th>
                    <th class="data-table__num">"Flex"</th>
                    <th class="data-table__num">"Total"</th>
                    <th>"Contact"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|s| {
                        let contact = s.whatsapp_url.map(|url| {
                            view! {
                                <a href=url target="_blank" rel="noreferrer">"WhatsApp"</a>
                            }
                        });
                        view! {
                            <tr>
                                <td>{s.name}</td>
                                <td>{s.role}</td>
                                <td>{s.zone}</td>
                                <td>{s.supervisor}</td>
                                <td>{s.tenure_cluster}</td>
                                <td>{display_date(&s.start_date)}</td>
                                <td class="data-table__num">{s.regular_sales}</td>
                                <td class="data-table__num">{s.flex_sales}</td>
                                <td class="data-table__num">{s.total_sales}</td>
                                <td>{contact}</td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
}
