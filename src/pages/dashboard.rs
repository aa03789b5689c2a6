//! Overview screen: headline metrics, the per-supervisor summary, and the
//! paginated sale detail, all driven by one shared filter set.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::detail_table::DetailTable;
use crate::components::error_banner::ErrorBanner;
use crate::components::filters_panel::FiltersPanel;
use crate::components::route_guard::RouteGuard;
use crate::components::stat_card::StatCard;
use crate::components::summary_table::SummaryTable;
use crate::components::top_nav::TopNav;
use crate::net::error::ApiError;
use crate::net::reports::{self, ReportFilters};
use crate::net::types::{Pagination, SaleDetail, SaleSummary};
use crate::util::csv;
use crate::util::dates::display_date;

/// Default page size for the detail table.
pub(crate) const DETAIL_PAGE_SIZE: u32 = 100;

/// Headline numbers over the summary rows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct OverviewStats {
    pub active_sellers: u32,
    pub sellers_with_sales: u32,
    pub distinct_orders: u32,
    /// Percentage of active sellers with at least one sale.
    pub sale_rate_pct: f64,
}

pub(crate) fn overview_stats(rows: &[SaleSummary]) -> OverviewStats {
    let active_sellers = rows.iter().map(|r| r.active_sellers).sum();
    let sellers_with_sales = rows.iter().map(|r| r.sellers_with_sales).sum();
    let distinct_orders = rows.iter().map(|r| r.distinct_orders).sum();
    let sale_rate_pct = if active_sellers == 0 {
        0.0
    } else {
        f64::from(sellers_with_sales) / f64::from(active_sellers) * 100.0
    };
    OverviewStats { active_sellers, sellers_with_sales, distinct_orders, sale_rate_pct }
}

pub(crate) fn summary_csv(rows: &[SaleSummary]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.zone.clone(),
                r.supervisor.clone(),
                r.active_sellers.to_string(),
                r.sellers_with_sales.to_string(),
                r.distinct_orders.to_string(),
            ]
        })
        .collect();
    csv::csv_document(
        &["Zone", "Supervisor", "Active Sellers", "Sellers With Sales", "Distinct Orders"],
        &body,
    )
}

pub(crate) fn details_csv(rows: &[SaleDetail]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                display_date(&r.date),
                r.time.clone().unwrap_or_default(),
                r.zone.clone(),
                r.supervisor.clone(),
                r.seller_name.clone(),
                r.seller_id.clone(),
                r.order_number.clone(),
                r.product.clone(),
                r.customer_name.clone(),
                r.scoring.clone(),
            ]
        })
        .collect();
    csv::csv_document(
        &[
            "Date", "Time", "Zone", "Supervisor", "Seller", "Seller ID", "Order", "Product",
            "Customer", "Scoring",
        ],
        &body,
    )
}

/// Label for the detail pager, derived from the pagination block.
pub(crate) fn page_label(pagination: Option<&Pagination>) -> String {
    match pagination {
        Some(p) if p.limit > 0 => {
            let page = p.offset / p.limit + 1;
            format!("Page {page} of {} ({} rows)", p.pages.max(1), p.total)
        }
        _ => String::new(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <RouteGuard>
            <TopNav/>
            <main class="dashboard">
                <ErrorBanner/>
                <OverviewContent/>
            </main>
        </RouteGuard>
    }
}

#[component]
fn OverviewContent() -> impl IntoView {
    let filters = RwSignal::new(ReportFilters {
        limit: Some(DETAIL_PAGE_SIZE),
        offset: Some(0),
        ..ReportFilters::default()
    });

    let zones = LocalResource::new(|| async {
        reports::fetch_zones().await.unwrap_or_default()
    });
    let supervisors = LocalResource::new(move || {
        let zone = filters.get().zone;
        async move { reports::fetch_supervisors(zone.as_deref()).await.unwrap_or_default() }
    });

    let summary = LocalResource::new(move || {
        let filters = filters.get();
        async move {
            if let Err(errors) = filters.validate() {
                return Err(ApiError::Service(errors.join(" ")));
            }
            reports::fetch_summary(&filters).await
        }
    });
    let details = LocalResource::new(move || {
        let filters = filters.get();
        async move {
            if let Err(errors) = filters.validate() {
                return Err(ApiError::Service(errors.join(" ")));
            }
            reports::fetch_details(&filters).await
        }
    });

    let on_refresh = Callback::new(move |()| {
        summary.refetch();
        details.refetch();
    });

    let export_summary = move |_| {
        if let Some(Ok(rows)) = summary.get_untracked() {
            csv::download_csv("sales-summary", &summary_csv(&rows));
        }
    };
    let export_details = move |_| {
        if let Some(Ok((rows, _))) = details.get_untracked() {
            csv::download_csv("sale-details", &details_csv(&rows));
        }
    };

    let prev_page = move |_| {
        filters.update(|f| {
            let limit = f.limit.unwrap_or(DETAIL_PAGE_SIZE);
            f.offset = Some(f.offset.unwrap_or(0).saturating_sub(limit));
        });
    };
    let next_page = move |_| {
        filters.update(|f| {
            let limit = f.limit.unwrap_or(DETAIL_PAGE_SIZE);
            f.offset = Some(f.offset.unwrap_or(0) + limit);
        });
    };

    view! {
        <FiltersPanel filters=filters zones=zones supervisors=supervisors on_refresh=on_refresh/>

        <section class="dashboard__stats">
            <Suspense fallback=|| ()>
                {move || {
                    summary
                        .get()
                        .and_then(Result::ok)
                        .map(|rows| {
                            let stats = overview_stats(&rows);
                            view! {
                                <StatCard
                                    label="Active sellers"
                                    value=stats.active_sellers.to_string()
                                />
                                <StatCard
                                    label="Sellers with sales"
                                    value=stats.sellers_with_sales.to_string()
                                />
                                <StatCard
                                    label="Distinct orders"
                                    value=stats.distinct_orders.to_string()
                                />
                                <StatCard
                                    label="Sale rate"
                                    value=format!("{:.1}%", stats.sale_rate_pct)
                                />
                            }
                        })
                }}
            </Suspense>
        </section>

        <section class="dashboard__section">
            <header class="dashboard__section-header">
                <h2>"Summary by supervisor"</h2>
                <button class="btn" on:click=export_summary>"Export CSV"</button>
            </header>
            <Suspense fallback=move || view! { <p>"Loading summary..."</p> }>
                {move || {
                    summary
                        .get()
                        .map(|result| match result {
                            Ok(rows) if rows.is_empty() => {
                                view! { <p class="empty">"No rows for these filters."</p> }
                                    .into_any()
                            }
                            Ok(rows) => view! { <SummaryTable rows=rows/> }.into_any(),
                            Err(err) => {
                                view! { <p class="load-error">{err.to_string()}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </section>

        <section class="dashboard__section">
            <header class="dashboard__section-header">
                <h2>"Sale detail"</h2>
                <button class="btn" on:click=export_details>"Export CSV"</button>
            </header>
            <Suspense fallback=move || view! { <p>"Loading detail..."</p> }>
                {move || {
                    details
                        .get()
                        .map(|result| match result {
                            Ok((rows, pagination)) => {
                                let label = page_label(pagination.as_ref());
                                view! {
                                    <DetailTable rows=rows/>
                                    <div class="pager">
                                        <button class="btn" on:click=prev_page>"Previous"</button>
                                        <span class="pager__label">{label}</span>
                                        <button class="btn" on:click=next_page>"Next"</button>
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
        </section>
    }
}
