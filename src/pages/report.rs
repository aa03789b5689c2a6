//! Management report: the daily summary joined with feedback quotas and
//! comments, one row per supervisor, exported with a fixed column order.

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;

use std::collections::HashMap;

use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::components::route_guard::RouteGuard;
use crate::components::top_nav::TopNav;
use crate::net::feedback::{self, FeedbackFilters};
use crate::net::reports::{self, ReportFilters};
use crate::net::types::{FeedbackRecord, SaleSummary};
use crate::util::csv;

/// One joined row of the management report.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ReportRow {
    pub zone: String,
    pub supervisor: String,
    pub active_sellers: u32,
    pub sellers_with_sales: u32,
    pub distinct_orders: u32,
    pub daily_quota: Option<f64>,
    pub quota_coverage_pct: Option<f64>,
    pub headcount_sale_pct: f64,
    pub supervisor_comments: Option<String>,
    pub manager_comments: Option<String>,
}

/// Join summary rows with feedback records by supervisor name.
///
/// The summary side drives the report: a supervisor without feedback still
/// appears, with the quota columns empty. Coverage falls back to a local
/// `orders / quota` computation when the backend did not precompute it.
pub(crate) fn report_rows(
    summary: &[SaleSummary],
    feedback: &[FeedbackRecord],
) -> Vec<ReportRow> {
    let by_supervisor: HashMap<&str, &FeedbackRecord> =
        feedback.iter().map(|r| (r.supervisor.as_str(), r)).collect();

    summary
        .iter()
        .map(|row| {
            let feedback = by_supervisor.get(row.supervisor.as_str());
            let daily_quota = feedback.map(|f| f.daily_quota);
            let quota_coverage_pct = feedback.and_then(|f| {
                f.quota_coverage_pct.or_else(|| {
                    (f.daily_quota > 0.0)
                        .then(|| f64::from(row.distinct_orders) / f.daily_quota * 100.0)
                })
            });
            let headcount_sale_pct = if row.active_sellers == 0 {
                0.0
            } else {
                f64::from(row.sellers_with_sales) / f64::from(row.active_sellers) * 100.0
            };
            ReportRow {
                zone: row.zone.clone(),
                supervisor: row.supervisor.clone(),
                active_sellers: row.active_sellers,
                sellers_with_sales: row.sellers_with_sales,
                distinct_orders: row.distinct_orders,
                daily_quota,
                quota_coverage_pct,
                headcount_sale_pct,
                supervisor_comments: feedback.and_then(|f| f.supervisor_comments.clone()),
                manager_comments: feedback.and_then(|f| f.manager_comments.clone()),
            }
        })
        .collect()
}

fn pct(value: f64) -> String {
    format!("{value:.1}")
}

/// Export with the column order management expects.
pub(crate) fn report_csv(rows: &[ReportRow]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.zone.clone(),
                r.supervisor.clone(),
                r.active_sellers.to_string(),
                r.sellers_with_sales.to_string(),
                r.distinct_orders.to_string(),
                r.daily_quota.map(|q| q.to_string()).unwrap_or_default(),
                r.quota_coverage_pct.map(pct).unwrap_or_default(),
                pct(r.headcount_sale_pct),
                r.supervisor_comments.clone().unwrap_or_default(),
                r.manager_comments.clone().unwrap_or_default(),
            ]
        })
        .collect();
    csv::csv_document(
        &[
            "Zone",
            "Supervisor",
            "Active Sellers",
            "Sellers With Sales",
            "Distinct Orders",
            "Daily Quota",
            "% Coverage",
            "% Headcount With Sale",
            "Supervisor Comments",
            "Manager Comments",
        ],
        &body,
    )
}

#[component]
pub fn ReportPage() -> impl IntoView {
    view! {
        <RouteGuard>
            <TopNav/>
            <main class="dashboard">
                <ErrorBanner/>
                <ReportContent/>
            </main>
        </RouteGuard>
    }
}

#[component]
fn ReportContent() -> impl IntoView {
    let date = RwSignal::new(None::<String>);

    let rows = LocalResource::new(move || {
        let date = date.get();
        async move {
            let summary_filters =
                ReportFilters { date: date.clone(), ..ReportFilters::default() };
            let feedback_filters = FeedbackFilters { date, ..FeedbackFilters::default() };
            let summary = reports::fetch_summary(&summary_filters).await?;
            // Feedback is optional enrichment: the report renders without it.
            let feedback = feedback::fetch_records(&feedback_filters)
                .await
                .map(|(records, _)| records)
                .unwrap_or_default();
            Ok::<_, crate::net::error::ApiError>(report_rows(&summary, &feedback))
        }
    });

    let export = move |_| {
        if let Some(Ok(rows)) = rows.get_untracked() {
            csv::download_csv("management-report", &report_csv(&rows));
        }
    };

    view! {
        <div class="filters-panel">
            <label class="filters-panel__field">
                "Date"
                <input
                    type="date"
                    prop:value=move || date.get().unwrap_or_default()
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        date.set(if raw.is_empty() { None } else { Some(raw) });
                    }
                />
            </label>
            <button class="btn" on:click=move |_| rows.refetch()>"Refresh"</button>
            <button class="btn" on:click=export>"Export CSV"</button>
        </div>

        <Suspense fallback=move || view! { <p>"Building report..."</p> }>
            {move || {
                rows
                    .get()
                    .map(|result| match result {
                        Ok(rows) if rows.is_empty() => {
                            view! { <p class="empty">"No report rows for this date."</p> }
                                .into_any()
                        }
                        Ok(rows) => view! { <ReportTable rows=rows/> }.into_any(),
                        Err(err) => {
                            view! { <p class="load-error">{err.to_string()}</p> }.into_any()
                        }
                    })
            }}
        </Suspense>
    }
}

#[component]
fn ReportTable(rows: Vec<ReportRow>) -> impl IntoView {
    view! {
        <table class="data-table data-table--wide">
            <thead>
                <tr>
                    <th>"Zone"</th>
                    <th>"Supervisor"</th>
                    <th class="data-table__num">"Active"</th>
                    <th class="data-table__num">"With sales"</th>
                    <th class="data-table__num">"Orders"</th>
                    <th class="data-table__num">"Quota"</th>
                    <th class="data-table__num">"% coverage"</th>
                    <th class="data-table__num">"% HC with sale"</th>
                    <th>"Supervisor comments"</th>
                    <th>"Manager comments"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|r| {
                        view! {
                            <tr>
                                <td>{r.zone}</td>
                                <td>{r.supervisor}</td>
                                <td class="data-table__num">{r.active_sellers}</td>
                                <td class="data-table__num">{r.sellers_with_sales}</td>
                                <td class="data-table__num">{r.distinct_orders}</td>
                                <td class="data-table__num">
                                    {r.daily_quota.map(|q| q.to_string()).unwrap_or_default()}
                                </td>
                                <td class="data-table__num">
                                    {r
                                        .quota_coverage_pct
                                        .map(|p| format!("{p:.1}%"))
                                        .unwrap_or_default()}
                                </td>
                                <td class="data-table__num">
                                    {format!("{:.1}%", r.headcount_sale_pct)}
                                </td>
                                <td>{r.supervisor_comments.unwrap_or_default()}</td>
                                <td>{r.manager_comments.unwrap_or_default()}</td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
}
