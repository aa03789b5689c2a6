//! Per-supervisor sales summary table.

use leptos::prelude::*;

use crate::net::types::SaleSummary;

#[component]
pub fn SummaryTable(rows: Vec<SaleSummary>) -> impl IntoView {
    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Zone"</th>
                    <th>"Supervisor"</th>
                    <th class="data-table__num">"Active sellers"</th>
                    <th class="data-table__num">"Sellers with sales"</th>
                    <th class="data-table__num">"Distinct orders"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        view! {
                            <tr>
                                <td>{row.zone}</td>
                                <td>{row.supervisor}</td>
                                <td class="data-table__num">{row.active_sellers}</td>
                                <td class="data-table__num">{row.sellers_with_sales}</td>
                                <td class="data-table__num">{row.distinct_orders}</td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
}
