//! Sale-by-sale detail table.

use leptos::prelude::*;

use crate::net::types::SaleDetail;
use crate::util::dates::display_date;

#[component]
pub fn DetailTable(rows: Vec<SaleDetail>) -> impl IntoView {
    view! {
        <table class="data-table data-table--wide">
            <thead>
                <tr>
                    <th>"Date"</th>
                    <th>"Time"</th>
                    <th>"Zone"</th>
                    <th>"Supervisor"</th>
                    <th>"Seller"</th>
                    <th>"Order"</th>
                    <th>"Product"</th>
                    <th>"Customer"</th>
                    <th>"Scoring"</th>
                    <th>"Today"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        view! {
                            <tr>
                                <td>{display_date(&row.date)}</td>
                                <td>{row.time.unwrap_or_default()}</td>
                                <td>{row.zone}</td>
                                <td>{row.supervisor}</td>
                                <td>{row.seller_name}</td>
                                <td>{row.order_number}</td>
                                <td>{row.product}</td>
                                <td>{row.customer_name}</td>
                                <td>{row.scoring}</td>
                                <td>{if row.sold_today { "yes" } else { "" }}</td>
                            </tr>
                        }
                    })
                    .collect::<Vec<_>>()}
            </tbody>
        </table>
    }
}
