//! Small metric card used at the top of the dashboard screens.

use leptos::prelude::*;

#[component]
pub fn StatCard(
    label: &'static str,
    value: String,
    #[prop(optional)] hint: Option<String>,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__value">{value}</span>
            <span class="stat-card__label">{label}</span>
            {hint.map(|h| view! { <span class="stat-card__hint">{h}</span> })}
        </div>
    }
}
