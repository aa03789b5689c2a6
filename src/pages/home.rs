//! Public landing route: forwards to the dashboard or the login screen.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::{DASHBOARD_ROUTE, LOGIN_ROUTE, SessionState};

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        let state = session.get();
        if state.check_complete && !state.loading {
            let target = if state.is_authenticated() { DASHBOARD_ROUTE } else { LOGIN_ROUTE };
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Salesboard"</h1>
                <p class="login-card__subtitle">"Redirecting..."</p>
            </div>
        </div>
    }
}
