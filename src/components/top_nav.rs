//! Dashboard chrome: section links, the signed-in user, and logout.

use leptos::prelude::*;

use crate::state::session::SessionState;

const SECTIONS: &[(&str, &str)] = &[
    ("/dashboard", "Overview"),
    ("/dashboard/sellers", "Sellers"),
    ("/dashboard/feedback", "Feedback"),
    ("/dashboard/report", "Report"),
];

/// Header bar shown on every dashboard screen.
#[component]
pub fn TopNav() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    #[cfg(feature = "hydrate")]
    let handle =
        StoredValue::new_local(use_context::<crate::net::session_client::SessionHandle>());

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        if let Some(handle) = handle.get_value() {
            handle.logout();
        }
    };

    let display_name =
        move || session.get().user.map(|u| u.display_name).unwrap_or_default();

    view! {
        <header class="top-nav">
            <span class="top-nav__brand">"Salesboard"</span>
            <nav class="top-nav__links">
                {SECTIONS
                    .iter()
                    .map(|(href, label)| {
                        view! { <a class="top-nav__link" href=*href>{*label}</a> }
                    })
                    .collect::<Vec<_>>()}
            </nav>
            <span class="top-nav__spacer"></span>
            <span class="top-nav__user">{display_name}</span>
            <button class="btn top-nav__logout" on:click=on_logout>
                "Sign out"
            </button>
        </header>
    }
}
