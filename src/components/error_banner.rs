//! Dismissible banner bound to the shared session error.

use leptos::prelude::*;

use crate::state::session::SessionState;

/// Shows the shared session error, if any, with a dismiss button.
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    // Stored so the handler stays `Copy` for re-rendered children.
    #[cfg(feature = "hydrate")]
    let handle =
        StoredValue::new_local(use_context::<crate::net::session_client::SessionHandle>());

    let dismiss = move |_| {
        #[cfg(feature = "hydrate")]
        if let Some(handle) = handle.get_value() {
            handle.clear_error();
        }
    };

    view! {
        <Show when=move || session.get().error.is_some()>
            <div class="banner banner--error" role="alert">
                <span class="banner__text">
                    {move || session.get().error.unwrap_or_default()}
                </span>
                <button class="banner__dismiss" on:click=dismiss title="Dismiss">
                    "\u{d7}"
                </button>
            </div>
        </Show>
    }
}
