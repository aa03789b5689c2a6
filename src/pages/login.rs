//! Sign-in page.
//!
//! The submit button's spinner state is local to this form on purpose: the
//! shared session controller records the error, but the form decides when
//! it is busy (scenario: a rejected sign-in must leave the form usable).

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::net::types::Credentials;
use crate::state::session::{
    DASHBOARD_ROUTE, MSG_REGISTERED, SessionState, boot_marker_message, query_flag,
};

pub(crate) const MSG_FIELDS_REQUIRED: &str = "Please fill in both username and password.";

/// Client-side validation: both fields are required before any network
/// call. The username is trimmed, the password is taken as typed.
pub(crate) fn validate_credentials(
    username: &str,
    password: &str,
) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(MSG_FIELDS_REQUIRED);
    }
    Ok(Credentials { username: username.to_owned(), password: password.to_owned() })
}

/// Banner seeded from the URL markers that survive a full navigation.
pub(crate) fn banner_message(query: &str) -> Option<&'static str> {
    if query_flag(query, "registered") {
        Some(MSG_REGISTERED)
    } else {
        boot_marker_message(query)
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let search = use_location().search;

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let message = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let handle =
        StoredValue::new_local(use_context::<crate::net::session_client::SessionHandle>());

    // An already-verified visitor has no business on the login page.
    let navigate = use_navigate();
    Effect::new(move || {
        let state = session.get();
        if state.check_complete && state.is_authenticated() && !state.loading {
            navigate(
                DASHBOARD_ROUTE,
                NavigateOptions { replace: true, ..NavigateOptions::default() },
            );
        }
    });

    // Precedence: this form's own message, then URL markers, then the
    // shared session error.
    let banner = move || {
        message
            .get()
            .or_else(|| banner_message(&search.get()).map(str::to_owned))
            .or_else(|| session.get().error)
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        match validate_credentials(&username.get(), &password.get()) {
            Err(msg) => message.set(Some(msg.to_owned())),
            Ok(credentials) => {
                message.set(None);
                submitting.set(true);
                #[cfg(feature = "hydrate")]
                if let Some(handle) = handle.get_value() {
                    leptos::task::spawn_local(async move {
                        if let Err(err) = handle.login(credentials).await {
                            message.set(Some(err));
                        }
                        submitting.set(false);
                    });
                }
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = credentials;
                }
            }
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Salesboard"</h1>
                <p class="login-card__subtitle">"Sales operations reporting"</p>
                <Show when=move || banner().is_some()>
                    <p class="login-message">{move || banner().unwrap_or_default()}</p>
                </Show>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || submitting.get()
                    >
                        {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    <a href="/register">"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
