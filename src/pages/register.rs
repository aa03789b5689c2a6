//! Account registration page. A successful sign-up routes back to the
//! login screen; it never authenticates the new account.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::NewAccount;
use crate::state::session::{DASHBOARD_ROUTE, SessionState};

/// Role granted to self-registered accounts.
pub(crate) const DEFAULT_ROLE: &str = "ROLE_USER";
pub(crate) const MIN_PASSWORD_LEN: usize = 6;

/// Validate the registration form and build the sign-up payload.
pub(crate) fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<NewAccount, String> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() {
        return Err("A username is required.".to_owned());
    }
    if email.is_empty() {
        return Err("An email address is required.".to_owned());
    }
    if !email.contains('@') {
        return Err("The email address does not look valid.".to_owned());
    }
    if password.is_empty() {
        return Err("A password is required.".to_owned());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!("The password needs at least {MIN_PASSWORD_LEN} characters."));
    }
    if password != confirm {
        return Err("The passwords do not match.".to_owned());
    }
    Ok(NewAccount {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        roles: vec![DEFAULT_ROLE.to_owned()],
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let message = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let handle =
        StoredValue::new_local(use_context::<crate::net::session_client::SessionHandle>());

    // A signed-in visitor gets sent back to the dashboard.
    let navigate = use_navigate();
    Effect::new(move || {
        let state = session.get();
        if state.is_authenticated() && !state.loading {
            navigate(
                DASHBOARD_ROUTE,
                NavigateOptions { replace: true, ..NavigateOptions::default() },
            );
        }
    });

    let banner = move || message.get().or_else(|| session.get().error);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        match validate_registration(&username.get(), &email.get(), &password.get(), &confirm.get())
        {
            Err(msg) => message.set(Some(msg)),
            Ok(account) => {
                message.set(None);
                submitting.set(true);
                #[cfg(feature = "hydrate")]
                if let Some(handle) = handle.get_value() {
                    leptos::task::spawn_local(async move {
                        if let Err(err) = handle.register(account).await {
                            message.set(Some(err));
                        }
                        submitting.set(false);
                    });
                }
                #[cfg(not(feature = "hydrate"))]
                {
                    let _ = account;
                }
            }
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create an account"</h1>
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
                        type="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || submitting.get()
                    >
                        {move || if submitting.get() { "Creating..." } else { "Create account" }}
                    </button>
                </form>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    <a href="/login">"Back to sign-in"</a>
                </p>
            </div>
        </div>
    }
}
