//! Route-level access control wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the loading view until the session check completes, an
//! access-denied view for unauthenticated visitors (the session machine has
//! already scheduled the redirect by then), and the protected content
//! otherwise. Decision logic lives in [`guard_view`] so it stays testable.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use leptos::prelude::*;

use crate::components::error_banner::ErrorBanner;
use crate::state::session::SessionState;

/// What a guarded route should render right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardView {
    /// Verification still in flight; `user` must not be trusted yet.
    Loading,
    Denied,
    AdminRequired,
    Content,
}

pub fn guard_view(state: &SessionState, admin_only: bool) -> GuardView {
    if !state.check_complete {
        GuardView::Loading
    } else if !state.is_authenticated() {
        GuardView::Denied
    } else if admin_only && !state.is_admin() {
        GuardView::AdminRequired
    } else {
        GuardView::Content
    }
}

/// Wrapper for protected pages.
#[component]
pub fn RouteGuard(
    #[prop(optional)] admin_only: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    view! {
        {move || match guard_view(&session.get(), admin_only) {
            GuardView::Loading => {
                view! {
                    <div class="guard guard--loading">
                        <div class="spinner"></div>
                        <p>"Checking session..."</p>
                    </div>
                }
                    .into_any()
            }
            GuardView::Denied => {
                view! {
                    <div class="guard guard--denied">
                        <ErrorBanner/>
                        <p>"You need to sign in to view this page."</p>
                        <a class="btn btn--primary" href="/login">"Go to sign-in"</a>
                    </div>
                }
                    .into_any()
            }
            GuardView::AdminRequired => {
                view! {
                    <div class="guard guard--denied">
                        <p>"This screen is restricted to administrators."</p>
                        <a class="btn" href="/dashboard">"Back to the dashboard"</a>
                    </div>
                }
                    .into_any()
            }
            GuardView::Content => children(),
        }}
    }
}
