//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    dashboard::DashboardPage, feedback::FeedbackPage, home::HomePage, login::LoginPage,
    register::RegisterPage, report::ReportPage, sellers::SellersPage,
};
use crate::state::session::SessionState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/salesboard.css"/>
        <Title text="Salesboard"/>

        <Router>
            <SessionRoot>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("sellers"))
                        view=SellersPage
                    />
                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("feedback"))
                        view=FeedbackPage
                    />
                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("report"))
                        view=ReportPage
                    />
                </Routes>
            </SessionRoot>
        </Router>
    }
}

/// Provides the shared session state and, in the browser, wires the
/// session client to the router: URL markers are read once on boot and
/// every path change feeds the verification entry point.
#[component]
fn SessionRoot(children: Children) -> impl IntoView {
    let session = RwSignal::new(SessionState::default());
    provide_context(session);

    #[cfg(feature = "hydrate")]
    {
        use std::rc::Rc;

        use leptos_router::NavigateOptions;
        use leptos_router::hooks::{use_location, use_navigate};

        use crate::net::session_client::SessionHandle;

        let navigate = use_navigate();
        let location = use_location();
        let handle = SessionHandle::new(
            session,
            Rc::new(move |target: String| {
                navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
            }),
        );
        provide_context(handle.clone());

        handle.boot_markers(&location.search.get_untracked());

        let pathname = location.pathname;
        Effect::new(move || {
            let path = pathname.get();
            handle.route_changed(&path);
        });
    }

    children()
}
