use super::*;
use serde_json::json;

fn alice_body() -> Value {
    json!({"user": {"id": 7, "username": "alice", "roles": ["admin"]}})
}

fn unauthorized() -> ApiError {
    ApiError::Status { status: 401, message: "Unauthorized".to_owned() }
}

fn network_down() -> ApiError {
    ApiError::Network("connection refused".to_owned())
}

/// Drive a machine onto a protected route and return the fetch epoch.
fn start_protected_verify(machine: &mut SessionMachine, path: &str) -> u64 {
    let (_, decision) = machine.route_changed(path);
    match decision {
        VerifyDecision::Fetch { epoch } => epoch,
        VerifyDecision::Skip => panic!("expected a fetch for {path}"),
    }
}

// =============================================================
// Route classification and URL markers
// =============================================================

#[test]
fn public_routes_are_exactly_the_three_entry_pages() {
    for path in ["/", "/login", "/register"] {
        assert!(is_public_route(path), "{path} should be public");
    }
    for path in ["/dashboard", "/dashboard/sellers", "/login/extra"] {
        assert!(!is_public_route(path), "{path} should be protected");
    }
}

#[test]
fn query_flag_matches_exact_pairs_only() {
    assert!(query_flag("?session_expired=true", "session_expired"));
    assert!(query_flag("registered=true&x=1", "registered"));
    assert!(!query_flag("?session_expired=false", "session_expired"));
    assert!(!query_flag("?other_session_expired=true", "session_expired"));
    assert!(!query_flag("", "session_expired"));
}

#[test]
fn boot_markers_seed_the_error_banner() {
    let mut machine = SessionMachine::new();
    machine.boot_markers("?session_expired=true");
    assert_eq!(machine.state().error.as_deref(), Some(MSG_SESSION_EXPIRED));
    assert!(machine.state().user.is_none());
}

#[test]
fn boot_markers_prefer_security_logout() {
    let mut machine = SessionMachine::new();
    machine.boot_markers("?security_logout=true&session_expired=true");
    assert_eq!(machine.state().error.as_deref(), Some(MSG_SECURITY_LOGOUT));
}

#[test]
fn boot_markers_ignore_unmarked_queries() {
    let mut machine = SessionMachine::new();
    machine.boot_markers("?tab=sales");
    assert!(machine.state().error.is_none());
}

// =============================================================
// Derived state
// =============================================================

#[test]
fn default_state_is_loading_and_unauthenticated() {
    let state = SessionState::default();
    assert!(state.loading);
    assert!(!state.check_complete);
    assert!(!state.is_authenticated());
    assert!(!state.is_admin());
}

#[test]
fn authentication_requires_check_complete() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    assert!(!machine.state().is_authenticated());
    machine.finish_verify(epoch, Ok(alice_body()));
    assert!(machine.state().is_authenticated());
}

// =============================================================
// Successful verification
// =============================================================

#[test]
fn verify_success_normalizes_and_stores_identity() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    let commands = machine.finish_verify(epoch, Ok(alice_body()));

    assert!(commands.is_empty());
    let state = machine.state();
    let user = state.user.as_ref().expect("user");
    assert_eq!(user.id, "7");
    assert!(state.is_admin());
    assert!(state.is_authenticated());
    assert!(state.check_complete);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

// =============================================================
// 401 on verification
// =============================================================

#[test]
fn verify_unauthorized_clears_user_and_schedules_redirect() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    let commands = machine.finish_verify(epoch, Err(unauthorized()));

    assert_eq!(commands, vec![Command::ScheduleRedirect { delay_ms: REDIRECT_DELAY_MS }]);
    let state = machine.state();
    assert!(state.user.is_none());
    assert_eq!(state.error.as_deref(), Some(MSG_SESSION_EXPIRED));
    assert!(state.check_complete);
    assert!(!state.loading);

    let commands = machine.redirect_due();
    assert_eq!(
        commands,
        vec![Command::Navigate { target: SESSION_EXPIRED_ROUTE.to_owned() }]
    );
}

#[test]
fn verify_identity_shape_error_is_an_auth_failure() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    // 200 with no usable identity: treated as authentication failure.
    let commands = machine.finish_verify(epoch, Ok(json!({"ok": true})));

    assert_eq!(commands, vec![Command::ScheduleRedirect { delay_ms: REDIRECT_DELAY_MS }]);
    assert_eq!(machine.state().error.as_deref(), Some(MSG_SESSION_INVALID));
    assert!(machine.state().user.is_none());
}

#[test]
fn verify_connection_error_is_retryable_without_redirect() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    let commands = machine.finish_verify(epoch, Err(network_down()));

    assert!(commands.is_empty());
    let state = machine.state();
    assert_eq!(state.error.as_deref(), Some(MSG_CONNECTION));
    assert!(state.check_complete);
    assert!(!state.loading);
}

// =============================================================
// check_complete totality
// =============================================================

#[test]
fn check_complete_becomes_true_for_every_outcome() {
    let outcomes: Vec<Result<Value, ApiError>> = vec![
        Ok(alice_body()),
        Ok(json!({"garbage": true})),
        Err(unauthorized()),
        Err(network_down()),
        Err(ApiError::Service("database unavailable".to_owned())),
    ];
    for outcome in outcomes {
        let mut machine = SessionMachine::new();
        let epoch = start_protected_verify(&mut machine, "/dashboard");
        assert!(!machine.state().check_complete);
        machine.finish_verify(epoch, outcome);
        assert!(machine.state().check_complete, "check_complete must always resolve");
        assert!(!machine.state().loading, "loading must always resolve");
    }
}

// =============================================================
// Re-entrancy
// =============================================================

#[test]
fn double_navigation_makes_exactly_one_fetch() {
    let mut machine = SessionMachine::new();
    let (_, first) = machine.route_changed("/dashboard");
    assert!(matches!(first, VerifyDecision::Fetch { .. }));
    let (_, second) = machine.route_changed("/dashboard");
    assert_eq!(second, VerifyDecision::Skip);
}

#[test]
fn protected_to_protected_navigation_reuses_the_inflight_fetch() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    let (_, decision) = machine.route_changed("/dashboard/sellers");
    assert_eq!(decision, VerifyDecision::Skip);
    // The in-flight result still applies to the new protected route.
    machine.finish_verify(epoch, Ok(alice_body()));
    assert!(machine.state().is_authenticated());
}

#[test]
fn verified_session_skips_re_verification() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.finish_verify(epoch, Ok(alice_body()));

    let (_, decision) = machine.route_changed("/dashboard/sellers");
    assert_eq!(decision, VerifyDecision::Skip);
    assert!(machine.state().is_authenticated());
}

// =============================================================
// Public-route bypass
// =============================================================

#[test]
fn public_route_never_verifies_and_clears_stale_errors() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.finish_verify(epoch, Err(unauthorized()));
    assert!(machine.state().error.is_some());

    let (_, decision) = machine.route_changed("/login");
    assert_eq!(decision, VerifyDecision::Skip);
    let state = machine.state();
    assert!(state.error.is_none(), "public routes never show stale auth errors");
    assert!(state.check_complete);
    assert!(!state.loading);
}

#[test]
fn auth_failure_on_public_route_sets_no_error() {
    let mut machine = SessionMachine::new();
    // Failure lands while already on a public route (e.g. late 401).
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.route_changed("/login");
    let commands = machine.finish_verify(epoch, Err(unauthorized()));
    // Stale epoch: discarded wholesale.
    assert!(commands.is_empty());
    assert!(machine.state().error.is_none());
}

// =============================================================
// Idempotent failure handling
// =============================================================

#[test]
fn overlapping_failures_schedule_one_redirect() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    let first = machine.finish_verify(epoch, Err(unauthorized()));
    assert_eq!(first, vec![Command::ScheduleRedirect { delay_ms: REDIRECT_DELAY_MS }]);

    // A second failure before the timer fires: nothing new is scheduled.
    let epoch = match machine.route_changed("/dashboard") {
        (_, VerifyDecision::Fetch { epoch }) => epoch,
        (_, VerifyDecision::Skip) => panic!("expected re-verification"),
    };
    // Re-navigation cleared the pending flag, so this failure schedules
    // again; overlap *within* one navigation is covered below.
    machine.finish_verify(epoch, Err(unauthorized()));

    // Overlap within one navigation: feed a second failure while the
    // redirect from the first is still pending.
    let again = machine.finish_verify(epoch, Err(unauthorized()));
    assert!(again.is_empty(), "pending redirect makes the second failure a no-op");
}

// =============================================================
// Redirect cancellation
// =============================================================

#[test]
fn rescheduling_cancels_the_previous_timer() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.finish_verify(epoch, Err(unauthorized()));

    // New navigation while timer A is pending: A must be cancelled.
    let (commands, decision) = machine.route_changed("/dashboard/sellers");
    assert_eq!(commands, vec![Command::CancelRedirect]);
    let epoch = match decision {
        VerifyDecision::Fetch { epoch } => epoch,
        VerifyDecision::Skip => panic!("expected re-verification"),
    };

    // Failure B arms a fresh timer; only B's navigation ever fires.
    let commands = machine.finish_verify(epoch, Err(unauthorized()));
    assert_eq!(commands, vec![Command::ScheduleRedirect { delay_ms: REDIRECT_DELAY_MS }]);
    assert_eq!(
        machine.redirect_due(),
        vec![Command::Navigate { target: SESSION_EXPIRED_ROUTE.to_owned() }]
    );
}

// =============================================================
// Staleness: in-flight results after navigating away
// =============================================================

#[test]
fn stale_success_is_not_applied_after_leaving_for_a_public_route() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.route_changed("/login");

    let commands = machine.finish_verify(epoch, Ok(alice_body()));
    assert!(commands.is_empty());
    assert!(machine.state().user.is_none(), "stale result must not authenticate");
}

#[test]
fn returning_to_protected_after_public_restarts_verification() {
    let mut machine = SessionMachine::new();
    let stale_epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.route_changed("/login");
    let fresh_epoch = start_protected_verify(&mut machine, "/dashboard");
    assert_ne!(stale_epoch, fresh_epoch);

    // Old result lands after the new fetch started: ignored.
    machine.finish_verify(stale_epoch, Err(unauthorized()));
    assert!(machine.state().loading, "fresh verification still in flight");

    machine.finish_verify(fresh_epoch, Ok(alice_body()));
    assert!(machine.state().is_authenticated());
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_success_navigates_to_the_dashboard() {
    let mut machine = SessionMachine::new();
    machine.route_changed("/login");
    machine.begin_login();
    assert!(machine.state().loading);

    let (commands, result) = machine.finish_login(Ok(alice_body()));
    assert_eq!(result, Ok(()));
    assert_eq!(commands, vec![Command::Navigate { target: DASHBOARD_ROUTE.to_owned() }]);
    let state = machine.state();
    assert!(state.is_authenticated());
    assert!(!state.loading);
}

#[test]
fn login_rejection_reraises_a_credentials_message() {
    let mut machine = SessionMachine::new();
    machine.route_changed("/login");
    machine.begin_login();

    let (commands, result) = machine.finish_login(Err(unauthorized()));
    assert!(commands.is_empty());
    assert_eq!(result, Err(MSG_BAD_CREDENTIALS.to_owned()));
    let state = machine.state();
    assert!(state.user.is_none());
    assert_eq!(state.error.as_deref(), Some(MSG_BAD_CREDENTIALS));
    assert!(!state.loading);
}

#[test]
fn login_without_identity_in_response_fails() {
    let mut machine = SessionMachine::new();
    machine.begin_login();
    let (_, result) = machine.finish_login(Ok(json!({"token": "opaque"})));
    assert_eq!(result, Err(MSG_LOGIN_NO_IDENTITY.to_owned()));
    assert!(machine.state().user.is_none());
}

#[test]
fn login_clears_a_prior_error_and_redirect_flag() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.finish_verify(epoch, Err(unauthorized()));
    assert!(machine.state().error.is_some());

    machine.begin_login();
    assert!(machine.state().error.is_none());
    // The cleared flag means a later failure may schedule a redirect again.
    let (_, result) = machine.finish_login(Err(unauthorized()));
    assert!(result.is_err());
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_tears_down_locally_whatever_the_server_says() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.finish_verify(epoch, Ok(alice_body()));

    let commands = machine.begin_logout().expect("logout proceeds");
    assert!(commands.is_empty());
    assert!(machine.state().loading);

    // The driver calls sign-out here; even if that fails, teardown runs.
    let commands = machine.finish_logout();
    assert_eq!(commands, vec![Command::Navigate { target: LOGIN_ROUTE.to_owned() }]);
    let state = machine.state();
    assert!(state.user.is_none());
    assert!(state.check_complete);
    assert!(!state.loading);
}

#[test]
fn concurrent_logout_requests_collapse() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.finish_verify(epoch, Ok(alice_body()));

    assert!(machine.begin_logout().is_some());
    assert!(machine.begin_logout().is_none(), "second logout is dropped");
}

#[test]
fn logout_while_failure_redirect_pending_is_dropped() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.finish_verify(epoch, Err(unauthorized()));

    assert!(machine.begin_logout().is_none());
    machine.redirect_due();
    let commands = machine.begin_logout().expect("logout proceeds after the redirect fired");
    assert!(commands.is_empty());
}

#[test]
fn logout_cancels_a_live_redirect_timer() {
    let mut machine = SessionMachine::new();
    let epoch = start_protected_verify(&mut machine, "/dashboard");
    machine.finish_verify(epoch, Err(unauthorized()));

    // A login attempt clears the pending flag but leaves the timer armed;
    // the logout that follows must cancel it.
    machine.begin_login();
    let commands = machine.begin_logout().expect("logout proceeds");
    assert_eq!(commands, vec![Command::CancelRedirect]);
}

// =============================================================
// Registration
// =============================================================

#[test]
fn register_success_routes_to_login_with_marker() {
    let mut machine = SessionMachine::new();
    machine.route_changed("/register");
    machine.begin_register();
    let (commands, result) = machine.finish_register(Ok(()));
    assert_eq!(result, Ok(()));
    assert_eq!(commands, vec![Command::Navigate { target: REGISTERED_ROUTE.to_owned() }]);
    assert!(!machine.state().is_authenticated(), "registration never authenticates");
}

#[test]
fn register_failure_surfaces_and_reraises() {
    let mut machine = SessionMachine::new();
    machine.begin_register();
    let err = ApiError::Status { status: 409, message: "username taken".to_owned() };
    let (commands, result) = machine.finish_register(Err(err));
    assert!(commands.is_empty());
    let message = result.expect_err("re-raised");
    assert!(message.contains("username taken"));
    assert_eq!(machine.state().error.as_deref(), Some(message.as_str()));
    assert!(!machine.state().loading);
}

// =============================================================
// Error message mapping
// =============================================================

#[test]
fn login_error_message_maps_by_class() {
    assert_eq!(login_error_message(&unauthorized()), MSG_BAD_CREDENTIALS);
    assert_eq!(login_error_message(&network_down()), MSG_CONNECTION);
    let other = ApiError::Status { status: 423, message: "account locked".to_owned() };
    assert_eq!(login_error_message(&other), "account locked (status 423)");
}

#[test]
fn clear_error_resets_the_banner() {
    let mut machine = SessionMachine::new();
    machine.boot_markers("?session_expired=true");
    machine.clear_error();
    assert!(machine.state().error.is_none());
}
