//! Session state machine for cookie-backed authentication.
//!
//! DESIGN
//! ======
//! All session decisions live in [`SessionMachine`], a synchronous state
//! machine with no IO of its own. Callers feed it events (route changes,
//! network outcomes, timer expiry) and it returns [`Command`]s for the
//! driver in `net::session_client` to execute: cancel the redirect timer,
//! schedule a new one, or perform a history-replacing navigation. Keeping
//! the machine free of IO makes every race the original UI suffered from
//! (overlapping verifications, redirect storms, stale in-flight results)
//! reproducible in plain synchronous tests.
//!
//! The machine is single-writer: exactly one driver owns it and mirrors
//! [`SessionState`] snapshots into a reactive signal for the UI to read.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::error::ApiError;
use crate::net::types::{User, decode_identity};
use serde_json::Value;

/// Delay between an authentication failure and the redirect to sign-in,
/// long enough to read the banner before the page changes.
pub const REDIRECT_DELAY_MS: u32 = 800;

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &["/", "/login", "/register"];

pub const LOGIN_ROUTE: &str = "/login";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
/// Login route annotated so the login screen explains the expiry.
pub const SESSION_EXPIRED_ROUTE: &str = "/login?session_expired=true";
/// Login route annotated after a successful registration.
pub const REGISTERED_ROUTE: &str = "/login?registered=true";

pub const MSG_SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
pub const MSG_SESSION_INVALID: &str = "Your session could not be verified. Please sign in again.";
pub const MSG_CONNECTION: &str = "Connection error. Check your network and try again.";
pub const MSG_SECURITY_LOGOUT: &str =
    "You were signed out for security reasons. Change your password if you still use default credentials.";
pub const MSG_BAD_CREDENTIALS: &str = "Incorrect credentials. Check your username and password.";
pub const MSG_LOGIN_NO_IDENTITY: &str = "The sign-in response did not include a usable account.";
pub const MSG_REGISTERED: &str = "Registration successful. Please sign in with your new credentials.";

/// Whether `path` is reachable without authentication.
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path)
}

/// True when `query` (with or without a leading `?`) carries `name=true`.
pub fn query_flag(query: &str, name: &str) -> bool {
    query.trim_start_matches('?').split('&').any(|pair| {
        let mut parts = pair.splitn(2, '=');
        parts.next() == Some(name) && parts.next() == Some("true")
    })
}

/// Banner message for the URL markers the machine reads on boot.
/// (`registered=true` is handled by the login page, not the machine.)
pub fn boot_marker_message(query: &str) -> Option<&'static str> {
    if query_flag(query, "security_logout") {
        Some(MSG_SECURITY_LOGOUT)
    } else if query_flag(query, "session_expired") {
        Some(MSG_SESSION_EXPIRED)
    } else {
        None
    }
}

/// Reactive snapshot of the session, mirrored into the UI signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    /// True while a verification or mutating auth operation is in flight.
    pub loading: bool,
    /// True once the current verification cycle has resolved either way.
    /// `user` must not be trusted until this is set.
    pub check_complete: bool,
    /// Last human-readable failure, cleared explicitly or by the next
    /// successful operation.
    pub error: Option<String>,
}

impl Default for SessionState {
    /// Starts in the loading state so route guards render a spinner until
    /// the first verification resolves.
    fn default() -> Self {
        Self { user: None, loading: true, check_complete: false, error: None }
    }
}

impl SessionState {
    /// True only in the safe-to-read state: verified identity present and
    /// the verification cycle finished.
    pub fn is_authenticated(&self) -> bool {
        self.check_complete && self.user.as_ref().is_some_and(|u| !u.id.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

/// Effect requested by a machine transition, executed by the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Drop the pending redirect timer, if any.
    CancelRedirect,
    /// Arm the single redirect timer slot. Always preceded by
    /// [`Command::CancelRedirect`] when a timer was live.
    ScheduleRedirect { delay_ms: u32 },
    /// History-replacing navigation.
    Navigate { target: String },
}

/// Outcome of [`SessionMachine::route_changed`]: whether the driver must
/// call the current-session endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyDecision {
    /// Call the endpoint and report back via `finish_verify` with this
    /// epoch token.
    Fetch { epoch: u64 },
    /// Nothing to do: public route, cached known-good session, or a
    /// verification already in flight.
    Skip,
}

/// The session controller's decision core.
///
/// States: unverified, verifying, then authenticated or unauthenticated;
/// the flags in [`SessionState`] encode them. The extra fields below are
/// the guards that keep overlapping callbacks from racing each other.
#[derive(Debug)]
pub struct SessionMachine {
    state: SessionState,
    /// Epoch of the in-flight verification, if one is running. Doubles as
    /// the re-entrancy flag: a second trigger while the current epoch is in
    /// flight is dropped, not queued.
    verifying: Option<u64>,
    /// Single-slot guard against overlapping redirects and logouts.
    redirect_pending: bool,
    /// Mirrors whether the driver holds a live timer, so transitions know
    /// to emit [`Command::CancelRedirect`] before re-arming.
    timer_live: bool,
    /// Bumped whenever in-flight results must be invalidated. A finished
    /// verification whose epoch no longer matches is discarded.
    epoch: u64,
    /// Current route path; decides public/protected behaviour.
    route: String,
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMachine {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            verifying: None,
            redirect_pending: false,
            timer_live: false,
            epoch: 0,
            route: "/".to_owned(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    /// Seed the error banner from URL markers on application boot.
    pub fn boot_markers(&mut self, query: &str) {
        if let Some(message) = boot_marker_message(query) {
            self.state.error = Some(message.to_owned());
            self.state.user = None;
        }
    }

    /// Route-change event; the per-navigation verification entry point.
    ///
    /// A trigger that arrives while the current verification is still in
    /// flight is dropped (re-entrancy collapse) before anything else, so a
    /// double navigation makes exactly one network call.
    pub fn route_changed(&mut self, path: &str) -> (Vec<Command>, VerifyDecision) {
        if self.verifying == Some(self.epoch) && path == self.route {
            return (Vec::new(), VerifyDecision::Skip);
        }

        self.route = path.to_owned();
        self.redirect_pending = false;
        let mut commands = Vec::new();
        if self.timer_live {
            self.timer_live = false;
            commands.push(Command::CancelRedirect);
        }

        if is_public_route(path) {
            // Invalidate any in-flight verification: its result belongs to
            // a navigation the user has left.
            self.epoch += 1;
            self.state.loading = false;
            self.state.check_complete = true;
            self.state.error = None;
            return (commands, VerifyDecision::Skip);
        }

        // Known-good session: repeated navigation between protected pages
        // reuses the cached identity.
        if self.state.check_complete
            && self.state.user.as_ref().is_some_and(|u| !u.id.is_empty())
        {
            self.state.loading = false;
            return (commands, VerifyDecision::Skip);
        }

        // A still-valid verification is already in flight for this session;
        // its result will cover the new protected route too.
        if self.verifying == Some(self.epoch) {
            return (commands, VerifyDecision::Skip);
        }

        self.epoch += 1;
        self.verifying = Some(self.epoch);
        self.state.loading = true;
        self.state.check_complete = false;
        self.state.error = None;
        (commands, VerifyDecision::Fetch { epoch: self.epoch })
    }

    /// Apply the outcome of a current-session call started by
    /// [`Self::route_changed`].
    ///
    /// Every non-stale path ends with `loading = false` and
    /// `check_complete = true`; the re-entrancy slot is always released.
    pub fn finish_verify(
        &mut self,
        epoch: u64,
        outcome: Result<Value, ApiError>,
    ) -> Vec<Command> {
        if self.verifying == Some(epoch) {
            self.verifying = None;
        }
        if epoch != self.epoch {
            // Stale: the user navigated away while this call was in flight.
            return Vec::new();
        }

        let mut commands = Vec::new();
        match outcome {
            Ok(body) => match decode_identity(&body) {
                Ok(user) => {
                    self.state.user = Some(user);
                    self.state.error = None;
                }
                Err(_) => {
                    self.auth_failure(MSG_SESSION_INVALID, true, &mut commands);
                }
            },
            Err(err) if err.is_unauthorized() => {
                self.auth_failure(MSG_SESSION_EXPIRED, true, &mut commands);
            }
            Err(_) => {
                // Connection trouble is retryable: surface it, keep the
                // session untouched, never redirect.
                self.state.error = Some(MSG_CONNECTION.to_owned());
            }
        }
        self.state.loading = false;
        self.state.check_complete = true;
        commands
    }

    /// Shared teardown for expired/invalid sessions.
    ///
    /// Idempotent while a redirect is pending, so overlapping failures
    /// schedule at most one timer and one navigation.
    fn auth_failure(&mut self, message: &str, should_redirect: bool, commands: &mut Vec<Command>) {
        if self.redirect_pending {
            return;
        }
        self.state.user = None;
        let protected = !is_public_route(&self.route);
        if protected {
            self.state.error = Some(message.to_owned());
        }
        if should_redirect && protected {
            self.redirect_pending = true;
            if self.timer_live {
                commands.push(Command::CancelRedirect);
            }
            self.timer_live = true;
            commands.push(Command::ScheduleRedirect { delay_ms: REDIRECT_DELAY_MS });
        }
    }

    /// The armed redirect timer expired.
    pub fn redirect_due(&mut self) -> Vec<Command> {
        self.timer_live = false;
        self.redirect_pending = false;
        vec![Command::Navigate { target: SESSION_EXPIRED_ROUTE.to_owned() }]
    }

    pub fn begin_login(&mut self) -> Vec<Command> {
        self.state.loading = true;
        self.state.error = None;
        self.redirect_pending = false;
        Vec::new()
    }

    /// Apply a sign-in outcome. The `Result` half goes back to the calling
    /// form so it can manage its own submit state; the shared error is
    /// recorded here either way.
    pub fn finish_login(
        &mut self,
        outcome: Result<Value, ApiError>,
    ) -> (Vec<Command>, Result<(), String>) {
        let mut commands = Vec::new();
        let result = match outcome {
            Ok(body) => match decode_identity(&body) {
                Ok(user) => {
                    self.state.user = Some(user);
                    self.state.check_complete = true;
                    self.state.error = None;
                    commands.push(Command::Navigate { target: DASHBOARD_ROUTE.to_owned() });
                    Ok(())
                }
                Err(_) => {
                    self.state.user = None;
                    self.state.error = Some(MSG_LOGIN_NO_IDENTITY.to_owned());
                    Err(MSG_LOGIN_NO_IDENTITY.to_owned())
                }
            },
            Err(err) => {
                let message = login_error_message(&err);
                self.state.user = None;
                self.state.error = Some(message.clone());
                Err(message)
            }
        };
        self.state.loading = false;
        (commands, result)
    }

    /// Start a logout. Returns `None` when one (or a failure redirect) is
    /// already in progress; the caller drops the request.
    pub fn begin_logout(&mut self) -> Option<Vec<Command>> {
        if self.redirect_pending {
            return None;
        }
        self.redirect_pending = true;
        self.state.loading = true;
        self.state.error = None;
        let mut commands = Vec::new();
        if self.timer_live {
            self.timer_live = false;
            commands.push(Command::CancelRedirect);
        }
        Some(commands)
    }

    /// Local teardown after the sign-out call, successful or not. The
    /// server-side failure mode is the driver's to log; local state is
    /// always cleared so the user is never stuck looking signed-in.
    pub fn finish_logout(&mut self) -> Vec<Command> {
        self.state.user = None;
        self.state.check_complete = true;
        self.state.loading = false;
        self.redirect_pending = false;
        vec![Command::Navigate { target: LOGIN_ROUTE.to_owned() }]
    }

    pub fn begin_register(&mut self) -> Vec<Command> {
        self.state.loading = true;
        self.state.error = None;
        Vec::new()
    }

    /// Apply a sign-up outcome. Success routes to the login screen with the
    /// `registered` marker; the new account is not authenticated.
    pub fn finish_register(
        &mut self,
        outcome: Result<(), ApiError>,
    ) -> (Vec<Command>, Result<(), String>) {
        let mut commands = Vec::new();
        let result = match outcome {
            Ok(()) => {
                commands.push(Command::Navigate { target: REGISTERED_ROUTE.to_owned() });
                Ok(())
            }
            Err(err) => {
                let message = register_error_message(&err);
                self.state.error = Some(message.clone());
                Err(message)
            }
        };
        self.state.loading = false;
        (commands, result)
    }
}

/// Display message for a failed sign-in.
pub fn login_error_message(err: &ApiError) -> String {
    if err.is_unauthorized() {
        MSG_BAD_CREDENTIALS.to_owned()
    } else if matches!(err, ApiError::Network(_)) {
        MSG_CONNECTION.to_owned()
    } else {
        err.to_string()
    }
}

/// Display message for a failed sign-up.
pub fn register_error_message(err: &ApiError) -> String {
    if matches!(err, ApiError::Network(_)) {
        MSG_CONNECTION.to_owned()
    } else {
        err.to_string()
    }
}
