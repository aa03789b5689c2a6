//! Driver that connects the session machine to the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! `state::session::SessionMachine` makes every decision; this module owns
//! the IO around it: the current-session/sign-in/sign-out/sign-up calls,
//! the single redirect timer slot, history-replacing navigation, and the
//! `RwSignal<SessionState>` mirror the components read. All of it requires
//! a browser environment, so the whole surface is gated on `hydrate`.
//!
//! The machine sits in an `Rc<RefCell<..>>` with short, non-reentrant
//! borrows: every transition releases the borrow before its commands run.

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use gloo_timers::callback::Timeout;
#[cfg(feature = "hydrate")]
use leptos::prelude::{RwSignal, Set};

#[cfg(feature = "hydrate")]
use crate::net::api;
#[cfg(feature = "hydrate")]
use crate::net::types::{Credentials, NewAccount};
#[cfg(feature = "hydrate")]
use crate::state::session::{Command, SessionMachine, SessionState, VerifyDecision};

/// Cloneable handle to the session controller, provided via context.
#[cfg(feature = "hydrate")]
#[derive(Clone)]
pub struct SessionHandle {
    machine: Rc<RefCell<SessionMachine>>,
    state: RwSignal<SessionState>,
    /// Single timer slot: replacing or dropping a `Timeout` cancels it.
    timer: Rc<RefCell<Option<Timeout>>>,
    /// History-replacing navigation, captured from the router.
    navigate: Rc<dyn Fn(String)>,
}

#[cfg(feature = "hydrate")]
impl SessionHandle {
    pub fn new(state: RwSignal<SessionState>, navigate: Rc<dyn Fn(String)>) -> Self {
        Self {
            machine: Rc::new(RefCell::new(SessionMachine::new())),
            state,
            timer: Rc::new(RefCell::new(None)),
            navigate,
        }
    }

    /// Push the machine's snapshot into the reactive mirror.
    fn sync(&self) {
        let snapshot = self.machine.borrow().state().clone();
        self.state.set(snapshot);
    }

    fn run(&self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::CancelRedirect => {
                    self.timer.borrow_mut().take();
                }
                Command::ScheduleRedirect { delay_ms } => {
                    let this = self.clone();
                    let timeout = Timeout::new(delay_ms, move || this.redirect_due());
                    *self.timer.borrow_mut() = Some(timeout);
                }
                Command::Navigate { target } => {
                    log::info!("session: navigating to {target}");
                    (self.navigate)(target);
                }
            }
        }
    }

    fn redirect_due(&self) {
        let commands = self.machine.borrow_mut().redirect_due();
        self.sync();
        self.run(commands);
    }

    /// Seed the error banner from URL markers once, on boot.
    pub fn boot_markers(&self, query: &str) {
        self.machine.borrow_mut().boot_markers(query);
        self.sync();
    }

    /// Route-change entry point; spawns the current-session call when the
    /// machine asks for one.
    pub fn route_changed(&self, path: &str) {
        let (commands, decision) = self.machine.borrow_mut().route_changed(path);
        self.sync();
        self.run(commands);

        if let VerifyDecision::Fetch { epoch } = decision {
            log::info!("session: verifying on {path}");
            let this = self.clone();
            leptos::task::spawn_local(async move {
                let outcome = api::fetch_current_user().await;
                if let Err(err) = &outcome {
                    log::warn!("session: current-user call failed: {err}");
                }
                let commands = this.machine.borrow_mut().finish_verify(epoch, outcome);
                this.sync();
                this.run(commands);
                this.warn_on_default_credentials();
            });
        }
    }

    /// Exchange credentials for a session. The error is re-raised so the
    /// login form can keep its own submit state.
    ///
    /// # Errors
    ///
    /// Returns the display message recorded in the shared state.
    pub async fn login(&self, credentials: Credentials) -> Result<(), String> {
        let commands = self.machine.borrow_mut().begin_login();
        self.sync();
        self.run(commands);

        let outcome = api::sign_in(&credentials).await;
        let (commands, result) = self.machine.borrow_mut().finish_login(outcome);
        self.sync();
        self.run(commands);
        if let Err(message) = &result {
            log::warn!("session: sign-in failed: {message}");
        } else {
            self.warn_on_default_credentials();
        }
        result
    }

    /// Sign out. Server failure is logged and never blocks local teardown.
    pub fn logout(&self) {
        let Some(commands) = self.machine.borrow_mut().begin_logout() else {
            log::info!("session: logout already in progress");
            return;
        };
        self.sync();
        self.run(commands);

        let this = self.clone();
        leptos::task::spawn_local(async move {
            if let Err(err) = api::sign_out().await {
                log::warn!("session: sign-out call failed, clearing local session anyway: {err}");
            }
            let commands = this.machine.borrow_mut().finish_logout();
            this.sync();
            this.run(commands);
        });
    }

    /// Create an account; does not authenticate it.
    ///
    /// # Errors
    ///
    /// Returns the display message recorded in the shared state.
    pub async fn register(&self, account: NewAccount) -> Result<(), String> {
        let commands = self.machine.borrow_mut().begin_register();
        self.sync();
        self.run(commands);

        let outcome = api::sign_up(&account).await;
        let (commands, result) = self.machine.borrow_mut().finish_register(outcome);
        self.sync();
        self.run(commands);
        result
    }

    pub fn clear_error(&self) {
        self.machine.borrow_mut().clear_error();
        self.sync();
    }

    fn warn_on_default_credentials(&self) {
        let machine = self.machine.borrow();
        if let Some(user) = &machine.state().user {
            if user.uses_default_credentials() {
                log::warn!(
                    "session: account '{}' uses default credentials; rotate its password",
                    user.username
                );
            }
        }
    }
}
