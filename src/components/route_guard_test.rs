use super::*;
use crate::net::types::User;

fn verified(username: &str, roles: &[&str]) -> SessionState {
    SessionState {
        user: Some(User {
            id: "1".to_owned(),
            username: username.to_owned(),
            email: String::new(),
            roles: roles.iter().map(|r| (*r).to_owned()).collect(),
            display_name: username.to_owned(),
        }),
        loading: false,
        check_complete: true,
        error: None,
    }
}

#[test]
fn loading_until_check_completes() {
    let state = SessionState::default();
    assert_eq!(guard_view(&state, false), GuardView::Loading);
}

#[test]
fn denied_when_check_completed_without_a_user() {
    let state = SessionState { check_complete: true, loading: false, ..SessionState::default() };
    assert_eq!(guard_view(&state, false), GuardView::Denied);
}

#[test]
fn content_for_a_verified_user() {
    assert_eq!(guard_view(&verified("sales1", &["ROLE_USER"]), false), GuardView::Content);
}

#[test]
fn admin_gate_blocks_regular_users() {
    assert_eq!(
        guard_view(&verified("sales1", &["ROLE_USER"]), true),
        GuardView::AdminRequired
    );
    assert_eq!(guard_view(&verified("boss", &["ROLE_ADMIN"]), true), GuardView::Content);
}
