use super::*;
use crate::state::session::{MSG_SECURITY_LOGOUT, MSG_SESSION_EXPIRED};

#[test]
fn validate_credentials_trims_the_username() {
    let creds = validate_credentials("  alice  ", "secret").expect("valid");
    assert_eq!(creds.username, "alice");
    assert_eq!(creds.password, "secret");
}

#[test]
fn validate_credentials_keeps_the_password_as_typed() {
    let creds = validate_credentials("alice", " spaced secret ").expect("valid");
    assert_eq!(creds.password, " spaced secret ");
}

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("", "secret"), Err(MSG_FIELDS_REQUIRED));
    assert_eq!(validate_credentials("alice", ""), Err(MSG_FIELDS_REQUIRED));
    assert_eq!(validate_credentials("   ", "secret"), Err(MSG_FIELDS_REQUIRED));
    assert_eq!(validate_credentials("alice", "   "), Err(MSG_FIELDS_REQUIRED));
}

#[test]
fn banner_message_covers_all_three_markers() {
    assert_eq!(banner_message("?registered=true"), Some(MSG_REGISTERED));
    assert_eq!(banner_message("?session_expired=true"), Some(MSG_SESSION_EXPIRED));
    assert_eq!(banner_message("?security_logout=true"), Some(MSG_SECURITY_LOGOUT));
    assert_eq!(banner_message(""), None);
}

#[test]
fn banner_message_prefers_the_registration_marker() {
    assert_eq!(
        banner_message("?registered=true&session_expired=true"),
        Some(MSG_REGISTERED)
    );
}
