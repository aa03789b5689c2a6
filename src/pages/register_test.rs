use super::*;

#[test]
fn valid_form_builds_the_signup_payload() {
    let account =
        validate_registration(" bob ", " bob@example.com ", "secret1", "secret1").expect("valid");
    assert_eq!(account.username, "bob");
    assert_eq!(account.email, "bob@example.com");
    assert_eq!(account.roles, vec![DEFAULT_ROLE.to_owned()]);
}

#[test]
fn missing_fields_are_rejected_in_order() {
    assert!(validate_registration("", "b@e.com", "secret1", "secret1")
        .expect_err("username")
        .contains("username"));
    assert!(validate_registration("bob", "", "secret1", "secret1")
        .expect_err("email")
        .contains("email"));
    assert!(validate_registration("bob", "b@e.com", "", "")
        .expect_err("password")
        .contains("password"));
}

#[test]
fn implausible_email_is_rejected() {
    assert!(validate_registration("bob", "not-an-email", "secret1", "secret1").is_err());
}

#[test]
fn short_password_is_rejected() {
    let err = validate_registration("bob", "b@e.com", "abc", "abc").expect_err("short");
    assert!(err.contains(&MIN_PASSWORD_LEN.to_string()));
}

#[test]
fn mismatched_confirmation_is_rejected() {
    let err =
        validate_registration("bob", "b@e.com", "secret1", "secret2").expect_err("mismatch");
    assert!(err.contains("match"));
}
