//! Date helpers for report filters and table display.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

/// Shape check for `YYYY-MM-DD` strings, shared with filter validation.
/// Checks digits, separators, and month/day ranges; it does not chase
/// per-month day counts, the backend rejects those.
pub fn is_iso_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    if !raw
        .bytes()
        .enumerate()
        .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
    {
        return false;
    }
    let month: u8 = raw[5..7].parse().unwrap_or(0);
    let day: u8 = raw[8..10].parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// `YYYY-MM-DD` → `DD/MM/YYYY` for table cells; anything else passes
/// through untouched.
pub fn display_date(iso: &str) -> String {
    if is_iso_date(iso) {
        format!("{}/{}/{}", &iso[8..10], &iso[5..7], &iso[0..4])
    } else {
        iso.to_owned()
    }
}

/// Today's date as `YYYY-MM-DD`, from the browser clock.
pub fn today_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        let now = js_sys::Date::new_0();
        format!(
            "{:04}-{:02}-{:02}",
            now.get_full_year(),
            now.get_month() + 1,
            now.get_date()
        )
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}
