use super::*;

fn record() -> FeedbackRecord {
    FeedbackRecord {
        id: 11,
        supervisor: "Diaz".to_owned(),
        report_date: "2025-03-01".to_owned(),
        zone: Some("North".to_owned()),
        headcount: Some(12),
        sellers_with_sales: Some(7),
        distinct_orders: Some(15),
        headcount_sale_pct: Some(58.3),
        quota_coverage_pct: Some(75.0),
        daily_quota: 20.0,
        supervisor_comments: Some("slow morning".to_owned()),
        manager_comments: None,
    }
}

#[test]
fn unchanged_values_produce_an_empty_update() {
    let update = build_update(&record(), "20", "slow morning", "").expect("update");
    assert!(update.is_empty());
}

#[test]
fn changed_quota_is_included() {
    let update = build_update(&record(), "25", "slow morning", "").expect("update");
    assert_eq!(update.daily_quota, Some(25.0));
    assert!(update.supervisor_comments.is_none());
}

#[test]
fn changed_comments_are_included() {
    let update = build_update(&record(), "20", "recovered by noon", "good catch-up")
        .expect("update");
    assert_eq!(update.supervisor_comments.as_deref(), Some("recovered by noon"));
    assert_eq!(update.manager_comments.as_deref(), Some("good catch-up"));
}

#[test]
fn clearing_a_comment_sends_an_empty_string() {
    let update = build_update(&record(), "20", "", "").expect("update");
    assert_eq!(update.supervisor_comments.as_deref(), Some(""));
}

#[test]
fn unparseable_quota_is_rejected() {
    let err = build_update(&record(), "twenty", "slow morning", "").expect_err("bad quota");
    assert!(err.contains("twenty"));
}

#[test]
fn blank_quota_field_means_no_quota_change() {
    let update = build_update(&record(), "  ", "slow morning", "").expect("update");
    assert!(update.daily_quota.is_none());
}
