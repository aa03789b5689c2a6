use super::*;

fn summary(zone: &str, supervisor: &str, active: u32, with_sales: u32, orders: u32) -> SaleSummary {
    SaleSummary {
        zone: zone.to_owned(),
        supervisor: supervisor.to_owned(),
        sellers_with_sales: with_sales,
        distinct_orders: orders,
        active_sellers: active,
    }
}

fn fb(supervisor: &str, quota: f64, coverage: Option<f64>) -> FeedbackRecord {
    FeedbackRecord {
        id: 1,
        supervisor: supervisor.to_owned(),
        report_date: "2025-03-01".to_owned(),
        zone: None,
        headcount: None,
        sellers_with_sales: None,
        distinct_orders: None,
        headcount_sale_pct: None,
        quota_coverage_pct: coverage,
        daily_quota: quota,
        supervisor_comments: Some("note".to_owned()),
        manager_comments: None,
    }
}

#[test]
fn join_matches_feedback_by_supervisor() {
    let rows = report_rows(
        &[summary("North", "Diaz", 10, 6, 12), summary("South", "Paredes", 8, 2, 3)],
        &[fb("Diaz", 20.0, Some(60.0))],
    );
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].daily_quota, Some(20.0));
    assert_eq!(rows[0].quota_coverage_pct, Some(60.0));
    assert_eq!(rows[0].supervisor_comments.as_deref(), Some("note"));
    assert_eq!(rows[1].daily_quota, None, "no feedback leaves quota columns empty");
}

#[test]
fn coverage_falls_back_to_local_computation() {
    let rows = report_rows(&[summary("North", "Diaz", 10, 6, 15)], &[fb("Diaz", 20.0, None)]);
    let coverage = rows[0].quota_coverage_pct.expect("computed coverage");
    assert!((coverage - 75.0).abs() < 1e-9);
}

#[test]
fn coverage_is_skipped_for_zero_quota() {
    let rows = report_rows(&[summary("North", "Diaz", 10, 6, 15)], &[fb("Diaz", 0.0, None)]);
    assert_eq!(rows[0].quota_coverage_pct, None);
}

#[test]
fn headcount_pct_handles_empty_rosters() {
    let rows = report_rows(&[summary("North", "Diaz", 0, 0, 0)], &[]);
    assert!((rows[0].headcount_sale_pct - 0.0).abs() < f64::EPSILON);
}

#[test]
fn csv_keeps_the_management_column_order() {
    let rows = report_rows(&[summary("North", "Diaz", 10, 6, 12)], &[fb("Diaz", 20.0, Some(60.0))]);
    let doc = report_csv(&rows);
    let header = doc.lines().next().expect("header");
    assert_eq!(
        header,
        "Zone,Supervisor,Active Sellers,Sellers With Sales,Distinct Orders,Daily Quota,\
         % Coverage,% Headcount With Sale,Supervisor Comments,Manager Comments"
    );
    assert!(doc.lines().nth(1).expect("row").starts_with("North,Diaz,10,6,12,20,60.0,60.0,note,"));
}
