use super::*;

#[test]
fn query_includes_search_and_paging() {
    let f = RosterFilters {
        search: Some("garcia".to_owned()),
        page: Some(2),
        per_page: Some(50),
        ..RosterFilters::default()
    };
    assert_eq!(f.query(), "?search=garcia&page=2&per_page=50");
}

#[test]
fn query_emits_direction_only_with_order_column() {
    let unordered = RosterFilters { order_dir: OrderDir::Desc, ..RosterFilters::default() };
    assert_eq!(unordered.query(), "");

    let ordered = RosterFilters {
        order_by: Some("total_sales".to_owned()),
        order_dir: OrderDir::Desc,
        ..RosterFilters::default()
    };
    assert_eq!(ordered.query(), "?order_by=total_sales&order_dir=DESC");
}

#[test]
fn order_dir_default_is_ascending() {
    assert_eq!(OrderDir::default().as_str(), "ASC");
}

#[test]
fn roster_page_tolerates_missing_blocks() {
    let page: RosterPage = serde_json::from_value(serde_json::json!({
        "success": true,
        "data": []
    }))
    .expect("roster page");
    assert!(page.success);
    assert!(page.data.is_empty());
    assert!(page.pagination.is_none());
    assert!(page.metrics_date.is_none());
}
