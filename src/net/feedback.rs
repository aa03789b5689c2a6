//! Supervisor feedback endpoints: daily records, the supervisor vocabulary,
//! and partial updates of the editable fields.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use super::error::ApiError;
#[cfg(feature = "hydrate")]
use super::reports::open_envelope;
use super::reports::{join_query, push_pair};
#[cfg(feature = "hydrate")]
use super::types::ApiEnvelope;
use super::types::{FeedbackRecord, FeedbackUpdate, Pagination};

pub const FEEDBACK_ENDPOINT: &str = "/api/feedback";
pub const FEEDBACK_SUPERVISORS_ENDPOINT: &str = "/api/feedback/supervisors";

/// Upper bound accepted for a daily quota; anything above is a typo.
pub const MAX_DAILY_QUOTA: f64 = 10_000.0;
/// Upper bound for comment length, mirroring the backend column width.
pub const MAX_COMMENT_LEN: usize = 1_000;

/// Filters for the feedback record listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedbackFilters {
    /// Report day, `YYYY-MM-DD`.
    pub date: Option<String>,
    pub supervisor: Option<String>,
    /// Column to order by, e.g. `"supervisor"` or `"quota_coverage_pct"`.
    pub order_by: Option<String>,
    pub order_desc: bool,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl FeedbackFilters {
    pub fn query(&self) -> String {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "date", self.date.as_deref());
        push_pair(&mut pairs, "supervisor", self.supervisor.as_deref());
        push_pair(&mut pairs, "order_by", self.order_by.as_deref());
        if self.order_desc {
            push_pair(&mut pairs, "order_desc", Some("true"));
        }
        let limit = self.limit.map(|v| v.to_string());
        let offset = self.offset.map(|v| v.to_string());
        push_pair(&mut pairs, "limit", limit.as_deref());
        push_pair(&mut pairs, "offset", offset.as_deref());
        join_query(&pairs)
    }
}

/// Validate an update payload before it leaves the client.
pub fn validate_update(update: &FeedbackUpdate) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if update.is_empty() {
        errors.push("Nothing to save: no editable field changed.".to_owned());
    }
    if let Some(quota) = update.daily_quota {
        if !(0.0..=MAX_DAILY_QUOTA).contains(&quota) {
            errors.push(format!("Daily quota must be between 0 and {MAX_DAILY_QUOTA}."));
        }
    }
    for (label, comment) in [
        ("Supervisor comments", update.supervisor_comments.as_deref()),
        ("Manager comments", update.manager_comments.as_deref()),
    ] {
        if comment.is_some_and(|c| c.chars().count() > MAX_COMMENT_LEN) {
            errors.push(format!("{label} must stay under {MAX_COMMENT_LEN} characters."));
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn record_endpoint(id: i64) -> String {
    format!("{FEEDBACK_ENDPOINT}/{id}")
}

/// Fetch feedback records for the given filters.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or a failed envelope.
pub async fn fetch_records(
    filters: &FeedbackFilters,
) -> Result<(Vec<FeedbackRecord>, Option<Pagination>), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{FEEDBACK_ENDPOINT}{}", filters.query());
        let env: ApiEnvelope<Vec<FeedbackRecord>> = super::api::get_json(&url).await?;
        open_envelope(env)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filters;
        Err(super::api::offline_error())
    }
}

/// Fetch the supervisors that have feedback for a day.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or a failed envelope.
pub async fn fetch_supervisors(date: Option<&str>) -> Result<Vec<String>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "date", date);
        let url = format!("{FEEDBACK_SUPERVISORS_ENDPOINT}{}", join_query(&pairs));
        let env: ApiEnvelope<Vec<String>> = super::api::get_json(&url).await?;
        let (mut names, _) = open_envelope(env)?;
        names.sort_unstable();
        Ok(names)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = date;
        Err(super::api::offline_error())
    }
}

/// Update the editable fields of one record. Validates client-side first.
///
/// # Errors
///
/// Returns [`ApiError::Service`] with the validation text when the payload
/// is rejected locally, otherwise the transport/envelope error.
pub async fn update_record(id: i64, update: &FeedbackUpdate) -> Result<FeedbackRecord, ApiError> {
    if let Err(errors) = validate_update(update) {
        return Err(ApiError::Service(errors.join(" ")));
    }
    #[cfg(feature = "hydrate")]
    {
        let url = record_endpoint(id);
        let env: ApiEnvelope<FeedbackRecord> = super::api::put_json(&url, update).await?;
        open_envelope(env).map(|(record, _)| record)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err(super::api::offline_error())
    }
}
