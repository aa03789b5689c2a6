//! Sales report endpoints: per-supervisor summary, sale detail, and the
//! zone/supervisor filter vocabularies.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use super::error::ApiError;
#[cfg(any(test, feature = "hydrate"))]
use super::types::ApiEnvelope;
use super::types::{Pagination, SaleDetail, SaleSummary};
use crate::util::dates::is_iso_date;

pub const SUMMARY_ENDPOINT: &str = "/api/reports/summary";
pub const DETAILS_ENDPOINT: &str = "/api/reports/details";
pub const ZONES_ENDPOINT: &str = "/api/reports/zones";
pub const SUPERVISORS_ENDPOINT: &str = "/api/reports/supervisors";

/// Detail rows are served in chunks of at most this many records.
pub const MAX_DETAIL_LIMIT: u32 = 500;

/// Filters shared by the summary and detail endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportFilters {
    /// Report date, `YYYY-MM-DD`. Backend defaults to today when absent.
    pub date: Option<String>,
    pub zone: Option<String>,
    pub supervisor: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ReportFilters {
    /// Client-side validation run before any network call, so malformed
    /// filters surface immediately instead of as a backend rejection.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Some(date) = &self.date {
            if !is_iso_date(date) {
                errors.push("Date must use the YYYY-MM-DD format.".to_owned());
            }
        }
        if let Some(limit) = self.limit {
            if limit < 1 || limit > MAX_DETAIL_LIMIT {
                errors.push(format!("Limit must be between 1 and {MAX_DETAIL_LIMIT}."));
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Query string for the summary endpoint (no pagination).
    pub fn summary_query(&self) -> String {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "date", self.date.as_deref());
        push_pair(&mut pairs, "zone", self.zone.as_deref());
        push_pair(&mut pairs, "supervisor", self.supervisor.as_deref());
        join_query(&pairs)
    }

    /// Query string for the detail endpoint, pagination included.
    pub fn details_query(&self) -> String {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "date", self.date.as_deref());
        push_pair(&mut pairs, "zone", self.zone.as_deref());
        push_pair(&mut pairs, "supervisor", self.supervisor.as_deref());
        let limit = self.limit.map(|v| v.to_string());
        let offset = self.offset.map(|v| v.to_string());
        push_pair(&mut pairs, "limit", limit.as_deref());
        push_pair(&mut pairs, "offset", offset.as_deref());
        join_query(&pairs)
    }
}

pub(crate) fn push_pair(pairs: &mut Vec<String>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            pairs.push(format!("{name}={}", urlencode(value)));
        }
    }
}

pub(crate) fn join_query(pairs: &[String]) -> String {
    if pairs.is_empty() { String::new() } else { format!("?{}", pairs.join("&")) }
}

/// Minimal percent-encoding for query values: space and the reserved
/// delimiters that can actually appear in zone/supervisor names.
pub(crate) fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Unwrap a `{success, data}` envelope into its payload and pagination.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn open_envelope<T>(env: ApiEnvelope<T>) -> Result<(T, Option<Pagination>), ApiError> {
    if !env.success {
        let message = env
            .error
            .or(env.message)
            .unwrap_or_else(|| "request was rejected by the reporting service".to_owned());
        return Err(ApiError::Service(message));
    }
    let pagination = env.pagination;
    env.data
        .map(|data| (data, pagination))
        .ok_or_else(|| ApiError::Service("response envelope carried no data".to_owned()))
}

/// Fetch the per-supervisor sales summary.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or a failed envelope.
pub async fn fetch_summary(filters: &ReportFilters) -> Result<Vec<SaleSummary>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{SUMMARY_ENDPOINT}{}", filters.summary_query());
        let env: ApiEnvelope<Vec<SaleSummary>> = super::api::get_json(&url).await?;
        open_envelope(env).map(|(rows, _)| rows)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filters;
        Err(super::api::offline_error())
    }
}

/// Fetch a page of sale detail rows.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or a failed envelope.
pub async fn fetch_details(
    filters: &ReportFilters,
) -> Result<(Vec<SaleDetail>, Option<Pagination>), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{DETAILS_ENDPOINT}{}", filters.details_query());
        let env: ApiEnvelope<Vec<SaleDetail>> = super::api::get_json(&url).await?;
        open_envelope(env)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filters;
        Err(super::api::offline_error())
    }
}

/// Fetch the known zone names for the filter dropdowns.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or a failed envelope.
pub async fn fetch_zones() -> Result<Vec<String>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let env: ApiEnvelope<Vec<String>> = super::api::get_json(ZONES_ENDPOINT).await?;
        open_envelope(env).map(|(zones, _)| zones)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(super::api::offline_error())
    }
}

/// Fetch supervisor names, optionally narrowed to one zone.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or a failed envelope.
pub async fn fetch_supervisors(zone: Option<&str>) -> Result<Vec<String>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "zone", zone);
        let url = format!("{SUPERVISORS_ENDPOINT}{}", join_query(&pairs));
        let env: ApiEnvelope<Vec<String>> = super::api::get_json(&url).await?;
        open_envelope(env).map(|(names, _)| names)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = zone;
        Err(super::api::offline_error())
    }
}
