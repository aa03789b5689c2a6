//! Seller roster endpoint with search, ordering, and page-based pagination.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "sellers_test.rs"]
mod sellers_test;

use serde::Deserialize;

use super::error::ApiError;
use super::reports::{join_query, push_pair};
use super::types::{RosterPagination, Seller};

pub const SELLERS_ENDPOINT: &str = "/api/sellers";

/// Sort direction accepted by the roster endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderDir {
    #[default]
    Asc,
    Desc,
}

impl OrderDir {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filters for the roster listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterFilters {
    /// Metrics date, `YYYY-MM-DD`.
    pub date: Option<String>,
    pub zone: Option<String>,
    pub supervisor: Option<String>,
    /// Free-text match against seller name and identifier.
    pub search: Option<String>,
    pub order_by: Option<String>,
    pub order_dir: OrderDir,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl RosterFilters {
    pub fn query(&self) -> String {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "date", self.date.as_deref());
        push_pair(&mut pairs, "zone", self.zone.as_deref());
        push_pair(&mut pairs, "supervisor", self.supervisor.as_deref());
        push_pair(&mut pairs, "search", self.search.as_deref());
        push_pair(&mut pairs, "order_by", self.order_by.as_deref());
        if self.order_by.is_some() {
            push_pair(&mut pairs, "order_dir", Some(self.order_dir.as_str()));
        }
        let page = self.page.map(|v| v.to_string());
        let per_page = self.per_page.map(|v| v.to_string());
        push_pair(&mut pairs, "page", page.as_deref());
        push_pair(&mut pairs, "per_page", per_page.as_deref());
        join_query(&pairs)
    }
}

/// Roster response: the endpoint uses its own page-based envelope rather
/// than the shared report envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct RosterPage {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Seller>,
    #[serde(default)]
    pub pagination: Option<RosterPagination>,
    /// Metrics date the rows were computed for.
    #[serde(default)]
    pub metrics_date: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Fetch one page of the seller roster.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure or a failed response.
pub async fn fetch_roster(filters: &RosterFilters) -> Result<RosterPage, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{SELLERS_ENDPOINT}{}", filters.query());
        let page: RosterPage = super::api::get_json(&url).await?;
        if !page.success {
            let message = page
                .error
                .unwrap_or_else(|| "request was rejected by the roster service".to_owned());
            return Err(ApiError::Service(message));
        }
        Ok(page)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = filters;
        Err(super::api::offline_error())
    }
}
