//! Wire DTOs for the reporting backend.
//!
//! DESIGN
//! ======
//! Responses cross the API boundary as structured decodes, never as ad-hoc
//! shape probing inside page logic. The identity payload in particular is
//! decoded once, defensively, by [`decode_identity`]; everything downstream
//! works with the normalized [`User`] record.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account names shipped with the backend seed data. A sign-in with one of
/// these gets a warning in the console so operators rotate them.
pub const DEFAULT_ACCOUNT_NAMES: &[&str] = &["admin", "admin_test"];

/// The normalized identity record for the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier, normalized to a string (the backend sends either
    /// a number or a string depending on the endpoint).
    pub id: String,
    pub username: String,
    /// Empty when the backend omits it.
    pub email: String,
    /// Empty when the backend omits it or sends a non-list value.
    pub roles: Vec<String>,
    /// Falls back to `username` when absent.
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl User {
    /// Whether this account may see administrator-only screens.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == "ROLE_ADMIN" || r == "admin") || self.username == "admin"
    }

    /// Whether the account is one of the well-known seed accounts.
    pub fn uses_default_credentials(&self) -> bool {
        DEFAULT_ACCOUNT_NAMES.contains(&self.username.as_str())
    }
}

/// Failure to extract an identity from an otherwise successful response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("response carried no identity payload")]
    Missing,
    #[error("identity payload has no usable `{0}`")]
    MissingField(&'static str),
}

/// Decode an identity record from a sign-in or current-session response.
///
/// The backend is inconsistent about nesting: the record may sit under
/// `user`, under `data`, or be the top-level object. A usable identity needs
/// a non-empty `id` (number or string) and a non-empty `username`; all other
/// fields get defaults.
pub fn decode_identity(response: &Value) -> Result<User, IdentityError> {
    let raw = response
        .get("user")
        .filter(|v| v.is_object())
        .or_else(|| response.get("data").filter(|v| v.is_object()))
        .unwrap_or(response);
    if !raw.is_object() {
        return Err(IdentityError::Missing);
    }

    let id = match raw.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(IdentityError::MissingField("id")),
    };
    let username = raw
        .get("username")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(IdentityError::MissingField("username"))?
        .to_owned();
    let email = raw.get("email").and_then(Value::as_str).unwrap_or_default().to_owned();
    let roles = raw
        .get("roles")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).map(str::to_owned).collect())
        .unwrap_or_default();
    let display_name = raw
        .get("displayName")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(&username)
        .to_owned();

    Ok(User { id, username, email, roles, display_name })
}

/// Sign-in request body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Sign-up request body. Registration never authenticates the new account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

/// Standard `{success, data, ...}` envelope wrapping every report endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Offset-based pagination block used by the report endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub pages: u64,
}

/// One per-supervisor row of the daily sales summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSummary {
    pub zone: String,
    pub supervisor: String,
    /// Sellers on this supervisor's roster that closed at least one sale.
    pub sellers_with_sales: u32,
    /// Distinct orders attributed to the roster.
    pub distinct_orders: u32,
    /// Roster size counted as active for the report date.
    pub active_sellers: u32,
}

/// One sale line of the detailed report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDetail {
    pub zone: String,
    pub supervisor: String,
    /// Opaque seller identifier (hashed national ID).
    pub seller_id: String,
    pub seller_name: String,
    pub order_number: String,
    pub sale_id: String,
    /// Report date in `YYYY-MM-DD`.
    pub date: String,
    pub product: String,
    pub customer_name: String,
    pub sold_today: bool,
    pub scoring: String,
    /// `HH:MM:SS` capture time, when the backend has it.
    #[serde(default)]
    pub time: Option<String>,
}

/// A supervisor feedback record. Only [`FeedbackUpdate`] fields are
/// editable; everything else is computed server-side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: i64,
    pub supervisor: String,
    /// Day this record reports on, `YYYY-MM-DD`.
    pub report_date: String,
    #[serde(default)]
    pub zone: Option<String>,
    /// Scheduled headcount for the day.
    #[serde(default)]
    pub headcount: Option<u32>,
    #[serde(default)]
    pub sellers_with_sales: Option<u32>,
    #[serde(default)]
    pub distinct_orders: Option<u32>,
    /// Percentage of headcount with at least one sale.
    #[serde(default)]
    pub headcount_sale_pct: Option<f64>,
    /// Percentage of the daily quota covered.
    #[serde(default)]
    pub quota_coverage_pct: Option<f64>,
    pub daily_quota: f64,
    #[serde(default)]
    pub supervisor_comments: Option<String>,
    #[serde(default)]
    pub manager_comments: Option<String>,
}

/// Partial update of a feedback record. `None` fields are left untouched
/// server-side and are skipped on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FeedbackUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_quota: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_comments: Option<String>,
}

impl FeedbackUpdate {
    pub fn is_empty(&self) -> bool {
        self.daily_quota.is_none()
            && self.supervisor_comments.is_none()
            && self.manager_comments.is_none()
    }
}

/// One seller on the roster screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    /// Opaque seller identifier (hashed national ID).
    pub seller_id: String,
    pub name: String,
    /// Contract kind, e.g. `"salaried"` or `"commissioned"`.
    pub role: String,
    pub zone: String,
    pub supervisor: String,
    /// Tenure bucket label assigned by the backend.
    pub tenure_cluster: String,
    /// First day on the roster, `YYYY-MM-DD`.
    pub start_date: String,
    pub regular_sales: u32,
    pub flex_sales: u32,
    pub total_sales: u32,
    #[serde(default)]
    pub whatsapp_url: Option<String>,
}

/// Page-based pagination block used by the seller roster endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterPagination {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_records: u64,
    pub has_next: bool,
    pub has_prev: bool,
}
