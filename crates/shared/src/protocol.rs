//! Wire payloads for the admin REST API.
//!
//! Field names follow the backend's JSON casing exactly; keep the serde
//! renames in sync with the endpoint table in the backend repo.

use serde::{Deserialize, Serialize};

use crate::domain::{ChallengeId, ChallengeStatus, OrderId, PostId, ProductId};

/// Body for `POST /api/admin/challenges/create`.
///
/// `points` carries the form's text value through an unchecked numeric
/// parse, so a non-numeric entry serializes as `null` rather than being
/// rejected client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChallengeRequest {
    #[serde(rename = "challengeName")]
    pub challenge_name: String,
    pub points: Option<i64>,
    pub description: String,
    #[serde(rename = "photoUrl")]
    pub photo_url: String,
}

/// Response of `GET /api/challenges/{id}`.
///
/// Every field is optional: older records omit `description`/`addedBy`, and
/// some deployments answer with `challengeName` instead of `name`. The form
/// layer substitutes empty strings for anything missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDetail {
    #[serde(default, rename = "photoUrl")]
    pub photo_url: Option<String>,
    #[serde(default, alias = "challengeName")]
    pub name: Option<String>,
    #[serde(default)]
    pub points: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "addedBy")]
    pub added_by: Option<String>,
}

/// Body for `PUT /api/admin/challenges/approve/{id}`: the full editable
/// record exactly as the form holds it, all fields as strings (`points`
/// included — only the create path converts it to an integer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveChallengeRequest {
    #[serde(rename = "photoUrl")]
    pub photo_url: String,
    pub name: String,
    pub points: String,
    pub description: String,
    #[serde(rename = "addedBy")]
    pub added_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeSummary {
    pub challenge_id: ChallengeId,
    pub name: String,
    pub points: i64,
    pub status: ChallengeStatus,
    pub added_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub post_id: PostId,
    pub post_ref: String,
    pub content: String,
    pub username: String,
    pub likes: u32,
    pub publish_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub name: String,
    pub points_price: i64,
    pub stock: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub product: String,
    pub username: String,
    pub status: String,
    pub placed_at: String,
}
