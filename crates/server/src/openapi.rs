use chrono::NaiveDate;
use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub timestamp: String, pub version: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// ID token issued by the identity provider
    pub firebase_token: String,
    /// customer | provider; only used on first login
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct ApprovalRequest {
    /// approved | rejected
    pub status: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub user_id: Uuid,
    pub provider_id: Uuid,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub ai_style_used: Option<bool>,
    pub ai_style_image: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse { pub total_users: u64, pub total_providers: u64, pub total_bookings: u64, pub pending_approvals: u64 }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::users::get,
        crate::routes::providers::get,
        crate::routes::providers::approve,
        crate::routes::bookings::create,
        crate::routes::admin::stats,
    ),
    components(schemas(HealthResponse, LoginRequest, ApprovalRequest, CreateBookingRequest, StatsResponse)),
    modifiers(&BearerAuth),
    tags(
        (name = "system"),
        (name = "auth"),
        (name = "users"),
        (name = "providers"),
        (name = "bookings"),
        (name = "admin"),
    )
)]
pub struct ApiDoc;
