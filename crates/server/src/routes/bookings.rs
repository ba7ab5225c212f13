use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use models::booking::{self, BookingStatus};
use serde::Deserialize;
use serde_json::{json, Value};
use service::auth::SessionClaims;
use service::booking_service::{BookingFilter, CancelBookingInput, CreateBookingInput};
use service::errors::ServiceError;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: BookingStatus,
}

#[utoipa::path(post, path = "/api/bookings", tag = "bookings", security(("bearer" = [])), request_body = crate::openapi::CreateBookingRequest, responses((status = 201, description = "Booking created"), (status = 400, description = "Bad Request"), (status = 403, description = "Forbidden")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    AppJson(input): AppJson<CreateBookingInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if input.user_id != claims.user_id && !claims.is_admin() {
        return Err(ApiError::forbidden("Bookings can only be created for your own account"));
    }
    let booking = state.bookings.create(input).await?;
    common::metrics::record_booking_created();
    Ok((StatusCode::CREATED, Json(json!({"booking": booking}))))
}

/// Booking visible to the caller: admins see all, others only bookings they
/// made or bookings at a provider they own.
async fn accessible_booking(state: &ServerState, claims: &SessionClaims, id: Uuid) -> Result<booking::Model, ApiError> {
    let booking = state.bookings.get(id).await?;
    if claims.is_admin() || booking.user_id == claims.user_id {
        return Ok(booking);
    }
    match state.providers.get(booking.provider_id).await {
        Ok(p) if p.user_id == claims.user_id => Ok(booking),
        Ok(_) | Err(ServiceError::NotFound(_)) => Err(ApiError::forbidden("Not allowed to access this booking")),
        Err(e) => Err(e.into()),
    }
}

/// Non-admins list their own bookings, or every booking of a provider they own.
async fn scoped_filter(state: &ServerState, claims: &SessionClaims, mut filter: BookingFilter) -> Result<BookingFilter, ApiError> {
    if claims.is_admin() {
        return Ok(filter);
    }
    if let Some(provider_id) = filter.provider_id.as_deref().and_then(|p| Uuid::parse_str(p).ok()) {
        match state.providers.get(provider_id).await {
            Ok(p) if p.user_id == claims.user_id => return Ok(filter),
            Ok(_) | Err(ServiceError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    match filter.user_id.as_deref() {
        Some(raw) if Uuid::parse_str(raw).ok() != Some(claims.user_id) => {
            Err(ApiError::forbidden("Bookings can only be listed for your own account"))
        }
        _ => {
            filter.user_id = Some(claims.user_id.to_string());
            Ok(filter)
        }
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    AppQuery(filter): AppQuery<BookingFilter>,
) -> Result<Json<Value>, ApiError> {
    let filter = scoped_filter(&state, &claims, filter).await?;
    let bookings = state.bookings.list(filter).await?;
    Ok(Json(json!({"bookings": bookings})))
}

pub async fn get(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let booking = accessible_booking(&state, &claims, id).await?;
    Ok(Json(json!({"booking": booking})))
}

pub async fn set_status(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<StatusBody>,
) -> Result<Json<Value>, ApiError> {
    accessible_booking(&state, &claims, id).await?;
    let booking = state.bookings.set_status(id, body.status).await?;
    Ok(Json(json!({"booking": booking})))
}

/// An empty body is allowed; a body that is present must be valid JSON.
/// Without `cancelledBy` the caller's role is recorded.
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    AppPath(id): AppPath<Uuid>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let mut input = if body.iter().all(u8::is_ascii_whitespace) {
        CancelBookingInput::default()
    } else {
        serde_json::from_slice::<CancelBookingInput>(&body)
            .map_err(|e| ApiError::bad_request(format!("Failed to deserialize the JSON body: {e}")))?
    };
    accessible_booking(&state, &claims, id).await?;
    if input.cancelled_by.is_none() {
        input.cancelled_by = Some(claims.role.to_string());
    }
    let booking = state.bookings.cancel(id, input).await?;
    Ok(Json(json!({"message": "Booking cancelled successfully", "booking": booking})))
}
