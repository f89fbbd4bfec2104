//! HTTP surface: the validated input boundary exposed over axum.
//!
//! Every mutation endpoint runs its payload through the matching resource
//! contract and answers either with the normalized, typed payload or with the
//! full list of violations. Nothing here talks to storage; the validated
//! payload is the end of this slice.

use crate::i18n::{catalog, Locale};
use crate::routes::{routes, RouteMap};
use crate::schema::{field, livestock, user, FieldError, ValidationErrors};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/messages", get(messages))
        .route("/api/routes", get(route_table))
        .route("/api/fields", post(create_field))
        .route("/api/fields/:id", patch(update_field))
        .route("/api/livestock", post(create_livestock))
        .route("/api/livestock/:id", patch(update_livestock))
        .route("/api/users", post(create_user))
        .route("/api/users/:id", patch(update_user))
        .layer(TraceLayer::new_for_http())
}

// ==================== Handlers ====================

#[derive(Serialize)]
struct Health {
    status: &'static str,
    locale: Locale,
}

/// Liveness, plus the locale the request would be served in.
async fn health(Query(params): Query<HashMap<String, String>>, headers: HeaderMap) -> Json<Health> {
    let locale = Locale::resolve_from(async move { locale_candidate(&params, &headers) }).await;
    Json(Health {
        status: "ok",
        locale,
    })
}

/// The translation bundle for the resolved locale: the frontend loads its
/// localized strings from here after locale negotiation.
async fn messages(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    let locale = Locale::resolve_from(async move { locale_candidate(&params, &headers) }).await;

    let mut bundle = serde_json::Map::new();
    for (key, message) in catalog(locale).entries() {
        bundle.insert(key.to_string(), Value::String(message.to_string()));
    }

    Json(serde_json::json!({
        "locale": locale,
        "messages": Value::Object(bundle),
    }))
}

/// The session routing contract, as handed to the identity provider.
async fn route_table() -> Json<&'static RouteMap> {
    Json(routes())
}

async fn create_field(payload: Result<Json<Value>, JsonRejection>) -> Response {
    respond(payload, field::NewField::from_payload, StatusCode::CREATED)
}

async fn update_field(
    Path(field_id): Path<Uuid>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    debug!(%field_id, "validating field update");
    respond(payload, field::FieldPatch::from_payload, StatusCode::OK)
}

async fn create_livestock(payload: Result<Json<Value>, JsonRejection>) -> Response {
    respond(
        payload,
        livestock::NewLivestock::from_payload,
        StatusCode::CREATED,
    )
}

async fn update_livestock(
    Path(livestock_id): Path<Uuid>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    debug!(%livestock_id, "validating livestock update");
    respond(
        payload,
        livestock::LivestockPatch::from_payload,
        StatusCode::OK,
    )
}

async fn create_user(payload: Result<Json<Value>, JsonRejection>) -> Response {
    respond(payload, user::NewUser::from_payload, StatusCode::CREATED)
}

async fn update_user(
    Path(user_id): Path<Uuid>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    debug!(%user_id, "validating user update");
    respond(payload, user::UserPatch::from_payload, StatusCode::OK)
}

// ==================== Response Plumbing ====================

/// Run a raw payload through a resource contract and answer accordingly:
/// the validated payload on success, the full violation list as 422, or a
/// single root error as 400 when the body is not JSON at all.
fn respond<T, F>(
    payload: Result<Json<Value>, JsonRejection>,
    parse: F,
    success: StatusCode,
) -> Response
where
    T: Serialize,
    F: FnOnce(&Value) -> Result<T, ValidationErrors>,
{
    match payload {
        Ok(Json(raw)) => match parse(&raw) {
            Ok(validated) => (success, Json(validated)).into_response(),
            Err(errors) => (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response(),
        },
        Err(rejection) => malformed_body(&rejection),
    }
}

fn malformed_body(rejection: &JsonRejection) -> Response {
    debug!("rejected request body: {rejection}");
    let errors = ValidationErrors {
        errors: vec![FieldError {
            path: "$".to_string(),
            message: "request body must be valid JSON".to_string(),
        }],
    };
    (StatusCode::BAD_REQUEST, Json(errors)).into_response()
}

// ==================== Locale Negotiation ====================

/// Locale candidate for a request: the `lang` query parameter wins, then the
/// first `Accept-Language` tag. Tags are reduced to their lowercased primary
/// subtag; resolution itself stays exact-match against the supported set.
fn locale_candidate(params: &HashMap<String, String>, headers: &HeaderMap) -> Option<String> {
    if let Some(lang) = params.get("lang") {
        return Some(normalize_tag(lang));
    }
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(normalize_tag)
}

/// Reduce a language tag like "fr-CA;q=0.9" to "fr".
fn normalize_tag(tag: &str) -> String {
    let tag = tag.split(';').next().unwrap_or(tag);
    let primary = tag.trim().split('-').next().unwrap_or(tag);
    primary.to_ascii_lowercase()
}
