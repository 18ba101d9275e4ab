use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::domain::Product;
use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /products`
pub async fn list_products(State(state): State<AppState>) -> Result<Response, ApiError> {
    let products = state.products.list_products().await?;
    json_response(StatusCode::OK, &products)
}

/// `GET /products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;
    let product = state.products.get_product(id).await?;
    json_response(StatusCode::OK, &product)
}

/// `POST /products`
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(candidate) = payload?;
    let created = state.products.create_product(candidate).await?;
    json_response(StatusCode::CREATED, &created)
}

/// `PUT /products/{id}` and `PATCH /products/{id}`: both replace the whole
/// record, and the path id wins over any id in the body.
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(replacement) = payload?;
    let stored = state.products.replace_product(id, replacement).await?;
    json_response(StatusCode::OK, &stored)
}

/// `DELETE /products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state.products.delete_product(id).await?;
    info!(product_id = id, "Deleted product");
    Ok(StatusCode::NO_CONTENT)
}

/// Accepts ASCII digits only, so `+5`, `-1` and `5a` are all rejected.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::InvalidIdentifier(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| ApiError::InvalidIdentifier(raw.to_string()))
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(|e| ApiError::Encoding(e.to_string()))?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_digits() {
        assert_eq!(parse_id("0").unwrap(), 0);
        assert_eq!(parse_id("0042").unwrap(), 42);
        assert_eq!(parse_id("999999").unwrap(), 999_999);
    }

    #[test]
    fn test_parse_id_rejects_non_digits() {
        for raw in ["", "abc", "+5", "-1", "5a", "1.0"] {
            assert!(
                matches!(parse_id(raw), Err(ApiError::InvalidIdentifier(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn test_parse_id_rejects_overflow() {
        assert!(matches!(
            parse_id("99999999999999999999999"),
            Err(ApiError::InvalidIdentifier(_))
        ));
    }
}
