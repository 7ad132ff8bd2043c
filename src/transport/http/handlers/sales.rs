//! `/ventas` handlers.
//!
//! Mutations run the validation pipeline first; a rejection answers the request before any
//! write is issued. Updates and deletes of missing ids succeed without touching anything.

use crate::domain::sale::SaleEcho;
use crate::domain::validation::{parse_id, FieldMap};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{
    AppState, ErrorResponse, MessageResponse, SaleEchoResponse, SaleListResponse, SaleRequest,
    SaleResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

/// Request body as a field map. A body not declared as JSON is not parsed and every field is
/// then absent.
fn request_fields(request: Result<Json<FieldMap>, JsonRejection>) -> Result<FieldMap, ApiError> {
    match request {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(FieldMap::new()),
        Err(e) => Err(ApiError::invalid_json(e)),
    }
}

#[utoipa::path(
    get,
    path = "/ventas",
    responses(
        (status = 200, description = "All sales, in store order", body = SaleListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_sales_handler(
    State(state): State<AppState>,
) -> Result<Json<SaleListResponse>, ApiError> {
    let ventas = state.sales.list_sales().await?;
    Ok(Json(SaleListResponse { ventas }))
}

#[utoipa::path(
    get,
    path = "/ventas/{id}",
    params(
        ("id" = String, Path, description = "Sale id (integer)")
    ),
    responses(
        (status = 200, description = "The sale, or `venta: null` when absent", body = SaleResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_sale_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SaleResponse>, ApiError> {
    let id = parse_id(&id)?;
    let venta = state.sales.get_sale(id).await?;
    Ok(Json(SaleResponse { venta }))
}

#[utoipa::path(
    post,
    path = "/ventas",
    request_body = SaleRequest,
    responses(
        (status = 201, description = "Sale created", body = SaleEchoResponse),
        (status = 400, description = "Invalid body, total or client reference", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_sale_handler(
    State(state): State<AppState>,
    request: Result<Json<FieldMap>, JsonRejection>,
) -> Result<(StatusCode, Json<SaleEchoResponse>), ApiError> {
    let body = request_fields(request)?;

    let draft = state
        .pipeline
        .check_references(&body, state.references.as_ref())
        .await?
        .into_draft()?;

    let id = state.sales.insert_sale(&draft).await?;
    tracing::info!(id_venta = id, "sale created");

    Ok((
        StatusCode::CREATED,
        Json(SaleEchoResponse {
            venta: SaleEcho::new(id, &draft),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/ventas/{id}",
    params(
        ("id" = String, Path, description = "Sale id (integer)")
    ),
    request_body = SaleRequest,
    responses(
        (status = 200, description = "Sale fields replaced (no-op when the id does not exist)", body = SaleEchoResponse),
        (status = 400, description = "Invalid id, body, total or client reference", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_sale_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<FieldMap>, JsonRejection>,
) -> Result<Json<SaleEchoResponse>, ApiError> {
    let body = request_fields(request)?;

    let checked = state
        .pipeline
        .check_references(&body, state.references.as_ref())
        .await?;
    let id = parse_id(&id)?;
    let draft = checked.into_draft()?;

    let affected = state.sales.update_sale(id, &draft).await?;
    if affected == 0 {
        tracing::debug!(id_venta = id, "update matched no rows");
    }

    Ok(Json(SaleEchoResponse {
        venta: SaleEcho::new(id, &draft),
    }))
}

#[utoipa::path(
    delete,
    path = "/ventas/{id}",
    params(
        ("id" = String, Path, description = "Sale id (integer)")
    ),
    responses(
        (status = 200, description = "Deleted (also when the id did not exist)", body = MessageResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_sale_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;

    let affected = state.sales.delete_sale(id).await?;
    if affected == 0 {
        tracing::debug!(id_venta = id, "delete matched no rows");
    }

    Ok(Json(MessageResponse {
        message: format!("Venta con ID {} eliminada", id),
    }))
}
