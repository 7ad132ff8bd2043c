use crate::domain::sale::{Sale, SaleEcho};
use crate::domain::validation::SalePipeline;
use crate::storage::{ReferenceCheck, SalesStore};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub sales: Arc<dyn SalesStore>,
    pub references: Arc<dyn ReferenceCheck>,
    pub pipeline: SalePipeline,
}

impl AppState {
    /// State backed by a single store that serves both rows and reference lookups.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: SalesStore + ReferenceCheck + 'static,
    {
        Self {
            sales: store.clone(),
            references: store,
            pipeline: SalePipeline::default(),
        }
    }
}

/// Body accepted by create and update. Every field is optional and loosely typed; see the
/// validation stages for the coercion rules.
#[derive(Debug, ToSchema)]
pub struct SaleRequest {
    /// `YYYY-MM-DD`, `null` or `""`.
    #[schema(value_type = Option<String>, example = "2024-01-01")]
    pub fecha_venta: Option<JsonValue>,
    /// Non-negative number or numeric string. Defaults to 0.
    #[schema(value_type = Option<f64>, example = 150)]
    pub total_venta: Option<JsonValue>,
    /// Client id. Non-integers are treated as `null`.
    #[schema(value_type = Option<i64>, example = 1)]
    pub id_cliente: Option<JsonValue>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SaleListResponse {
    pub ventas: Vec<Sale>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SaleResponse {
    /// `null` when no sale has the requested id.
    pub venta: Option<Sale>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SaleEchoResponse {
    pub venta: SaleEcho,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
