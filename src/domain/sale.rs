//! Sale records (`ventas`) as stored and as accepted for writes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Name of the sales table.
pub const SALES_TABLE: &str = "ventas";

/// A persisted sale row. Field names follow the `ventas` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Sale {
    pub id_venta: i64,
    #[schema(value_type = Option<String>, format = Date, example = "2024-01-01")]
    pub fecha_venta: Option<NaiveDate>,
    pub total_venta: f64,
    pub id_cliente: Option<i64>,
}

/// Validated, fully-typed values for a create or update.
///
/// Updates replace every field of the row with these values.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub fecha_venta: Option<NaiveDate>,
    pub total_venta: f64,
    pub id_cliente: Option<i64>,
}

impl SaleDraft {
    pub fn into_sale(self, id_venta: i64) -> Sale {
        Sale {
            id_venta,
            fecha_venta: self.fecha_venta,
            total_venta: self.total_venta,
            id_cliente: self.id_cliente,
        }
    }
}

/// Shape echoed back by create/update: the row id under `id` plus the written fields.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SaleEcho {
    pub id: i64,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_venta: Option<NaiveDate>,
    pub total_venta: f64,
    pub id_cliente: Option<i64>,
}

impl SaleEcho {
    pub fn new(id: i64, draft: &SaleDraft) -> Self {
        Self {
            id,
            fecha_venta: draft.fecha_venta,
            total_venta: draft.total_venta,
            id_cliente: draft.id_cliente,
        }
    }
}
