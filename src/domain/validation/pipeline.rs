//! Composition of the sale validation stages.
//!
//! Order for a mutation: normalize `id_cliente` → check the client exists → (update only) parse
//! the path id → parse `total_venta` → parse `fecha_venta`.

use super::foreign_key::{ForeignKey, SALE_CLIENT};
use super::normalize::{loose_number, normalize_nullable_int, parse_integer};
use super::Rejection;
use crate::domain::sale::SaleDraft;
use crate::storage::ReferenceCheck;
use chrono::{DateTime, NaiveDate};
use serde_json::Value as JsonValue;

/// Loosely-typed request body as received on the wire.
pub type FieldMap = serde_json::Map<String, JsonValue>;

pub const INVALID_ID: &str = "ID inválido";
pub const INVALID_TOTAL: &str = "total_venta: número inválido";
pub const INVALID_DATE: &str = "fecha_venta: fecha inválida";

/// Runs the sale validation stages against a request body.
#[derive(Debug, Clone, Copy)]
pub struct SalePipeline {
    client: ForeignKey,
}

impl Default for SalePipeline {
    fn default() -> Self {
        Self {
            client: SALE_CLIENT,
        }
    }
}

impl SalePipeline {
    pub fn new(client: ForeignKey) -> Self {
        Self { client }
    }

    /// Normalizes the client reference and verifies it against the store.
    pub async fn check_references<'a>(
        &self,
        body: &'a FieldMap,
        references: &dyn ReferenceCheck,
    ) -> Result<CheckedBody<'a>, Rejection> {
        let client = normalize_nullable_int(body.get(self.client.field));
        let client = self.client.validate(client, references).await?;
        Ok(CheckedBody { body, client })
    }
}

/// A body whose foreign key has been normalized and verified.
#[derive(Debug)]
pub struct CheckedBody<'a> {
    body: &'a FieldMap,
    client: Option<i64>,
}

impl CheckedBody<'_> {
    pub fn client(&self) -> Option<i64> {
        self.client
    }

    /// Parses the remaining fields into a [`SaleDraft`].
    pub fn into_draft(self) -> Result<SaleDraft, Rejection> {
        let total_venta = parse_total(self.body.get("total_venta"))?;
        let fecha_venta = parse_sale_date(self.body.get("fecha_venta"))?;
        Ok(SaleDraft {
            fecha_venta,
            total_venta,
            id_cliente: self.client,
        })
    }
}

/// Path ids must be integers; there is no lenient fallback here.
pub fn parse_id(raw: &str) -> Result<i64, Rejection> {
    parse_integer(raw).ok_or_else(|| Rejection::Invalid(INVALID_ID.to_string()))
}

/// `total_venta`: absent or `null` means 0; otherwise the value's numeric reading (see
/// [`loose_number`]), which must be finite and non-negative. `""` and `true` read as 0 and 1.
pub fn parse_total(raw: Option<&JsonValue>) -> Result<f64, Rejection> {
    let total = match raw {
        None => Some(0.0),
        Some(v) => loose_number(v),
    };

    match total {
        Some(t) if t.is_finite() && t >= 0.0 => Ok(t),
        _ => Err(Rejection::Invalid(INVALID_TOTAL.to_string())),
    }
}

/// `fecha_venta`: absent, `null` or `""` means no date; otherwise `YYYY-MM-DD` or an RFC 3339
/// timestamp (truncated to its date).
pub fn parse_sale_date(raw: Option<&JsonValue>) -> Result<Option<NaiveDate>, Rejection> {
    let s = match raw {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(JsonValue::String(s)) if s.is_empty() => return Ok(None),
        Some(JsonValue::String(s)) => s.trim(),
        Some(_) => return Err(Rejection::Invalid(INVALID_DATE.to_string())),
    };

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map(Some)
        .map_err(|_| Rejection::Invalid(INVALID_DATE.to_string()))
}
