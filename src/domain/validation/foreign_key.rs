//! Write-time referential integrity checks.

use super::Rejection;
use crate::storage::ReferenceCheck;

/// A nullable integer field that must reference an existing row of another table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Request field holding the reference.
    pub field: &'static str,
    /// Referenced table.
    pub table: &'static str,
    /// Key column looked up in `table`.
    pub key_column: &'static str,
}

/// `ventas.id_cliente` → `clientes.id_cliente`.
pub const SALE_CLIENT: ForeignKey = ForeignKey::new("id_cliente", "clientes", "id_cliente");

impl ForeignKey {
    pub const fn new(field: &'static str, table: &'static str, key_column: &'static str) -> Self {
        Self {
            field,
            table,
            key_column,
        }
    }

    /// Passes `value` through when it is `None` or references an existing row.
    ///
    /// `None` never reaches the store. A missing row is a client error; a failing lookup is
    /// reported as [`Rejection::Store`] so the caller can answer with a server error.
    pub async fn validate(
        &self,
        value: Option<i64>,
        references: &dyn ReferenceCheck,
    ) -> Result<Option<i64>, Rejection> {
        let Some(id) = value else {
            return Ok(None);
        };

        match references.exists(self.table, self.key_column, id).await {
            Ok(true) => Ok(Some(id)),
            Ok(false) => Err(Rejection::Invalid(format!(
                "{}: {} no existe en {}",
                self.field, id, self.table
            ))),
            Err(e) => Err(Rejection::Store(e.context(format!(
                "checking {}.{} = {}",
                self.table, self.key_column, id
            )))),
        }
    }
}
