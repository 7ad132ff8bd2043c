//! Store abstractions used by the validation pipeline and the sale handlers.
//!
//! Each method is a single round trip. Implementations report failures through `anyhow`; the
//! HTTP layer decides how they surface.

use crate::domain::sale::{Sale, SaleDraft};
use anyhow::Result;
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Existence lookup used for foreign-key validation, shared by every resource.
#[async_trait]
pub trait ReferenceCheck: Send + Sync {
    /// Returns whether `table` has a row whose `key_column` equals `value`.
    async fn exists(&self, table: &str, key_column: &str, value: i64) -> Result<bool>;
}

#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Cheap connectivity check for health reports.
    async fn ping(&self) -> Result<()>;

    async fn list_sales(&self) -> Result<Vec<Sale>>;

    async fn get_sale(&self, id: i64) -> Result<Option<Sale>>;

    /// Inserts a row and returns the id assigned by the store.
    async fn insert_sale(&self, draft: &SaleDraft) -> Result<i64>;

    /// Replaces every mutable field of row `id`. Returns the number of rows affected.
    async fn update_sale(&self, id: i64, draft: &SaleDraft) -> Result<u64>;

    /// Returns the number of rows deleted.
    async fn delete_sale(&self, id: i64) -> Result<u64>;
}

/// Plain SQL identifier check for table/column names interpolated into queries.
pub fn validate_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::validate_ident;

    #[test]
    fn identifiers() {
        assert!(validate_ident("clientes"));
        assert!(validate_ident("id_cliente"));
        assert!(validate_ident("_t2"));
        assert!(!validate_ident(""));
        assert!(!validate_ident("2t"));
        assert!(!validate_ident("clientes; DROP TABLE ventas"));
        assert!(!validate_ident("\"quoted\""));
    }
}
