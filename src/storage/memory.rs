//! In-process store for tests.
//!
//! Mirrors the PostgreSQL behaviour the handlers depend on: ids are assigned in increasing order,
//! listing follows id order, and writes with a dangling `id_cliente` fail like the FK constraint
//! would.

use super::{ReferenceCheck, SalesStore};
use crate::domain::sale::{Sale, SaleDraft, SALES_TABLE};
use crate::domain::validation::SALE_CLIENT;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    clientes: BTreeSet<i64>,
    ventas: BTreeMap<i64, Sale>,
    last_sale_id: i64,
    writes: u64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given client ids.
    pub fn with_clients(ids: impl IntoIterator<Item = i64>) -> Self {
        let tables = Tables {
            clientes: ids.into_iter().collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub async fn add_client(&self, id: i64) {
        self.tables.write().await.clientes.insert(id);
    }

    /// Number of insert/update/delete statements issued so far, including no-ops.
    pub async fn write_count(&self) -> u64 {
        self.tables.read().await.writes
    }

    fn check_client(tables: &Tables, draft: &SaleDraft) -> Result<()> {
        match draft.id_cliente {
            Some(id) if !tables.clientes.contains(&id) => anyhow::bail!(
                "insert or update on table \"{}\" violates foreign key constraint ({} = {})",
                SALES_TABLE,
                SALE_CLIENT.key_column,
                id
            ),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ReferenceCheck for MemoryStore {
    async fn exists(&self, table: &str, key_column: &str, value: i64) -> Result<bool> {
        let tables = self.tables.read().await;
        match (table, key_column) {
            ("clientes", "id_cliente") => Ok(tables.clientes.contains(&value)),
            (SALES_TABLE, "id_venta") => Ok(tables.ventas.contains_key(&value)),
            _ => anyhow::bail!("relation {}.{} does not exist", table, key_column),
        }
    }
}

#[async_trait]
impl SalesStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_sales(&self) -> Result<Vec<Sale>> {
        Ok(self.tables.read().await.ventas.values().cloned().collect())
    }

    async fn get_sale(&self, id: i64) -> Result<Option<Sale>> {
        Ok(self.tables.read().await.ventas.get(&id).cloned())
    }

    async fn insert_sale(&self, draft: &SaleDraft) -> Result<i64> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;
        Self::check_client(&tables, draft)?;
        tables.last_sale_id += 1;
        let id = tables.last_sale_id;
        tables.ventas.insert(id, draft.clone().into_sale(id));
        Ok(id)
    }

    async fn update_sale(&self, id: i64, draft: &SaleDraft) -> Result<u64> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;
        Self::check_client(&tables, draft)?;
        match tables.ventas.get_mut(&id) {
            Some(row) => {
                *row = draft.clone().into_sale(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_sale(&self, id: i64) -> Result<u64> {
        let mut tables = self.tables.write().await;
        tables.writes += 1;
        Ok(u64::from(tables.ventas.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id_cliente: Option<i64>) -> SaleDraft {
        SaleDraft {
            fecha_venta: None,
            total_venta: 10.0,
            id_cliente,
        }
    }

    #[tokio::test]
    async fn ids_increase_and_survive_deletes() {
        let store = MemoryStore::new();
        let a = store.insert_sale(&draft(None)).await.unwrap();
        assert_eq!(store.delete_sale(a).await.unwrap(), 1);
        let b = store.insert_sale(&draft(None)).await.unwrap();
        assert!(b > a);
        assert_eq!(store.delete_sale(a).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn dangling_client_fails_like_the_constraint() {
        let store = MemoryStore::with_clients([1]);
        assert!(store.insert_sale(&draft(Some(1))).await.is_ok());
        assert!(store.insert_sale(&draft(Some(2))).await.is_err());
        assert_eq!(store.list_sales().await.unwrap().len(), 1);

        store.add_client(2).await;
        assert!(store.exists("clientes", "id_cliente", 2).await.unwrap());
        assert!(store.insert_sale(&draft(Some(2))).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_reference_target_is_an_error() {
        let store = MemoryStore::new();
        assert!(store.exists("proveedores", "id", 1).await.is_err());
    }
}
