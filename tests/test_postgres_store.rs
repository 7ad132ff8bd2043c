//! PostgreSQL round trip through the HTTP API.
//!
//! Runs only when `DATABASE_URL` points at a reachable database; otherwise it returns early.
//! Tables are created if missing and the rows written here are removed at the end.

use serde_json::{json, Value};
use std::sync::Arc;
use ventas_api::transport::http::{create_router, AppState};
use ventas_api::{PgStore, ReferenceCheck, SalesStore};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        println!("DATABASE_URL not set; skipping PostgreSQL round trip");
        return Ok(());
    };

    let store = PgStore::connect(&database_url, 2).await?;
    store.ensure_schema().await?;
    assert!(store.missing_tables().await?.is_empty());
    store.ping().await?;

    let client_id = store.insert_client("cliente de prueba").await?;
    assert!(store.exists("clientes", "id_cliente", client_id).await?);
    assert!(store.exists("clientes; --", "id_cliente", client_id).await.is_err());

    let store = Arc::new(store);
    let router = create_router(AppState::new(store.clone()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    let base_url = format!("http://127.0.0.1:{}", port);
    let client = reqwest::Client::new();

    // --- Create + read back ---
    let created = client
        .post(format!("{}/ventas", base_url))
        .json(&json!({ "fecha_venta": "2024-01-01", "total_venta": "150", "id_cliente": client_id }))
        .send()
        .await?;
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);
    let id = created.json::<Value>().await?["venta"]["id"]
        .as_i64()
        .ok_or("missing id")?;

    let fetched = client
        .get(format!("{}/ventas/{}", base_url, id))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(fetched["venta"]["fecha_venta"], json!("2024-01-01"));
    assert_eq!(fetched["venta"]["total_venta"].as_f64(), Some(150.0));
    assert_eq!(fetched["venta"]["id_cliente"].as_i64(), Some(client_id));

    // --- Dangling reference never reaches the FK constraint ---
    let before = store.list_sales().await?.len();
    let rejected = client
        .post(format!("{}/ventas", base_url))
        .json(&json!({ "id_cliente": i64::MAX }))
        .send()
        .await?;
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);
    assert_eq!(store.list_sales().await?.len(), before);

    // --- Update replaces, delete twice succeeds ---
    let updated = client
        .put(format!("{}/ventas/{}", base_url, id))
        .json(&json!({ "total_venta": 3 }))
        .send()
        .await?;
    assert_eq!(updated.status(), reqwest::StatusCode::OK);
    let row = store.get_sale(id).await?.ok_or("row vanished")?;
    assert_eq!((row.fecha_venta, row.total_venta, row.id_cliente), (None, 3.0, None));

    for _ in 0..2 {
        let deleted = client
            .delete(format!("{}/ventas/{}", base_url, id))
            .send()
            .await?;
        assert_eq!(deleted.status(), reqwest::StatusCode::OK);
    }
    assert!(store.get_sale(id).await?.is_none());

    sqlx::query("DELETE FROM clientes WHERE id_cliente = $1")
        .bind(client_id)
        .execute(store.pool())
        .await?;

    server_handle.abort();
    Ok(())
}
