use ventas_api::infra::{config, logging};
use ventas_api::{PgStore, SalesStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--create-missing]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DB_MAX_CONNECTIONS, LOG_FORMAT, RUST_LOG\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let create_missing = args.iter().any(|a| a == "--create-missing");

    // Force-read config (nice error messages if missing)
    logging::init(config::log_format()?)?;
    let database_url = config::database_url()?;
    let max_connections = config::max_connections()?;
    tracing::info!(max_connections, bind_addr = %config::bind_addr(), "configuration ok");

    // Basic connectivity
    let store = PgStore::connect(&database_url, max_connections).await?;
    store.ping().await?;
    tracing::info!("database reachable");

    // Table presence
    let missing = store.missing_tables().await?;
    if !missing.is_empty() {
        if !create_missing {
            return Err(anyhow::anyhow!(
                "missing tables: {}. Re-run with --create-missing or start api_server once",
                missing.join(", ")
            ));
        }
        tracing::warn!(tables = %missing.join(", "), "creating missing tables");
        store.ensure_schema().await?;
        let still_missing = store.missing_tables().await?;
        if !still_missing.is_empty() {
            return Err(anyhow::anyhow!(
                "tables still missing after create: {}",
                still_missing.join(", ")
            ));
        }
    }

    let sales = store.list_sales().await?.len();
    tracing::info!(sales, "preflight ok");
    Ok(())
}
