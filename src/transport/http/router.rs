use crate::domain::sale::{Sale, SaleEcho};
use crate::transport::http::handlers::{health, sales};
use crate::transport::http::types::{
    AppState, ErrorResponse, HealthResponse, MessageResponse, SaleEchoResponse, SaleListResponse,
    SaleRequest, SaleResponse,
};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        sales::list_sales_handler,
        sales::get_sale_handler,
        sales::create_sale_handler,
        sales::update_sale_handler,
        sales::delete_sale_handler
    ),
    components(schemas(
        Sale,
        SaleEcho,
        SaleRequest,
        SaleListResponse,
        SaleResponse,
        SaleEchoResponse,
        MessageResponse,
        ErrorResponse,
        HealthResponse
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

/// Routes of the sales resource, relative to its mount point.
pub fn sales_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sales::list_sales_handler).post(sales::create_sale_handler),
        )
        .route(
            "/:id",
            get(sales::get_sale_handler)
                .put(sales::update_sale_handler)
                .delete(sales::delete_sale_handler),
        )
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .nest("/ventas", sales_routes())
        .with_state(app_state)
}
