pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod sales;
}

pub use error::ApiError;
pub use router::{create_router, sales_routes, ApiDoc};
pub use types::AppState;
