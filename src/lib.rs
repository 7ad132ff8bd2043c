pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::sale::{Sale, SaleDraft, SaleEcho};
pub use domain::validation::{ForeignKey, Rejection, SalePipeline};
pub use storage::{MemoryStore, PgStore, ReferenceCheck, SalesStore};
