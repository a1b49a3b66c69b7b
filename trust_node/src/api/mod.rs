//! HTTP surface of the trust node

pub mod errors;
pub mod handlers;
pub mod server;

pub use errors::{ApiError, ApiResult};
pub use server::{create_router, start_api_server, AppState};
