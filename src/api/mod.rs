pub mod request;
pub mod response;
pub mod routes;

pub use request::unwrap_payload;
pub use routes::{create_router, AppState};
