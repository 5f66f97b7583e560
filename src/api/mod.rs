pub mod books;
pub mod docs;
pub mod routes;
pub mod users;

pub use routes::{create_router, ApiError, AppState};
