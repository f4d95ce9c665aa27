pub mod additions;
pub mod handlers;
pub mod middleware;
pub mod pagination;
pub mod routes;

pub use routes::create_router;
