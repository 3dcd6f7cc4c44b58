// Re-export modules for testing
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod nutrition;
pub mod pagination;
pub mod recommend;
pub mod saved;
pub mod schema;
pub mod state;
pub mod store;

// Re-export endpoint wiring for integration tests
pub use crate::handlers::configure;
pub use crate::handlers::pages::health;
pub use crate::state::AppState;
