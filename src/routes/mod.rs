pub mod health;
pub mod helpers;
pub mod redirect;
mod router;
pub mod stats_handlers;
pub mod types;
pub mod url_handlers;

pub use router::create_router;

// Re-export AppState for convenience
pub use crate::state::AppState;
