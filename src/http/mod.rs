//! HTTP surface of the listing service.
//!
//! ```text
//! axum handlers ──▶ ListingService ──▶ query::compile
//!                         │
//!                         ▼
//!                    dyn DataStore (in-memory | MongoDB)
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::AppError;
pub use router::{cors_layer, create_router};
pub use state::AppState;
