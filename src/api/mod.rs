//! HTTP API module for the Podium Engine.
//!
//! This module exposes the palmarès run (`POST /palmares`) and the
//! assignment engine alone (`POST /assign`) over HTTP.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AssignRequest, PalmaresRequest};
pub use response::{ApiError, ApiErrorResponse, AssignResponse, PalmaresResponse};
pub use state::AppState;
