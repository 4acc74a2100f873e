//! HTTP API for the slacktime reporting service.
//!
//! This module provides the request surface: payload validation, the
//! processing orchestration, and the success/error response shapes. Wire
//! field names follow the contract the frontend already speaks.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{Person, ProcessRequest};
pub use response::{ApiError, ProcessResponse, ProcessStats};
pub use state::AppState;
