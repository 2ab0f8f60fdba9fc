//! # Route Modules
//!
//! Each module defines an Axum Router for one API surface area, with
//! paths spelled out under the `/api` prefix. [`router`] merges them; the
//! application assembles it with middleware in `lib.rs`.

pub mod contact;
pub mod resume;
pub mod root;
pub mod status;

use axum::Router;

use crate::state::AppState;

/// Every `/api` route.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(root::router())
        .merge(status::router())
        .merge(contact::router())
        .merge(resume::router())
}
