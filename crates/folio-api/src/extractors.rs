//! # Custom Extractors
//!
//! JSON body extraction that reports every rejection as a 422, and the
//! [`ClientIp`] extractor. Field constraints live on the record types in
//! `folio-core` and are checked when a record is built from its input.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::Json;

use crate::error::AppError;

/// Placeholder recorded when the peer address is not available.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Extract a JSON body, mapping every rejection to [`AppError::Validation`].
///
/// Missing fields, wrong types, malformed JSON, and a missing content type
/// all mean the body could not be shaped into `T`; each is reported as a 422.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::Validation(err.body_text()))
}

/// Address of the TCP peer, when the server was started with connect info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

impl ClientIp {
    /// The address as a string, or [`UNKNOWN_CLIENT`].
    pub fn or_unknown(&self) -> String {
        self.0
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip()),
        ))
    }
}
