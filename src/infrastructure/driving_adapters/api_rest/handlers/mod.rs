//! HTTP Handlers
//!
//! One router per resource, nested under `/api/v1` by the API module.

pub mod albums;
pub mod genres;
pub mod health;
pub mod history;
pub mod playlists;
pub mod tracks;
pub mod users;

use uuid::Uuid;

use crate::shared::errors::ApiError;

/// Parse a path segment into a typed id
fn parse_id<T: From<Uuid>>(raw: &str) -> Result<T, ApiError> {
    Ok(T::from(Uuid::parse_str(raw)?))
}
