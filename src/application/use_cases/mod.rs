//! Use Cases
//!
//! Application-specific business rules.
//! Each use case is a single-purpose struct with an execute() method.

pub mod albums;
pub mod genres;
pub mod history;
pub mod playlists;
pub mod tracks;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
