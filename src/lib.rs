//! Music Catalog API
//!
//! A Rust-based service for cataloging and streaming music following
//! Clean/Hexagonal Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
