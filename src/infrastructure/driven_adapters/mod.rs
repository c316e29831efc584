//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - PostgreSQL repositories
//! - Local disk audio storage
//! - Password hashing
//! - Configuration

pub mod audio_storage;
pub mod config;
pub mod database;
pub mod password_hasher;
pub mod postgres;

pub use audio_storage::LocalAudioStorage;
pub use config::AppConfig;
pub use password_hasher::BcryptPasswordHasher;
