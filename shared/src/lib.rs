//! Shared configuration and response types for the token service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loaders
//! - Error response structures

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CleanupConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    ServerConfig,
};
pub use errors::ErrorResponse;
