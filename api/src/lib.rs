//! # Token Service API
//!
//! actix-web transport over `TokenLifecycleService`: token issuance,
//! refresh, verification, revocation and public key export.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod telemetry;
