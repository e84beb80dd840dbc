//! # Middleware Modules

pub mod metrics;
