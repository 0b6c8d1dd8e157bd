//! Middleware for the portal API.

pub mod metrics;
