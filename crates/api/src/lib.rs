//! HTTP façade for the average-temperature service.
//!
//! Routes `/temperature`, `/store`, `/readyz`, and `/metrics` onto the
//! aggregation pipeline. The router builder is shared between the
//! production binary and the integration tests so both exercise the
//! same middleware stack.

pub mod config;
pub mod error;
pub mod metrics;
pub mod readiness;
pub mod router;
pub mod routes;
pub mod state;
