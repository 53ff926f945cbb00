//! Service plumbing shared by storefront services: configuration loading,
//! health probes, request-id propagation and tracing setup.

pub mod config;
pub mod health;
pub mod middleware;
pub mod tracing;
