//! Per-resource API modules: DTOs and handlers

pub mod auth;
pub mod employees;
pub mod health;
pub mod metrics;
pub mod sales;
pub mod spares;
pub mod staff;
