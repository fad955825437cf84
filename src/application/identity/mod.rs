//! Identity and access gate

pub mod service;

pub use service::{AuthResult, IdentityService};
