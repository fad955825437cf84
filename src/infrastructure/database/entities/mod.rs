//! SeaORM entities

pub mod employee;
pub mod sale;
pub mod spare;
pub mod user;
