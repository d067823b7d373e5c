//! HTTP handlers

pub mod email;
pub mod health;
pub mod routes;
pub mod tools;
