//! HTTP handlers for all gateway routes.

pub mod ai;
pub mod complaints;
pub mod health;
