//! Request handlers

pub mod health;
pub mod payers;
pub mod availability;
