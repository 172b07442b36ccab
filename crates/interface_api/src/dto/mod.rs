//! Request and response bodies

pub mod scheduling;
