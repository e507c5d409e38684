//! Application layer: the form state machine, payload assembly, failure
//! classification, and the service that drives the outbound ports.

pub mod payload;
pub mod reducer;
pub mod service;
pub mod submission;
