//! Hexagonal ports: inbound use cases and outbound service contracts.

pub mod inbound;
pub mod outbound;
