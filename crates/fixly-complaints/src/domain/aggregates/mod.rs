//! Aggregates and supporting domain types.

mod assignment;
mod complaint;
mod lead;
mod registration;

pub use assignment::{AssignCategory, Candidate};
pub use complaint::{Complaint, ComplaintStatus};
pub use lead::Lead;
pub use registration::{FormField, RegistrationForm, PLACEHOLDER_PASSWORD};
