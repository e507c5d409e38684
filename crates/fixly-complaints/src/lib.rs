//! Fixly Complaint Registration Engine
//!
//! Core of the Fixly Mobiles operations portal: a cascading-lookup form
//! that turns a prospective-customer lead into a registered complaint
//! assigned to a nearby servicing entity.
//!
//! ## Architecture
//!
//! - **Domain Layer**: validated value objects, the `RegistrationForm`
//!   aggregate, assignment categories
//! - **Application Layer**: a message/effect reducer for the form state
//!   machine, payload assembly, failure classification, and the
//!   `RegistrationService` that drives the outbound ports
//! - **Ports Layer**: hexagonal interfaces for the postal directory, the
//!   nearest-options lookup, complaint creation, and the notification sink
//! - **Infrastructure Layer**: in-memory port implementations for tests
//!   and local wiring
//!
//! ## Workflow
//!
//! Pincode entry resolves the serviceable areas (auto-selecting when
//! unambiguous), area selection resolves the nearest assignment candidates
//! (affiliated shops, independent shops, tag agents), and a validated
//! submission registers the complaint against the source lead. Every
//! asynchronous resolution is keyed by a generation counter so a stale
//! response can never overwrite newer form state.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use domain::aggregates::{
    AssignCategory, Candidate, Complaint, ComplaintStatus, FormField, Lead, RegistrationForm,
};
pub use domain::value_objects::{Email, Phone, Pincode};
pub use application::reducer::{reduce, Effect, FormMsg};
pub use application::payload::ComplaintPayload;
pub use application::service::RegistrationService;
pub use ports::inbound::{RegistrationError, RegistrationUseCases};
pub use ports::outbound::{
    ComplaintApi, DirectoryError, NearestError, NearestOptions, NearestOptionsProvider,
    Notification, NotificationKind, NotificationSink, PostOffice, PostalDirectory,
    RegistrationApiError,
};
