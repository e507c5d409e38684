//! Validated value objects for the registration form.

mod email;
mod phone;
mod pincode;

pub use email::{Email, EmailError};
pub use phone::{Phone, PhoneError};
pub use pincode::{Pincode, PincodeError};
