//! Lead Record
//!
//! A prospective-customer record fetched from the portal API. Leads are
//! managed elsewhere; this crate only reads them to seed a registration.

use serde::{Deserialize, Serialize};

/// Lead record, source of a lead-to-complaint conversion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub pincode: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub issue: String,
}
