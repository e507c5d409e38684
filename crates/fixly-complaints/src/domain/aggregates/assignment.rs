//! Assignment Selector
//!
//! A complaint is assigned to exactly one of three mutually exclusive
//! categories of servicing entity. Both shop categories share the
//! `assigned_shop` foreign key (affiliated and independent shops are rows
//! of one shop table); tag agents use `assigned_agent`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate assignment target offered by the nearest-options lookup
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub label: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The category of entity a complaint is assigned to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignCategory {
    AffiliatedShop,
    IndependentShop,
    TagAgent,
}

impl AssignCategory {
    /// Value sent under the payload's `assign_to` key
    pub fn wire_value(&self) -> &'static str {
        match self {
            Self::AffiliatedShop => "franchise",
            Self::IndependentShop => "shop",
            Self::TagAgent => "agent",
        }
    }

    /// Payload field that carries the selected target identifier
    pub fn target_field(&self) -> &'static str {
        match self {
            Self::AffiliatedShop | Self::IndependentShop => "assigned_shop",
            Self::TagAgent => "assigned_agent",
        }
    }
}

impl fmt::Display for AssignCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(AssignCategory::AffiliatedShop.wire_value(), "franchise");
        assert_eq!(AssignCategory::IndependentShop.wire_value(), "shop");
        assert_eq!(AssignCategory::TagAgent.wire_value(), "agent");
    }

    #[test]
    fn test_shops_share_target_field() {
        assert_eq!(AssignCategory::AffiliatedShop.target_field(), "assigned_shop");
        assert_eq!(AssignCategory::IndependentShop.target_field(), "assigned_shop");
        assert_eq!(AssignCategory::TagAgent.target_field(), "assigned_agent");
    }
}
