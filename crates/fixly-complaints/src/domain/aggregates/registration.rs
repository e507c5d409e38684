//! Registration Form Aggregate
//!
//! Single mutable aggregate for one in-progress complaint registration.
//! Owns field values, per-field errors, the derived geographic state, the
//! assignment candidate lists, and the generation counters that key
//! asynchronous resolver results to the input that triggered them.

use std::collections::HashMap;
use std::fmt;

use crate::domain::aggregates::{AssignCategory, Candidate, ComplaintStatus, Lead};
use crate::domain::value_objects::{Email, Phone, Pincode};

/// Password placeholder used when converting a lead to a complaint.
/// The API requires a password field; the console does not issue real
/// credentials here. Flagged in DESIGN.md.
pub const PLACEHOLDER_PASSWORD: &str = "fixly@123";

/// A form field, used as the key of the per-field error map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Phone,
    Email,
    Password,
    Address,
    Pincode,
    Area,
    Model,
    Issue,
    Assignment,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Password => "password",
            Self::Address => "address",
            Self::Pincode => "pincode",
            Self::Area => "area",
            Self::Model => "model",
            Self::Issue => "issue",
            Self::Assignment => "assignment",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registration form aggregate root
#[derive(Clone, Debug, Default)]
pub struct RegistrationForm {
    source_lead: Option<String>,
    // Customer identity
    name: String,
    phone: String,
    email: String,
    password: String,
    address: String,
    pincode: String,
    // Derived geography
    areas: Vec<String>,
    area: Option<String>,
    state_label: Option<String>,
    // Complaint details
    model: String,
    issue: String,
    status: ComplaintStatus,
    // Assignment
    category: Option<AssignCategory>,
    target: Option<String>,
    affiliated_shops: Vec<Candidate>,
    independent_shops: Vec<Candidate>,
    tag_agents: Vec<Candidate>,
    // Transient state
    errors: HashMap<FormField, String>,
    resolving_nearest: bool,
    submitting: bool,
    // Staleness keys: a resolver result is applied only if its generation
    // still matches the counter at arrival time
    area_generation: u64,
    nearest_generation: u64,
}

impl RegistrationForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self {
            status: ComplaintStatus::Assigned,
            ..Self::default()
        }
    }

    /// Pre-populate from a lead for lead-to-complaint conversion
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            source_lead: Some(lead.id.clone()),
            name: lead.name.clone(),
            phone: lead.phone.clone(),
            email: lead.email.clone(),
            password: PLACEHOLDER_PASSWORD.to_string(),
            address: lead.address.clone(),
            pincode: lead.pincode.clone(),
            model: lead.model.clone(),
            issue: lead.issue.clone(),
            status: ComplaintStatus::Assigned,
            ..Self::default()
        }
    }

    /// Reload this form from a lead. The generation counters carry over and
    /// advance, so a resolver result still in flight for the previous
    /// occupant of the form can never match the reopened one. Returns the
    /// area generation the follow-up lookup must carry.
    pub fn load_lead(&mut self, lead: &Lead) -> u64 {
        let mut fresh = Self::from_lead(lead);
        fresh.area_generation = self.area_generation + 1;
        fresh.nearest_generation = self.nearest_generation + 1;
        *self = fresh;
        self.area_generation
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn source_lead(&self) -> Option<&str> { self.source_lead.as_deref() }
    pub fn name(&self) -> &str { &self.name }
    pub fn phone(&self) -> &str { &self.phone }
    pub fn email(&self) -> &str { &self.email }
    pub fn password(&self) -> &str { &self.password }
    pub fn address(&self) -> &str { &self.address }
    pub fn pincode(&self) -> &str { &self.pincode }
    pub fn areas(&self) -> &[String] { &self.areas }
    pub fn area(&self) -> Option<&str> { self.area.as_deref() }
    pub fn state_label(&self) -> Option<&str> { self.state_label.as_deref() }
    pub fn model(&self) -> &str { &self.model }
    pub fn issue(&self) -> &str { &self.issue }
    pub fn status(&self) -> ComplaintStatus { self.status }
    pub fn category(&self) -> Option<AssignCategory> { self.category }
    pub fn target(&self) -> Option<&str> { self.target.as_deref() }
    pub fn affiliated_shops(&self) -> &[Candidate] { &self.affiliated_shops }
    pub fn independent_shops(&self) -> &[Candidate] { &self.independent_shops }
    pub fn tag_agents(&self) -> &[Candidate] { &self.tag_agents }
    pub fn errors(&self) -> &HashMap<FormField, String> { &self.errors }
    pub fn is_resolving_nearest(&self) -> bool { self.resolving_nearest }
    pub fn is_submitting(&self) -> bool { self.submitting }
    pub fn area_generation(&self) -> u64 { self.area_generation }
    pub fn nearest_generation(&self) -> u64 { self.nearest_generation }

    /// Candidate list for an assignment category
    pub fn candidates_for(&self, category: AssignCategory) -> &[Candidate] {
        match category {
            AssignCategory::AffiliatedShop => &self.affiliated_shops,
            AssignCategory::IndependentShop => &self.independent_shops,
            AssignCategory::TagAgent => &self.tag_agents,
        }
    }

    // =========================================================================
    // Field edits
    // =========================================================================

    /// Write a text field and clear its error.
    ///
    /// `FormField::Pincode` must go through [`set_pincode`](Self::set_pincode)
    /// and the derived fields (`Area`, `Assignment`) through their own
    /// operations; those writes are ignored here.
    pub fn set_text_field(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Phone => self.phone = value,
            FormField::Email => self.email = value,
            FormField::Password => self.password = value,
            FormField::Address => self.address = value,
            FormField::Model => self.model = value,
            FormField::Issue => self.issue = value,
            FormField::Pincode | FormField::Area | FormField::Assignment => return,
        }
        self.clear_error(field);
    }

    /// Write the pincode, clearing its error and every piece of state that
    /// was derived from the previous pincode. Returns the new area
    /// generation that any follow-up lookup must carry.
    pub fn set_pincode(&mut self, value: String) -> u64 {
        self.pincode = value;
        self.clear_error(FormField::Pincode);
        self.invalidate_geo()
    }

    /// Select an area from the resolved list. Candidates from the previous
    /// area are stale, so they are cleared here and repopulated by the next
    /// nearest-options resolution. Returns the new nearest generation.
    pub fn select_area(&mut self, area: String) -> u64 {
        self.area = Some(area);
        self.clear_error(FormField::Area);
        self.clear_candidates();
        self.nearest_generation += 1;
        self.nearest_generation
    }

    /// Select an assignment category; any previously chosen target belongs
    /// to a different candidate universe and is dropped.
    pub fn select_category(&mut self, category: AssignCategory) {
        self.category = Some(category);
        self.target = None;
        self.clear_error(FormField::Assignment);
    }

    /// Select a target identifier for the current category
    pub fn select_target(&mut self, target: String) {
        self.target = Some(target);
        self.clear_error(FormField::Assignment);
    }

    pub fn set_status(&mut self, status: ComplaintStatus) {
        self.status = status;
    }

    // =========================================================================
    // Resolver state
    // =========================================================================

    /// Drop all geography-derived state and advance both generations so any
    /// in-flight resolver result is recognized as stale on arrival.
    pub fn invalidate_geo(&mut self) -> u64 {
        self.areas.clear();
        self.area = None;
        self.state_label = None;
        self.category = None;
        self.clear_candidates();
        self.resolving_nearest = false;
        self.area_generation += 1;
        self.nearest_generation += 1;
        self.area_generation
    }

    /// Install a resolved area list and region label
    pub fn set_areas(&mut self, areas: Vec<String>, state_label: String) {
        self.areas = areas;
        self.state_label = Some(state_label);
    }

    pub fn set_resolving_nearest(&mut self, resolving: bool) {
        self.resolving_nearest = resolving;
    }

    /// Install resolved candidate lists
    pub fn set_candidates(
        &mut self,
        affiliated_shops: Vec<Candidate>,
        independent_shops: Vec<Candidate>,
        tag_agents: Vec<Candidate>,
    ) {
        self.affiliated_shops = affiliated_shops;
        self.independent_shops = independent_shops;
        self.tag_agents = tag_agents;
    }

    fn clear_candidates(&mut self) {
        self.affiliated_shops.clear();
        self.independent_shops.clear();
        self.tag_agents.clear();
        self.target = None;
    }

    // =========================================================================
    // Errors & validation
    // =========================================================================

    pub fn set_error(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn clear_error(&mut self, field: FormField) {
        self.errors.remove(&field);
    }

    pub fn record_errors(&mut self, errors: HashMap<FormField, String>) {
        self.errors = errors;
    }

    /// Full validation sweep run at submit time: required-field checks,
    /// format validators, area resolution, and assignment completeness.
    /// Every violated field is reported simultaneously.
    pub fn validate(&self) -> HashMap<FormField, String> {
        let mut errors = HashMap::new();

        Self::check_required(&mut errors, FormField::Name, &self.name, "Name is required");
        Self::check_required(&mut errors, FormField::Password, &self.password, "Password is required");
        Self::check_required(&mut errors, FormField::Address, &self.address, "Address is required");
        Self::check_required(&mut errors, FormField::Model, &self.model, "Device model is required");
        Self::check_required(&mut errors, FormField::Issue, &self.issue, "Issue description is required");

        if let Err(e) = Phone::new(&self.phone) {
            errors.insert(FormField::Phone, e.to_string());
        }
        if let Err(e) = Email::new(&self.email) {
            errors.insert(FormField::Email, e.to_string());
        }
        if let Err(e) = Pincode::new(&self.pincode) {
            errors.insert(FormField::Pincode, e.to_string());
        }

        if self.area.is_none() {
            errors.insert(FormField::Area, "Select an area".to_string());
        }

        match self.category {
            None => {
                errors.insert(FormField::Assignment, "Select who to assign to".to_string());
            }
            Some(category) if self.target.is_none() => {
                errors.insert(
                    FormField::Assignment,
                    format!("Select {} to assign", category.wire_value()),
                );
            }
            Some(_) => {}
        }

        errors
    }

    fn check_required(
        errors: &mut HashMap<FormField, String>,
        field: FormField,
        value: &str,
        message: &str,
    ) {
        if value.trim().is_empty() {
            errors.insert(field, message.to_string());
        }
    }

    // =========================================================================
    // Submission lifecycle
    // =========================================================================

    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    pub fn end_submit(&mut self) {
        self.submitting = false;
    }

    /// Discard everything; the form is reused for the next registration.
    /// The generation counters survive the reset (and advance) so an
    /// in-flight resolver result from before the reset stays stale.
    pub fn reset(&mut self) {
        let mut fresh = Self::new();
        fresh.area_generation = self.area_generation + 1;
        fresh.nearest_generation = self.nearest_generation + 1;
        *self = fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set_text_field(FormField::Name, "Asha".into());
        form.set_text_field(FormField::Phone, "9876543210".into());
        form.set_text_field(FormField::Email, "asha@example.com".into());
        form.set_text_field(FormField::Password, "secret".into());
        form.set_text_field(FormField::Address, "12 MG Road".into());
        form.set_text_field(FormField::Model, "Pixel 7".into());
        form.set_text_field(FormField::Issue, "Cracked screen".into());
        form.set_pincode("560001".into());
        form.set_areas(vec!["Koramangala".into()], "Karnataka".into());
        form.select_area("Koramangala".into());
        form.set_candidates(vec![Candidate::new("7", "Shop A")], vec![], vec![]);
        form.select_category(AssignCategory::AffiliatedShop);
        form.select_target("7".into());
        form
    }

    #[test]
    fn test_from_lead_prefills_and_defaults_password() {
        let lead = Lead {
            id: "42".into(),
            name: "Asha".into(),
            phone: "9876543210".into(),
            email: "asha@example.com".into(),
            pincode: "560001".into(),
            address: "12 MG Road".into(),
            model: "Pixel 7".into(),
            issue: "Cracked screen".into(),
        };
        let form = RegistrationForm::from_lead(&lead);
        assert_eq!(form.source_lead(), Some("42"));
        assert_eq!(form.name(), "Asha");
        assert_eq!(form.password(), PLACEHOLDER_PASSWORD);
        assert_eq!(form.pincode(), "560001");
        assert_eq!(form.status(), ComplaintStatus::Assigned);
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(filled_form().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_violation_at_once() {
        let form = RegistrationForm::new();
        let errors = form.validate();
        for field in [
            FormField::Name,
            FormField::Phone,
            FormField::Email,
            FormField::Password,
            FormField::Address,
            FormField::Pincode,
            FormField::Area,
            FormField::Model,
            FormField::Issue,
            FormField::Assignment,
        ] {
            assert!(errors.contains_key(&field), "missing error for {field}");
        }
    }

    #[test]
    fn test_validate_flags_category_without_target() {
        let mut form = filled_form();
        form.select_category(AssignCategory::TagAgent);
        let errors = form.validate();
        assert!(errors[&FormField::Assignment].contains("agent"));
    }

    #[test]
    fn test_pincode_edit_clears_derived_state() {
        let mut form = filled_form();
        let before = form.area_generation();
        form.set_pincode("11000".into());
        assert!(form.areas().is_empty());
        assert!(form.area().is_none());
        assert!(form.state_label().is_none());
        assert!(form.affiliated_shops().is_empty());
        assert!(form.category().is_none());
        assert!(form.target().is_none());
        assert_eq!(form.area_generation(), before + 1);
    }

    #[test]
    fn test_area_selection_clears_candidates() {
        let mut form = filled_form();
        assert!(!form.affiliated_shops().is_empty());
        form.select_area("Indiranagar".into());
        assert!(form.affiliated_shops().is_empty());
        assert!(form.target().is_none());
    }

    #[test]
    fn test_category_change_clears_target() {
        let mut form = filled_form();
        assert_eq!(form.target(), Some("7"));
        form.select_category(AssignCategory::TagAgent);
        assert!(form.target().is_none());
        assert_eq!(form.category(), Some(AssignCategory::TagAgent));
    }

    #[test]
    fn test_field_edit_clears_field_error() {
        let mut form = RegistrationForm::new();
        form.set_error(FormField::Email, "Enter a valid email address");
        form.set_text_field(FormField::Email, "asha@example.com".into());
        assert!(!form.errors().contains_key(&FormField::Email));
    }

    #[test]
    fn test_reset_returns_to_empty() {
        let mut form = filled_form();
        form.begin_submit();
        form.reset();
        assert!(form.name().is_empty());
        assert!(!form.is_submitting());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_reset_advances_generations() {
        let mut form = filled_form();
        let area_before = form.area_generation();
        let nearest_before = form.nearest_generation();
        form.reset();
        assert!(form.area_generation() > area_before);
        assert!(form.nearest_generation() > nearest_before);
    }

    #[test]
    fn test_load_lead_advances_generations() {
        let lead = Lead {
            id: "42".into(),
            name: "Asha".into(),
            phone: "9876543210".into(),
            email: "asha@example.com".into(),
            pincode: "560001".into(),
            address: "12 MG Road".into(),
            model: "Pixel 7".into(),
            issue: "Cracked screen".into(),
        };
        let mut form = filled_form();
        let area_before = form.area_generation();
        let generation = form.load_lead(&lead);
        assert_eq!(form.source_lead(), Some("42"));
        assert_eq!(generation, form.area_generation());
        assert!(form.area_generation() > area_before);
    }
}
