//! Form State Machine
//!
//! The registration workflow as an explicit message/effect reducer. Every
//! UI event and every resolver completion becomes a [`FormMsg`]; [`reduce`]
//! mutates the form and returns the effects the caller must execute. The
//! reducer itself performs no I/O, which keeps every transition, including
//! the staleness rules, deterministically testable.
//!
//! Resolver completions carry the generation that was current when the
//! lookup was dispatched. A completion whose generation no longer matches
//! the form's counter is a stale response to an input the operator has
//! since changed, and is dropped.

use tracing::debug;

use crate::application::payload::ComplaintPayload;
use crate::domain::aggregates::{
    AssignCategory, Complaint, ComplaintStatus, FormField, Lead, RegistrationForm,
};
use crate::domain::value_objects::{Email, Phone, Pincode};
use crate::ports::outbound::{
    DirectoryError, NearestError, NearestOptions, Notification, PostOffice, RegistrationApiError,
};

/// Input to the form state machine
#[derive(Clone, Debug)]
pub enum FormMsg {
    /// Open the form pre-populated from a lead
    LeadLoaded(Lead),
    /// One text field edited
    FieldEdited { field: FormField, value: String },
    /// Operator selected an area from the resolved list
    AreaSelected(String),
    /// Operator selected an assignment category
    CategorySelected(AssignCategory),
    /// Operator selected a target within the current category
    TargetSelected(String),
    /// Operator picked a complaint status
    StatusSelected(ComplaintStatus),
    /// Area lookup finished for the given generation
    AreasResolved {
        generation: u64,
        outcome: Result<Vec<PostOffice>, DirectoryError>,
    },
    /// Nearest-options lookup finished for the given generation
    NearestResolved {
        generation: u64,
        outcome: Result<NearestOptions, NearestError>,
    },
    /// Operator triggered submit
    SubmitRequested,
    /// The registration request finished
    SubmissionCompleted {
        outcome: Result<Complaint, RegistrationApiError>,
    },
    /// The form was closed (success, cancel, or reopen)
    Closed,
}

/// Work the caller must perform after a reduction
#[derive(Clone, Debug)]
pub enum Effect {
    /// Run the postal-directory lookup; report back with `AreasResolved`
    ResolveAreas { pincode: Pincode, generation: u64 },
    /// Run the nearest-options lookup; report back with `NearestResolved`
    ResolveNearest {
        pincode: Pincode,
        area: String,
        generation: u64,
    },
    /// Perform the registration request; report back with
    /// `SubmissionCompleted`
    Submit {
        lead_id: Option<String>,
        payload: ComplaintPayload,
    },
    /// Emit a notification
    Notify(Notification),
    /// A complaint was registered; deliver it to the caller exactly once
    Registered(Complaint),
}

/// Advance the form state machine by one message
pub fn reduce(form: &mut RegistrationForm, msg: FormMsg) -> Vec<Effect> {
    match msg {
        FormMsg::LeadLoaded(lead) => {
            let generation = form.load_lead(&lead);
            match Pincode::new(form.pincode()) {
                Ok(pincode) => vec![Effect::ResolveAreas {
                    pincode,
                    generation,
                }],
                Err(_) => vec![],
            }
        }

        FormMsg::FieldEdited { field, value } => reduce_field_edit(form, field, value),

        FormMsg::AreaSelected(area) => {
            let generation = form.select_area(area.clone());
            match Pincode::new(form.pincode()) {
                Ok(pincode) => {
                    form.set_resolving_nearest(true);
                    vec![Effect::ResolveNearest {
                        pincode,
                        area,
                        generation,
                    }]
                }
                // Areas only exist for a valid pincode; nothing to fetch.
                Err(_) => vec![],
            }
        }

        FormMsg::CategorySelected(category) => {
            form.select_category(category);
            vec![]
        }

        FormMsg::TargetSelected(target) => {
            form.select_target(target);
            vec![]
        }

        FormMsg::StatusSelected(status) => {
            form.set_status(status);
            vec![]
        }

        FormMsg::AreasResolved {
            generation,
            outcome,
        } => {
            if generation != form.area_generation() {
                debug!(
                    generation,
                    current = form.area_generation(),
                    "stale area resolution dropped"
                );
                return vec![];
            }
            reduce_areas_resolved(form, outcome)
        }

        FormMsg::NearestResolved {
            generation,
            outcome,
        } => {
            if generation != form.nearest_generation() {
                debug!(
                    generation,
                    current = form.nearest_generation(),
                    "stale nearest-options resolution dropped"
                );
                return vec![];
            }
            form.set_resolving_nearest(false);
            match outcome {
                Ok(options) => {
                    form.set_candidates(
                        options.affiliated_shops,
                        options.independent_shops,
                        options.tag_agents,
                    );
                    vec![]
                }
                Err(e) => {
                    debug!(error = %e, "nearest-options lookup failed");
                    vec![Effect::Notify(Notification::error(
                        "Could not load nearby shops and agents, please retry",
                    ))]
                }
            }
        }

        FormMsg::SubmitRequested => {
            if form.is_submitting() {
                debug!("submit ignored, a submission is already in flight");
                return vec![];
            }
            let errors = form.validate();
            if !errors.is_empty() {
                form.record_errors(errors);
                return vec![Effect::Notify(Notification::error(
                    "Please correct the highlighted fields",
                ))];
            }
            form.begin_submit();
            vec![Effect::Submit {
                lead_id: form.source_lead().map(str::to_string),
                payload: ComplaintPayload::from_form(form),
            }]
        }

        FormMsg::SubmissionCompleted { outcome } => {
            form.end_submit();
            match outcome {
                Ok(complaint) => {
                    // Closed-Success: the form is spent, state is discarded
                    form.reset();
                    vec![Effect::Registered(complaint)]
                }
                // Editing-with-Errors: values are preserved for correction;
                // the terminal notification is emitted by the caller, which
                // owns the submission's correlation id.
                Err(_) => vec![],
            }
        }

        FormMsg::Closed => {
            form.reset();
            vec![]
        }
    }
}

fn reduce_field_edit(form: &mut RegistrationForm, field: FormField, value: String) -> Vec<Effect> {
    match field {
        FormField::Pincode => {
            let generation = form.set_pincode(value);
            match Pincode::new(form.pincode()) {
                Ok(pincode) => vec![Effect::ResolveAreas {
                    pincode,
                    generation,
                }],
                Err(e) => {
                    if !form.pincode().trim().is_empty() {
                        form.set_error(FormField::Pincode, e.to_string());
                    }
                    vec![]
                }
            }
        }
        FormField::Phone => {
            form.set_text_field(field, value);
            if !form.phone().trim().is_empty() {
                if let Err(e) = Phone::new(form.phone()) {
                    form.set_error(field, e.to_string());
                }
            }
            vec![]
        }
        FormField::Email => {
            form.set_text_field(field, value);
            if !form.email().trim().is_empty() {
                if let Err(e) = Email::new(form.email()) {
                    form.set_error(field, e.to_string());
                }
            }
            vec![]
        }
        _ => {
            form.set_text_field(field, value);
            vec![]
        }
    }
}

fn reduce_areas_resolved(
    form: &mut RegistrationForm,
    outcome: Result<Vec<PostOffice>, DirectoryError>,
) -> Vec<Effect> {
    match outcome {
        Ok(offices) if !offices.is_empty() => {
            let state = offices[0].state.clone();
            let mut areas: Vec<String> = Vec::with_capacity(offices.len());
            for office in offices {
                if !areas.contains(&office.name) {
                    areas.push(office.name);
                }
            }
            let single = (areas.len() == 1).then(|| areas[0].clone());
            form.set_areas(areas, state);

            match single {
                // Unambiguous: auto-select and chain straight into the
                // nearest-options lookup.
                Some(area) => reduce(form, FormMsg::AreaSelected(area)),
                None => vec![],
            }
        }
        Ok(_) | Err(DirectoryError::NotFound) => {
            form.set_error(FormField::Pincode, "Pincode not found");
            vec![Effect::Notify(Notification::warning(
                "No serviceable areas found for this pincode",
            ))]
        }
        Err(DirectoryError::Transport(e)) => {
            debug!(error = %e, "postal directory lookup failed");
            vec![Effect::Notify(Notification::error(
                "Could not look up the pincode, please retry",
            ))]
        }
    }
}
