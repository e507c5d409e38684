//! Registration Service
//!
//! Drives the form state machine against the outbound ports: executes
//! resolver effects, feeds their results back through the reducer with the
//! generation that triggered them, and owns the submission's notification
//! lifecycle (one loading toast, replaced by exactly one terminal toast).

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, error, info};

use crate::application::reducer::{reduce, Effect, FormMsg};
use crate::application::submission::failure_message;
use crate::domain::aggregates::{
    AssignCategory, Complaint, ComplaintStatus, FormField, Lead, RegistrationForm,
};
use crate::ports::inbound::{RegistrationError, RegistrationUseCases};
use crate::ports::outbound::{
    ComplaintApi, NearestOptionsProvider, Notification, NotificationSink, PostalDirectory,
};

/// Callback invoked once per successfully registered complaint
pub type OnRegistered = Box<dyn Fn(&Complaint) + Send + Sync>;

/// Application service implementing [`RegistrationUseCases`]
pub struct RegistrationService {
    form: Mutex<RegistrationForm>,
    directory: Arc<dyn PostalDirectory>,
    nearest: Arc<dyn NearestOptionsProvider>,
    api: Arc<dyn ComplaintApi>,
    notifications: Arc<dyn NotificationSink>,
    on_registered: Mutex<Option<OnRegistered>>,
}

impl RegistrationService {
    pub fn new(
        directory: Arc<dyn PostalDirectory>,
        nearest: Arc<dyn NearestOptionsProvider>,
        api: Arc<dyn ComplaintApi>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            form: Mutex::new(RegistrationForm::new()),
            directory,
            nearest,
            api,
            notifications,
            on_registered: Mutex::new(None),
        }
    }

    /// Register the success callback the parent list screen listens on
    pub fn on_registered(&self, callback: OnRegistered) {
        *self.on_registered.lock() = Some(callback);
    }

    /// Apply a message and run the resulting effect chain to quiescence.
    /// Resolver effects are awaited and their completions re-enter the
    /// reducer carrying the generation captured at dispatch time; the
    /// generation compare inside the reducer guarantees the last lookup
    /// for the current input wins.
    async fn dispatch(&self, msg: FormMsg) {
        let mut queue = VecDeque::new();
        queue.push_back(msg);

        while let Some(msg) = queue.pop_front() {
            let effects = {
                let mut form = self.form.lock();
                reduce(&mut form, msg)
            };

            for effect in effects {
                match effect {
                    Effect::ResolveAreas {
                        pincode,
                        generation,
                    } => {
                        debug!(pincode = %pincode, generation, "resolving areas");
                        let outcome = self.directory.lookup(&pincode).await;
                        queue.push_back(FormMsg::AreasResolved {
                            generation,
                            outcome,
                        });
                    }
                    Effect::ResolveNearest {
                        pincode,
                        area,
                        generation,
                    } => {
                        debug!(pincode = %pincode, area = %area, generation, "resolving nearest options");
                        let outcome = self.nearest.nearest(&pincode, &area).await;
                        queue.push_back(FormMsg::NearestResolved {
                            generation,
                            outcome,
                        });
                    }
                    Effect::Notify(notification) => {
                        self.notifications.notify(notification);
                    }
                    Effect::Registered(complaint) => {
                        self.deliver(&complaint);
                    }
                    // The submit use case drives its own request so it can
                    // correlate the loading and terminal notifications and
                    // return the outcome; an unsolicited submit effect here
                    // would mean a message was routed around `submit`.
                    Effect::Submit { .. } => {
                        error!("submit effect outside the submit use case, dropped");
                    }
                }
            }
        }
    }

    fn deliver(&self, complaint: &Complaint) {
        if let Some(callback) = self.on_registered.lock().as_ref() {
            callback(complaint);
        }
    }
}

#[async_trait]
impl RegistrationUseCases for RegistrationService {
    async fn load_lead(&self, lead: Lead) {
        info!(lead_id = %lead.id, "opening registration from lead");
        self.dispatch(FormMsg::LeadLoaded(lead)).await;
    }

    async fn edit_field(&self, field: FormField, value: String) {
        self.dispatch(FormMsg::FieldEdited { field, value }).await;
    }

    async fn select_area(&self, area: String) {
        self.dispatch(FormMsg::AreaSelected(area)).await;
    }

    async fn select_category(&self, category: AssignCategory) {
        self.dispatch(FormMsg::CategorySelected(category)).await;
    }

    async fn select_target(&self, target: String) {
        self.dispatch(FormMsg::TargetSelected(target)).await;
    }

    async fn select_status(&self, status: ComplaintStatus) {
        self.dispatch(FormMsg::StatusSelected(status)).await;
    }

    async fn submit(&self) -> Result<Complaint, RegistrationError> {
        let (lead_id, payload) = {
            let mut form = self.form.lock();
            if form.is_submitting() {
                debug!("duplicate submit ignored");
                return Err(RegistrationError::AlreadySubmitting);
            }
            match reduce(&mut form, FormMsg::SubmitRequested).into_iter().next() {
                Some(Effect::Submit { lead_id, payload }) => (lead_id, payload),
                Some(Effect::Notify(notification)) => {
                    self.notifications.notify(notification);
                    return Err(RegistrationError::ValidationFailed);
                }
                _ => return Err(RegistrationError::ValidationFailed),
            }
        };

        let toast = uuid::Uuid::new_v4().to_string();
        self.notifications
            .notify(Notification::loading("Registering complaint...").with_id(&toast));

        let outcome = self.api.register(lead_id.as_deref(), &payload).await;

        match outcome {
            Ok(complaint) => {
                info!(complaint_id = %complaint.id, "complaint registered");
                self.notifications.notify(
                    Notification::success("Complaint registered successfully").with_id(&toast),
                );
                self.dispatch(FormMsg::SubmissionCompleted {
                    outcome: Ok(complaint.clone()),
                })
                .await;
                Ok(complaint)
            }
            Err(api_error) => {
                let message = failure_message(&api_error);
                error!(error = %api_error, "complaint registration failed");
                self.notifications
                    .notify(Notification::error(&message).with_id(&toast));
                self.dispatch(FormMsg::SubmissionCompleted {
                    outcome: Err(api_error),
                })
                .await;
                Err(RegistrationError::SubmissionFailed(message))
            }
        }
    }

    async fn close(&self) {
        self.dispatch(FormMsg::Closed).await;
    }

    fn snapshot(&self) -> RegistrationForm {
        self.form.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Candidate;
    use crate::infrastructure::{
        InMemoryComplaintApi, InMemoryNearestOptions, InMemoryPostalDirectory,
        RecordingNotificationSink,
    };
    use crate::ports::outbound::{NearestOptions, NotificationKind, RegistrationApiError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn lead() -> Lead {
        Lead {
            id: "42".into(),
            name: "Asha".into(),
            phone: "9876543210".into(),
            email: "asha@example.com".into(),
            pincode: "560001".into(),
            address: "12 MG Road".into(),
            model: "Pixel 7".into(),
            issue: "Cracked screen".into(),
        }
    }

    fn service_with(
        directory: InMemoryPostalDirectory,
        nearest: InMemoryNearestOptions,
        api: InMemoryComplaintApi,
    ) -> (Arc<RegistrationService>, Arc<RecordingNotificationSink>) {
        let sink = Arc::new(RecordingNotificationSink::new());
        let service = Arc::new(RegistrationService::new(
            Arc::new(directory),
            Arc::new(nearest),
            Arc::new(api),
            sink.clone(),
        ));
        (service, sink)
    }

    fn koramangala_fixtures() -> (InMemoryPostalDirectory, InMemoryNearestOptions) {
        let directory = InMemoryPostalDirectory::new();
        directory.insert("560001", &[("Koramangala", "Karnataka")]);
        let nearest = InMemoryNearestOptions::new();
        nearest.insert(
            "560001",
            "Koramangala",
            NearestOptions {
                affiliated_shops: vec![Candidate::new("7", "Shop A")],
                ..NearestOptions::default()
            },
        );
        (directory, nearest)
    }

    #[tokio::test]
    async fn test_lead_conversion_end_to_end() {
        let (directory, nearest) = koramangala_fixtures();
        let (service, sink) = service_with(directory, nearest, InMemoryComplaintApi::new());

        let delivered = Arc::new(AtomicUsize::new(0));
        let counter = delivered.clone();
        service.on_registered(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        service.load_lead(lead()).await;

        // Derived state reconstructed proactively
        let form = service.snapshot();
        assert_eq!(form.area(), Some("Koramangala"));
        assert_eq!(form.affiliated_shops().len(), 1);

        service
            .select_category(AssignCategory::AffiliatedShop)
            .await;
        service.select_target("7".into()).await;

        let complaint = service.submit().await.unwrap();
        assert_eq!(complaint.name, "Asha");
        assert_eq!(delivered.load(Ordering::SeqCst), 1);

        // Closed-Success: form is reset
        assert!(service.snapshot().name().is_empty());

        // Loading toast replaced by the success toast
        let visible = sink.visible();
        let last = visible.last().unwrap();
        assert_eq!(last.kind, NotificationKind::Success);
        assert!(!visible.iter().any(|n| n.kind == NotificationKind::Loading));
    }

    #[tokio::test]
    async fn test_submit_without_required_fields_makes_no_call() {
        let api = InMemoryComplaintApi::new();
        let calls = api.call_counter();
        let (service, sink) = service_with(
            InMemoryPostalDirectory::new(),
            InMemoryNearestOptions::new(),
            api,
        );

        let result = service.submit().await;
        assert_eq!(result, Err(RegistrationError::ValidationFailed));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!service.snapshot().errors().is_empty());
        assert_eq!(sink.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_pincode_blocks_submission() {
        let (service, sink) = service_with(
            InMemoryPostalDirectory::new(),
            InMemoryNearestOptions::new(),
            InMemoryComplaintApi::new(),
        );

        service
            .edit_field(FormField::Pincode, "000000".into())
            .await;

        let form = service.snapshot();
        assert!(form.areas().is_empty());
        assert_eq!(form.errors()[&FormField::Pincode], "Pincode not found");
        assert!(sink
            .visible()
            .iter()
            .any(|n| n.kind == NotificationKind::Warning));
    }

    #[tokio::test]
    async fn test_validation_failure_keeps_form_for_correction() {
        let (directory, nearest) = koramangala_fixtures();
        let api = InMemoryComplaintApi::new();
        api.fail_with(RegistrationApiError::Validation(vec![(
            "email".into(),
            "already in use".into(),
        )]));
        let (service, sink) = service_with(directory, nearest, api);

        service.load_lead(lead()).await;
        service
            .select_category(AssignCategory::AffiliatedShop)
            .await;
        service.select_target("7".into()).await;

        let result = service.submit().await;
        assert_eq!(
            result,
            Err(RegistrationError::SubmissionFailed(
                "email: already in use".into()
            ))
        );

        // Values intact for correction, terminal toast replaced the loader
        let form = service.snapshot();
        assert_eq!(form.email(), "asha@example.com");
        assert!(!form.is_submitting());
        let visible = sink.visible();
        let last = visible.last().unwrap();
        assert_eq!(last.kind, NotificationKind::Error);
        assert!(last.message.contains("email"));
        assert!(!visible.iter().any(|n| n.kind == NotificationKind::Loading));
    }

    #[tokio::test]
    async fn test_rapid_double_submit_issues_one_create_call() {
        let (directory, nearest) = koramangala_fixtures();
        let api = InMemoryComplaintApi::new().with_latency_ms(50);
        let calls = api.call_counter();
        let (service, _sink) = service_with(directory, nearest, api);

        service.load_lead(lead()).await;
        service
            .select_category(AssignCategory::AffiliatedShop)
            .await;
        service.select_target("7".into()).await;

        let first = service.submit();
        let second = service.submit();
        let (first, second) = tokio::join!(first, second);

        let outcomes = [first, second];
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|outcome| outcome.is_ok())
                .count(),
            1
        );
        assert!(outcomes
            .iter()
            .any(|outcome| outcome == &Err(RegistrationError::AlreadySubmitting)));
    }

    #[tokio::test]
    async fn test_close_discards_state() {
        let (directory, nearest) = koramangala_fixtures();
        let (service, _sink) = service_with(directory, nearest, InMemoryComplaintApi::new());

        service.load_lead(lead()).await;
        assert!(!service.snapshot().name().is_empty());
        service.close().await;
        assert!(service.snapshot().name().is_empty());
    }
}
