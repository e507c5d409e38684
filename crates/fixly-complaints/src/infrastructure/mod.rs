//! In-memory port implementations for tests and local wiring.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use crate::application::payload::ComplaintPayload;
use crate::domain::aggregates::{Complaint, ComplaintStatus};
use crate::domain::value_objects::Pincode;
use crate::ports::outbound::{
    ComplaintApi, DirectoryError, NearestError, NearestOptions, NearestOptionsProvider,
    Notification, NotificationSink, PostOffice, PostalDirectory, RegistrationApiError,
};

/// In-memory postal directory keyed by pincode
#[derive(Default)]
pub struct InMemoryPostalDirectory {
    records: RwLock<HashMap<String, Vec<PostOffice>>>,
}

impl InMemoryPostalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pincode with `(area, state)` pairs
    pub fn insert(&self, pincode: &str, offices: &[(&str, &str)]) {
        let offices = offices
            .iter()
            .map(|(name, state)| PostOffice {
                name: name.to_string(),
                state: state.to_string(),
            })
            .collect();
        self.records.write().insert(pincode.to_string(), offices);
    }
}

#[async_trait]
impl PostalDirectory for InMemoryPostalDirectory {
    async fn lookup(&self, pincode: &Pincode) -> Result<Vec<PostOffice>, DirectoryError> {
        self.records
            .read()
            .get(pincode.as_str())
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }
}

/// In-memory nearest-options lookup keyed by `(pincode, area)`
#[derive(Default)]
pub struct InMemoryNearestOptions {
    options: RwLock<HashMap<(String, String), NearestOptions>>,
}

impl InMemoryNearestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, pincode: &str, area: &str, options: NearestOptions) {
        self.options
            .write()
            .insert((pincode.to_string(), area.to_string()), options);
    }
}

#[async_trait]
impl NearestOptionsProvider for InMemoryNearestOptions {
    async fn nearest(&self, pincode: &Pincode, area: &str) -> Result<NearestOptions, NearestError> {
        Ok(self
            .options
            .read()
            .get(&(pincode.as_str().to_string(), area.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

/// In-memory complaint API: records every payload, counts calls, and can
/// be scripted to fail or to respond slowly
pub struct InMemoryComplaintApi {
    payloads: Mutex<Vec<ComplaintPayload>>,
    calls: Arc<AtomicUsize>,
    failure: Mutex<Option<RegistrationApiError>>,
    latency_ms: u64,
    next_id: AtomicUsize,
}

impl Default for InMemoryComplaintApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryComplaintApi {
    pub fn new() -> Self {
        Self {
            payloads: Mutex::new(Vec::new()),
            calls: Arc::new(AtomicUsize::new(0)),
            failure: Mutex::new(None),
            latency_ms: 0,
            next_id: AtomicUsize::new(100),
        }
    }

    /// Respond after a delay, for in-flight-guard tests
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Fail every subsequent register call with the given error
    pub fn fail_with(&self, error: RegistrationApiError) {
        *self.failure.lock() = Some(error);
    }

    /// Shared counter of register calls actually received
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    /// Payloads received so far
    pub fn payloads(&self) -> Vec<ComplaintPayload> {
        self.payloads.lock().clone()
    }
}

#[async_trait]
impl ComplaintApi for InMemoryComplaintApi {
    async fn register(
        &self,
        _lead_id: Option<&str>,
        payload: &ComplaintPayload,
    ) -> Result<Complaint, RegistrationApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
        self.payloads.lock().push(payload.clone());

        if let Some(error) = self.failure.lock().clone() {
            return Err(error);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(Complaint {
            id: id.to_string(),
            name: payload.name.clone(),
            phone: payload.phone.clone(),
            email: payload.email.clone(),
            model: payload.model.clone(),
            issue: payload.issue.clone(),
            status: ComplaintStatus::Assigned,
            created_at: Some(chrono::Utc::now()),
        })
    }
}

/// Records notifications and applies the replace-by-id contract so tests
/// can assert on the stream the operator would actually see
#[derive(Default)]
pub struct RecordingNotificationSink {
    all: Mutex<Vec<Notification>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification ever emitted, in order
    pub fn all(&self) -> Vec<Notification> {
        self.all.lock().clone()
    }

    /// The visible stream after replace-by-id coalescing: a notification
    /// with an id supersedes any earlier one carrying the same id
    pub fn visible(&self) -> Vec<Notification> {
        let all = self.all.lock();
        let mut visible: Vec<Notification> = Vec::new();
        for notification in all.iter() {
            match &notification.id {
                Some(id) => {
                    if let Some(slot) = visible
                        .iter_mut()
                        .find(|v| v.id.as_deref() == Some(id.as_str()))
                    {
                        *slot = notification.clone();
                    } else {
                        visible.push(notification.clone());
                    }
                }
                None => visible.push(notification.clone()),
            }
        }
        visible
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notification: Notification) {
        self.all.lock().push(notification);
    }
}

/// Sink that drops everything, for wiring where no UI is attached
#[derive(Default)]
pub struct NullNotificationSink;

impl NotificationSink for NullNotificationSink {
    fn notify(&self, _notification: Notification) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_miss_is_not_found() {
        let directory = InMemoryPostalDirectory::new();
        let pincode = Pincode::new("000000").unwrap();
        assert_eq!(
            directory.lookup(&pincode).await,
            Err(DirectoryError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_directory_hit_returns_offices() {
        let directory = InMemoryPostalDirectory::new();
        directory.insert("560001", &[("Koramangala", "Karnataka")]);
        let pincode = Pincode::new("560001").unwrap();
        let offices = directory.lookup(&pincode).await.unwrap();
        assert_eq!(offices.len(), 1);
        assert_eq!(offices[0].name, "Koramangala");
    }

    #[test]
    fn test_replace_by_id_coalescing() {
        let sink = RecordingNotificationSink::new();
        sink.notify(Notification::loading("working...").with_id("t1"));
        sink.notify(Notification::warning("unrelated"));
        sink.notify(Notification::success("done").with_id("t1"));

        let visible = sink.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].message, "done");
        assert_eq!(sink.all().len(), 3);
    }
}
