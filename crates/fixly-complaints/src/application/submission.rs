//! Submission failure classification
//!
//! Turns the structured failure shapes of the registration endpoint into
//! the single user-facing message shown in the terminal error notification.

use crate::ports::outbound::RegistrationApiError;

/// User-facing message for a failed registration. For field-keyed
/// validation maps the first offending field is surfaced.
pub fn failure_message(error: &RegistrationApiError) -> String {
    match error {
        RegistrationApiError::Rejected(detail) => detail.clone(),
        RegistrationApiError::Validation(fields) => match fields.first() {
            Some((field, message)) => format!("{field}: {message}"),
            None => "Registration failed".to_string(),
        },
        RegistrationApiError::NoResponse => "No response from server".to_string(),
        RegistrationApiError::Transport(detail) => format!("Request failed: {detail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_message_passes_through() {
        let msg = failure_message(&RegistrationApiError::Rejected(
            "Lead already converted".into(),
        ));
        assert_eq!(msg, "Lead already converted");
    }

    #[test]
    fn test_first_offending_field_is_surfaced() {
        let msg = failure_message(&RegistrationApiError::Validation(vec![
            ("email".into(), "already in use".into()),
            ("phone".into(), "already in use".into()),
        ]));
        assert_eq!(msg, "email: already in use");
    }

    #[test]
    fn test_no_response_message() {
        assert_eq!(
            failure_message(&RegistrationApiError::NoResponse),
            "No response from server"
        );
    }

    #[test]
    fn test_empty_validation_map_falls_back() {
        let msg = failure_message(&RegistrationApiError::Validation(vec![]));
        assert_eq!(msg, "Registration failed");
    }
}
