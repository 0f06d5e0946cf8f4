use std::fmt;

use serde::Deserialize;
use url::{form_urlencoded, Url};

use crate::config::{FormMethod, SiteConfig};

const GENERIC_FAILURE_MESSAGE: &str = "Oops! There was a problem submitting your form";
const CONNECTIVITY_FAILURE_MESSAGE: &str =
    "Oops! There was a problem submitting your form. Please check your connection.";
const UNVERIFIED_ENDPOINT_MARKER: &str = "isn't set up yet";

pub const ERROR_BORDER_STYLE: &str = "border-color: #ff6b6b;";
pub const SUBMIT_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ValidContact {
    pub fn form_encoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(ContactField::Name.name(), &self.name)
            .append_pair(ContactField::Email.name(), &self.email)
            .append_pair(ContactField::Message.name(), &self.message)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactValidationError {
    MissingFields(Vec<ContactField>),
    InvalidEmail,
}

impl ContactValidationError {
    pub fn flagged_fields(&self) -> Vec<ContactField> {
        match self {
            Self::MissingFields(fields) => fields.clone(),
            Self::InvalidEmail => vec![ContactField::Email],
        }
    }

    pub fn focus_field(&self) -> Option<ContactField> {
        match self {
            Self::MissingFields(_) => None,
            Self::InvalidEmail => Some(ContactField::Email),
        }
    }
}

pub fn validate(fields: &ContactFields) -> Result<ValidContact, ContactValidationError> {
    let missing: Vec<ContactField> = ContactField::ALL
        .into_iter()
        .filter(|field| fields.get(*field).trim().is_empty())
        .collect();

    if !missing.is_empty() {
        return Err(ContactValidationError::MissingFields(missing));
    }

    let email = fields.email.trim();
    if !is_valid_email(email) {
        return Err(ContactValidationError::InvalidEmail);
    }

    Ok(ValidContact {
        name: fields.name.trim().to_string(),
        email: email.to_string(),
        message: fields.message.trim().to_string(),
    })
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, and a dot in the
/// domain with something on both sides of it.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .filter(|(_, ch)| *ch == '.')
        .any(|(index, _)| index > 0 && index + 1 < domain.len())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FlagReason {
    Empty,
    InvalidEmail,
}

/// Inline error flags. An empty-field flag clears on the next edit of that
/// field; the invalid-email flag holds until the next submit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldFlags {
    name: Option<FlagReason>,
    email: Option<FlagReason>,
    message: Option<FlagReason>,
}

impl FieldFlags {
    pub fn from_error(error: &ContactValidationError) -> Self {
        let mut flags = Self::default();
        match error {
            ContactValidationError::MissingFields(fields) => {
                for field in fields {
                    *flags.slot(*field) = Some(FlagReason::Empty);
                }
            }
            ContactValidationError::InvalidEmail => flags.email = Some(FlagReason::InvalidEmail),
        }
        flags
    }

    fn slot(&mut self, field: ContactField) -> &mut Option<FlagReason> {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    fn reason(self, field: ContactField) -> Option<FlagReason> {
        match field {
            ContactField::Name => self.name,
            ContactField::Email => self.email,
            ContactField::Message => self.message,
        }
    }

    pub fn is_flagged(self, field: ContactField) -> bool {
        self.reason(field).is_some()
    }

    pub fn on_input(&mut self, field: ContactField) {
        if self.reason(field) == Some(FlagReason::Empty) {
            *self.slot(field) = None;
        }
    }

    pub fn style(self, field: ContactField) -> Option<&'static str> {
        self.is_flagged(field).then_some(ERROR_BORDER_STYLE)
    }
}

/// Field values and their flags, updated one edit at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub fields: ContactFields,
    pub flags: FieldFlags,
}

impl ContactDraft {
    pub fn edit(&mut self, field: ContactField, value: String) {
        self.fields.set(field, value);
        self.flags.on_input(field);
    }

    /// Replaces every flag with the outcome of the latest submit.
    pub fn record_submit(&mut self, error: Option<&ContactValidationError>) {
        self.flags = error.map(FieldFlags::from_error).unwrap_or_default();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Ready,
    Sending,
    Sent,
}

impl SubmitPhase {
    pub fn is_disabled(self) -> bool {
        !matches!(self, Self::Ready)
    }

    pub fn shows_success(self) -> bool {
        matches!(self, Self::Sent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSubmission {
    pub url: Url,
    pub method: FormMethod,
    pub body: String,
}

impl FormSubmission {
    pub fn new(config: &SiteConfig, contact: &ValidContact) -> Self {
        let body = contact.form_encoded();
        let mut url = config.form_endpoint.clone();

        if config.form_method == FormMethod::Get {
            url.set_query(Some(&body));
        }

        Self {
            url,
            method: config.form_method,
            body,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportFailure(pub String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    Rejected { status: u16, message: String },
    Transport(String),
}

impl SubmitError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Transport(_) => CONNECTIVITY_FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, message } => write!(f, "rejected with {status}: {message}"),
            Self::Transport(reason) => write!(f, "transport failure: {reason}"),
        }
    }
}

impl std::error::Error for SubmitError {}

pub trait FormTransport {
    async fn send(&self, submission: &FormSubmission) -> Result<TransportResponse, TransportFailure>;
}

pub async fn submit_contact<T: FormTransport>(
    transport: &T,
    config: &SiteConfig,
    contact: &ValidContact,
) -> Result<(), SubmitError> {
    let submission = FormSubmission::new(config, contact);
    let response = transport
        .send(&submission)
        .await
        .map_err(|failure| SubmitError::Transport(failure.0))?;

    if response.ok {
        return Ok(());
    }

    Err(SubmitError::Rejected {
        status: response.status,
        message: rejection_message(&response.body, &config.activation_email),
    })
}

#[derive(Deserialize)]
struct RejectionBody {
    error: Option<String>,
    errors: Option<Vec<RejectionFieldError>>,
}

#[derive(Deserialize)]
struct RejectionFieldError {
    message: Option<String>,
}

pub fn rejection_message(body: &str, activation_email: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<RejectionBody>(body) else {
        return GENERIC_FAILURE_MESSAGE.to_string();
    };

    if parsed
        .error
        .as_deref()
        .is_some_and(|error| error.contains(UNVERIFIED_ENDPOINT_MARKER))
    {
        return format!("Verification Required: Please check {activation_email} to activate this form!");
    }

    let joined = parsed
        .errors
        .unwrap_or_default()
        .into_iter()
        .filter_map(|error| error.message)
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingTransport {
        outcome: Result<TransportResponse, TransportFailure>,
        sent: RefCell<Vec<FormSubmission>>,
    }

    impl RecordingTransport {
        fn responding(ok: bool, status: u16, body: &str) -> Self {
            Self {
                outcome: Ok(TransportResponse {
                    ok,
                    status,
                    body: body.to_string(),
                }),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                outcome: Err(TransportFailure("Failed to fetch".to_string())),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl FormTransport for RecordingTransport {
        async fn send(&self, submission: &FormSubmission) -> Result<TransportResponse, TransportFailure> {
            self.sent.borrow_mut().push(submission.clone());
            self.outcome.clone()
        }
    }

    fn fields(name: &str, email: &str, message: &str) -> ContactFields {
        ContactFields {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    fn jane() -> ValidContact {
        validate(&fields("Jane", "jane@x.com", "Hello")).expect("valid input")
    }

    #[test]
    fn empty_fields_are_each_flagged() {
        let error = validate(&fields("  ", "jane@x.com", "")).expect_err("missing fields");
        assert_eq!(
            error,
            ContactValidationError::MissingFields(vec![ContactField::Name, ContactField::Message])
        );
        assert_eq!(error.focus_field(), None);
    }

    #[test]
    fn malformed_email_is_flagged_and_focused() {
        let error = validate(&fields("Jane", "abc@", "Hello")).expect_err("bad email");
        assert_eq!(error, ContactValidationError::InvalidEmail);
        assert_eq!(error.flagged_fields(), vec![ContactField::Email]);
        assert_eq!(error.focus_field(), Some(ContactField::Email));
    }

    #[test]
    fn email_shape_check() {
        for valid in ["jane@x.com", "a.b@c.d.e", "x+tag@sub.example.org"] {
            assert!(is_valid_email(valid), "{valid}");
        }
        for invalid in ["abc@", "@x.com", "jane@com", "jane@.com", "jane@x.", "ja ne@x.com", "a@b@c.com"] {
            assert!(!is_valid_email(invalid), "{invalid}");
        }
    }

    #[test]
    fn valid_input_is_trimmed() {
        let contact = validate(&fields(" Jane ", " jane@x.com", "Hello\n")).expect("valid input");
        assert_eq!(contact, jane());
        assert_eq!(contact.form_encoded(), "name=Jane&email=jane%40x.com&message=Hello");
    }

    #[test]
    fn empty_field_flags_clear_on_their_own_edit() {
        let mut draft = ContactDraft::default();
        let error = validate(&draft.fields).expect_err("all empty");
        draft.record_submit(Some(&error));

        draft.edit(ContactField::Name, "J".to_string());
        assert!(!draft.flags.is_flagged(ContactField::Name));
        assert!(draft.flags.is_flagged(ContactField::Email));
        assert_eq!(draft.flags.style(ContactField::Email), Some(ERROR_BORDER_STYLE));
        assert_eq!(draft.flags.style(ContactField::Name), None);
    }

    #[test]
    fn invalid_email_flag_holds_until_next_submit() {
        let mut draft = ContactDraft::default();
        draft.edit(ContactField::Name, "Jane".to_string());
        draft.edit(ContactField::Email, "jane@".to_string());
        draft.edit(ContactField::Message, "Hello".to_string());

        let error = validate(&draft.fields).expect_err("bad email");
        draft.record_submit(Some(&error));
        draft.edit(ContactField::Email, "jane@x".to_string());
        assert!(draft.flags.is_flagged(ContactField::Email));

        draft.edit(ContactField::Email, "jane@x.com".to_string());
        let result = validate(&draft.fields);
        draft.record_submit(result.as_ref().err());
        assert!(result.is_ok());
        assert!(ContactField::ALL.into_iter().all(|field| !draft.flags.is_flagged(field)));
    }

    #[test]
    fn back_to_back_edits_all_survive() {
        let mut draft = ContactDraft::default();
        draft.edit(ContactField::Name, "Jane".to_string());
        draft.edit(ContactField::Email, "jane@x.com".to_string());
        draft.edit(ContactField::Message, "Hello".to_string());

        assert_eq!(validate(&draft.fields), Ok(jane()));

        draft.clear();
        assert_eq!(draft, ContactDraft::default());
    }

    #[test]
    fn rejection_messages_follow_payload() {
        let unverified = r#"{"error":"This form isn't set up yet. Check your email."}"#;
        assert_eq!(
            rejection_message(unverified, "owner@example.com"),
            "Verification Required: Please check owner@example.com to activate this form!"
        );

        let field_errors = r#"{"errors":[{"message":"email is invalid"},{"message":"message is too short"}]}"#;
        assert_eq!(
            rejection_message(field_errors, "owner@example.com"),
            "email is invalid, message is too short"
        );

        assert_eq!(rejection_message(r#"{"error":"rate limited"}"#, "o@e.com"), GENERIC_FAILURE_MESSAGE);
        assert_eq!(rejection_message("<html>502</html>", "o@e.com"), GENERIC_FAILURE_MESSAGE);
        assert_eq!(rejection_message(r#"{"errors":[]}"#, "o@e.com"), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn valid_submission_sends_one_request_with_fields() {
        let transport = RecordingTransport::responding(true, 200, r#"{"ok":true}"#);
        let config = SiteConfig::default();

        submit_contact(&transport, &config, &jane()).await.expect("accepted");

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, FormMethod::Post);
        assert_eq!(sent[0].url, config.form_endpoint);
        assert_eq!(sent[0].body, "name=Jane&email=jane%40x.com&message=Hello");
    }

    #[tokio::test]
    async fn get_submissions_carry_fields_in_query() {
        let transport = RecordingTransport::responding(true, 200, "");
        let config = SiteConfig {
            form_method: FormMethod::Get,
            ..SiteConfig::default()
        };

        submit_contact(&transport, &config, &jane()).await.expect("accepted");

        let sent = transport.sent.borrow();
        assert_eq!(sent[0].url.query(), Some("name=Jane&email=jane%40x.com&message=Hello"));
    }

    #[tokio::test]
    async fn rejected_submission_surfaces_server_message() {
        let transport =
            RecordingTransport::responding(false, 422, r#"{"errors":[{"message":"email is invalid"}]}"#);

        let error = submit_contact(&transport, &SiteConfig::default(), &jane())
            .await
            .expect_err("rejected");

        assert_eq!(
            error,
            SubmitError::Rejected {
                status: 422,
                message: "email is invalid".to_string()
            }
        );
        assert_eq!(error.user_message(), "email is invalid");
    }

    #[tokio::test]
    async fn transport_failure_uses_connectivity_message() {
        let transport = RecordingTransport::failing();

        let error = submit_contact(&transport, &SiteConfig::default(), &jane())
            .await
            .expect_err("no response");

        assert!(matches!(error, SubmitError::Transport(_)));
        assert_eq!(error.user_message(), CONNECTIVITY_FAILURE_MESSAGE);
    }

    #[test]
    fn submit_phase_controls_button() {
        assert!(!SubmitPhase::Ready.is_disabled());
        assert!(SubmitPhase::Sending.is_disabled());
        assert!(SubmitPhase::Sent.shows_success());
    }
}
