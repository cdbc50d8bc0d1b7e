//! Submission form input and its validated form

use super::ValidationError;

pub const NAME_FIELD: &str = "name";
pub const EMAIL_FIELD: &str = "email";
pub const MESSAGE_FIELD: &str = "message";

/// Raw text parts of a submission as they arrive from the client.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl SubmissionForm {
    /// Whether `field` names one of the text parts of the form.
    pub fn is_text_field(field: &str) -> bool {
        matches!(field, NAME_FIELD | EMAIL_FIELD | MESSAGE_FIELD)
    }

    /// Record a text part. Repeated parts overwrite earlier ones; unknown
    /// parts are ignored.
    pub fn set(&mut self, field: &str, value: String) {
        let slot = match field {
            NAME_FIELD => &mut self.name,
            EMAIL_FIELD => &mut self.email,
            MESSAGE_FIELD => &mut self.message,
            _ => return,
        };
        *slot = Some(value);
    }
}

/// A submission that passed presence checks and can be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    name: String,
    email: String,
    message: String,
}

impl NewSubmission {
    /// Validate a raw form.
    ///
    /// Every field must be present and non-empty. No other checks are made:
    /// the email is not parsed and whitespace counts as content.
    ///
    /// # Example
    /// ```
    /// use formdrop_server::models::{NewSubmission, SubmissionForm};
    ///
    /// let form = SubmissionForm {
    ///     name: Some("Alice".into()),
    ///     email: Some("a@x.com".into()),
    ///     message: Some("Hi".into()),
    /// };
    /// assert!(NewSubmission::from_form(form).is_ok());
    /// assert!(NewSubmission::from_form(SubmissionForm::default()).is_err());
    /// ```
    pub fn from_form(form: SubmissionForm) -> Result<Self, ValidationError> {
        let mut missing = Vec::new();
        let name = required(form.name, NAME_FIELD, &mut missing);
        let email = required(form.email, EMAIL_FIELD, &mut missing);
        let message = required(form.message, MESSAGE_FIELD, &mut missing);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(Self {
                name,
                email,
                message,
            }),
            _ => Err(ValidationError::IncompleteForm { missing }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(field);
            None
        }
    }
}
