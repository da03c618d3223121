//! Contact form
//!
//! Local form state with required-field validation. Submitting only logs the
//! message and clears the form; nothing is sent anywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "first name",
            FormField::LastName => "last name",
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("please fill all required fields (missing: {})", join(.0))]
    MissingFields(Vec<FormField>),
}

fn join(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(FormField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Required fields that are empty or whitespace
    pub fn missing(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    /// Validate, log, and reset. Returns the submitted values.
    ///
    /// On error the form keeps what was typed.
    pub fn submit(&mut self) -> Result<ContactForm, FormError> {
        if let Err(err) = self.validate() {
            tracing::warn!("Contact form rejected: {}", err);
            return Err(err);
        }
        let submitted = std::mem::take(self);
        tracing::info!(
            first_name = %submitted.first_name,
            last_name = %submitted.last_name,
            email = %submitted.email,
            subject = %submitted.subject,
            "Contact form submitted"
        );
        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(FormField::FirstName, "Ada");
        form.set(FormField::LastName, "Lovelace");
        form.set(FormField::Email, "ada@example.com");
        form.set(FormField::Subject, "Hello");
        form.set(FormField::Message, "Nice site");
        form
    }

    #[test]
    fn test_submit_resets() {
        let mut form = filled();
        let sent = form.submit().unwrap();
        assert_eq!(sent.email, "ada@example.com");
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn test_missing_fields_keep_input() {
        let mut form = filled();
        form.set(FormField::Subject, "   ");
        form.set(FormField::Message, "");

        let err = form.submit().unwrap_err();
        assert_eq!(
            err,
            FormError::MissingFields(vec![FormField::Subject, FormField::Message])
        );
        assert_eq!(form.first_name, "Ada");
        assert_eq!(
            err.to_string(),
            "please fill all required fields (missing: subject, message)"
        );
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        assert_eq!(
            ContactForm::new().missing(),
            FormField::ALL.to_vec()
        );
    }
}
