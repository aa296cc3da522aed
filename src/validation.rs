//! Synchronous draft checks run before any request is built.

use crate::models::{
    AgentDraft, InterventionDraft, LegalRepresentative, ProspectDraft, TaskDraft,
    MAX_LEGAL_REPRESENTATIVES,
};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-level errors in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Aggregate alert text, one line per field.
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    fn email(&mut self, field: &str, value: Option<&str>) {
        let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        if !looks_like_email(v) {
            self.push(field, "is not a valid email address");
        }
    }

    fn digits(&mut self, field: &str, value: Option<&str>, len: usize) {
        let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        if v.len() != len || !v.chars().all(|c| c.is_ascii_digit()) {
            self.push(field, format!("must be {} digits", len));
        }
    }

    fn alphanumeric(&mut self, field: &str, value: Option<&str>, len: usize) {
        let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        if v.len() != len || !v.chars().all(|c| c.is_ascii_alphanumeric()) {
            self.push(field, format!("must be {} letters or digits", len));
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field.as_str()).collect();
        write!(f, "{}", fields.join(", "))
    }
}

fn looks_like_email(v: &str) -> bool {
    let Some((local, domain)) = v.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !v.contains(char::is_whitespace)
}

/// Implemented by every draft the console submits.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validate for AgentDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.required("code", &self.code);
        errors.required("name", &self.name);
        errors.required("surname", &self.surname);
        errors.email("email", self.email.as_deref());
        errors.into_result()
    }
}

impl Validate for TaskDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.required("title", &self.title);
        errors.required("customer.name", &self.customer.name);
        errors.email("customer.email", self.customer.email.as_deref());
        errors.into_result()
    }
}

impl Validate for InterventionDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.required("description", &self.description);
        errors.required("author", &self.author);
        if self.minutes == 0 {
            errors.push("minutes", "must be greater than zero");
        }
        errors.into_result()
    }
}

fn validate_representative(errors: &mut ValidationErrors, i: usize, rep: &LegalRepresentative) {
    let prefix = format!("legal_representatives[{}]", i);
    errors.required(&format!("{}.surname", prefix), &rep.surname);
    errors.alphanumeric(&format!("{}.fiscal_code", prefix), rep.fiscal_code.as_deref(), 16);
    errors.email(&format!("{}.email", prefix), rep.email.as_deref());
}

impl Validate for ProspectDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.required("company.name", &self.company.name);
        errors.digits("company.vat_number", self.company.vat_number.as_deref(), 11);
        errors.email("company.pec", self.company.pec.as_deref());
        if self.legal_representatives.len() > MAX_LEGAL_REPRESENTATIVES {
            errors.push(
                "legal_representatives",
                format!("at most {} allowed", MAX_LEGAL_REPRESENTATIVES),
            );
        }
        for (i, rep) in self.legal_representatives.iter().enumerate() {
            validate_representative(&mut errors, i, rep);
        }
        errors.into_result()
    }
}
