use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::lead_models::Lead;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: fullName, email, and phone are required";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit lead. Please try again later.";
pub const SUBMIT_OK_MESSAGE: &str = "Lead submitted successfully";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// The lead form sends features either as free text or as a list of picks.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Features {
    Text(String),
    List(Vec<String>),
}

impl Features {
    fn joined(self) -> String {
        match self {
            Features::Text(text) => text,
            Features::List(items) => items.join(", "),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub property: Option<String>,
    pub residency: Option<String>,
    pub features: Option<Features>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadValidationError {
    MissingRequired,
    InvalidEmail,
}

impl LeadValidationError {
    pub fn message(self) -> &'static str {
        match self {
            LeadValidationError::MissingRequired => MISSING_FIELDS_MESSAGE,
            LeadValidationError::InvalidEmail => INVALID_EMAIL_MESSAGE,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl LeadRequest {
    pub fn into_lead(self) -> Result<Lead, LeadValidationError> {
        // The address is matched as sent, so surrounding whitespace is invalid.
        let raw_email = self.email.clone().unwrap_or_default();
        let (Some(full_name), Some(email), Some(phone)) =
            (present(self.full_name), present(self.email), present(self.phone))
        else {
            return Err(LeadValidationError::MissingRequired);
        };
        if !EMAIL_RE.is_match(&raw_email) {
            return Err(LeadValidationError::InvalidEmail);
        }

        Ok(Lead {
            full_name,
            email,
            phone,
            property: present(self.property),
            residency: present(self.residency),
            features: present(self.features.map(Features::joined)),
            source: present(self.source),
            url: present(self.url),
            user_agent: present(self.user_agent),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmitted {
    pub success: bool,
    pub message: &'static str,
    pub rows_updated: u64,
}
