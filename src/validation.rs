//! Field validation for lead write payloads.
//!
//! One rule set serves both the create and update paths, so the two can
//! never drift apart. Violations are collected per field in a fixed order
//! (first_name, last_name, email, company_name, company_size, website,
//! lead_source) rather than short-circuiting on the first failure.

use regex::Regex;
use url::Url;

use crate::errors::FieldError;
use crate::models::{CompanySize, LeadChanges, LeadPayload, LeadSource, NewLead};

const NAME_MAX: usize = 50;
const COMPANY_NAME_MAX: usize = 100;

/// Validates a create payload.
///
/// Every required field must be present and well-formed. On success the
/// returned [`NewLead`] carries trimmed strings, a lowercased email, and
/// `is_active` defaulted to true.
pub fn validate_create(payload: &LeadPayload) -> Result<NewLead, Vec<FieldError>> {
    let mut errors = Vec::new();

    let first_name = checked_name(
        "first_name",
        "First name",
        payload.first_name.as_deref(),
        NAME_MAX,
        &mut errors,
    );
    let last_name = checked_name(
        "last_name",
        "Last name",
        payload.last_name.as_deref(),
        NAME_MAX,
        &mut errors,
    );
    let email = checked_email(payload.email.as_deref(), &mut errors);
    let company_name = checked_name(
        "company_name",
        "Company name",
        payload.company_name.as_deref(),
        COMPANY_NAME_MAX,
        &mut errors,
    );
    let company_size = checked_company_size(payload.company_size.as_deref(), &mut errors);
    let website = checked_website(payload.website.as_deref(), &mut errors);
    let lead_source = checked_lead_source(payload.lead_source.as_deref(), &mut errors);

    match (
        first_name,
        last_name,
        email,
        company_name,
        company_size,
        lead_source,
    ) {
        (
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(company_name),
            Some(company_size),
            Some(lead_source),
        ) if errors.is_empty() => Ok(NewLead {
            first_name,
            last_name,
            email,
            company_name,
            company_size,
            website,
            lead_source,
            is_active: payload.is_active.unwrap_or(true),
        }),
        _ => Err(errors),
    }
}

/// Validates an update payload.
///
/// Only the fields present in the payload are checked and normalized;
/// absent fields keep their stored values (partial-update semantics).
/// A field that is present but empty still fails its required rule, so an
/// update cannot blank out a required column.
pub fn validate_update(payload: &LeadPayload) -> Result<LeadChanges, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut changes = LeadChanges::default();

    if payload.first_name.is_some() {
        changes.first_name = checked_name(
            "first_name",
            "First name",
            payload.first_name.as_deref(),
            NAME_MAX,
            &mut errors,
        );
    }
    if payload.last_name.is_some() {
        changes.last_name = checked_name(
            "last_name",
            "Last name",
            payload.last_name.as_deref(),
            NAME_MAX,
            &mut errors,
        );
    }
    if payload.email.is_some() {
        changes.email = checked_email(payload.email.as_deref(), &mut errors);
    }
    if payload.company_name.is_some() {
        changes.company_name = checked_name(
            "company_name",
            "Company name",
            payload.company_name.as_deref(),
            COMPANY_NAME_MAX,
            &mut errors,
        );
    }
    if payload.company_size.is_some() {
        changes.company_size = checked_company_size(payload.company_size.as_deref(), &mut errors);
    }
    if payload.website.is_some() {
        changes.website = checked_website(payload.website.as_deref(), &mut errors);
    }
    if payload.lead_source.is_some() {
        changes.lead_source = checked_lead_source(payload.lead_source.as_deref(), &mut errors);
    }
    changes.is_active = payload.is_active;

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

/// Validate email address format.
///
/// Uses a simplified RFC 5322 pattern: local@domain.tld.
pub fn is_valid_email(email: &str) -> bool {
    // Basic checks
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // RFC 5322 simplified email regex
    // Matches: local@domain.tld
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    email_regex.is_match(email)
}

/// Validate a website URL: must parse as an absolute URL with an http or
/// https scheme.
pub fn is_valid_website(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

fn checked_name(
    field: &str,
    label: &str,
    value: Option<&str>,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let trimmed = value.unwrap_or_default().trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", label)));
        return None;
    }
    if trimmed.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("{} cannot be more than {} characters", label, max),
        ));
        return None;
    }
    Some(trimmed.to_string())
}

fn checked_email(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = value.unwrap_or_default().trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
        return None;
    }
    if !is_valid_email(trimmed) {
        errors.push(FieldError::new("email", "Please enter a valid email"));
        return None;
    }
    // Canonical form is lowercase; the unique index relies on it
    Some(trimmed.to_lowercase())
}

fn checked_company_size(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = value.unwrap_or_default().trim();
    match CompanySize::parse(trimmed) {
        Some(size) => Some(size.as_str().to_string()),
        None => {
            errors.push(FieldError::new(
                "company_size",
                format!(
                    "Company size must be one of: {}",
                    CompanySize::ALL.map(|s| s.as_str()).join(", ")
                ),
            ));
            None
        }
    }
}

fn checked_website(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = match value {
        Some(raw) => raw.trim(),
        None => return None,
    };
    if trimmed.is_empty() || !is_valid_website(trimmed) {
        errors.push(FieldError::new(
            "website",
            "Please enter a valid website URL (must start with http:// or https://)",
        ));
        return None;
    }
    Some(trimmed.to_string())
}

fn checked_lead_source(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    let trimmed = value.unwrap_or_default().trim();
    match LeadSource::parse(trimmed) {
        Some(source) => Some(source.as_str().to_string()),
        None => {
            errors.push(FieldError::new(
                "lead_source",
                format!(
                    "Lead source must be one of: {}",
                    LeadSource::ALL.map(|s| s.as_str()).join(", ")
                ),
            ));
            None
        }
    }
}
