/// Property-based tests using proptest
/// Tests invariants that should hold for all validation inputs
use proptest::prelude::*;
use rust_leads_api::models::{CompanySize, LeadPayload, LeadSource};
use rust_leads_api::validation::{
    is_valid_email, is_valid_website, validate_create, validate_update,
};

fn valid_payload() -> LeadPayload {
    LeadPayload {
        first_name: Some("Ann".to_string()),
        last_name: Some("Lee".to_string()),
        email: Some("ann@example.com".to_string()),
        company_name: Some("Acme".to_string()),
        company_size: Some("1-10".to_string()),
        website: None,
        lead_source: Some("website".to_string()),
        is_active: None,
    }
}

// Property: validation should never panic
proptest! {
    #[test]
    fn email_validation_never_panics(email in "\\PC*") {
        let _ = is_valid_email(&email);
    }

    #[test]
    fn website_validation_never_panics(website in "\\PC*") {
        let _ = is_valid_website(&website);
    }

    #[test]
    fn payload_validation_never_panics(
        first_name in proptest::option::of("\\PC*"),
        email in proptest::option::of("\\PC*"),
        company_size in proptest::option::of("\\PC*"),
        website in proptest::option::of("\\PC*"),
        lead_source in proptest::option::of("\\PC*"),
    ) {
        let payload = LeadPayload {
            first_name,
            email,
            company_size,
            website,
            lead_source,
            ..LeadPayload::default()
        };
        let _ = validate_create(&payload);
        let _ = validate_update(&payload);
    }
}

// Property: email normalization
proptest! {
    #[test]
    fn normalized_emails_are_lowercase(
        local in "[a-zA-Z][a-zA-Z0-9]{0,15}",
        domain in "[a-zA-Z][a-zA-Z0-9]{1,10}",
        tld in "[a-zA-Z]{2,4}"
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        let mut payload = valid_payload();
        payload.email = Some(email.clone());

        let new_lead = validate_create(&payload);
        prop_assert!(new_lead.is_ok(), "structurally valid email rejected: {}", email);
        prop_assert_eq!(new_lead.unwrap().email, email.to_lowercase());
    }

    #[test]
    fn emails_without_at_sign_rejected(email in "[a-zA-Z0-9.]{1,30}") {
        prop_assume!(!email.contains('@'));
        prop_assert!(!is_valid_email(&email));
    }
}

// Property: required-name rules
proptest! {
    #[test]
    fn names_over_fifty_chars_rejected(name in "[a-zA-Z]{51,80}") {
        let mut payload = valid_payload();
        payload.first_name = Some(name);

        let errors = validate_create(&payload).unwrap_err();
        prop_assert!(errors.iter().any(|e| e.field == "first_name"));
    }

    #[test]
    fn names_up_to_fifty_chars_accepted(name in "[a-zA-Z]{1,50}") {
        let mut payload = valid_payload();
        payload.first_name = Some(name.clone());

        let new_lead = validate_create(&payload);
        prop_assert!(new_lead.is_ok());
        prop_assert_eq!(new_lead.unwrap().first_name, name);
    }

    #[test]
    fn whitespace_only_required_fields_rejected(ws in "[ \\t]{0,10}") {
        let mut payload = valid_payload();
        payload.last_name = Some(ws);

        let errors = validate_create(&payload).unwrap_err();
        prop_assert!(errors.iter().any(|e| e.field == "last_name"));
    }
}

// Property: closed sets
proptest! {
    #[test]
    fn every_known_lead_source_accepted(source in prop::sample::select(LeadSource::ALL.to_vec())) {
        let mut payload = valid_payload();
        payload.lead_source = Some(source.as_str().to_string());
        prop_assert!(validate_create(&payload).is_ok());
    }

    #[test]
    fn unknown_lead_sources_rejected(source in "[a-z]{1,20}") {
        prop_assume!(LeadSource::parse(&source).is_none());

        let mut payload = valid_payload();
        payload.lead_source = Some(source);

        let errors = validate_create(&payload).unwrap_err();
        prop_assert!(errors.iter().any(|e| e.field == "lead_source"));
    }

    #[test]
    fn every_known_company_size_accepted(size in prop::sample::select(CompanySize::ALL.to_vec())) {
        let mut payload = valid_payload();
        payload.company_size = Some(size.as_str().to_string());
        prop_assert!(validate_create(&payload).is_ok());
    }

    #[test]
    fn numeric_company_sizes_rejected(size in 0u32..1_000_000u32) {
        // The API takes bucket labels, never raw head counts
        prop_assume!(CompanySize::parse(&size.to_string()).is_none());

        let mut payload = valid_payload();
        payload.company_size = Some(size.to_string());

        let errors = validate_create(&payload).unwrap_err();
        prop_assert!(errors.iter().any(|e| e.field == "company_size"));
    }
}

// Property: website scheme restrictions
proptest! {
    #[test]
    fn http_and_https_websites_accepted(
        host in "[a-z][a-z0-9]{1,15}",
        tld in "[a-z]{2,4}",
        secure in proptest::bool::ANY
    ) {
        let scheme = if secure { "https" } else { "http" };
        let website = format!("{}://{}.{}", scheme, host, tld);

        let mut payload = valid_payload();
        payload.website = Some(website.clone());

        let new_lead = validate_create(&payload);
        prop_assert!(new_lead.is_ok());
        prop_assert_eq!(new_lead.unwrap().website, Some(website));
    }

    #[test]
    fn non_http_schemes_rejected(
        scheme in prop::sample::select(vec!["ftp", "file", "ws", "gopher"]),
        host in "[a-z]{2,10}"
    ) {
        let mut payload = valid_payload();
        payload.website = Some(format!("{}://{}.com", scheme, host));

        let errors = validate_create(&payload).unwrap_err();
        prop_assert!(errors.iter().any(|e| e.field == "website"));
    }
}
