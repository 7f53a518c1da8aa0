use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Database Models ============

/// A lead: a prospective customer contact with company metadata.
///
/// One row per lead in the `leads` table. The `email` column carries a
/// unique index; validation lowercases emails before they get here, so the
/// index is case-insensitive in effect.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier, generated by the database.
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Stored lowercase; uniqueness enforced by the database.
    pub email: String,
    pub company_name: String,
    /// One of the six size buckets (see [`CompanySize`]).
    pub company_size: String,
    pub website: Option<String>,
    /// One of the eight acquisition channels (see [`LeadSource`]).
    pub lead_source: String,
    pub is_active: bool,
    /// Timestamp of creation.
    pub created_at: DateTime<Utc>,
    /// Timestamp of last update.
    pub updated_at: DateTime<Utc>,
}

/// Acquisition channel through which a lead was obtained. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    SocialMedia,
    Referral,
    Advertisement,
    ColdCall,
    EmailCampaign,
    Event,
    Other,
}

impl LeadSource {
    pub const ALL: [LeadSource; 8] = [
        LeadSource::Website,
        LeadSource::SocialMedia,
        LeadSource::Referral,
        LeadSource::Advertisement,
        LeadSource::ColdCall,
        LeadSource::EmailCampaign,
        LeadSource::Event,
        LeadSource::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::SocialMedia => "social_media",
            LeadSource::Referral => "referral",
            LeadSource::Advertisement => "advertisement",
            LeadSource::ColdCall => "cold_call",
            LeadSource::EmailCampaign => "email_campaign",
            LeadSource::Event => "event",
            LeadSource::Other => "other",
        }
    }

    /// Looks up a source by its wire label. `None` for anything outside the set.
    pub fn parse(value: &str) -> Option<LeadSource> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }
}

/// Company head-count bucket. Closed set.
///
/// The API stores and transports the bucket labels ("1-10", "11-50", ...)
/// rather than raw head counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    OneToTen,
    #[serde(rename = "11-50")]
    ElevenToFifty,
    #[serde(rename = "51-200")]
    FiftyOneToTwoHundred,
    #[serde(rename = "201-500")]
    TwoHundredOneToFiveHundred,
    #[serde(rename = "501-1000")]
    FiveHundredOneToOneThousand,
    #[serde(rename = "1000+")]
    OneThousandPlus,
}

impl CompanySize {
    pub const ALL: [CompanySize; 6] = [
        CompanySize::OneToTen,
        CompanySize::ElevenToFifty,
        CompanySize::FiftyOneToTwoHundred,
        CompanySize::TwoHundredOneToFiveHundred,
        CompanySize::FiveHundredOneToOneThousand,
        CompanySize::OneThousandPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::OneToTen => "1-10",
            CompanySize::ElevenToFifty => "11-50",
            CompanySize::FiftyOneToTwoHundred => "51-200",
            CompanySize::TwoHundredOneToFiveHundred => "201-500",
            CompanySize::FiveHundredOneToOneThousand => "501-1000",
            CompanySize::OneThousandPlus => "1000+",
        }
    }

    /// Looks up a bucket by its label. `None` for anything outside the set.
    pub fn parse(value: &str) -> Option<CompanySize> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }
}

// ============ Request / Response Models ============

/// Raw write payload for create and update requests.
///
/// Every field is optional at the deserialization layer so that missing
/// required fields surface as field-level validation errors instead of
/// body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub company_size: Option<String>,
    pub website: Option<String>,
    pub lead_source: Option<String>,
    pub is_active: Option<bool>,
}

/// Normalized create payload produced by validation.
///
/// Required fields are guaranteed present, trimmed, and (for email)
/// lowercased; `lead_source` and `company_size` are members of their
/// closed sets.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_name: String,
    pub company_size: String,
    pub website: Option<String>,
    pub lead_source: String,
    pub is_active: bool,
}

/// Normalized partial update produced by validation.
///
/// Fields left `None` keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct LeadChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
    pub company_size: Option<String>,
    pub website: Option<String>,
    pub lead_source: Option<String>,
    pub is_active: Option<bool>,
}

/// Response envelope: every stored field plus the derived `full_name`.
#[derive(Debug, Clone, Serialize)]
pub struct LeadResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub company_name: String,
    pub company_size: String,
    pub website: Option<String>,
    pub lead_source: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Derived display name. Pure function of the stored name fields; never
/// persisted.
pub fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        let full_name = full_name(&lead.first_name, &lead.last_name);
        Self {
            id: lead.id,
            first_name: lead.first_name,
            last_name: lead.last_name,
            full_name,
            email: lead.email,
            company_name: lead.company_name,
            company_size: lead.company_size,
            website: lead.website,
            lead_source: lead.lead_source,
            is_active: lead.is_active,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_with_single_space() {
        assert_eq!(full_name("Ann", "Lee"), "Ann Lee");
    }

    #[test]
    fn test_lead_source_labels_round_trip() {
        for source in LeadSource::ALL {
            assert_eq!(LeadSource::parse(source.as_str()), Some(source));
        }
        assert_eq!(LeadSource::parse("carrier_pigeon"), None);
    }

    #[test]
    fn test_lead_source_serde_uses_snake_case_labels() {
        let value = serde_json::to_value(LeadSource::SocialMedia).unwrap();
        assert_eq!(value, serde_json::json!("social_media"));
    }

    #[test]
    fn test_company_size_labels_round_trip() {
        for size in CompanySize::ALL {
            assert_eq!(CompanySize::parse(size.as_str()), Some(size));
        }
        assert_eq!(CompanySize::parse("1001"), None);
        assert_eq!(CompanySize::parse(""), None);
    }

    #[test]
    fn test_response_carries_derived_full_name() {
        let lead = Lead {
            id: Uuid::new_v4(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            company_name: "Acme".to_string(),
            company_size: "1-10".to_string(),
            website: None,
            lead_source: "website".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = LeadResponse::from(lead.clone());
        assert_eq!(response.full_name, "Ann Lee");
        assert_eq!(response.email, lead.email);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["full_name"], "Ann Lee");
        assert_eq!(json["company_size"], "1-10");
    }

    #[test]
    fn test_payload_tolerates_missing_fields() {
        let payload: LeadPayload = serde_json::from_str(r#"{"first_name": "Ann"}"#).unwrap();
        assert_eq!(payload.first_name.as_deref(), Some("Ann"));
        assert!(payload.email.is_none());
        assert!(payload.is_active.is_none());
    }
}
