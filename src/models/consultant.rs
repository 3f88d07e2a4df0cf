use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::{format_datetime, hex_id};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Busy,
    Unavailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Busy => "busy",
            Availability::Unavailable => "unavailable",
        }
    }
}

/// Consultant profile (stored in the `consultants` collection)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub full_name: String,

    /// Lower-cased; links the profile to a `users` document
    pub email: String,

    pub phone: Option<String>,
    pub location: Option<String>,

    /// Headline, e.g. "Senior Data Engineer"
    pub title: Option<String>,
    pub bio: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    pub experience_years: Option<f64>,
    pub hourly_rate: Option<f64>,

    #[serde(default)]
    pub availability: Availability,

    // Document images uploaded through /api/uploads
    pub id_document_url: Option<String>,
    pub certificate_url: Option<String>,
    pub profile_image_url: Option<String>,

    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,

    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl Consultant {
    /// Minimal profile created alongside a `consultant` sign-up.
    pub fn stub(full_name: String, email: String) -> Self {
        let now = BsonDateTime::now();
        Self {
            id: None,
            full_name,
            email,
            phone: None,
            location: None,
            title: None,
            bio: None,
            skills: Vec::new(),
            experience_years: None,
            hourly_rate: None,
            availability: Availability::default(),
            id_document_url: None,
            certificate_url: None,
            profile_image_url: None,
            linkedin_url: None,
            portfolio_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultantRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_years: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub availability: Option<Availability>,
    pub id_document_url: Option<String>,
    pub certificate_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsultantResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub availability: Availability,
    pub id_document_url: Option<String>,
    pub certificate_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Consultant> for ConsultantResponse {
    fn from(c: Consultant) -> Self {
        Self {
            id: hex_id(&c.id),
            full_name: c.full_name,
            email: c.email,
            phone: c.phone,
            location: c.location,
            title: c.title,
            bio: c.bio,
            skills: c.skills,
            experience_years: c.experience_years,
            hourly_rate: c.hourly_rate,
            availability: c.availability,
            id_document_url: c.id_document_url,
            certificate_url: c.certificate_url,
            profile_image_url: c.profile_image_url,
            linkedin_url: c.linkedin_url,
            portfolio_url: c.portfolio_url,
            created_at: format_datetime(c.created_at),
            updated_at: format_datetime(c.updated_at),
        }
    }
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ByEmailQuery {
    /// Consultant email, matched case-insensitively
    pub email: Option<String>,
}
