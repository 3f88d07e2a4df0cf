use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::{format_datetime, hex_id, Availability};

/// Review state of an onboarding submission. New applications are `pending`;
/// the API never transitions them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Supporting document embedded in an application
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDocument {
    /// Free-form label, e.g. "id", "certificate", "resume"
    pub kind: String,
    pub url: String,
    pub name: Option<String>,
    pub uploaded_at: BsonDateTime,
}

/// Consultant onboarding submission (stored in `consultant_applications`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultantApplication {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    // Personal / contact
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,

    // Professional
    pub title: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience_years: Option<f64>,
    pub hourly_rate: Option<f64>,
    /// Unset when the applicant did not state it
    pub availability: Option<Availability>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub motivation: Option<String>,

    #[serde(default)]
    pub documents: Vec<ApplicationDocument>,

    #[serde(default)]
    pub status: ApplicationStatus,

    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl ConsultantApplication {
    pub fn document_url(&self, kind: &str) -> Option<String> {
        self.documents
            .iter()
            .find(|d| d.kind.eq_ignore_ascii_case(kind))
            .map(|d| d.url.clone())
    }
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDocumentRequest {
    pub kind: Option<String>,
    pub url: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
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
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub motivation: Option<String>,
    #[serde(default)]
    pub documents: Vec<ApplicationDocumentRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDocumentResponse {
    pub kind: String,
    pub url: String,
    pub name: Option<String>,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub title: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: Option<f64>,
    pub hourly_rate: Option<f64>,
    pub availability: Option<Availability>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub profile_image_url: Option<String>,
    pub motivation: Option<String>,
    pub documents: Vec<ApplicationDocumentResponse>,
    pub status: ApplicationStatus,
    pub created_at: String,
}

impl From<ConsultantApplication> for ApplicationResponse {
    fn from(a: ConsultantApplication) -> Self {
        Self {
            id: hex_id(&a.id),
            full_name: a.full_name,
            email: a.email,
            phone: a.phone,
            location: a.location,
            title: a.title,
            bio: a.bio,
            skills: a.skills,
            experience_years: a.experience_years,
            hourly_rate: a.hourly_rate,
            availability: a.availability,
            linkedin_url: a.linkedin_url,
            portfolio_url: a.portfolio_url,
            profile_image_url: a.profile_image_url,
            motivation: a.motivation,
            documents: a
                .documents
                .into_iter()
                .map(|d| ApplicationDocumentResponse {
                    kind: d.kind,
                    url: d.url,
                    name: d.name,
                    uploaded_at: format_datetime(d.uploaded_at),
                })
                .collect(),
            status: a.status,
            created_at: format_datetime(a.created_at),
        }
    }
}
