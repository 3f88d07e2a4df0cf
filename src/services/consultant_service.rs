use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};

use crate::database::Store;
use crate::models::{Consultant, CreateConsultantRequest};
use crate::utils::validation::{
    clean_skills, non_negative, normalize_email, optional, optional_url, required,
    required_email,
};
use crate::utils::AppError;

pub async fn list(store: &dyn Store) -> Result<Vec<Consultant>, AppError> {
    Ok(store.list_consultants().await?)
}

pub async fn create(
    store: &dyn Store,
    request: CreateConsultantRequest,
) -> Result<Consultant, AppError> {
    let consultant = build_consultant(request)?;
    Ok(store.insert_consultant(consultant).await?)
}

pub async fn find_by_email(store: &dyn Store, email: Option<&str>) -> Result<Consultant, AppError> {
    let email = normalize_email(&required(email, "email")?);
    store
        .find_consultant_by_email(&email)
        .await?
        .ok_or_else(|| AppError::not_found("Consultant not found"))
}

pub async fn find_by_id(store: &dyn Store, id: &str) -> Result<Consultant, AppError> {
    let object_id = parse_object_id(id, "consultant")?;
    store
        .find_consultant_by_id(&object_id)
        .await?
        .ok_or_else(|| AppError::not_found("Consultant not found"))
}

pub fn parse_object_id(id: &str, what: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::bad_request(format!("Invalid {} ID", what)))
}

/// Validates a create request into a new consultant document.
fn build_consultant(request: CreateConsultantRequest) -> Result<Consultant, AppError> {
    let full_name = required(request.full_name.as_deref(), "fullName")?;
    let email = required_email(request.email.as_deref())?;

    let now = BsonDateTime::now();
    Ok(Consultant {
        id: None,
        full_name,
        email,
        phone: optional(request.phone),
        location: optional(request.location),
        title: optional(request.title),
        bio: optional(request.bio),
        skills: clean_skills(request.skills),
        experience_years: non_negative(request.experience_years, "experienceYears")?,
        hourly_rate: non_negative(request.hourly_rate, "hourlyRate")?,
        availability: request.availability.unwrap_or_default(),
        id_document_url: optional(request.id_document_url),
        certificate_url: optional(request.certificate_url),
        profile_image_url: optional(request.profile_image_url),
        linkedin_url: optional_url(request.linkedin_url, "linkedinUrl")?,
        portfolio_url: optional_url(request.portfolio_url, "portfolioUrl")?,
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Availability;

    #[test]
    fn build_requires_name_and_email() {
        let missing_name = CreateConsultantRequest {
            email: Some("a@b.io".into()),
            ..Default::default()
        };
        assert!(matches!(build_consultant(missing_name), Err(AppError::BadRequest(_))));

        let missing_email = CreateConsultantRequest {
            full_name: Some("Ana".into()),
            ..Default::default()
        };
        assert!(matches!(build_consultant(missing_email), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn build_normalizes_and_defaults() {
        let consultant = build_consultant(CreateConsultantRequest {
            full_name: Some(" Ana Silva ".into()),
            email: Some("ANA@Example.com".into()),
            skills: vec!["Rust".into(), "rust".into()],
            hourly_rate: Some(95.0),
            bio: Some("   ".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(consultant.full_name, "Ana Silva");
        assert_eq!(consultant.email, "ana@example.com");
        assert_eq!(consultant.skills, vec!["Rust".to_string()]);
        assert_eq!(consultant.availability, Availability::Available);
        assert_eq!(consultant.bio, None);
    }

    #[test]
    fn negative_rate_rejected() {
        let err = build_consultant(CreateConsultantRequest {
            full_name: Some("Ana".into()),
            email: Some("a@b.io".into()),
            hourly_rate: Some(-10.0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn malformed_id_is_bad_request() {
        assert!(matches!(
            parse_object_id("not-an-id", "consultant"),
            Err(AppError::BadRequest(_))
        ));
        assert!(parse_object_id(&ObjectId::new().to_hex(), "consultant").is_ok());
    }
}
