use mongodb::bson::DateTime as BsonDateTime;

use crate::database::Store;
use crate::models::{
    ApplicationDocument, ApplicationStatus, Consultant, ConsultantApplication,
    CreateApplicationRequest,
};
use crate::services::consultant_service::parse_object_id;
use crate::utils::validation::{
    clean_skills, non_negative, optional, optional_url, required, required_email,
};
use crate::utils::AppError;

pub async fn list(store: &dyn Store) -> Result<Vec<ConsultantApplication>, AppError> {
    Ok(store.list_applications().await?)
}

pub async fn find_by_id(store: &dyn Store, id: &str) -> Result<ConsultantApplication, AppError> {
    let object_id = parse_object_id(id, "application")?;
    store
        .find_application_by_id(&object_id)
        .await?
        .ok_or_else(|| AppError::not_found("Application not found"))
}

/// Stores the application, then upserts the consultant with the same email so
/// the applicant shows up in the directory straight away.
pub async fn create(
    store: &dyn Store,
    request: CreateApplicationRequest,
) -> Result<(ConsultantApplication, Consultant), AppError> {
    let application = build_application(request)?;
    let application = store.insert_application(application).await?;

    let consultant = store
        .upsert_consultant_by_email(consultant_profile(&application), application.availability)
        .await?;

    log::info!(
        "📨 Application {} stored, consultant {} upserted",
        application.id.map(|id| id.to_hex()).unwrap_or_default(),
        application.email
    );

    Ok((application, consultant))
}

fn build_application(request: CreateApplicationRequest) -> Result<ConsultantApplication, AppError> {
    let full_name = required(request.full_name.as_deref(), "fullName")?;
    let email = required_email(request.email.as_deref())?;
    let title = required(request.title.as_deref(), "title")?;

    let now = BsonDateTime::now();

    let documents = request
        .documents
        .into_iter()
        .enumerate()
        .map(|(i, doc)| {
            Ok(ApplicationDocument {
                kind: required(doc.kind.as_deref(), &format!("documents[{}].kind", i))?,
                url: required(doc.url.as_deref(), &format!("documents[{}].url", i))?,
                name: optional(doc.name),
                uploaded_at: now,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(ConsultantApplication {
        id: None,
        full_name,
        email,
        phone: optional(request.phone),
        location: optional(request.location),
        title,
        bio: optional(request.bio),
        skills: clean_skills(request.skills),
        experience_years: non_negative(request.experience_years, "experienceYears")?,
        hourly_rate: non_negative(request.hourly_rate, "hourlyRate")?,
        availability: request.availability,
        linkedin_url: optional_url(request.linkedin_url, "linkedinUrl")?,
        portfolio_url: optional_url(request.portfolio_url, "portfolioUrl")?,
        profile_image_url: optional(request.profile_image_url),
        motivation: optional(request.motivation),
        documents,
        status: ApplicationStatus::Pending,
        created_at: now,
        updated_at: now,
    })
}

/// Consultant profile fields carried over from an application.
fn consultant_profile(application: &ConsultantApplication) -> Consultant {
    let now = BsonDateTime::now();
    Consultant {
        id: None,
        full_name: application.full_name.clone(),
        email: application.email.clone(),
        phone: application.phone.clone(),
        location: application.location.clone(),
        title: Some(application.title.clone()),
        bio: application.bio.clone(),
        skills: application.skills.clone(),
        experience_years: application.experience_years,
        hourly_rate: application.hourly_rate,
        availability: application.availability.unwrap_or_default(),
        id_document_url: application.document_url("id"),
        certificate_url: application.document_url("certificate"),
        profile_image_url: application
            .profile_image_url
            .clone()
            .or_else(|| application.document_url("photo")),
        linkedin_url: application.linkedin_url.clone(),
        portfolio_url: application.portfolio_url.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApplicationDocumentRequest;

    fn request() -> CreateApplicationRequest {
        CreateApplicationRequest {
            full_name: Some("Ana Silva".into()),
            email: Some(" Ana@Example.com".into()),
            title: Some("Data Engineer".into()),
            documents: vec![ApplicationDocumentRequest {
                kind: Some("id".into()),
                url: Some("http://localhost:5000/uploads/1-passport.png".into()),
                name: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn new_applications_are_pending() {
        let application = build_application(request()).unwrap();
        assert_eq!(application.status, ApplicationStatus::Pending);
        assert_eq!(application.email, "ana@example.com");
    }

    #[test]
    fn documents_need_url() {
        let mut req = request();
        req.documents.push(ApplicationDocumentRequest {
            kind: Some("certificate".into()),
            url: None,
            name: None,
        });
        let err = build_application(req).unwrap_err();
        assert!(err.to_string().contains("documents[1].url"));
    }

    #[test]
    fn profile_picks_document_urls_by_kind() {
        let application = build_application(request()).unwrap();
        let profile = consultant_profile(&application);
        assert_eq!(
            profile.id_document_url.as_deref(),
            Some("http://localhost:5000/uploads/1-passport.png")
        );
        assert_eq!(profile.certificate_url, None);
        assert_eq!(profile.title.as_deref(), Some("Data Engineer"));
    }
}
