use mongodb::bson::DateTime as BsonDateTime;

use crate::database::Store;
use crate::models::{Company, CreateCompanyRequest};
use crate::utils::validation::{is_valid_email, normalize_email, optional, optional_url, required};
use crate::utils::AppError;

pub async fn list(store: &dyn Store) -> Result<Vec<Company>, AppError> {
    Ok(store.list_companies().await?)
}

pub async fn create(store: &dyn Store, request: CreateCompanyRequest) -> Result<Company, AppError> {
    let name = required(request.name.as_deref(), "name")?;

    let email = match optional(request.email).map(|e| normalize_email(&e)) {
        Some(email) if !is_valid_email(&email) => {
            return Err(AppError::bad_request("email is not a valid address"))
        }
        other => other,
    };

    let now = BsonDateTime::now();
    let company = Company {
        id: None,
        name,
        email,
        industry: optional(request.industry),
        size: optional(request.size),
        website: optional_url(request.website, "website")?,
        description: optional(request.description),
        location: optional(request.location),
        created_at: now,
        updated_at: now,
    };

    Ok(store.insert_company(company).await?)
}
