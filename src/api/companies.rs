use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::database::Store;
use crate::models::{CompanyResponse, CreateCompanyRequest};
use crate::services::company_service;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CompanyListResponse {
    pub success: bool,
    pub count: usize,
    pub companies: Vec<CompanyResponse>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CompanyEnvelope {
    pub success: bool,
    pub company: CompanyResponse,
}

/// GET /api/companies - all companies, newest first
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    responses(
        (status = 200, description = "Companies, newest first", body = CompanyListResponse)
    )
)]
pub async fn list_companies(store: web::Data<dyn Store>) -> HttpResponse {
    log::info!("📋 GET /companies");

    match company_service::list(store.get_ref()).await {
        Ok(companies) => {
            let companies: Vec<CompanyResponse> =
                companies.into_iter().map(CompanyResponse::from).collect();
            log::info!("✅ Listed {} companies", companies.len());
            HttpResponse::Ok().json(CompanyListResponse {
                success: true,
                count: companies.len(),
                companies,
            })
        }
        Err(e) => {
            log::error!("❌ Error listing companies: {}", e);
            e.error_response()
        }
    }
}

/// POST /api/companies
#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "Companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyEnvelope),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn create_company(
    store: web::Data<dyn Store>,
    request: web::Json<CreateCompanyRequest>,
) -> HttpResponse {
    log::info!("🏢 POST /companies - name: {}", request.name.as_deref().unwrap_or("N/A"));

    match company_service::create(store.get_ref(), request.into_inner()).await {
        Ok(company) => {
            let company = CompanyResponse::from(company);
            log::info!("✅ Company created: {}", company.id);
            HttpResponse::Created().json(CompanyEnvelope {
                success: true,
                company,
            })
        }
        Err(e) => {
            log::warn!("❌ Failed to create company: {}", e);
            e.error_response()
        }
    }
}
