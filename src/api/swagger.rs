use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Consultant Marketplace API",
        version = "1.0.0",
        description = "REST backend for the consultant marketplace.\n\n**Authentication:** signup and login return a JWT; `/api/auth/me` and `/api/dashboard` require it as a Bearer token.\n\n**Resources:**\n- Users (signup/login)\n- Consultants directory\n- Companies\n- Consultant applications (submitting one upserts the consultant profile)\n- Image uploads"
    ),
    paths(
        // Auth
        crate::api::auth::signup,
        crate::api::auth::login,
        crate::api::auth::me,
        crate::api::auth::dashboard,

        // Health
        crate::api::health::ping,
        crate::api::health::health_check,

        // Companies
        crate::api::companies::list_companies,
        crate::api::companies::create_company,

        // Consultants
        crate::api::consultants::list_consultants,
        crate::api::consultants::create_consultant,
        crate::api::consultants::get_consultant_by_email,
        crate::api::consultants::get_consultant,

        // Applications
        crate::api::applications::list_applications,
        crate::api::applications::create_application,
        crate::api::applications::get_application,

        // Uploads
        crate::api::uploads::upload_image,
    ),
    components(
        schemas(
            crate::models::Role,
            crate::models::SafeUser,
            crate::models::SignupRequest,
            crate::models::LoginRequest,
            crate::models::AuthResponse,
            crate::models::Availability,
            crate::models::CreateConsultantRequest,
            crate::models::ConsultantResponse,
            crate::models::CreateCompanyRequest,
            crate::models::CompanyResponse,
            crate::models::ApplicationStatus,
            crate::models::ApplicationDocumentRequest,
            crate::models::CreateApplicationRequest,
            crate::models::ApplicationDocumentResponse,
            crate::models::ApplicationResponse,
            crate::services::dashboard_service::Dashboard,
            crate::services::upload_service::UploadResponse,
            crate::api::health::PingResponse,
            crate::api::health::HealthResponse,
            crate::api::companies::CompanyListResponse,
            crate::api::companies::CompanyEnvelope,
            crate::api::consultants::ConsultantListResponse,
            crate::api::consultants::ConsultantEnvelope,
            crate::api::applications::ApplicationListResponse,
            crate::api::applications::ApplicationEnvelope,
            crate::api::applications::ApplicationCreatedResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Signup, login and the role-resolved dashboard."),
        (name = "Health", description = "Liveness endpoints."),
        (name = "Companies", description = "Company profiles."),
        (name = "Consultants", description = "Consultant directory and lookups."),
        (name = "Applications", description = "Consultant onboarding submissions."),
        (name = "Uploads", description = "Image uploads (JPG, PNG, WEBP up to 2 MB)."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by signup or login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let spec = ApiDoc::openapi();
        for path in [
            "/api/auth/signup",
            "/api/auth/login",
            "/api/auth/me",
            "/api/dashboard",
            "/api/ping",
            "/api/companies",
            "/api/consultants",
            "/api/consultants/by-email",
            "/api/consultants/{id}",
            "/api/consultant-applications",
            "/api/consultant-applications/{id}",
            "/api/uploads",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
