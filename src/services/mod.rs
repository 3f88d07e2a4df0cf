pub mod application_service;
pub mod auth_service;
pub mod company_service;
pub mod consultant_service;
pub mod dashboard_service;
pub mod upload_service;
