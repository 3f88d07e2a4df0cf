use actix_web::{web, HttpResponse, ResponseError};

use crate::database::Store;
use crate::middleware::auth::Claims;
use crate::models::{AuthResponse, LoginRequest, SafeUser, SignupRequest};
use crate::services::auth_service::{self, Authenticator};
use crate::services::dashboard_service::{self, Dashboard};

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    store: web::Data<dyn Store>,
    auth: web::Data<Authenticator>,
    request: web::Json<SignupRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let email_str = request.email.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("📝 POST /auth/signup - email: {}", email_str);

    match auth_service::signup(store.get_ref(), &auth, request).await {
        Ok(response) => {
            log::info!("✅ Signup successful: {} ({})", response.user.email, response.user.role);
            HttpResponse::Created().json(response)
        }
        Err(e) => {
            log::warn!("❌ Signup failed: {} - {}", email_str, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    store: web::Data<dyn Store>,
    auth: web::Data<Authenticator>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let email_str = request.email.clone().unwrap_or_else(|| "N/A".to_string());
    log::info!("🔐 POST /auth/login - email: {}", email_str);

    match auth_service::login(store.get_ref(), &auth, request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", response.user.email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", email_str, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user", body = SafeUser),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User no longer exists")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(store: web::Data<dyn Store>, claims: web::ReqData<Claims>) -> HttpResponse {
    log::info!("👤 GET /auth/me - user: {}", claims.sub);

    match auth_service::current_user(store.get_ref(), &claims).await {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "user": SafeUser::from(user)
        })),
        Err(e) => {
            log::warn!("❌ Failed to get user {}: {}", claims.sub, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Auth",
    responses(
        (status = 200, description = "Dashboard for the caller's role", body = Dashboard),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn dashboard(store: web::Data<dyn Store>, claims: web::ReqData<Claims>) -> HttpResponse {
    log::info!("📊 GET /dashboard - user: {} ({})", claims.sub, claims.role);

    match dashboard_service::load(store.get_ref(), &claims).await {
        Ok(dashboard) => HttpResponse::Ok().json(dashboard),
        Err(e) => {
            log::warn!("❌ Dashboard failed for {}: {}", claims.sub, e);
            e.error_response()
        }
    }
}
