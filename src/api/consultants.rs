use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::database::Store;
use crate::models::{ByEmailQuery, ConsultantResponse, CreateConsultantRequest};
use crate::services::consultant_service;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ConsultantListResponse {
    pub success: bool,
    pub count: usize,
    pub consultants: Vec<ConsultantResponse>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ConsultantEnvelope {
    pub success: bool,
    pub consultant: ConsultantResponse,
}

fn envelope(consultant: ConsultantResponse) -> ConsultantEnvelope {
    ConsultantEnvelope {
        success: true,
        consultant,
    }
}

/// GET /api/consultants - directory, newest first
#[utoipa::path(
    get,
    path = "/api/consultants",
    tag = "Consultants",
    responses(
        (status = 200, description = "Consultants, newest first", body = ConsultantListResponse)
    )
)]
pub async fn list_consultants(store: web::Data<dyn Store>) -> HttpResponse {
    log::info!("📋 GET /consultants");

    match consultant_service::list(store.get_ref()).await {
        Ok(consultants) => {
            let consultants: Vec<ConsultantResponse> =
                consultants.into_iter().map(ConsultantResponse::from).collect();
            log::info!("✅ Listed {} consultants", consultants.len());
            HttpResponse::Ok().json(ConsultantListResponse {
                success: true,
                count: consultants.len(),
                consultants,
            })
        }
        Err(e) => {
            log::error!("❌ Error listing consultants: {}", e);
            e.error_response()
        }
    }
}

/// POST /api/consultants
#[utoipa::path(
    post,
    path = "/api/consultants",
    tag = "Consultants",
    request_body = CreateConsultantRequest,
    responses(
        (status = 201, description = "Consultant created", body = ConsultantEnvelope),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn create_consultant(
    store: web::Data<dyn Store>,
    request: web::Json<CreateConsultantRequest>,
) -> HttpResponse {
    log::info!("📝 POST /consultants - email: {}", request.email.as_deref().unwrap_or("N/A"));

    match consultant_service::create(store.get_ref(), request.into_inner()).await {
        Ok(consultant) => {
            log::info!("✅ Consultant created: {}", consultant.email);
            HttpResponse::Created().json(envelope(consultant.into()))
        }
        Err(e) => {
            log::warn!("❌ Failed to create consultant: {}", e);
            e.error_response()
        }
    }
}

/// GET /api/consultants/by-email?email=
#[utoipa::path(
    get,
    path = "/api/consultants/by-email",
    tag = "Consultants",
    params(ByEmailQuery),
    responses(
        (status = 200, description = "Consultant found", body = ConsultantEnvelope),
        (status = 400, description = "Missing email"),
        (status = 404, description = "No consultant with this email")
    )
)]
pub async fn get_consultant_by_email(
    store: web::Data<dyn Store>,
    query: web::Query<ByEmailQuery>,
) -> HttpResponse {
    log::info!("🔎 GET /consultants/by-email - email: {}", query.email.as_deref().unwrap_or("N/A"));

    match consultant_service::find_by_email(store.get_ref(), query.email.as_deref()).await {
        Ok(consultant) => HttpResponse::Ok().json(envelope(consultant.into())),
        Err(e) => {
            log::warn!("❌ Consultant lookup failed: {}", e);
            e.error_response()
        }
    }
}

/// GET /api/consultants/{id}
#[utoipa::path(
    get,
    path = "/api/consultants/{id}",
    tag = "Consultants",
    params(
        ("id" = String, Path, description = "Consultant ObjectId")
    ),
    responses(
        (status = 200, description = "Consultant found", body = ConsultantEnvelope),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Consultant not found")
    )
)]
pub async fn get_consultant(store: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🔎 GET /consultants/{}", id);

    match consultant_service::find_by_id(store.get_ref(), &id).await {
        Ok(consultant) => HttpResponse::Ok().json(envelope(consultant.into())),
        Err(e) => {
            log::warn!("❌ Consultant {} lookup failed: {}", id, e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{send, TestContext};
    use actix_web::{http::StatusCode, test, App};

    fn consultant_body(name: &str, email: &str) -> serde_json::Value {
        serde_json::json!({
            "fullName": name,
            "email": email,
            "title": "Backend Engineer",
            "skills": ["Rust", "PostgreSQL"],
            "experienceYears": 7,
            "hourlyRate": 120.5,
            "availability": "busy"
        })
    }

    #[actix_rt::test]
    async fn create_and_lookup() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/api/consultants")
            .set_json(consultant_body("Ana Silva", "Ana@Example.com"))
            .to_request();
        let (status, created) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["consultant"]["email"], "ana@example.com");
        assert_eq!(created["consultant"]["availability"], "busy");
        assert_eq!(created["consultant"]["hourlyRate"], 120.5);

        let id = created["consultant"]["id"].as_str().unwrap().to_string();
        let (status, body) = send(
            &app,
            test::TestRequest::get().uri(&format!("/api/consultants/{}", id)).to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["consultant"]["fullName"], "Ana Silva");

        let (status, body) = send(
            &app,
            test::TestRequest::get()
                .uri("/api/consultants/by-email?email=ANA%40example.com")
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["consultant"]["id"], id.as_str());
    }

    #[actix_rt::test]
    async fn lookups_report_missing_and_malformed() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let (status, _) = send(
            &app,
            test::TestRequest::get()
                .uri("/api/consultants/by-email?email=nobody%40example.com")
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            test::TestRequest::get().uri("/api/consultants/by-email").to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            test::TestRequest::get().uri("/api/consultants/not-an-object-id").to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            test::TestRequest::get()
                .uri("/api/consultants/65f0c0ffee0000000000beef")
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn list_is_newest_first() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        for (name, email) in [("Ana", "ana@example.com"), ("Bo", "bo@example.com")] {
            let req = test::TestRequest::post()
                .uri("/api/consultants")
                .set_json(consultant_body(name, email))
                .to_request();
            send(&app, req).await;
        }

        let (status, body) =
            send(&app, test::TestRequest::get().uri("/api/consultants").to_request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["consultants"][0]["fullName"], "Bo");
        assert_eq!(body["consultants"][1]["fullName"], "Ana");
    }

    #[actix_rt::test]
    async fn invalid_fields_are_bad_request() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        for body in [
            serde_json::json!({ "email": "a@b.io" }),
            serde_json::json!({ "fullName": "Ana" }),
            serde_json::json!({ "fullName": "Ana", "email": "not-an-email" }),
            serde_json::json!({ "fullName": "Ana", "email": "a@b.io", "availability": "sometimes" }),
            serde_json::json!({ "fullName": "Ana", "email": "a@b.io", "hourlyRate": -5 }),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/consultants")
                .set_json(body)
                .to_request();
            assert_eq!(send(&app, req).await.0, StatusCode::BAD_REQUEST);
        }
        assert_eq!(ctx.store.consultant_count(), 0);
    }
}
