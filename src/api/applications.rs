use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::database::Store;
use crate::models::{ApplicationResponse, ConsultantResponse, CreateApplicationRequest};
use crate::services::application_service;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ApplicationListResponse {
    pub success: bool,
    pub count: usize,
    pub applications: Vec<ApplicationResponse>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ApplicationEnvelope {
    pub success: bool,
    pub application: ApplicationResponse,
}

/// Returned on submit: the stored application plus the consultant it upserted
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ApplicationCreatedResponse {
    pub success: bool,
    pub application: ApplicationResponse,
    pub consultant: ConsultantResponse,
}

#[utoipa::path(
    get,
    path = "/api/consultant-applications",
    tag = "Applications",
    responses(
        (status = 200, description = "Applications, newest first", body = ApplicationListResponse)
    )
)]
pub async fn list_applications(store: web::Data<dyn Store>) -> HttpResponse {
    log::info!("📋 GET /consultant-applications");

    match application_service::list(store.get_ref()).await {
        Ok(applications) => {
            let applications: Vec<ApplicationResponse> = applications
                .into_iter()
                .map(ApplicationResponse::from)
                .collect();
            log::info!("✅ Listed {} applications", applications.len());
            HttpResponse::Ok().json(ApplicationListResponse {
                success: true,
                count: applications.len(),
                applications,
            })
        }
        Err(e) => {
            log::error!("❌ Error listing applications: {}", e);
            e.error_response()
        }
    }
}

/// POST /api/consultant-applications - stores the submission and upserts the
/// consultant profile keyed by email
#[utoipa::path(
    post,
    path = "/api/consultant-applications",
    tag = "Applications",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application stored, consultant upserted", body = ApplicationCreatedResponse),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn create_application(
    store: web::Data<dyn Store>,
    request: web::Json<CreateApplicationRequest>,
) -> HttpResponse {
    log::info!(
        "📨 POST /consultant-applications - email: {}",
        request.email.as_deref().unwrap_or("N/A")
    );

    match application_service::create(store.get_ref(), request.into_inner()).await {
        Ok((application, consultant)) => HttpResponse::Created().json(ApplicationCreatedResponse {
            success: true,
            application: application.into(),
            consultant: consultant.into(),
        }),
        Err(e) => {
            log::warn!("❌ Failed to submit application: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/consultant-applications/{id}",
    tag = "Applications",
    params(
        ("id" = String, Path, description = "Application ObjectId")
    ),
    responses(
        (status = 200, description = "Application found", body = ApplicationEnvelope),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Application not found")
    )
)]
pub async fn get_application(store: web::Data<dyn Store>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🔎 GET /consultant-applications/{}", id);

    match application_service::find_by_id(store.get_ref(), &id).await {
        Ok(application) => HttpResponse::Ok().json(ApplicationEnvelope {
            success: true,
            application: application.into(),
        }),
        Err(e) => {
            log::warn!("❌ Application {} lookup failed: {}", id, e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{send, TestContext};
    use actix_web::{http::StatusCode, test, App};

    #[actix_rt::test]
    async fn submit_upserts_existing_consultant() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/api/consultants")
            .set_json(serde_json::json!({
                "fullName": "Ana Silva",
                "email": "ana@example.com",
                "bio": "Ten years of data platforms",
                "hourlyRate": 90
            }))
            .to_request();
        let (_, existing) = send(&app, req).await;
        let existing_id = existing["consultant"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri("/api/consultant-applications")
            .set_json(serde_json::json!({
                "fullName": "Ana Silva",
                "email": "  ANA@Example.com ",
                "title": "Principal Data Engineer",
                "hourlyRate": 150,
                "skills": ["Spark", "Kafka"],
                "documents": [
                    { "kind": "id", "url": "http://localhost:5000/uploads/1-passport.png" },
                    { "kind": "certificate", "url": "http://localhost:5000/uploads/2-aws.webp", "name": "AWS" }
                ]
            }))
            .to_request();
        let (status, body) = send(&app, req).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["application"]["status"], "pending");
        assert_eq!(body["application"]["documents"].as_array().unwrap().len(), 2);
        assert_eq!(body["consultant"]["id"], existing_id.as_str());
        assert_eq!(body["consultant"]["title"], "Principal Data Engineer");
        assert_eq!(body["consultant"]["hourlyRate"], 150.0);
        // Fields the application did not carry are kept
        assert_eq!(body["consultant"]["bio"], "Ten years of data platforms");
        assert_eq!(
            body["consultant"]["idDocumentUrl"],
            "http://localhost:5000/uploads/1-passport.png"
        );
        assert_eq!(ctx.store.consultant_count(), 1);
    }

    #[actix_rt::test]
    async fn submit_creates_consultant_when_absent() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/api/consultant-applications")
            .set_json(serde_json::json!({
                "fullName": "Bo Lind",
                "email": "bo@example.com",
                "title": "UX Researcher"
            }))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(ctx.store.consultant_count(), 1);

        let id = body["application"]["id"].as_str().unwrap();
        let (status, fetched) = send(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/consultant-applications/{}", id))
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["application"]["title"], "UX Researcher");

        let (status, list) = send(
            &app,
            test::TestRequest::get().uri("/api/consultant-applications").to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["count"], 1);
    }

    #[actix_rt::test]
    async fn missing_fields_are_bad_request() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        for body in [
            serde_json::json!({}),
            serde_json::json!({ "fullName": "Bo", "email": "bo@example.com" }),
            serde_json::json!({
                "fullName": "Bo",
                "email": "bo@example.com",
                "title": "Designer",
                "documents": [{ "kind": "id" }]
            }),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/consultant-applications")
                .set_json(body)
                .to_request();
            assert_eq!(send(&app, req).await.0, StatusCode::BAD_REQUEST);
        }
        assert_eq!(ctx.store.consultant_count(), 0);
    }

    #[actix_rt::test]
    async fn submit_without_availability_keeps_stored_value() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/api/consultants")
            .set_json(serde_json::json!({
                "fullName": "Ana Silva",
                "email": "ana@example.com",
                "availability": "busy"
            }))
            .to_request();
        send(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/consultant-applications")
            .set_json(serde_json::json!({
                "fullName": "Ana Silva",
                "email": "ana@example.com",
                "title": "Data Engineer"
            }))
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["consultant"]["availability"], "busy");
        assert!(body["application"]["availability"].is_null());

        let req = test::TestRequest::post()
            .uri("/api/consultant-applications")
            .set_json(serde_json::json!({
                "fullName": "Ana Silva",
                "email": "ana@example.com",
                "title": "Data Engineer",
                "availability": "unavailable"
            }))
            .to_request();
        let (_, body) = send(&app, req).await;
        assert_eq!(body["consultant"]["availability"], "unavailable");
    }

    #[actix_rt::test]
    async fn list_is_newest_first() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        for (name, email) in [("Ana", "ana@example.com"), ("Bo", "bo@example.com")] {
            let req = test::TestRequest::post()
                .uri("/api/consultant-applications")
                .set_json(serde_json::json!({
                    "fullName": name,
                    "email": email,
                    "title": "Engineer"
                }))
                .to_request();
            assert_eq!(send(&app, req).await.0, StatusCode::CREATED);
        }

        let (status, body) = send(
            &app,
            test::TestRequest::get().uri("/api/consultant-applications").to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["applications"][0]["fullName"], "Bo");
        assert_eq!(body["applications"][1]["fullName"], "Ana");
    }

    #[actix_rt::test]
    async fn unknown_application_is_not_found() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let (status, _) = send(
            &app,
            test::TestRequest::get()
                .uri("/api/consultant-applications/65f0c0ffee0000000000beef")
                .to_request(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
