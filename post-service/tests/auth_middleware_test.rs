//! Rejection paths of the bearer-token middleware and the UserId extractor.
//!
//! None of these need a signing key: every request here fails before a
//! signature would be checked, or carries a token that cannot validate.
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, Error, HttpResponse};
use post_service::middleware::{JwtAuthMiddleware, UserId};

async fn whoami(user_id: UserId) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "id": user_id.0 }))
}

/// Middleware failures surface as service errors, extractor failures as
/// error responses; either way the status must match.
fn response_status<B>(result: Result<ServiceResponse<B>, Error>) -> StatusCode {
    match result {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}

#[actix_web::test]
async fn missing_authorization_header_is_rejected() {
    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(JwtAuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/whoami").to_request();
    assert_eq!(response_status(app.call(req).await), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn non_bearer_scheme_is_rejected() {
    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(JwtAuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    assert_eq!(response_status(app.call(req).await), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn garbage_bearer_token_is_rejected() {
    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(JwtAuthMiddleware)
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    assert_eq!(response_status(app.call(req).await), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn extractor_without_auth_context_is_rejected() {
    // Route registered without the middleware: the extractor finds no
    // UserId in the request extensions and must refuse the request.
    let app =
        test::init_service(App::new().route("/whoami", web::get().to(whoami))).await;

    let req = test::TestRequest::get().uri("/whoami").to_request();
    assert_eq!(response_status(app.call(req).await), StatusCode::UNAUTHORIZED);
}
