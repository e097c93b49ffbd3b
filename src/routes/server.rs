use actix_web::{HttpResponse, Responder, get};

/// Liveness probe for the hosting platform. Never cached, never dispatched.
#[get("/healthz")]
pub async fn get_healthz() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store"))
        .body("ok")
}
