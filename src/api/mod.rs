//! REST API routes for Shade Finder

pub mod image;
pub mod picker;
pub mod session;
pub mod shades;

use actix_web::{get, web, HttpResponse, Responder};

/// Liveness probe
#[get("/ping")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "msg": "pong" }))
}

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(ping)
        // Image upload routes
        .service(web::scope("/image").configure(image::configure))
        // Picker routes
        .service(web::scope("/picker").configure(picker::configure))
        // Session routes
        .service(web::scope("/session").configure(session::configure))
        // Shade recommendation routes
        .service(web::scope("/shades").configure(shades::configure));
}
