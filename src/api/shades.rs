//! Shade recommendation API routes

use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::info;

use crate::plugins::{ShadeLookupError, ShadeProvider};
use crate::stores::{LookupRefusal, SessionStore};

fn lookup_error_response(error: &ShadeLookupError) -> HttpResponse {
    let body = serde_json::json!({ "error": error.to_string(), "kind": error.kind() });

    match error {
        ShadeLookupError::MissingApiKey | ShadeLookupError::InvalidApiKey => {
            HttpResponse::Unauthorized().json(body)
        }
        ShadeLookupError::MalformedResponse(_) | ShadeLookupError::RequestFailed => {
            HttpResponse::BadGateway().json(body)
        }
    }
}

/// POST /shades/find
///
/// Runs the recommendation flow for the currently selected color. The
/// store lock is released while the provider call is in flight; a stale
/// response (superseded by a newer find) settles into nothing.
#[post("/find")]
pub async fn find_shades(
    store: web::Data<SessionStore>,
    provider: web::Data<dyn ShadeProvider>,
) -> impl Responder {
    let ticket = match store.begin_lookup() {
        Ok(ticket) => ticket,
        Err(LookupRefusal::NoColorSelected) => {
            return HttpResponse::Conflict()
                .json(serde_json::json!({ "error": "Pick a color from the photo first" }));
        }
        Err(LookupRefusal::MissingCredential) => {
            return lookup_error_response(&ShadeLookupError::MissingApiKey);
        }
    };

    info!("Looking up lipstick shades for {}", ticket.hex);

    match provider.find_shades(&ticket.hex, &ticket.api_key).await {
        Ok(products) => {
            store.settle_lookup(ticket.seq, Ok(products.clone()));
            HttpResponse::Ok().json(serde_json::json!({ "lipsticks": products }))
        }
        Err(error) => {
            store.settle_lookup(ticket.seq, Err(error.to_string()));
            lookup_error_response(&error)
        }
    }
}

/// GET /shades
#[get("")]
pub async fn latest(store: web::Data<SessionStore>) -> impl Responder {
    let view = store.view();

    HttpResponse::Ok().json(serde_json::json!({
        "results": view.results,
        "loading": view.loading,
        "error": view.error,
    }))
}

/// Configure shade routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(find_shades).service(latest);
}
