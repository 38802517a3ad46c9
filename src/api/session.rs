//! Session API routes: state view, credential entry, reset

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::stores::SessionStore;

#[derive(Debug, Deserialize)]
pub struct CredentialBody {
    pub api_key: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetBody {
    #[serde(default)]
    pub keep_credential: bool,
}

/// GET /session
#[get("")]
pub async fn get_session(store: web::Data<SessionStore>) -> impl Responder {
    HttpResponse::Ok().json(store.view())
}

/// POST /session/credential
///
/// Stores the API key in memory for this session; it is never persisted
/// and views only report whether one is present.
#[post("/credential")]
pub async fn set_credential(
    store: web::Data<SessionStore>,
    body: web::Json<CredentialBody>,
) -> impl Responder {
    HttpResponse::Ok().json(store.set_credential(body.into_inner().api_key))
}

/// POST /session/reset
///
/// Clears all transient state; the credential goes too unless
/// `keep_credential` is set.
#[post("/reset")]
pub async fn reset(
    store: web::Data<SessionStore>,
    body: Option<web::Json<ResetBody>>,
) -> impl Responder {
    let keep = body.map(|b| b.keep_credential).unwrap_or(false);

    HttpResponse::Ok().json(store.reset(keep))
}

/// Configure session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_session)
        .service(set_credential)
        .service(reset);
}
