//! Color picker API routes: pointer sampling, magnifier, selection

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::error;

use crate::core::swatches::DEFAULT_SWATCH_COUNT;
use crate::core::viewport::ContainerSize;
use crate::stores::SessionStore;

#[derive(Debug, Deserialize)]
pub struct PointerQuery {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct PickBody {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize)]
pub struct SelectBody {
    pub hex: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewportBody {
    pub width: f64,
    pub viewport_height: f64,
}

#[derive(Debug, Deserialize)]
pub struct SwatchQuery {
    pub count: Option<usize>,
}

fn no_image() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No image uploaded" }))
}

/// POST /picker/viewport
///
/// Container resize: refits the display transform.
#[post("/viewport")]
pub async fn set_viewport(
    store: web::Data<SessionStore>,
    body: web::Json<ViewportBody>,
) -> impl Responder {
    match store.set_container(ContainerSize::new(body.width, body.viewport_height)) {
        Some(view) => HttpResponse::Ok().json(view),
        None => no_image(),
    }
}

/// GET /picker/sample?x=&y=
///
/// Pointer-move probe: the color under the pointer plus magnifier placement.
#[get("/sample")]
pub async fn sample(
    store: web::Data<SessionStore>,
    query: web::Query<PointerQuery>,
) -> impl Responder {
    match store.probe(query.x, query.y) {
        Some((color, magnifier)) => HttpResponse::Ok().json(serde_json::json!({
            "color": color,
            "magnifier": magnifier,
        })),
        None => no_image(),
    }
}

/// POST /picker/pick
#[post("/pick")]
pub async fn pick(store: web::Data<SessionStore>, body: web::Json<PickBody>) -> impl Responder {
    match store.pick_at(body.x, body.y) {
        Some(color) => HttpResponse::Ok().json(serde_json::json!({ "selected": color })),
        None => no_image(),
    }
}

/// POST /picker/select
///
/// Pick an exact color, as when a suggested swatch is clicked.
#[post("/select")]
pub async fn select_hex(
    store: web::Data<SessionStore>,
    body: web::Json<SelectBody>,
) -> impl Responder {
    if !store.has_image() {
        return no_image();
    }

    match store.pick_hex(body.hex.trim()) {
        Some(color) => HttpResponse::Ok().json(serde_json::json!({ "selected": color })),
        None => HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Expected a #rrggbb color" })),
    }
}

/// GET /picker/magnifier?x=&y=
///
/// The circular zoom preview as a PNG.
#[get("/magnifier")]
pub async fn magnifier_png(
    store: web::Data<SessionStore>,
    query: web::Query<PointerQuery>,
) -> impl Responder {
    let (x, y) = (query.x, query.y);
    let store = store.into_inner();

    match tokio::task::spawn_blocking(move || store.magnifier_png(x, y)).await {
        Ok(Some(Ok(png))) => HttpResponse::Ok().content_type("image/png").body(png),
        Ok(None) => no_image(),
        Ok(Some(Err(e))) => {
            error!("Failed to render magnifier: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Failed to render magnifier" }))
        }
        Err(e) => {
            error!("Magnifier render task failed: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Failed to render magnifier" }))
        }
    }
}

/// GET /picker/swatches?count=
#[get("/swatches")]
pub async fn swatches(
    store: web::Data<SessionStore>,
    query: web::Query<SwatchQuery>,
) -> impl Responder {
    let count = query.count.unwrap_or(DEFAULT_SWATCH_COUNT);
    let store = store.into_inner();

    match tokio::task::spawn_blocking(move || store.swatches(count)).await {
        Ok(Some(colors)) => {
            HttpResponse::Ok().json(serde_json::json!({ "swatches": colors }))
        }
        Ok(None) => no_image(),
        Err(e) => {
            error!("Swatch extraction task failed: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Failed to extract swatches" }))
        }
    }
}

/// Configure picker routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(set_viewport)
        .service(sample)
        .service(pick)
        .service(select_hex)
        .service(magnifier_png)
        .service(swatches);
}
