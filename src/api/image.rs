//! Image upload API routes

use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse, Responder};
use bytes::BytesMut;
use futures::StreamExt;
use serde::Deserialize;
use tracing::{info, warn};

use crate::core::raster::RasterImage;
use crate::core::viewport::ContainerSize;
use crate::stores::SessionStore;

/// Body of the FileReader / drag-and-drop upload path
#[derive(Debug, Deserialize)]
pub struct DataUriUpload {
    pub src: String,
    pub container_width: Option<f64>,
    pub viewport_height: Option<f64>,
}

fn container_from(width: Option<f64>, viewport_height: Option<f64>) -> ContainerSize {
    let fallback = ContainerSize::default();

    ContainerSize::new(
        width.unwrap_or(fallback.width),
        viewport_height.unwrap_or(fallback.viewport_height),
    )
}

fn install_decoded(
    store: &SessionStore,
    decoded: anyhow::Result<RasterImage>,
    container: ContainerSize,
) -> HttpResponse {
    match decoded {
        Ok(image) => {
            info!(
                "Installed image {} ({}x{})",
                image.id, image.width, image.height
            );
            HttpResponse::Ok().json(store.install_image(image, container))
        }
        Err(e) => {
            warn!("Failed to decode uploaded image: {}", e);
            HttpResponse::UnprocessableEntity()
                .json(serde_json::json!({ "error": "Could not decode the uploaded image" }))
        }
    }
}

/// POST /image
///
/// Multipart upload with the file in an `image` field; optional
/// `container_width` / `viewport_height` fields carry the client layout.
#[post("")]
pub async fn upload_image(
    store: web::Data<SessionStore>,
    mut payload: Multipart,
) -> impl Responder {
    let mut image_bytes: Option<Vec<u8>> = None;
    let mut image_content_type: Option<String> = None;
    let mut image_filename: Option<String> = None;
    let mut container_width: Option<f64> = None;
    let mut viewport_height: Option<f64> = None;

    while let Some(Ok(mut field)) = payload.next().await {
        let disp = field.content_disposition().clone();
        let name = disp.get_name().map(|s| s.to_string()).unwrap_or_default();

        let mut bytes = BytesMut::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(data) => bytes.extend_from_slice(&data),
                Err(_) => continue,
            }
        }

        match name.as_str() {
            "image" => {
                image_content_type = field.content_type().map(|ct| ct.to_string());
                image_filename = disp.get_filename().map(|s| s.to_string());
                image_bytes = Some(bytes.to_vec());
            }
            "container_width" => {
                container_width = String::from_utf8_lossy(&bytes).trim().parse().ok();
            }
            "viewport_height" => {
                viewport_height = String::from_utf8_lossy(&bytes).trim().parse().ok();
            }
            _ => {}
        }
    }

    let Some(data) = image_bytes else {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "No image field in upload" }));
    };

    // the browser constrains the picker to image MIME types; double-check
    let content_type = image_content_type
        .or_else(|| {
            image_filename
                .as_deref()
                .map(|f| mime_guess::from_path(f).first_or_octet_stream().to_string())
        })
        .unwrap_or_else(|| "application/octet-stream".to_string());

    if !content_type.starts_with("image/") {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Only image uploads are supported" }));
    }

    install_decoded(
        &store,
        RasterImage::from_bytes(&data),
        container_from(container_width, viewport_height),
    )
}

/// POST /image/data-uri
#[post("/data-uri")]
pub async fn upload_data_uri(
    store: web::Data<SessionStore>,
    body: web::Json<DataUriUpload>,
) -> impl Responder {
    install_decoded(
        &store,
        RasterImage::from_data_uri(&body.src),
        container_from(body.container_width, body.viewport_height),
    )
}

/// GET /image
#[get("")]
pub async fn current_image(store: web::Data<SessionStore>) -> impl Responder {
    match store.view().image {
        Some(image) => HttpResponse::Ok().json(image),
        None => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "No image uploaded" }))
        }
    }
}

/// Configure image routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_image)
        .service(upload_data_uri)
        .service(current_image);
}
