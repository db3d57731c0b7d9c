//! Design lab route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use ragvynn_core::{DesignId, GeneratedDesign, Resolution};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::models::{Shopper, now};
use crate::routes::assistant::AdviceView;
use crate::routes::cart::CartView;
use crate::services::DESIGN_FAILED;
use crate::state::AppState;

/// Generated design display data for templates.
#[derive(Clone)]
pub struct DesignView {
    pub id: String,
    pub prompt: String,
    /// Inline `data:` URL for the image.
    pub data_url: String,
    pub created_at: String,
}

impl From<&GeneratedDesign> for DesignView {
    fn from(design: &GeneratedDesign) -> Self {
        Self {
            id: design.id.to_string(),
            prompt: design.prompt.clone(),
            data_url: format!(
                "data:{};base64,{}",
                design.image.mime_type,
                STANDARD.encode(&design.image.bytes)
            ),
            created_at: design.created_at.format("%H:%M:%S").to_string(),
        }
    }
}

/// Gallery display data shared by the page and the fragment.
#[derive(Clone)]
pub struct GalleryView {
    pub designs: Vec<DesignView>,
    pub notice: Option<&'static str>,
    pub generating: bool,
}

impl GalleryView {
    #[must_use]
    pub fn new(shopper: &Shopper) -> Self {
        Self {
            designs: shopper.gallery.designs().iter().map(DesignView::from).collect(),
            notice: shopper.design_notice,
            generating: shopper.design.in_flight(),
        }
    }
}

/// Design lab page template.
#[derive(Template, WebTemplate)]
#[template(path = "lab/index.html")]
pub struct LabTemplate {
    pub gallery: GalleryView,
    pub cart: CartView,
    pub advice: AdviceView,
}

/// Gallery fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/design_gallery.html")]
pub struct DesignGalleryTemplate {
    pub gallery: GalleryView,
}

/// Design request form data.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub prompt: String,
}

/// Display the design lab.
#[instrument(skip(state, shopper))]
pub async fn index(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
) -> LabTemplate {
    let mut shopper = shopper.lock().await;
    shopper.tick(now());

    LabTemplate {
        gallery: GalleryView::new(&shopper),
        cart: CartView::new(&shopper, &state),
        advice: AdviceView::new(&shopper),
    }
}

/// Generate a design from a concept (HTMX).
///
/// Prior prompts are sent along so the model avoids repeating itself. The
/// shopper lock is released while the model runs.
#[instrument(skip_all)]
pub async fn generate(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Form(form): Form<GenerateForm>,
) -> DesignGalleryTemplate {
    let concept = form.prompt.trim();
    if concept.is_empty() {
        let shopper = shopper.lock().await;
        return DesignGalleryTemplate {
            gallery: GalleryView::new(&shopper),
        };
    }

    let (ticket, history) = {
        let mut shopper = shopper.lock().await;
        shopper.design_notice = None;
        (shopper.design.begin(), shopper.gallery.prompts())
    };

    let image = state.studio().generate(concept, &history).await;

    let mut guard = shopper.lock().await;
    match guard.design.settle(ticket) {
        Resolution::Applied => match image {
            Some(image) => {
                let design = GeneratedDesign::new(image, concept, chrono::Utc::now());
                add_breadcrumb(
                    "lab",
                    "Design generated",
                    &[("design_id", &design.id.to_string())],
                );
                guard.gallery.prepend(design);
            }
            None => guard.design_notice = Some(DESIGN_FAILED),
        },
        Resolution::Stale => tracing::debug!("discarding superseded design"),
    }

    DesignGalleryTemplate {
        gallery: GalleryView::new(&guard),
    }
}

/// Download a generated design as an attachment.
#[instrument(skip(shopper))]
pub async fn download(
    CurrentShopper(shopper): CurrentShopper,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let id = DesignId::from(id);
    let shopper = shopper.lock().await;
    let design = shopper
        .gallery
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Design {id}")))?;

    let extension = match design.image.mime_type.as_str() {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    };

    Ok((
        [
            (header::CONTENT_TYPE, design.image.mime_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"ragvynn-{id}.{extension}\""),
            ),
        ],
        design.image.bytes.clone(),
    ))
}
