//! Style assistant route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State};
use serde::Deserialize;
use tracing::instrument;

use ragvynn_core::Resolution;

use crate::middleware::CurrentShopper;
use crate::models::Shopper;
use crate::state::AppState;

/// Assistant widget display data for templates.
#[derive(Clone)]
pub struct AdviceView {
    /// Latest accepted answer.
    pub answer: Option<String>,
    pub thinking: bool,
}

impl AdviceView {
    #[must_use]
    pub fn new(shopper: &Shopper) -> Self {
        Self {
            answer: shopper.advice.value().cloned(),
            thinking: shopper.advice.in_flight(),
        }
    }
}

/// Assistant form data.
#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub query: String,
}

/// Advice fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/advice.html")]
pub struct AdviceTemplate {
    pub advice: AdviceView,
}

/// Ask the style consultant (HTMX).
///
/// The shopper lock is released while the model runs. An answer that comes
/// back after a newer question was asked is dropped.
#[instrument(skip_all)]
pub async fn ask(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Form(form): Form<AskForm>,
) -> AdviceTemplate {
    let query = form.query.trim();
    if query.is_empty() {
        let shopper = shopper.lock().await;
        return AdviceTemplate {
            advice: AdviceView::new(&shopper),
        };
    }

    let ticket = shopper.lock().await.advice.begin();
    let answer = state.advisor().advise(query).await;

    let mut shopper = shopper.lock().await;
    if shopper.advice.resolve(ticket, answer) == Resolution::Stale {
        tracing::debug!("discarding superseded advice");
    }

    AdviceTemplate {
        advice: AdviceView::new(&shopper),
    }
}
