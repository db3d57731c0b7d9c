//! One-off shoe concepts from the image model.

use std::sync::Arc;

use askama::Template;
use tracing::{error, instrument, warn};

use ragvynn_core::ImagePayload;

use crate::gemini::{GenerativeModel, ImagePrompt};

/// Notice shown in the lab when a generation produced nothing.
pub const DESIGN_FAILED: &str = "Design generation failed in the matrix. Try again.";

const ASPECT_RATIO: &str = "1:1";

#[derive(Template)]
#[template(path = "prompts/design_concept.txt")]
struct DesignConceptPrompt<'a> {
    concept: &'a str,
    history: &'a [String],
}

/// Compose the image prompt for `concept`, steering away from `history`.
#[must_use]
pub fn compose_prompt(concept: &str, history: &[String]) -> String {
    DesignConceptPrompt { concept, history }
        .render()
        .unwrap_or_else(|e| {
            error!(error = %e, "failed to render design prompt");
            format!("A single unique luxury shoe on a clean studio background. Concept: {concept}.")
        })
}

/// Image-model front end for the design lab.
#[derive(Clone)]
pub struct DesignStudio {
    model: Arc<dyn GenerativeModel>,
}

impl DesignStudio {
    #[must_use]
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Generate one square image for `concept`.
    ///
    /// Returns `None` when the call fails or the response carries no image.
    #[instrument(skip(self, concept, history), fields(history_len = history.len()))]
    pub async fn generate(&self, concept: &str, history: &[String]) -> Option<ImagePayload> {
        let request = ImagePrompt {
            prompt: compose_prompt(concept, history),
            aspect_ratio: ASPECT_RATIO.to_string(),
        };

        match self.model.generate_image(request).await {
            Ok(Some(image)) => Some(image),
            Ok(None) => {
                warn!("image response had no inline data");
                None
            }
            Err(e) => {
                error!(error = %e, "image generation failed");
                None
            }
        }
    }
}
