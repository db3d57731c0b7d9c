//! Style advice from the text model.
//!
//! The advisor never fails: transport errors and empty answers are replaced
//! with fixed messages so the assistant widget always has something to show.

use std::sync::Arc;

use askama::Template;
use tracing::{error, instrument, warn};

use ragvynn_core::{Catalog, Product};

use crate::gemini::{GenerativeModel, TextPrompt};

/// Shown when the model call fails.
pub const ADVICE_UNAVAILABLE: &str = "The AI consultant is optimizing its neural pathways. Please feel free to explore the archive manually.";

/// Shown when the model answers with no text.
pub const ADVICE_EMPTY: &str =
    "Our digital archive is currently syncing. How else can I assist with your selection?";

/// System instruction carrying the persona, the catalog and the guidelines.
#[derive(Template)]
#[template(path = "prompts/style_advisor.txt")]
struct StyleAdvisorPrompt<'a> {
    products: &'a [Arc<Product>],
}

/// Footwear consultant backed by a generative text model.
#[derive(Clone)]
pub struct StyleAdvisor {
    model: Arc<dyn GenerativeModel>,
    system_instruction: Arc<str>,
    temperature: f32,
}

impl StyleAdvisor {
    /// Build an advisor whose system instruction describes `catalog`.
    ///
    /// The catalog never changes after startup, so the instruction is
    /// rendered once here.
    #[must_use]
    pub fn new(model: Arc<dyn GenerativeModel>, catalog: &Catalog, temperature: f32) -> Self {
        let system_instruction = StyleAdvisorPrompt {
            products: catalog.products(),
        }
        .render()
        .unwrap_or_else(|e| {
            error!(error = %e, "failed to render style advisor prompt");
            String::from("You are \"RagvynnAI\", a luxury footwear consultant for RAGVYNN.")
        });

        Self {
            model,
            system_instruction: system_instruction.into(),
            temperature,
        }
    }

    #[must_use]
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Ask for a recommendation. Always returns displayable text.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn advise(&self, query: &str) -> String {
        let request = TextPrompt {
            system_instruction: self.system_instruction.to_string(),
            prompt: query.to_string(),
            temperature: self.temperature,
        };

        match self.model.generate_text(request).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("style advice response was empty");
                ADVICE_EMPTY.to_string()
            }
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "style advice request failed");
                ADVICE_UNAVAILABLE.to_string()
            }
        }
    }
}
