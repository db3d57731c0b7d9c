//! Generative Language API integration.
//!
//! The storefront talks to the model through the [`GenerativeModel`] trait so
//! the style advisor and design lab can be exercised without network access.
//! [`GeminiClient`] is the production implementation.
//!
//! ```text
//! POST {api_base}/models/{model}:generateContent
//! x-goog-api-key: <key>
//!
//! { "systemInstruction": {...}, "contents": [...], "generationConfig": {...} }
//! ```

mod client;
mod error;
pub mod types;

use async_trait::async_trait;

use ragvynn_core::ImagePayload;

pub use client::GeminiClient;
pub use error::{ApiErrorResponse, GeminiError};

/// A text completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrompt {
    /// System instruction carrying the persona and catalog context.
    pub system_instruction: String,
    /// The shopper's message.
    pub prompt: String,
    pub temperature: f32,
}

/// An image generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePrompt {
    pub prompt: String,
    /// Aspect ratio such as `"1:1"`.
    pub aspect_ratio: String,
}

/// The operations the storefront needs from a generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generate text. An empty string means the model answered with nothing.
    async fn generate_text(&self, request: TextPrompt) -> Result<String, GeminiError>;

    /// Generate an image. `None` means the model answered without image data.
    async fn generate_image(
        &self,
        request: ImagePrompt,
    ) -> Result<Option<ImagePayload>, GeminiError>;
}
