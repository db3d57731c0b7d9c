//! Generated shoe designs.

use chrono::{DateTime, Utc};

use crate::types::DesignId;

/// Raw image bytes with their mime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// A design produced by the lab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDesign {
    pub id: DesignId,
    pub image: ImagePayload,
    /// Prompt the shopper typed.
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedDesign {
    #[must_use]
    pub fn new(image: ImagePayload, prompt: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: DesignId::new_v4(),
            image,
            prompt: prompt.into(),
            created_at,
        }
    }
}

/// Append-only list of designs, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignGallery {
    designs: Vec<GeneratedDesign>,
}

impl DesignGallery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `design` at the front of the gallery.
    pub fn prepend(&mut self, design: GeneratedDesign) {
        self.designs.insert(0, design);
    }

    /// Designs, newest first.
    #[must_use]
    pub fn designs(&self) -> &[GeneratedDesign] {
        &self.designs
    }

    #[must_use]
    pub fn get(&self, id: DesignId) -> Option<&GeneratedDesign> {
        self.designs.iter().find(|d| d.id == id)
    }

    /// Every prompt used so far, newest first.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.designs.iter().map(|d| d.prompt.clone()).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.designs.len()
    }
}
