//! Saved designs, the persistence seam and the variant tray.
//!
//! A [`SavedDesign`] is a snapshot: the parameter record plus the markup and
//! thumbnail rendered from it. The parameters always round-trip, so loading
//! a design and regenerating it reproduces the stored markup exactly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dress::DressParameters;
use crate::error::{Error, Result};
use crate::garment::generate_dress;
use crate::scene::Composition;

/// Name used when a design is saved without a prompt.
pub const DEFAULT_DESIGN_NAME: &str = "Design";

/// Most variants the tray keeps.
pub const VARIANT_LIMIT: usize = 12;

/// Trimmed prompt, or [`DEFAULT_DESIGN_NAME`] when it is blank.
pub fn design_name(prompt: &str) -> String {
    match prompt.trim() {
        "" => DEFAULT_DESIGN_NAME.to_string(),
        trimmed => trimmed.to_string(),
    }
}

// ============================================================================
// Records
// ============================================================================

/// Everything needed to store a design, before it has an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDraft {
    pub name: String,
    pub params: DressParameters,
    pub svg: String,
    /// PNG data URL.
    pub thumbnail: String,
}

impl DesignDraft {
    pub fn new(
        name: impl Into<String>,
        params: DressParameters,
        svg: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            svg: svg.into(),
            thumbnail: thumbnail.into(),
        }
    }

    pub fn into_saved(self, id: impl Into<String>, at: DateTime<Utc>) -> SavedDesign {
        SavedDesign {
            id: id.into(),
            name: self.name,
            timestamp: at.timestamp_millis(),
            svg: self.svg,
            thumbnail: self.thumbnail,
            params: self.params,
        }
    }
}

/// A stored design snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDesign {
    pub id: String,
    pub name: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub svg: String,
    #[serde(alias = "thumb")]
    pub thumbnail: String,
    pub params: DressParameters,
}

impl SavedDesign {
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Regenerates the design from its parameter snapshot.
    pub fn render(&self) -> Composition {
        generate_dress(&self.params)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// Persistence collaborator for saved designs.
pub trait DesignStore {
    /// Stores a draft and returns its new id.
    fn save(&mut self, draft: DesignDraft) -> Result<String>;

    fn get(&self, id: &str) -> Result<SavedDesign>;

    /// All designs, newest first.
    fn list(&self) -> Vec<SavedDesign>;

    /// Replaces the contents of an existing design, keeping its id.
    fn update(&mut self, id: &str, draft: DesignDraft) -> Result<SavedDesign>;

    fn delete(&mut self, id: &str) -> Result<SavedDesign>;
}

/// In-process [`DesignStore`].
#[derive(Debug, Default)]
pub struct MemoryDesignStore {
    /// Oldest first.
    designs: Vec<SavedDesign>,
    next_id: u64,
}

impl MemoryDesignStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.designs
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| Error::design_not_found(id))
    }
}

impl DesignStore for MemoryDesignStore {
    fn save(&mut self, draft: DesignDraft) -> Result<String> {
        self.next_id += 1;
        let id = format!("design-{}", self.next_id);
        tracing::info!(%id, name = %draft.name, "saving design");
        self.designs.push(draft.into_saved(id.clone(), Utc::now()));
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<SavedDesign> {
        Ok(self.designs[self.position(id)?].clone())
    }

    fn list(&self) -> Vec<SavedDesign> {
        self.designs.iter().rev().cloned().collect()
    }

    fn update(&mut self, id: &str, draft: DesignDraft) -> Result<SavedDesign> {
        let index = self.position(id)?;
        let updated = draft.into_saved(id, Utc::now());
        self.designs[index] = updated.clone();
        Ok(updated)
    }

    fn delete(&mut self, id: &str) -> Result<SavedDesign> {
        let index = self.position(id)?;
        tracing::info!(%id, "deleting design");
        Ok(self.designs.remove(index))
    }
}

// ============================================================================
// Variant Tray
// ============================================================================

/// Recent unsaved variants, newest first, capped at a fixed length.
#[derive(Debug, Clone)]
pub struct VariantTray {
    variants: Vec<SavedDesign>,
    limit: usize,
    next_id: u64,
}

impl Default for VariantTray {
    fn default() -> Self {
        Self::with_limit(VARIANT_LIMIT)
    }
}

impl VariantTray {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tray holding at most `limit` variants, never fewer than one.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            variants: Vec::new(),
            limit: limit.max(1),
            next_id: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Changes the cap, dropping the oldest variants if needed. The cap
    /// is at least one so the newest variant is always kept.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.variants.truncate(self.limit);
    }

    /// Adds a variant at the front and returns it.
    pub fn push(&mut self, draft: DesignDraft) -> &SavedDesign {
        self.next_id += 1;
        let variant = draft.into_saved(format!("variant-{}", self.next_id), Utc::now());
        self.variants.insert(0, variant);
        self.variants.truncate(self.limit);
        &self.variants[0]
    }

    pub fn get(&self, id: &str) -> Option<&SavedDesign> {
        self.variants.iter().find(|v| v.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedDesign> {
        self.variants.iter()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn clear(&mut self) {
        self.variants.clear();
    }
}
