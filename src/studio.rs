//! The design studio: an editing surface owning the current parameters.

use chrono::Utc;

use crate::avatar::{AvatarParameters, AvatarStyle, avatar_geometry};
use crate::design::{
    DEFAULT_DESIGN_NAME, DesignDraft, DesignStore, SavedDesign, VariantTray, design_name,
};
use crate::dress::DressParameters;
use crate::error::{Error, Result};
use crate::export::{ExportFormat, ExportOutput, Exporter};
use crate::garment::generate_dress;
use crate::profile::{ExportSettings, StudioProfile};
use crate::prompt::parse_prompt;
use crate::scene::Composition;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`StudioProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &StudioProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> StudioProfile;
}

// ============================================================================
// Studio
// ============================================================================

/// Editing session state.
///
/// Every change to the parameters is followed by a full regeneration; the
/// studio caches nothing.
///
/// # Example
///
/// ```
/// use dress_customizer::{Neckline, Studio};
///
/// let mut studio = Studio::new();
/// studio.set_prompt("Emerald velvet ballgown with off-shoulder neckline");
/// studio.generate();
/// assert_eq!(studio.params().neckline, Neckline::OffShoulder);
///
/// let variant_id = studio.save_variant().unwrap().id.clone();
/// studio.load_variant(&variant_id).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct Studio {
    params: DressParameters,
    body: AvatarParameters,
    avatar_style: AvatarStyle,
    prompt: String,
    export: ExportSettings,
    variants: VariantTray,
    exporter: Exporter,
}

impl Studio {
    /// A fresh session starting from the default dress.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(&self) -> &DressParameters {
        &self.params
    }

    pub fn set_params(&mut self, params: DressParameters) {
        self.params = params;
    }

    pub fn body(&self) -> &AvatarParameters {
        &self.body
    }

    pub fn set_body(&mut self, body: AvatarParameters) {
        self.body = body;
    }

    pub fn avatar_style(&self) -> AvatarStyle {
        self.avatar_style
    }

    pub fn set_avatar_style(&mut self, style: AvatarStyle) {
        self.avatar_style = style;
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn variants(&self) -> &VariantTray {
        &self.variants
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export
    }

    /// Applies the current prompt's keywords to the parameters.
    pub fn generate(&mut self) -> &DressParameters {
        self.params = parse_prompt(&self.prompt, &self.params);
        &self.params
    }

    /// The dress for the current parameters.
    pub fn preview(&self) -> Composition {
        generate_dress(&self.params)
    }

    /// The body avatar in the selected style.
    pub fn avatar_preview(&self) -> Composition {
        self.avatar_style.render(&avatar_geometry(&self.body))
    }

    fn draft(&self) -> Result<DesignDraft> {
        let svg = self.preview().to_svg();
        let thumbnail = self.exporter.thumbnail(&svg, self.export.thumbnail)?;
        Ok(DesignDraft::new(
            design_name(&self.prompt),
            self.params.clone(),
            svg,
            thumbnail,
        ))
    }

    // ------------------------------------------------------------------------
    // Variants
    // ------------------------------------------------------------------------

    /// Captures the current design into the variant tray.
    pub fn save_variant(&mut self) -> Result<&SavedDesign> {
        let draft = self.draft()?;
        tracing::info!(name = %draft.name, "saving variant");
        Ok(self.variants.push(draft))
    }

    /// Restores a variant's parameters and prompt.
    pub fn load_variant(&mut self, id: &str) -> Result<()> {
        let variant = self
            .variants
            .get(id)
            .cloned()
            .ok_or_else(|| Error::design_not_found(id))?;
        self.restore(variant);
        Ok(())
    }

    fn restore(&mut self, design: SavedDesign) {
        self.prompt = if design.name == DEFAULT_DESIGN_NAME {
            String::new()
        } else {
            design.name
        };
        self.params = design.params;
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Stores the current design and returns its id.
    pub fn save_design(&self, store: &mut dyn DesignStore) -> Result<String> {
        store.save(self.draft()?)
    }

    /// Opens a stored design for editing.
    pub fn open_design(&mut self, store: &dyn DesignStore, id: &str) -> Result<()> {
        let design = store.get(id)?;
        self.restore(design);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    pub fn export_svg(&self) -> Result<ExportOutput> {
        self.exporter
            .export_composition(&self.preview(), ExportFormat::Svg)
    }

    /// Full-resolution PNG.
    pub fn export_png(&self) -> Result<ExportOutput> {
        self.exporter
            .export_composition(&self.preview(), ExportFormat::Png(self.export.full))
    }

    /// Exports in `format` and pairs the output with its download name.
    pub fn export_file(&self, format: ExportFormat) -> Result<(String, ExportOutput)> {
        let output = self.exporter.export_composition(&self.preview(), format)?;
        Ok((format.file_name(Utc::now()), output))
    }
}

impl Configurable for Studio {
    fn apply_profile(&mut self, profile: &StudioProfile) {
        self.params = profile.dress.clone();
        self.body = profile.body.clone();
        self.avatar_style = profile.avatar_style;
        self.prompt = profile.prompt.clone();
        self.export = profile.export;
        self.variants.set_limit(profile.export.variant_limit);
    }

    fn export_profile(&self) -> StudioProfile {
        StudioProfile {
            dress: self.params.clone(),
            body: self.body.clone(),
            avatar_style: self.avatar_style,
            prompt: self.prompt.clone(),
            export: self.export,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
