//! JavaScript bindings for the browser front-end.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import { DressStudio, renderDressSvg } from 'dress-customizer';
//!
//! const studio = new DressStudio();
//! studio.setPrompt('navy satin ballgown');
//! studio.generate();
//! preview.innerHTML = studio.previewSvg();
//!
//! const variantId = studio.saveVariant();
//! const png = studio.exportPng(); // Uint8Array
//! ```

use wasm_bindgen::prelude::*;

use crate::avatar::{AvatarStyle, avatar_geometry, canonicalize_value};
use crate::color;
use crate::dress::DressParameters;
use crate::export::ExportOutput;
use crate::garment::generate_dress;
use crate::profile::StudioProfile;
use crate::prompt;
use crate::studio::{Configurable, Studio};

fn js_error(context: &str, err: impl std::fmt::Display) -> JsError {
    JsError::new(&format!("{context}: {err}"))
}

// ============================================================================
// Free Functions
// ============================================================================

/// Renders a dress parameter object to SVG markup.
#[wasm_bindgen(js_name = "renderDressSvg")]
pub fn render_dress_svg(params: JsValue) -> Result<String, JsError> {
    let params: DressParameters = serde_wasm_bindgen::from_value(params)
        .map_err(|e| js_error("Failed to read dress parameters", e))?;
    Ok(generate_dress(&params.clamped()).to_svg())
}

/// Renders a stored body profile, in either shape, to avatar markup.
#[wasm_bindgen(js_name = "renderAvatarSvg")]
pub fn render_avatar_svg(profile: JsValue, realistic: bool) -> Result<String, JsError> {
    let body = canonicalize_body(profile)?;
    let style = if realistic {
        AvatarStyle::Realistic
    } else {
        AvatarStyle::Flat
    };
    Ok(style.render(&avatar_geometry(&body)).to_svg())
}

/// Applies prompt keywords on top of a parameter object.
#[wasm_bindgen(js_name = "parsePrompt")]
pub fn parse_prompt(text: &str, base: JsValue) -> Result<JsValue, JsError> {
    let base: DressParameters = serde_wasm_bindgen::from_value(base)
        .map_err(|e| js_error("Failed to read dress parameters", e))?;
    serde_wasm_bindgen::to_value(&prompt::parse_prompt(text, &base))
        .map_err(|e| js_error("Failed to write dress parameters", e))
}

/// Normalizes a stored body profile into the metric shape.
#[wasm_bindgen(js_name = "canonicalizeBodyProfile")]
pub fn canonicalize_body_profile(profile: JsValue) -> Result<JsValue, JsError> {
    let body = canonicalize_body(profile)?;
    serde_wasm_bindgen::to_value(&body).map_err(|e| js_error("Failed to write body profile", e))
}

#[wasm_bindgen]
pub fn shade(color: &str, percent: f64) -> String {
    color::shade(color, percent)
}

fn canonicalize_body(profile: JsValue) -> Result<crate::avatar::AvatarParameters, JsError> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(profile)
        .map_err(|e| js_error("Failed to read body profile", e))?;
    Ok(canonicalize_value(&value))
}

// ============================================================================
// DressStudio
// ============================================================================

/// A wrapper around [`Studio`] for the editing UI.
#[wasm_bindgen(js_name = "DressStudio")]
pub struct DressStudio {
    studio: Studio,
}

#[wasm_bindgen(js_class = "DressStudio")]
impl DressStudio {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DressStudio {
        Self {
            studio: Studio::new(),
        }
    }

    #[wasm_bindgen(js_name = "setPrompt")]
    pub fn set_prompt(&mut self, prompt: &str) {
        self.studio.set_prompt(prompt);
    }

    /// Applies the prompt and returns the resulting parameters.
    pub fn generate(&mut self) -> Result<JsValue, JsError> {
        let params = self.studio.generate();
        serde_wasm_bindgen::to_value(params)
            .map_err(|e| js_error("Failed to write dress parameters", e))
    }

    #[wasm_bindgen(js_name = "setParams")]
    pub fn set_params(&mut self, params: JsValue) -> Result<(), JsError> {
        let params: DressParameters = serde_wasm_bindgen::from_value(params)
            .map_err(|e| js_error("Failed to read dress parameters", e))?;
        self.studio.set_params(params.clamped());
        Ok(())
    }

    #[wasm_bindgen(js_name = "previewSvg")]
    pub fn preview_svg(&self) -> String {
        self.studio.preview().to_svg()
    }

    #[wasm_bindgen(js_name = "avatarSvg")]
    pub fn avatar_svg(&self) -> String {
        self.studio.avatar_preview().to_svg()
    }

    // ---- Variants ----

    /// Captures the current design and returns the new variant's id.
    #[wasm_bindgen(js_name = "saveVariant")]
    pub fn save_variant(&mut self) -> Result<String, JsError> {
        let variant = self
            .studio
            .save_variant()
            .map_err(|e| js_error("Failed to save variant", e))?;
        Ok(variant.id.clone())
    }

    #[wasm_bindgen(js_name = "loadVariant")]
    pub fn load_variant(&mut self, id: &str) -> Result<(), JsError> {
        self.studio
            .load_variant(id)
            .map_err(|e| js_error("Failed to load variant", e))
    }

    /// Variant records, newest first.
    pub fn variants(&self) -> Result<JsValue, JsError> {
        let variants: Vec<_> = self.studio.variants().iter().collect();
        serde_wasm_bindgen::to_value(&variants).map_err(|e| js_error("Failed to write variants", e))
    }

    // ---- Export ----

    #[wasm_bindgen(js_name = "exportSvg")]
    pub fn export_svg(&self) -> Result<String, JsError> {
        let bytes = self
            .studio
            .export_svg()
            .map(ExportOutput::into_bytes)
            .map_err(|e| js_error("Failed to export SVG", e))?;
        String::from_utf8(bytes).map_err(|e| js_error("Failed to export SVG", e))
    }

    #[wasm_bindgen(js_name = "exportPng")]
    pub fn export_png(&self) -> Result<Vec<u8>, JsError> {
        self.studio
            .export_png()
            .map(ExportOutput::into_bytes)
            .map_err(|e| js_error("Failed to export PNG", e))
    }

    // ---- Profile Import/Export ----

    #[wasm_bindgen(js_name = "exportProfileJson")]
    pub fn export_profile_json(&self) -> Result<String, JsError> {
        self.studio
            .export_profile()
            .to_json()
            .map_err(|e| js_error("Failed to serialize profile", e))
    }

    #[wasm_bindgen(js_name = "importProfileJson")]
    pub fn import_profile_json(&mut self, json: &str) -> Result<(), JsError> {
        let profile =
            StudioProfile::from_json(json).map_err(|e| js_error("Failed to parse profile", e))?;
        self.studio.apply_profile(&profile);
        Ok(())
    }
}

impl Default for DressStudio {
    fn default() -> Self {
        Self::new()
    }
}
