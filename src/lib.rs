//! dress-customizer: parametric dress and body-avatar silhouette generator
//!
//! This crate turns a small record of design parameters into a layered
//! vector illustration of a dress, and a record of body measurements into a
//! stylized avatar. Both generators are pure: the same input always yields
//! byte-identical SVG markup.
//!
//! # Example
//!
//! ```
//! use dress_customizer::{DressParameters, Neckline, Pattern, generate_dress, parse_prompt};
//!
//! let params = DressParameters::default()
//!     .with_pattern(Pattern::Polka)
//!     .with_neckline(Neckline::VNeck);
//! let svg = generate_dress(&params).to_svg();
//! assert!(svg.starts_with("<svg"));
//!
//! // Keywords in free text adjust the record
//! let edited = parse_prompt("navy lace gown with long sleeves", &params);
//! assert_eq!(edited.color, "#1E3A8A");
//! assert_eq!(edited.sleeve_length, 85.0);
//! ```
//!
//! # Editing Sessions
//!
//! A [`Studio`] holds the current parameters, the variant tray and export
//! settings. It is configured through a serializable [`StudioProfile`] via
//! the [`Configurable`] trait:
//!
//! ```
//! use dress_customizer::{Configurable, Studio, StudioProfile};
//!
//! let profile = StudioProfile::from_json(
//!     r#"{"prompt": "purple satin mermaid", "body": {"height": 110, "width": 100}}"#,
//! )
//! .unwrap();
//!
//! let mut studio = Studio::new();
//! studio.apply_profile(&profile);
//! studio.generate();
//! assert_eq!(studio.params().color, "#A855F7");
//!
//! let json = studio.export_profile().to_json().unwrap();
//! assert!(json.contains("\"heightCm\""));
//! ```

pub mod avatar;
pub mod color;
pub mod design;
pub mod dress;
pub mod error;
pub mod export;
pub mod garment;
pub mod geometry;
pub mod profile;
pub mod prompt;
pub mod scene;
pub mod studio;

#[cfg(feature = "wasm")]
mod wasm;

pub use avatar::{
    AvatarDecorator, AvatarGeometry, AvatarParameters, AvatarStyle, BodyProfileInput, FlatStyle,
    RealisticStyle, Unit, avatar_geometry, canonicalize, generate_avatar, render_avatar,
};
pub use color::shade;
pub use design::{DesignDraft, DesignStore, MemoryDesignStore, SavedDesign, VariantTray};
pub use dress::{DressMetrics, DressParameters, Neckline, Pattern, Texture};
pub use error::{Error, Result};
pub use export::{ExportFormat, ExportOutput, Exporter, SizePx};
pub use garment::{DressGeometry, dress_geometry, generate_dress};
pub use profile::{ExportSettings, StudioProfile};
pub use prompt::parse_prompt;
pub use scene::Composition;
pub use studio::{Configurable, Studio};

#[cfg(feature = "wasm")]
pub use wasm::DressStudio;
