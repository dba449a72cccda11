//! Crate error type.
//!
//! The generators are total and never fail. Errors come only from the
//! collaborators around them: rasterizing markup, encoding images, reading
//! profiles and looking up saved designs.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("svg parse error: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("invalid size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("design not found: {0}")]
    DesignNotFound(String),
}

impl Error {
    pub fn invalid_size(width: u32, height: u32) -> Self {
        Self::InvalidSize { width, height }
    }

    pub fn design_not_found(id: impl Into<String>) -> Self {
        Self::DesignNotFound(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert_eq!(Error::invalid_size(0, 280).to_string(), "invalid size: 0x280");
        assert!(
            Error::design_not_found("design-3")
                .to_string()
                .contains("design not found: design-3")
        );
    }

    #[test]
    fn json_errors_convert() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("serialization error:"));
    }
}
