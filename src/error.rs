use thiserror::Error;

/// Rejected indicator configuration.
///
/// Raised synchronously at setup time (or by a configuration setter) and
/// never clamped away.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value range: max ({max}) must be greater than min ({min})")]
    InvalidRange { min: f64, max: f64 },

    #[error("radius must not be negative, got {0}")]
    NegativeRadius(f64),

    #[error("ring thickness must not be negative, got {0}")]
    NegativeRingThickness(f64),

    #[error("stroke margin must not be negative, got {0}")]
    NegativeMargin(f64),

    #[error("corner correction must not be negative, got {0}")]
    NegativeCorrection(f64),

    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },

    #[error("max framerate must be positive, got {0}")]
    InvalidFramerate(f64),

    #[error("unknown orientation `{0}`")]
    UnknownOrientation(String),

    #[error("unknown direction `{0}`")]
    UnknownDirection(String),

    #[error("unknown shape `{0}`")]
    UnknownShape(String),
}

/// Failure while preparing label rendering resources.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read font file: {0}")]
    FontIo(#[from] std::io::Error),

    #[error("font data could not be parsed")]
    InvalidFont,
}
