use plotedit_common::types::ScaleKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Limits ({min}, {max}) are invalid for a {scale} scale")]
    InvalidLimits { min: f64, max: f64, scale: ScaleKind },

    #[error("Artist `{0}` does not support interpolation")]
    InterpolationUnsupported(String),
}
