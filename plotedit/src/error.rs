use plotedit_common::{error::CommonError, types::AxisKey};
use plotedit_model::{artist::ArtistId, error::ModelError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigureEditError {
    #[error("Edited values are missing the `{0}` group")]
    MissingGroup(&'static str),

    #[error("Unexpected field: {0} unconsumed group(s) in edited values")]
    UnexpectedGroups(usize),

    #[error("Group `{group}` expected {expected} fields, found {found}")]
    FieldCount {
        group: String,
        expected: String,
        found: usize,
    },

    #[error("Field `{field}` expected a {expected} value, found {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("Colormap not found: `{0}`")]
    UnknownColormap(String),

    #[error("Unknown scale: `{0}`")]
    UnknownScale(String),

    #[error("Unknown interpolation: `{0}`")]
    UnknownInterpolation(String),

    #[error("Artist not found: {0:?}")]
    ArtistNotFound(ArtistId),

    #[error("Axis not found: `{0}`")]
    AxisNotFound(AxisKey),

    #[error("Model error: `{0}`")]
    ModelError(#[from] ModelError),

    #[error("Common error: `{0}`")]
    CommonError(#[from] CommonError),

    #[error("Config error: `{0}`")]
    ConfigError(#[from] serde_json::Error),
}
