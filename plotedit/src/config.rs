use crate::error::FigureEditError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Presentation settings of the figure editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EditorConfig {
    pub dialog_title: String,
    pub icon: Option<PathBuf>,
    pub general_title: String,
    pub curves_title: String,
    pub mappables_title: String,
    /// Column count of a regenerated legend when no legend was shown
    pub legend_columns: usize,
    /// Draggable state of a regenerated legend when no legend was shown
    pub legend_draggable: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            dialog_title: "Figure options".to_string(),
            icon: Some(PathBuf::from("images/qt4_editor_options.svg")),
            general_title: "Axes".to_string(),
            curves_title: "Curves".to_string(),
            mappables_title: "Images, etc.".to_string(),
            legend_columns: 1,
            legend_draggable: false,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON document; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, FigureEditError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config = EditorConfig::from_json_str(r#"{"dialog_title": "Options", "icon": null}"#)
            .unwrap();
        assert_eq!(config.dialog_title, "Options");
        assert_eq!(config.icon, None);
        assert_eq!(config.curves_title, "Curves");
        assert_eq!(config.legend_columns, 1);
    }

    #[test]
    fn test_invalid_config() {
        let err = EditorConfig::from_json_str(r#"{"legend_columns": "two"}"#).unwrap_err();
        assert!(matches!(err, FigureEditError::ConfigError(_)));
    }
}
