use crate::commit::apply_edits;
use crate::config::EditorConfig;
use crate::error::FigureEditError;
use crate::form::{FormDialog, FormRequest, FormValue};
use crate::schema::build_schema;
use plotedit_model::artist::Axes;
use plotedit_model::colormap::ColormapRegistry;
use std::any::Any;

/// Edits one axes object through a form dialog
#[derive(Debug, Clone)]
pub struct FigureEditor {
    pub config: EditorConfig,
    pub registry: ColormapRegistry,
}

impl Default for FigureEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default(), ColormapRegistry::builtin())
    }
}

impl FigureEditor {
    pub fn new(config: EditorConfig, registry: ColormapRegistry) -> Self {
        Self { config, registry }
    }

    /// Show the editor for `axes` and commit the confirmed values.
    ///
    /// The dialog may commit intermediate values through its apply
    /// callback. Cancelling leaves the plot as those commits left it.
    #[tracing::instrument(skip_all)]
    pub fn edit(
        &self,
        axes: &mut dyn Axes,
        parent: Option<&dyn Any>,
        dialog: &mut dyn FormDialog,
    ) -> Result<(), FigureEditError> {
        let built = build_schema(axes, &self.registry)?;
        let form = built.schema.to_form(&self.config);
        let request = FormRequest {
            form: &form,
            title: &self.config.dialog_title,
            icon: self.config.icon.as_deref(),
            parent,
        };

        let references = &built.references;
        let config = &self.config;
        let confirmed = {
            let mut apply = |values: Vec<FormValue>| {
                tracing::debug!("applying intermediate values");
                apply_edits(&mut *axes, references, values, config)
            };
            dialog.edit(&request, &mut apply)
        };

        match confirmed {
            Some(values) => apply_edits(axes, references, values, config),
            None => {
                tracing::debug!("figure options dialog cancelled");
                Ok(())
            }
        }
    }
}

/// Edit `axes` with the default configuration and builtin colormaps
pub fn edit_figure(
    axes: &mut dyn Axes,
    parent: Option<&dyn Any>,
    dialog: &mut dyn FormDialog,
) -> Result<(), FigureEditError> {
    FigureEditor::default().edit(axes, parent, dialog)
}
