//! Writes edited form values back to the plot.
//!
//! The whole value tree is decoded into typed edits before the first
//! mutation, so a malformed tree leaves the plot untouched.

use crate::config::EditorConfig;
use crate::error::FigureEditError;
use crate::form::{FieldValue, FormValue};
use crate::schema::{
    AxisSnapshot, ReferenceTable, AXIS_FIELD_COUNT, CURVE_FIELD_COUNT, MAPPABLE_FIELD_COUNT,
};
use crate::style::is_no_marker;
use ordered_float::OrderedFloat;
use plotedit_common::color::parse_rgba;
use plotedit_common::dates::{date2num, num2date};
use plotedit_common::types::{AxisKey, Rgba, ScaleKind};
use plotedit_model::artist::{ArtistId, Axes};
use plotedit_model::colormap::Colormap;
use plotedit_model::interpolation::Interpolation;
use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::Arc;

/// Sequential, typed access to the fields of one group
struct FieldReader {
    group: String,
    fields: VecDeque<FieldValue>,
}

impl FieldReader {
    fn new(
        group: impl Into<String>,
        value: FormValue,
        expected: &[usize],
    ) -> Result<Self, FigureEditError> {
        let group = group.into();
        let values = expect_group(&group, value)?;
        if !expected.contains(&values.len()) {
            return Err(FigureEditError::FieldCount {
                group,
                expected: expected
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" or "),
                found: values.len(),
            });
        }
        let fields = values
            .into_iter()
            .map(|value| match value {
                FormValue::Field(field) => Ok(field),
                group_value => Err(FigureEditError::FieldType {
                    field: group.clone(),
                    expected: "field",
                    found: group_value.describe(),
                }),
            })
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { group, fields })
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn take(&mut self, name: &str) -> Result<FieldValue, FigureEditError> {
        self.fields
            .pop_front()
            .ok_or_else(|| FigureEditError::FieldCount {
                group: self.group.clone(),
                expected: format!("a `{name}` field among the"),
                found: 0,
            })
    }

    fn mismatch(
        &self,
        name: &str,
        expected: &'static str,
        found: &FieldValue,
    ) -> FigureEditError {
        FigureEditError::FieldType {
            field: format!("{}/{}", self.group, name),
            expected,
            found: found.kind().to_string(),
        }
    }

    fn text(&mut self, name: &str) -> Result<String, FigureEditError> {
        match self.take(name)? {
            FieldValue::Text(text) => Ok(text),
            other => Err(self.mismatch(name, "text", &other)),
        }
    }

    fn float(&mut self, name: &str) -> Result<f64, FigureEditError> {
        match self.take(name)? {
            FieldValue::Float(value) => Ok(value),
            other => Err(self.mismatch(name, "float", &other)),
        }
    }

    fn boolean(&mut self, name: &str) -> Result<bool, FigureEditError> {
        match self.take(name)? {
            FieldValue::Bool(value) => Ok(value),
            other => Err(self.mismatch(name, "bool", &other)),
        }
    }

    /// Axis limit in data coordinates; dates are converted to day numbers.
    ///
    /// A date equal to the presentation of `original` yields `original`
    /// itself, since the date form is rounded to the microsecond.
    fn limit(&mut self, name: &str, original: f64) -> Result<f64, FigureEditError> {
        match self.take(name)? {
            FieldValue::Float(value) => Ok(value),
            FieldValue::Date(date) => match num2date(original) {
                Ok(presented) if presented == date => Ok(original),
                _ => Ok(date2num(&date)),
            },
            other => Err(self.mismatch(name, "float or date", &other)),
        }
    }

    fn choice(&mut self, name: &str) -> Result<String, FigureEditError> {
        match self.take(name)? {
            FieldValue::Choice(key) | FieldValue::Text(key) => Ok(key),
            other => Err(self.mismatch(name, "choice", &other)),
        }
    }

    fn color(&mut self, name: &str) -> Result<Rgba, FigureEditError> {
        match self.take(name)? {
            FieldValue::Color(text) | FieldValue::Text(text) => Ok(parse_rgba(&text)?),
            other => Err(self.mismatch(name, "color", &other)),
        }
    }
}

fn expect_group(group: &str, value: FormValue) -> Result<Vec<FormValue>, FigureEditError> {
    match value {
        FormValue::Group(values) => Ok(values),
        FormValue::Field(field) => Err(FigureEditError::FieldType {
            field: group.to_string(),
            expected: "group",
            found: field.kind().to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisEdit {
    pub key: AxisKey,
    pub min: f64,
    pub max: f64,
    pub label: String,
    pub scale: ScaleKind,
}

impl AxisEdit {
    /// Consumes exactly `AXIS_FIELD_COUNT` fields
    fn decode(
        reader: &mut FieldReader,
        snapshot: &AxisSnapshot,
    ) -> Result<Self, FigureEditError> {
        let (original_min, original_max) = snapshot.limits;
        let min = reader.limit("Min", original_min)?;
        let max = reader.limit("Max", original_max)?;
        let label = reader.text("Label")?;
        let scale = reader.choice("Scale")?;
        let scale =
            ScaleKind::from_str(&scale).map_err(|_| FigureEditError::UnknownScale(scale))?;
        Ok(Self {
            key: snapshot.key,
            min,
            max,
            label,
            scale,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneralEdit {
    pub title: String,
    pub axes: Vec<AxisEdit>,
    pub generate_legend: bool,
}

impl GeneralEdit {
    fn decode(value: FormValue, axes: &[AxisSnapshot]) -> Result<Self, FigureEditError> {
        let expected = axes.len() * AXIS_FIELD_COUNT + 2;
        let mut reader = FieldReader::new("General", value, &[expected])?;
        let title = reader.text("Title")?;
        let axes = axes
            .iter()
            .map(|snapshot| AxisEdit::decode(&mut reader, snapshot))
            .collect::<Result<Vec<_>, _>>()?;
        let generate_legend = reader.boolean("(Re-)Generate automatic legend")?;
        Ok(Self {
            title,
            axes,
            generate_legend,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEdit {
    pub marker: String,
    pub size: f64,
    pub face: Rgba,
    pub edge: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurveEdit {
    pub id: ArtistId,
    pub label: String,
    pub linestyle: String,
    pub drawstyle: String,
    pub linewidth: f64,
    pub color: Rgba,
    /// `None` when the "no marker" style was selected
    pub marker: Option<MarkerEdit>,
}

impl CurveEdit {
    fn decode(value: FormValue, id: ArtistId, index: usize) -> Result<Self, FigureEditError> {
        let mut reader = FieldReader::new(format!("Curve {index}"), value, &[CURVE_FIELD_COUNT])?;
        let label = reader.text("Label")?;
        let linestyle = reader.choice("Line style")?;
        let drawstyle = reader.choice("Draw style")?;
        let linewidth = reader.float("Width")?;
        let color = reader.color("Color (RGBA)")?;
        let marker = reader.choice("Style")?;
        let marker = if is_no_marker(&marker) {
            None
        } else {
            Some(MarkerEdit {
                marker,
                size: reader.float("Size")?,
                face: reader.color("Face color (RGBA)")?,
                edge: reader.color("Edge color (RGBA)")?,
            })
        };
        Ok(Self {
            id,
            label,
            linestyle,
            drawstyle,
            linewidth,
            color,
            marker,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappableEdit {
    pub id: ArtistId,
    pub label: String,
    pub colormap: Arc<Colormap>,
    pub low: f64,
    pub high: f64,
    pub interpolation: Option<Interpolation>,
}

impl MappableEdit {
    fn decode(
        value: FormValue,
        id: ArtistId,
        index: usize,
        references: &ReferenceTable,
    ) -> Result<Self, FigureEditError> {
        let mut reader = FieldReader::new(
            format!("Mappable {index}"),
            value,
            &[MAPPABLE_FIELD_COUNT, MAPPABLE_FIELD_COUNT + 1],
        )?;
        let with_interpolation = reader.len() > MAPPABLE_FIELD_COUNT;
        let label = reader.text("Label")?;
        let key = reader.choice("Colormap")?;
        let colormap = references
            .colormaps
            .resolve(&key)
            .ok_or(FigureEditError::UnknownColormap(key))?;
        let low = reader.float("Min. value")?;
        let high = reader.float("Max. value")?;
        let interpolation = if with_interpolation {
            let name = reader.choice("Interpolation")?;
            let interpolation = Interpolation::from_str(&name)
                .map_err(|_| FigureEditError::UnknownInterpolation(name))?;
            Some(interpolation)
        } else {
            None
        };
        Ok(Self {
            id,
            label,
            colormap,
            low,
            high,
            interpolation,
        })
    }
}

/// Typed form of a complete edited-value tree
#[derive(Debug, Clone, PartialEq)]
pub struct FigureEdit {
    pub general: GeneralEdit,
    pub curves: Vec<CurveEdit>,
    pub mappables: Vec<MappableEdit>,
}

impl FigureEdit {
    pub fn decode(
        values: Vec<FormValue>,
        references: &ReferenceTable,
    ) -> Result<Self, FigureEditError> {
        let mut groups = values.into_iter();
        let general = groups
            .next()
            .ok_or(FigureEditError::MissingGroup("General"))?;
        let general = GeneralEdit::decode(general, &references.axes)?;

        let curves = if references.has_curves() {
            let group = groups.next().ok_or(FigureEditError::MissingGroup("Curves"))?;
            let curves = expect_group("Curves", group)?;
            check_count("Curves", references.curves.len(), curves.len())?;
            curves
                .into_iter()
                .zip(&references.curves)
                .enumerate()
                .map(|(index, (value, id))| CurveEdit::decode(value, *id, index))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        let mappables = if references.has_mappables() {
            let group = groups
                .next()
                .ok_or(FigureEditError::MissingGroup("Images, etc."))?;
            let mappables = expect_group("Images, etc.", group)?;
            check_count("Images, etc.", references.mappables.len(), mappables.len())?;
            mappables
                .into_iter()
                .zip(&references.mappables)
                .enumerate()
                .map(|(index, (value, id))| MappableEdit::decode(value, *id, index, references))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };

        let leftover = groups.count();
        if leftover > 0 {
            return Err(FigureEditError::UnexpectedGroups(leftover));
        }
        Ok(Self {
            general,
            curves,
            mappables,
        })
    }
}

fn check_count(group: &str, expected: usize, found: usize) -> Result<(), FigureEditError> {
    if expected == found {
        Ok(())
    } else {
        Err(FigureEditError::FieldCount {
            group: group.to_string(),
            expected: expected.to_string(),
            found,
        })
    }
}

/// Commit an edited-value tree to `axes`
#[tracing::instrument(skip_all)]
pub fn apply_edits(
    axes: &mut dyn Axes,
    references: &ReferenceTable,
    values: Vec<FormValue>,
    config: &EditorConfig,
) -> Result<(), FigureEditError> {
    let edit = FigureEdit::decode(values, references)?;

    let original_limits = references
        .axes
        .iter()
        .map(|snapshot| -> Result<_, FigureEditError> {
            let axis = axes
                .axis(snapshot.key)
                .ok_or(FigureEditError::AxisNotFound(snapshot.key))?;
            Ok((snapshot.key, axis.limits()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    axes.set_title(&edit.general.title);
    for (axis_edit, snapshot) in edit.general.axes.iter().zip(&references.axes) {
        apply_axis(axes, axis_edit, snapshot)?;
    }

    for curve in &edit.curves {
        let line = axes
            .line_mut(curve.id)
            .ok_or(FigureEditError::ArtistNotFound(curve.id))?;
        line.set_label(&curve.label);
        line.set_linestyle(&curve.linestyle);
        line.set_drawstyle(&curve.drawstyle);
        line.set_linewidth(curve.linewidth);
        line.set_alpha(None);
        line.set_color(curve.color);
        if let Some(marker) = &curve.marker {
            line.set_marker(&marker.marker);
            line.set_markersize(marker.size);
            line.set_markerfacecolor(marker.face);
            line.set_markeredgecolor(marker.edge);
        }
    }

    for mappable_edit in &edit.mappables {
        let mappable = axes
            .mappable_mut(mappable_edit.id)
            .ok_or(FigureEditError::ArtistNotFound(mappable_edit.id))?;
        if let Some(interpolation) = mappable_edit.interpolation {
            mappable.set_interpolation(interpolation)?;
        }
        mappable.set_label(&mappable_edit.label);
        mappable.set_colormap(mappable_edit.colormap.clone());
        let low = OrderedFloat(mappable_edit.low).min(OrderedFloat(mappable_edit.high));
        let high = OrderedFloat(mappable_edit.low).max(OrderedFloat(mappable_edit.high));
        mappable.set_clim(low.into_inner(), high.into_inner());
    }

    if edit.general.generate_legend {
        regenerate_legend(axes, config);
    }

    axes.redraw();
    for (key, limits) in original_limits {
        let changed = axes.axis(key).is_some_and(|axis| axis.limits() != limits);
        if changed {
            tracing::debug!(axis = %key, "limits changed, pushing navigation checkpoint");
            axes.push_navigation_checkpoint();
            break;
        }
    }
    Ok(())
}

fn apply_axis(
    axes: &mut dyn Axes,
    edit: &AxisEdit,
    snapshot: &AxisSnapshot,
) -> Result<(), FigureEditError> {
    let axis = axes
        .axis_mut(edit.key)
        .ok_or(FigureEditError::AxisNotFound(edit.key))?;
    // Limits are validated against the new scale
    if axis.scale() != edit.scale {
        tracing::debug!(axis = %edit.key, from = %axis.scale(), to = %edit.scale, "changing scale");
        axis.set_scale(edit.scale)?;
    }
    axis.set_limits(edit.min, edit.max)?;
    axis.set_label(&edit.label);
    axis.set_converter(snapshot.converter.clone());
    axis.set_units(snapshot.units.clone());
    axis.update_axis_info();
    Ok(())
}

fn regenerate_legend(axes: &mut dyn Axes, config: &EditorConfig) {
    let (draggable, ncols) = match axes.legend() {
        Some(legend) => (legend.is_draggable(), legend.ncols()),
        None => (config.legend_draggable, config.legend_columns),
    };
    match axes.create_legend(ncols) {
        Some(legend) => {
            legend.set_draggable(draggable);
            tracing::debug!(ncols, draggable, "regenerated legend");
        }
        None => tracing::warn!("legend requested but no artist has a legend label"),
    }
}
