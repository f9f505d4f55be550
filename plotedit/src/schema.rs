//! Builds the editable schema of an axes object.
//!
//! The typed schema (`FigureSchema`) mirrors the plot state; `to_form`
//! lays it out as a form tree. The `ReferenceTable` built alongside keeps,
//! in the same order as the schema groups, the artists each group edits.

use crate::config::EditorConfig;
use crate::error::FigureEditError;
use crate::form::{Choice, ChoiceOption, FieldValue, FormItem, FormNode, FormPage};
use crate::style::{prepare_choices, DRAW_STYLES, LINE_STYLES, MARKERS};
use chrono::{DateTime, Utc};
use plotedit_common::color::{to_hex, to_rgba};
use plotedit_common::dates::num2date;
use plotedit_common::types::{AxisKey, ScaleKind};
use plotedit_model::artist::{ArtistId, Axes, NO_LEGEND_LABEL};
use plotedit_model::colormap::{Colormap, ColormapRegistry};
use plotedit_model::converter::{same_converter, UnitConverter, Units};
use plotedit_model::interpolation::Interpolation;
use std::sync::Arc;
use strum::VariantNames;

/// Value-carrying fields per axis: min, max, label, scale
pub const AXIS_FIELD_COUNT: usize = 4;
/// Value-carrying fields per curve
pub const CURVE_FIELD_COUNT: usize = 9;
/// Value-carrying fields per mappable, one more with interpolation
pub const MAPPABLE_FIELD_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum LimitValue {
    Float(f64),
    Date(DateTime<Utc>),
}

impl LimitValue {
    fn convert(value: f64, as_date: bool) -> Result<Self, FigureEditError> {
        if as_date {
            Ok(LimitValue::Date(num2date(value)?))
        } else {
            Ok(LimitValue::Float(value))
        }
    }

    fn to_field(&self) -> FieldValue {
        match self {
            LimitValue::Float(v) => FieldValue::Float(*v),
            LimitValue::Date(d) => FieldValue::Date(*d),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSchema {
    pub key: AxisKey,
    pub min: LimitValue,
    pub max: LimitValue,
    pub label: String,
    pub scale: Choice,
}

impl AxisSchema {
    fn fields(&self) -> [FormItem; AXIS_FIELD_COUNT] {
        [
            FormItem::field("Min", self.min.to_field()),
            FormItem::field("Max", self.max.to_field()),
            FormItem::field("Label", FieldValue::Text(self.label.clone())),
            FormItem::choice("Scale", self.scale.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneralSchema {
    pub title: String,
    pub axes: Vec<AxisSchema>,
    pub generate_legend: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurveSchema {
    pub label: String,
    pub linestyle: Choice,
    pub drawstyle: Choice,
    pub linewidth: f64,
    pub color: String,
    pub marker: Choice,
    pub markersize: f64,
    pub markerfacecolor: String,
    pub markeredgecolor: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappableSchema {
    pub label: String,
    pub colormap: Choice,
    pub low: f64,
    pub high: f64,
    pub interpolation: Option<Choice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureSchema {
    pub general: GeneralSchema,
    pub curves: Vec<CurveSchema>,
    pub mappables: Vec<MappableSchema>,
}

impl FigureSchema {
    /// Lay the schema out as tabs; empty curve and mappable tabs are omitted
    pub fn to_form(&self, config: &EditorConfig) -> FormNode {
        let mut pages = vec![FormPage {
            title: config.general_title.clone(),
            comment: String::new(),
            node: FormNode::Form(self.general_items()),
        }];
        if !self.curves.is_empty() {
            pages.push(FormPage {
                title: config.curves_title.clone(),
                comment: String::new(),
                node: FormNode::Stack(self.curves.iter().map(curve_page).collect()),
            });
        }
        if !self.mappables.is_empty() {
            pages.push(FormPage {
                title: config.mappables_title.clone(),
                comment: String::new(),
                node: FormNode::Stack(self.mappables.iter().map(mappable_page).collect()),
            });
        }
        FormNode::Tabs(pages)
    }

    fn general_items(&self) -> Vec<FormItem> {
        let general = &self.general;
        let mut items = vec![
            FormItem::field("Title", FieldValue::Text(general.title.clone())),
            FormItem::Separator,
        ];
        for axis in &general.axes {
            items.push(FormItem::Heading(axis.key.heading()));
            items.extend(axis.fields());
            items.push(FormItem::Separator);
        }
        items.push(FormItem::field(
            "(Re-)Generate automatic legend",
            FieldValue::Bool(general.generate_legend),
        ));
        items
    }
}

fn curve_page(curve: &CurveSchema) -> FormPage {
    let items = vec![
        FormItem::field("Label", FieldValue::Text(curve.label.clone())),
        FormItem::Separator,
        FormItem::Heading("Line".to_string()),
        FormItem::choice("Line style", curve.linestyle.clone()),
        FormItem::choice("Draw style", curve.drawstyle.clone()),
        FormItem::field("Width", FieldValue::Float(curve.linewidth)),
        FormItem::field("Color (RGBA)", FieldValue::Color(curve.color.clone())),
        FormItem::Separator,
        FormItem::Heading("Marker".to_string()),
        FormItem::choice("Style", curve.marker.clone()),
        FormItem::field("Size", FieldValue::Float(curve.markersize)),
        FormItem::field(
            "Face color (RGBA)",
            FieldValue::Color(curve.markerfacecolor.clone()),
        ),
        FormItem::field(
            "Edge color (RGBA)",
            FieldValue::Color(curve.markeredgecolor.clone()),
        ),
    ];
    FormPage {
        title: curve.label.clone(),
        comment: String::new(),
        node: FormNode::Form(items),
    }
}

fn mappable_page(mappable: &MappableSchema) -> FormPage {
    let mut items = vec![
        FormItem::field("Label", FieldValue::Text(mappable.label.clone())),
        FormItem::choice("Colormap", mappable.colormap.clone()),
        FormItem::field("Min. value", FieldValue::Float(mappable.low)),
        FormItem::field("Max. value", FieldValue::Float(mappable.high)),
    ];
    if let Some(interpolation) = &mappable.interpolation {
        items.push(FormItem::choice("Interpolation", interpolation.clone()));
    }
    FormPage {
        title: mappable.label.clone(),
        comment: String::new(),
        node: FormNode::Form(items),
    }
}

/// Limits, converter and units of an axis as they were when the schema
/// was built
#[derive(Debug, Clone)]
pub struct AxisSnapshot {
    pub key: AxisKey,
    /// Limits in data coordinates, unrounded by any date presentation
    pub limits: (f64, f64),
    pub converter: Option<Arc<dyn UnitConverter>>,
    pub units: Option<Units>,
}

impl PartialEq for AxisSnapshot {
    fn eq(&self, other: &Self) -> bool {
        let same_units = match (&self.units, &other.units) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        };
        self.key == other.key
            && self.limits == other.limits
            && same_converter(&self.converter, &other.converter)
            && same_units
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColormapEntry {
    pub key: String,
    pub colormap: Arc<Colormap>,
}

/// Colormaps selectable in the editor: the registry in name order, preceded
/// by the unregistered colormaps of the edited mappables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColormapTable {
    entries: Vec<ColormapEntry>,
}

impl ColormapTable {
    pub fn from_registry(registry: &ColormapRegistry) -> Self {
        let entries = registry
            .iter()
            .map(|(name, colormap)| ColormapEntry {
                key: name.clone(),
                colormap: colormap.clone(),
            })
            .collect();
        Self { entries }
    }

    /// Key of `colormap`, prepending it under a fresh key when absent
    fn key_or_prepend(&mut self, colormap: Arc<Colormap>) -> String {
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| entry.colormap.as_ref() == colormap.as_ref())
        {
            return entry.key.clone();
        }

        let mut key = colormap.name.clone();
        let mut suffix = 1;
        while self.resolve(&key).is_some() {
            key = format!("{}#{suffix}", colormap.name);
            suffix += 1;
        }
        tracing::debug!(key = %key, "adding unregistered colormap");
        self.entries.insert(
            0,
            ColormapEntry {
                key: key.clone(),
                colormap,
            },
        );
        key
    }

    pub fn resolve(&self, key: &str) -> Option<Arc<Colormap>> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.colormap.clone())
    }

    fn choice(&self, initial: String) -> Choice {
        let options = self
            .entries
            .iter()
            .map(|entry| ChoiceOption {
                key: entry.key.clone(),
                label: entry.colormap.name.clone(),
            })
            .collect();
        Choice::new(initial, options)
    }
}

/// Artists and axis state the edited values are written back to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    pub axes: Vec<AxisSnapshot>,
    pub curves: Vec<ArtistId>,
    pub mappables: Vec<ArtistId>,
    pub colormaps: ColormapTable,
}

impl ReferenceTable {
    pub fn has_curves(&self) -> bool {
        !self.curves.is_empty()
    }

    pub fn has_mappables(&self) -> bool {
        !self.mappables.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltSchema {
    pub schema: FigureSchema,
    pub has_curves: bool,
    pub has_mappables: bool,
    pub references: ReferenceTable,
}

/// Snapshot the editable state of `axes`
#[tracing::instrument(skip_all)]
pub fn build_schema(
    axes: &dyn Axes,
    registry: &ColormapRegistry,
) -> Result<BuiltSchema, FigureEditError> {
    let mut references = ReferenceTable {
        colormaps: ColormapTable::from_registry(registry),
        ..Default::default()
    };

    let mut axis_schemas = Vec::new();
    for key in axes.axis_keys() {
        let axis = axes.axis(key).ok_or(FigureEditError::AxisNotFound(key))?;
        let converter = axis.converter();
        let as_date = converter.as_ref().is_some_and(|c| c.is_date());
        let (min, max) = axis.limits();
        axis_schemas.push(AxisSchema {
            key,
            min: LimitValue::convert(min, as_date)?,
            max: LimitValue::convert(max, as_date)?,
            label: axis.label(),
            scale: Choice::from_keys(
                axis.scale().to_string(),
                ScaleKind::VARIANTS.iter().copied(),
            ),
        });
        references.axes.push(AxisSnapshot {
            key,
            limits: (min, max),
            converter,
            units: axis.units(),
        });
    }
    let general = GeneralSchema {
        title: axes.title(),
        axes: axis_schemas,
        generate_legend: false,
    };

    let mut curves = Vec::new();
    for line in axes.lines() {
        let label = line.label();
        if label == NO_LEGEND_LABEL {
            tracing::debug!(id = ?line.id(), "skipping line without legend label");
            continue;
        }
        let alpha = line.alpha();
        curves.push(CurveSchema {
            label,
            linestyle: prepare_choices(LINE_STYLES, &line.linestyle()),
            drawstyle: prepare_choices(DRAW_STYLES, &line.drawstyle()),
            linewidth: line.linewidth(),
            color: to_hex(to_rgba(line.color(), alpha), true),
            marker: prepare_choices(MARKERS, &line.marker()),
            markersize: line.markersize(),
            markerfacecolor: to_hex(to_rgba(line.markerfacecolor(), alpha), true),
            markeredgecolor: to_hex(to_rgba(line.markeredgecolor(), alpha), true),
        });
        references.curves.push(line.id());
    }

    let mut mappables = Vec::new();
    for mappable in axes.images().into_iter().chain(axes.collections()) {
        let label = mappable.label();
        if label == NO_LEGEND_LABEL || !mappable.has_array() {
            tracing::debug!(id = ?mappable.id(), "skipping mappable");
            continue;
        }
        let key = references.colormaps.key_or_prepend(mappable.colormap());
        let (low, high) = mappable.clim();
        let interpolation = mappable.interpolation().map(|current| {
            Choice::from_keys(current.to_string(), Interpolation::sorted_names())
        });
        mappables.push(MappableSchema {
            label,
            colormap: references.colormaps.choice(key),
            low,
            high,
            interpolation,
        });
        references.mappables.push(mappable.id());
    }

    tracing::debug!(
        axes = general.axes.len(),
        curves = curves.len(),
        mappables = mappables.len(),
        "built figure schema"
    );
    Ok(BuiltSchema {
        has_curves: !curves.is_empty(),
        has_mappables: !mappables.is_empty(),
        schema: FigureSchema {
            general,
            curves,
            mappables,
        },
        references,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotedit_model::converter::DateConverter;
    use plotedit_model::memory::{MemoryAxes, MemoryLine, MemoryMappable};

    #[test]
    fn test_axis_fields_follow_declared_order() {
        let axes = MemoryAxes::with_axes(&[AxisKey::Y, AxisKey::X]);
        let built = build_schema(&axes, &ColormapRegistry::builtin()).unwrap();
        let keys: Vec<_> = built.schema.general.axes.iter().map(|a| a.key).collect();
        assert_eq!(keys, vec![AxisKey::Y, AxisKey::X]);
        let snapshot_keys: Vec<_> = built.references.axes.iter().map(|a| a.key).collect();
        assert_eq!(snapshot_keys, keys);
    }

    #[test]
    fn test_date_axis_limits_presented_as_dates() {
        let axes = MemoryAxes::new().with_axis(AxisKey::X, |axis| {
            axis.with_converter(Arc::new(DateConverter))
                .with_limits(0.0, 1.5)
        });
        let built = build_schema(&axes, &ColormapRegistry::builtin()).unwrap();
        let x = &built.schema.general.axes[0];
        assert_eq!(x.min, LimitValue::Date(num2date(0.0).unwrap()));
        assert_eq!(x.max, LimitValue::Date(num2date(1.5).unwrap()));
        let y = &built.schema.general.axes[1];
        assert_eq!(y.min, LimitValue::Float(0.0));
    }

    #[test]
    fn test_scale_choice_selects_current() {
        let axes = MemoryAxes::new().with_axis(AxisKey::Y, |axis| {
            axis.with_scale(ScaleKind::Symlog)
        });
        let built = build_schema(&axes, &ColormapRegistry::builtin()).unwrap();
        let scale = &built.schema.general.axes[1].scale;
        assert_eq!(scale.initial, "symlog");
        let keys: Vec<_> = scale.options.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["linear", "log", "symlog", "logit"]);
    }

    #[test]
    fn test_curve_color_folds_in_alpha() {
        let mut axes = MemoryAxes::new();
        axes.add_line(
            MemoryLine::new("data")
                .with_color([1.0, 0.0, 0.0, 1.0])
                .with_alpha(0.5)
                .with_marker_colors([0.0, 1.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0]),
        );
        let built = build_schema(&axes, &ColormapRegistry::builtin()).unwrap();
        let curve = &built.schema.curves[0];
        assert_eq!(curve.color, "#ff000080");
        assert_eq!(curve.markerfacecolor, "#00ff0080");
        assert_eq!(curve.markeredgecolor, "#00000080");
    }

    #[test]
    fn test_hidden_and_arrayless_artists_skipped() {
        let registry = ColormapRegistry::builtin();
        let gray = registry.get("gray").unwrap();
        let mut axes = MemoryAxes::new();
        axes.add_line(MemoryLine::new(NO_LEGEND_LABEL));
        let shown = axes.add_line(MemoryLine::new("shown"));
        axes.add_image(MemoryMappable::image("hidden", vec![1.0], gray.clone()).without_array());
        axes.add_collection(MemoryMappable::collection(NO_LEGEND_LABEL, vec![1.0], gray));

        let built = build_schema(&axes, &registry).unwrap();
        assert!(built.has_curves);
        assert!(!built.has_mappables);
        assert_eq!(built.references.curves, vec![shown]);

        let form = built.schema.to_form(&EditorConfig::default());
        let titles: Vec<_> = form.pages().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Axes", "Curves"]);
    }

    #[test]
    fn test_unregistered_colormap_prepended() {
        let registry = ColormapRegistry::builtin();
        let mut custom = registry.get("viridis").unwrap().as_ref().clone();
        custom.colors.reverse();
        let mut axes = MemoryAxes::new();
        axes.add_image(MemoryMappable::image("img", vec![0.0, 1.0], Arc::new(custom)));

        let built = build_schema(&axes, &registry).unwrap();
        let colormap = &built.schema.mappables[0].colormap;
        assert_eq!(colormap.initial, "viridis#1");
        assert_eq!(colormap.options[0].key, "viridis#1");
        assert_eq!(colormap.options[0].label, "viridis");
        assert_eq!(colormap.options.len(), registry.len() + 1);
        assert!(built.references.colormaps.resolve("viridis#1").is_some());
    }

    #[test]
    fn test_interpolation_only_for_images() {
        let registry = ColormapRegistry::builtin();
        let gray = registry.get("gray").unwrap();
        let mut axes = MemoryAxes::new();
        axes.add_collection(MemoryMappable::collection("points", vec![0.0], gray.clone()));
        axes.add_image(
            MemoryMappable::image("img", vec![0.0], gray)
                .with_interpolation(Interpolation::Nearest),
        );

        let built = build_schema(&axes, &registry).unwrap();
        let labels: Vec<_> = built
            .schema
            .mappables
            .iter()
            .map(|m| m.label.as_str())
            .collect();
        assert_eq!(labels, vec!["img", "points"]);
        let interpolation = built.schema.mappables[0].interpolation.as_ref().unwrap();
        assert_eq!(interpolation.initial, "nearest");
        assert_eq!(interpolation.options.len(), 20);
        assert!(built.schema.mappables[1].interpolation.is_none());
    }
}
