//! In-memory implementation of the plot object model.
//!
//! Useful for headless editing and as a reference for the semantics the
//! editor expects from a real plotting backend.

use crate::artist::{
    Artist, ArtistId, Axes, Axis, Legend, Line, ScalarMappable, NO_LEGEND_LABEL,
};
use crate::colormap::Colormap;
use crate::converter::{UnitConverter, Units};
use crate::error::ModelError;
use crate::interpolation::Interpolation;
use indexmap::IndexMap;
use plotedit_common::types::{AxisKey, Rgba, ScaleKind};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MemoryAxis {
    pub limits: (f64, f64),
    pub label: String,
    pub scale: ScaleKind,
    pub converter: Option<Arc<dyn UnitConverter>>,
    pub units: Option<Units>,
    /// Number of times `update_axis_info` ran
    pub info_updates: usize,
}

impl MemoryAxis {
    pub fn new() -> Self {
        Self {
            limits: (0.0, 1.0),
            label: String::new(),
            scale: ScaleKind::Linear,
            converter: None,
            units: None,
            info_updates: 0,
        }
    }

    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        self.limits = (min, max);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_scale(mut self, scale: ScaleKind) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn UnitConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }
}

impl Default for MemoryAxis {
    fn default() -> Self {
        Self::new()
    }
}

impl Axis for MemoryAxis {
    fn limits(&self) -> (f64, f64) {
        self.limits
    }

    fn set_limits(&mut self, min: f64, max: f64) -> Result<(), ModelError> {
        if !self.scale.accepts_limits(min, max) {
            return Err(ModelError::InvalidLimits {
                min,
                max,
                scale: self.scale,
            });
        }
        self.limits = (min, max);
        Ok(())
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn scale(&self) -> ScaleKind {
        self.scale
    }

    fn set_scale(&mut self, scale: ScaleKind) -> Result<(), ModelError> {
        // Limits are left alone: callers set new ones right after
        self.scale = scale;
        Ok(())
    }

    fn converter(&self) -> Option<Arc<dyn UnitConverter>> {
        self.converter.clone()
    }

    fn set_converter(&mut self, converter: Option<Arc<dyn UnitConverter>>) {
        self.converter = converter;
    }

    fn units(&self) -> Option<Units> {
        self.units.clone()
    }

    fn set_units(&mut self, units: Option<Units>) {
        self.units = units;
    }

    fn update_axis_info(&mut self) {
        self.info_updates += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryLine {
    pub id: ArtistId,
    pub label: String,
    pub linestyle: String,
    pub drawstyle: String,
    pub linewidth: f64,
    pub color: Rgba,
    pub alpha: Option<f32>,
    pub marker: String,
    pub markersize: f64,
    pub markerfacecolor: Rgba,
    pub markeredgecolor: Rgba,
}

impl MemoryLine {
    /// A solid line without markers; the id is assigned when added to axes
    pub fn new(label: impl Into<String>) -> Self {
        let color = [0.0, 0.0, 1.0, 1.0];
        Self {
            id: ArtistId(0),
            label: label.into(),
            linestyle: "-".to_string(),
            drawstyle: "default".to_string(),
            linewidth: 1.5,
            color,
            alpha: None,
            marker: "None".to_string(),
            markersize: 6.0,
            markerfacecolor: color,
            markeredgecolor: color,
        }
    }

    pub fn with_linestyle(mut self, linestyle: impl Into<String>) -> Self {
        self.linestyle = linestyle.into();
        self
    }

    pub fn with_drawstyle(mut self, drawstyle: impl Into<String>) -> Self {
        self.drawstyle = drawstyle.into();
        self
    }

    pub fn with_linewidth(mut self, width: f64) -> Self {
        self.linewidth = width;
        self
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>, size: f64) -> Self {
        self.marker = marker.into();
        self.markersize = size;
        self
    }

    pub fn with_marker_colors(mut self, face: Rgba, edge: Rgba) -> Self {
        self.markerfacecolor = face;
        self.markeredgecolor = edge;
        self
    }
}

impl Artist for MemoryLine {
    fn id(&self) -> ArtistId {
        self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }
}

impl Line for MemoryLine {
    fn linestyle(&self) -> String {
        self.linestyle.clone()
    }

    fn set_linestyle(&mut self, linestyle: &str) {
        self.linestyle = linestyle.to_string();
    }

    fn drawstyle(&self) -> String {
        self.drawstyle.clone()
    }

    fn set_drawstyle(&mut self, drawstyle: &str) {
        self.drawstyle = drawstyle.to_string();
    }

    fn linewidth(&self) -> f64 {
        self.linewidth
    }

    fn set_linewidth(&mut self, width: f64) {
        self.linewidth = width;
    }

    fn color(&self) -> Rgba {
        self.color
    }

    fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    fn alpha(&self) -> Option<f32> {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: Option<f32>) {
        self.alpha = alpha;
    }

    fn marker(&self) -> String {
        self.marker.clone()
    }

    fn set_marker(&mut self, marker: &str) {
        self.marker = marker.to_string();
    }

    fn markersize(&self) -> f64 {
        self.markersize
    }

    fn set_markersize(&mut self, size: f64) {
        self.markersize = size;
    }

    fn markerfacecolor(&self) -> Rgba {
        self.markerfacecolor
    }

    fn set_markerfacecolor(&mut self, color: Rgba) {
        self.markerfacecolor = color;
    }

    fn markeredgecolor(&self) -> Rgba {
        self.markeredgecolor
    }

    fn set_markeredgecolor(&mut self, color: Rgba) {
        self.markeredgecolor = color;
    }
}

/// An image (with interpolation) or a collection (without)
#[derive(Debug, Clone)]
pub struct MemoryMappable {
    pub id: ArtistId,
    pub label: String,
    pub array: Option<Vec<f64>>,
    pub colormap: Arc<Colormap>,
    pub clim: (f64, f64),
    pub interpolation: Option<Interpolation>,
}

impl MemoryMappable {
    pub fn image(label: impl Into<String>, array: Vec<f64>, colormap: Arc<Colormap>) -> Self {
        let mut mappable = Self::collection(label, array, colormap);
        mappable.interpolation = Some(Interpolation::default());
        mappable
    }

    pub fn collection(
        label: impl Into<String>,
        array: Vec<f64>,
        colormap: Arc<Colormap>,
    ) -> Self {
        let clim = array
            .iter()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((*v, *v)),
                Some((low, high)) => Some((low.min(*v), high.max(*v))),
            })
            .unwrap_or((0.0, 1.0));
        Self {
            id: ArtistId(0),
            label: label.into(),
            array: Some(array),
            colormap,
            clim,
            interpolation: None,
        }
    }

    pub fn with_clim(mut self, low: f64, high: f64) -> Self {
        self.clim = (low, high);
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = Some(interpolation);
        self
    }

    pub fn without_array(mut self) -> Self {
        self.array = None;
        self
    }
}

impl Artist for MemoryMappable {
    fn id(&self) -> ArtistId {
        self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }
}

impl ScalarMappable for MemoryMappable {
    fn has_array(&self) -> bool {
        self.array.is_some()
    }

    fn colormap(&self) -> Arc<Colormap> {
        self.colormap.clone()
    }

    fn set_colormap(&mut self, colormap: Arc<Colormap>) {
        self.colormap = colormap;
    }

    fn clim(&self) -> (f64, f64) {
        self.clim
    }

    fn set_clim(&mut self, low: f64, high: f64) {
        self.clim = (low, high);
    }

    fn interpolation(&self) -> Option<Interpolation> {
        self.interpolation
    }

    fn set_interpolation(&mut self, interpolation: Interpolation) -> Result<(), ModelError> {
        match self.interpolation {
            Some(_) => {
                self.interpolation = Some(interpolation);
                Ok(())
            }
            None => Err(ModelError::InterpolationUnsupported(self.label.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryLegend {
    pub entries: Vec<String>,
    pub ncols: usize,
    pub draggable: bool,
}

impl Legend for MemoryLegend {
    fn is_draggable(&self) -> bool {
        self.draggable
    }

    fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    fn ncols(&self) -> usize {
        self.ncols
    }
}

/// Axes holding all artists in memory
#[derive(Debug, Clone)]
pub struct MemoryAxes {
    pub title: String,
    pub axes: IndexMap<AxisKey, MemoryAxis>,
    pub lines: Vec<MemoryLine>,
    pub images: Vec<MemoryMappable>,
    pub collections: Vec<MemoryMappable>,
    pub legend: Option<MemoryLegend>,
    /// Number of redraw requests received
    pub redraws: usize,
    /// Views pushed onto the navigation history
    pub history: Vec<Vec<(AxisKey, (f64, f64))>>,
    next_id: u64,
}

impl MemoryAxes {
    /// Cartesian axes with an `x` and a `y` axis
    pub fn new() -> Self {
        Self::with_axes(&[AxisKey::X, AxisKey::Y])
    }

    pub fn with_axes(keys: &[AxisKey]) -> Self {
        Self {
            title: String::new(),
            axes: keys.iter().map(|key| (*key, MemoryAxis::new())).collect(),
            lines: Vec::new(),
            images: Vec::new(),
            collections: Vec::new(),
            legend: None,
            redraws: 0,
            history: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Configure one axis; keys not yet present are appended
    pub fn with_axis(mut self, key: AxisKey, f: impl FnOnce(MemoryAxis) -> MemoryAxis) -> Self {
        let axis = self.axes.get(&key).cloned().unwrap_or_default();
        self.axes.insert(key, f(axis));
        self
    }

    pub fn with_legend(mut self, ncols: usize, draggable: bool) -> Self {
        self.legend = Some(MemoryLegend {
            entries: self.legend_entries(),
            ncols,
            draggable,
        });
        self
    }

    pub fn add_line(&mut self, mut line: MemoryLine) -> ArtistId {
        line.id = self.allocate_id();
        let id = line.id;
        self.lines.push(line);
        id
    }

    pub fn add_image(&mut self, mut image: MemoryMappable) -> ArtistId {
        image.id = self.allocate_id();
        let id = image.id;
        self.images.push(image);
        id
    }

    pub fn add_collection(&mut self, mut collection: MemoryMappable) -> ArtistId {
        collection.id = self.allocate_id();
        let id = collection.id;
        self.collections.push(collection);
        id
    }

    pub fn line(&self, id: ArtistId) -> Option<&MemoryLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn mappable(&self, id: ArtistId) -> Option<&MemoryMappable> {
        self.images
            .iter()
            .chain(self.collections.iter())
            .find(|mappable| mappable.id == id)
    }

    fn allocate_id(&mut self) -> ArtistId {
        let id = ArtistId(self.next_id);
        self.next_id += 1;
        id
    }

    fn legend_entries(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| line.label.clone())
            .chain(self.collections.iter().map(|c| c.label.clone()))
            .filter(|label| !label.is_empty() && !label.starts_with('_'))
            .collect()
    }
}

impl Default for MemoryAxes {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes for MemoryAxes {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn axis_keys(&self) -> Vec<AxisKey> {
        self.axes.keys().copied().collect()
    }

    fn axis(&self, key: AxisKey) -> Option<&dyn Axis> {
        self.axes.get(&key).map(|axis| axis as &dyn Axis)
    }

    fn axis_mut(&mut self, key: AxisKey) -> Option<&mut dyn Axis> {
        self.axes.get_mut(&key).map(|axis| axis as &mut dyn Axis)
    }

    fn lines(&self) -> Vec<&dyn Line> {
        self.lines.iter().map(|line| line as &dyn Line).collect()
    }

    fn line_mut(&mut self, id: ArtistId) -> Option<&mut dyn Line> {
        self.lines
            .iter_mut()
            .find(|line| line.id == id)
            .map(|line| line as &mut dyn Line)
    }

    fn images(&self) -> Vec<&dyn ScalarMappable> {
        self.images
            .iter()
            .map(|image| image as &dyn ScalarMappable)
            .collect()
    }

    fn collections(&self) -> Vec<&dyn ScalarMappable> {
        self.collections
            .iter()
            .map(|collection| collection as &dyn ScalarMappable)
            .collect()
    }

    fn mappable_mut(&mut self, id: ArtistId) -> Option<&mut dyn ScalarMappable> {
        self.images
            .iter_mut()
            .chain(self.collections.iter_mut())
            .find(|mappable| mappable.id == id)
            .map(|mappable| mappable as &mut dyn ScalarMappable)
    }

    fn legend(&self) -> Option<&dyn Legend> {
        self.legend.as_ref().map(|legend| legend as &dyn Legend)
    }

    fn create_legend(&mut self, ncols: usize) -> Option<&mut dyn Legend> {
        let entries = self.legend_entries();
        if entries.is_empty() {
            tracing::debug!("No artists with labels found to put in legend");
            self.legend = None;
            return None;
        }
        self.legend = Some(MemoryLegend {
            entries,
            ncols,
            draggable: false,
        });
        self.legend.as_mut().map(|legend| legend as &mut dyn Legend)
    }

    fn redraw(&mut self) {
        self.redraws += 1;
    }

    fn push_navigation_checkpoint(&mut self) {
        let view = self
            .axes
            .iter()
            .map(|(key, axis)| (*key, axis.limits))
            .collect();
        self.history.push(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::ColormapRegistry;

    #[test]
    fn test_with_axis_keeps_position() {
        let axes = MemoryAxes::new()
            .with_axis(AxisKey::X, |axis| axis.with_label("time"))
            .with_axis(AxisKey::Z, |axis| axis.with_label("depth"));
        assert_eq!(axes.axis_keys(), vec![AxisKey::X, AxisKey::Y, AxisKey::Z]);
        assert_eq!(axes.axes[&AxisKey::X].label, "time");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut axes = MemoryAxes::new();
        let a = axes.add_line(MemoryLine::new("a"));
        let b = axes.add_line(MemoryLine::new("b"));
        assert_ne!(a, b);
        assert_eq!(axes.line(b).unwrap().label, "b");
    }

    #[test]
    fn test_log_axis_rejects_non_positive_limits() {
        let mut axis = MemoryAxis::new()
            .with_scale(ScaleKind::Log)
            .with_limits(1.0, 10.0);
        let err = axis.set_limits(-1.0, 10.0).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidLimits {
                min: -1.0,
                max: 10.0,
                scale: ScaleKind::Log
            }
        );
        assert_eq!(axis.limits(), (1.0, 10.0));
    }

    #[test]
    fn test_legend_skips_hidden_labels() {
        let mut axes = MemoryAxes::new();
        axes.add_line(MemoryLine::new("visible"));
        axes.add_line(MemoryLine::new(NO_LEGEND_LABEL));
        let legend = axes.create_legend(2).unwrap();
        assert_eq!(legend.ncols(), 2);
        assert_eq!(axes.legend.unwrap().entries, vec!["visible".to_string()]);
    }

    #[test]
    fn test_legend_without_entries() {
        let mut axes = MemoryAxes::new().with_legend(1, true);
        assert!(axes.create_legend(1).is_none());
        assert!(axes.legend.is_none());
    }

    #[test]
    fn test_collection_clim_from_array() {
        let registry = ColormapRegistry::builtin();
        let viridis = registry.get("viridis").unwrap();
        let collection = MemoryMappable::collection("c", vec![3.0, -1.0, 7.5], viridis);
        assert_eq!(collection.clim, (-1.0, 7.5));
        assert!(collection.interpolation.is_none());
    }

    #[test]
    fn test_collection_rejects_interpolation() {
        let registry = ColormapRegistry::builtin();
        let gray = registry.get("gray").unwrap();
        let mut collection = MemoryMappable::collection("c", vec![0.0], gray);
        assert!(collection.set_interpolation(Interpolation::Nearest).is_err());
    }
}
