//! Interfaces of the plotting object model the editor reads and mutates.
//!
//! Objects are owned by the caller's plotting surface. The editor only
//! reaches them through an `Axes` and refers to individual artists by
//! `ArtistId`, which must stay stable for the lifetime of the artist.

use crate::colormap::Colormap;
use crate::converter::{UnitConverter, Units};
use crate::error::ModelError;
use crate::interpolation::Interpolation;
use plotedit_common::types::{AxisKey, Rgba, ScaleKind};
use std::sync::Arc;

/// Label of artists that are excluded from legends and from editing
pub const NO_LEGEND_LABEL: &str = "_nolegend_";

/// Stable handle of an artist inside its axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtistId(pub u64);

pub trait Artist {
    fn id(&self) -> ArtistId;
    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);
}

/// One axis of an axes object
pub trait Axis {
    fn limits(&self) -> (f64, f64);

    /// Fails when the limits are outside the domain of the current scale
    fn set_limits(&mut self, min: f64, max: f64) -> Result<(), ModelError>;

    fn label(&self) -> String;
    fn set_label(&mut self, label: &str);

    fn scale(&self) -> ScaleKind;
    fn set_scale(&mut self, scale: ScaleKind) -> Result<(), ModelError>;

    fn converter(&self) -> Option<Arc<dyn UnitConverter>>;
    fn set_converter(&mut self, converter: Option<Arc<dyn UnitConverter>>);

    fn units(&self) -> Option<Units>;
    fn set_units(&mut self, units: Option<Units>);

    /// Recompute tick locators and formatters from the current units
    fn update_axis_info(&mut self);
}

pub trait Line: Artist {
    fn linestyle(&self) -> String;
    fn set_linestyle(&mut self, linestyle: &str);

    fn drawstyle(&self) -> String;
    fn set_drawstyle(&mut self, drawstyle: &str);

    fn linewidth(&self) -> f64;
    fn set_linewidth(&mut self, width: f64);

    fn color(&self) -> Rgba;
    fn set_color(&mut self, color: Rgba);

    /// Alpha override applied on top of every color of the line
    fn alpha(&self) -> Option<f32>;
    fn set_alpha(&mut self, alpha: Option<f32>);

    fn marker(&self) -> String;
    fn set_marker(&mut self, marker: &str);

    fn markersize(&self) -> f64;
    fn set_markersize(&mut self, size: f64);

    fn markerfacecolor(&self) -> Rgba;
    fn set_markerfacecolor(&mut self, color: Rgba);

    fn markeredgecolor(&self) -> Rgba;
    fn set_markeredgecolor(&mut self, color: Rgba);
}

/// An artist that maps data values to colors through a colormap
pub trait ScalarMappable: Artist {
    /// Whether the artist carries a data array to color-map
    fn has_array(&self) -> bool;

    fn colormap(&self) -> Arc<Colormap>;
    fn set_colormap(&mut self, colormap: Arc<Colormap>);

    fn clim(&self) -> (f64, f64);
    fn set_clim(&mut self, low: f64, high: f64);

    /// `None` for artists without an interpolation concept
    fn interpolation(&self) -> Option<Interpolation> {
        None
    }

    fn set_interpolation(&mut self, _interpolation: Interpolation) -> Result<(), ModelError> {
        Err(ModelError::InterpolationUnsupported(self.label()))
    }
}

pub trait Legend {
    fn is_draggable(&self) -> bool;
    fn set_draggable(&mut self, draggable: bool);
    fn ncols(&self) -> usize;
}

pub trait Axes {
    fn title(&self) -> String;
    fn set_title(&mut self, title: &str);

    /// Keys of the axes in presentation order
    fn axis_keys(&self) -> Vec<AxisKey>;
    fn axis(&self, key: AxisKey) -> Option<&dyn Axis>;
    fn axis_mut(&mut self, key: AxisKey) -> Option<&mut dyn Axis>;

    /// Lines in draw order
    fn lines(&self) -> Vec<&dyn Line>;
    fn line_mut(&mut self, id: ArtistId) -> Option<&mut dyn Line>;

    fn images(&self) -> Vec<&dyn ScalarMappable>;
    fn collections(&self) -> Vec<&dyn ScalarMappable>;
    fn mappable_mut(&mut self, id: ArtistId) -> Option<&mut dyn ScalarMappable>;

    fn legend(&self) -> Option<&dyn Legend>;

    /// Replace the legend with one built from the current artist labels.
    ///
    /// Returns `None` when no artist qualifies for a legend entry.
    fn create_legend(&mut self, ncols: usize) -> Option<&mut dyn Legend>;

    /// Request a redraw of the owning canvas
    fn redraw(&mut self);

    /// Push the current view onto the navigation history
    fn push_navigation_checkpoint(&mut self);
}
