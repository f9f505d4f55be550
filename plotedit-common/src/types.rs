#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, VariantNames};

/// Straight (non-premultiplied) sRGB color with alpha, components in `[0, 1]`
pub type Rgba = [f32; 4];

/// Identity of one axis of a plot.
///
/// The declaration order is the order axes are presented in when the axes
/// object does not impose its own.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
    VariantNames,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AxisKey {
    X,
    Y,
    Z,
}

impl AxisKey {
    /// Heading shown above the fields of this axis, e.g. `X-Axis`
    pub fn heading(&self) -> String {
        format!("{}-Axis", self.to_string().to_uppercase())
    }
}

/// Scale applied along an axis
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, VariantNames,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
    Symlog,
    Logit,
}

impl ScaleKind {
    /// Whether the pair of limits lies inside the domain of this scale
    pub fn accepts_limits(&self, min: f64, max: f64) -> bool {
        if !min.is_finite() || !max.is_finite() {
            return false;
        }
        match self {
            ScaleKind::Linear | ScaleKind::Symlog => true,
            ScaleKind::Log => min > 0.0 && max > 0.0,
            ScaleKind::Logit => [min, max].iter().all(|v| *v > 0.0 && *v < 1.0),
        }
    }
}
