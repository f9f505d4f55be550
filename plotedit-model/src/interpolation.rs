use strum::{Display, EnumIter, EnumString, VariantNames};

/// Resampling methods available to image-like artists
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, VariantNames,
)]
#[strum(serialize_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Antialiased,
    #[strum(serialize = "none")]
    NoInterpolation,
    Nearest,
    Bilinear,
    Bicubic,
    Spline16,
    Spline36,
    Hanning,
    Hamming,
    Hermite,
    Kaiser,
    Quadric,
    Catrom,
    Gaussian,
    Bessel,
    Mitchell,
    Sinc,
    Lanczos,
    Blackman,
    Auto,
}

impl Interpolation {
    /// All method names in sorted order
    pub fn sorted_names() -> Vec<&'static str> {
        let mut names = Self::VARIANTS.to_vec();
        names.sort_unstable();
        names
    }
}
