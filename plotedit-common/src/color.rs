use crate::{error::CommonError, types::Rgba};
use css_color_parser::Color;
use palette::Srgba;

/// Combine a color with an optional alpha override.
///
/// When `alpha` is `None` the color keeps its own alpha channel.
pub fn to_rgba(color: Rgba, alpha: Option<f32>) -> Rgba {
    match alpha {
        Some(alpha) => [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)],
        None => color,
    }
}

/// Format a color as `#rrggbb`, or `#rrggbbaa` when `keep_alpha` is set
pub fn to_hex(color: Rgba, keep_alpha: bool) -> String {
    let srgba: Srgba<u8> =
        Srgba::from_components((color[0], color[1], color[2], color[3])).into_format::<u8, u8>();
    if keep_alpha {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            srgba.red, srgba.green, srgba.blue, srgba.alpha
        )
    } else {
        format!("#{:02x}{:02x}{:02x}", srgba.red, srgba.green, srgba.blue)
    }
}

/// Parse a color string into RGBA components.
///
/// Hex forms (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`) are handled here,
/// anything else (`rgba(...)`, named colors) goes through the CSS parser.
pub fn parse_rgba(text: &str) -> Result<Rgba, CommonError> {
    let trimmed = text.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| CommonError::InvalidColor(text.to_string()));
    }
    let color = trimmed
        .parse::<Color>()
        .map_err(|_| CommonError::InvalidColor(text.to_string()))?;
    Ok([
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        color.a,
    ])
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let channels: Vec<u8> = match hex.len() {
        3 | 4 => hex
            .chars()
            .map(|c| u8::from_str_radix(&c.to_string(), 16).map(|v| v * 17))
            .collect::<Result<_, _>>()
            .ok()?,
        6 | 8 => (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16))
            .collect::<Result<_, _>>()
            .ok()?,
        _ => return None,
    };
    let alpha = channels.get(3).copied().unwrap_or(u8::MAX);
    let srgba: Srgba<f32> =
        Srgba::new(channels[0], channels[1], channels[2], alpha).into_format::<f32, f32>();
    let (r, g, b, a) = srgba.into_components();
    Some([r, g, b, a])
}
