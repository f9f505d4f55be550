use palette::Srgba;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A named continuous colormap defined by evenly spaced color stops
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    pub name: String,
    pub colors: Vec<Srgba>,
}

impl Colormap {
    pub fn new(name: impl Into<String>, colors: Vec<Srgba>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Build from packed `0xRRGGBB` stops
    pub fn from_rgb_stops(name: impl Into<String>, stops: &[u32]) -> Self {
        let colors = stops
            .iter()
            .map(|stop| {
                Srgba::new(
                    ((stop >> 16) & 0xff) as u8,
                    ((stop >> 8) & 0xff) as u8,
                    (stop & 0xff) as u8,
                    u8::MAX,
                )
                .into_format::<f32, f32>()
            })
            .collect();
        Self::new(name, colors)
    }

    /// Copy of this colormap with the stops in reverse order, named `<name>_r`
    pub fn reversed(&self) -> Self {
        Self {
            name: format!("{}_r", self.name),
            colors: self.colors.iter().rev().copied().collect(),
        }
    }
}

/// Registry of colormaps addressable by name, iterated in name order
#[derive(Debug, Clone, Default)]
pub struct ColormapRegistry {
    colormaps: BTreeMap<String, Arc<Colormap>>,
}

impl ColormapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the builtin colormaps and their reversed variants
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let builtin = [
            Colormap::from_rgb_stops(
                "viridis",
                &[0x440154, 0x3b528b, 0x21918c, 0x5ec962, 0xfde725],
            ),
            Colormap::from_rgb_stops(
                "plasma",
                &[0x0d0887, 0x7e03a8, 0xcc4778, 0xf89540, 0xf0f921],
            ),
            Colormap::from_rgb_stops(
                "inferno",
                &[0x000004, 0x57106e, 0xbc3754, 0xf98e09, 0xfcffa4],
            ),
            Colormap::from_rgb_stops(
                "magma",
                &[0x000004, 0x51127c, 0xb73779, 0xfc8961, 0xfcfdbf],
            ),
            Colormap::from_rgb_stops(
                "cividis",
                &[0x00224e, 0x3d4e6f, 0x7c7b78, 0xbcaf6f, 0xfee838],
            ),
            Colormap::from_rgb_stops("gray", &[0x000000, 0xffffff]),
            Colormap::from_rgb_stops("Greys", &[0xffffff, 0x000000]),
            Colormap::from_rgb_stops(
                "RdYlBu",
                &[0xa50026, 0xf46d43, 0xffffbf, 0x74add1, 0x313695],
            ),
            Colormap::from_rgb_stops("coolwarm", &[0x3b4cc0, 0xdddddd, 0xb40426]),
        ];
        for colormap in builtin {
            let reversed = colormap.reversed();
            registry.register(colormap);
            registry.register(reversed);
        }
        registry
    }

    /// Register a colormap, replacing any previous entry with the same name
    pub fn register(&mut self, colormap: Colormap) -> Arc<Colormap> {
        let colormap = Arc::new(colormap);
        self.colormaps
            .insert(colormap.name.clone(), colormap.clone());
        colormap
    }

    pub fn get(&self, name: &str) -> Option<Arc<Colormap>> {
        self.colormaps.get(name).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arc<Colormap>)> {
        self.colormaps.iter()
    }

    pub fn len(&self) -> usize {
        self.colormaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colormaps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_sorted() {
        let registry = ColormapRegistry::builtin();
        let names: Vec<_> = registry.iter().map(|(name, _)| name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"viridis"));
        assert!(names.contains(&"viridis_r"));
        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn test_packed_stops() {
        let cmap = Colormap::from_rgb_stops("two", &[0xff0000, 0x0000ff]);
        assert_eq!(cmap.colors[0], Srgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(cmap.reversed().colors[0], Srgba::new(0.0, 0.0, 1.0, 1.0));
    }
}
