use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::chart::{FAILURE_LABEL, SUCCESS_LABEL};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Fixed slice colours of the success pie.
pub fn outcome_color(label: &str) -> Color32 {
    match label {
        SUCCESS_LABEL => Color32::from_rgb(0x63, 0x6e, 0xfa),
        FAILURE_LABEL => Color32::from_rgb(0xef, 0x55, 0x3b),
        _ => Color32::GRAY,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: booster category → Color32
// ---------------------------------------------------------------------------

/// Maps the booster version categories of a dataset to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the sorted set of group names.
    pub fn new(groups: &BTreeSet<String>) -> Self {
        let palette = generate_palette(groups.len());
        let mapping = groups.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a group; unknown groups are grey.
    pub fn color_for(&self, group: &str) -> Color32 {
        self.mapping
            .get(group)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (group → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(g, c)| (g.clone(), *c))
            .collect()
    }
}
