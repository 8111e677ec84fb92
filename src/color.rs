use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Skyline,
    Sunset,
    Ocean,
    Aurora,
    Ember,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skyline" => Ok(Self::Skyline),
            "sunset" => Ok(Self::Sunset),
            "ocean" => Ok(Self::Ocean),
            "aurora" => Ok(Self::Aurora),
            "ember" => Ok(Self::Ember),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    /// Get color for a given position along the route (0.0 to 1.0) and
    /// intensity (0.0 to 1.0)
    pub fn get_color(&self, position: f32, intensity: f32) -> (u8, u8, u8) {
        let (h, s, l) = match self {
            ColorScheme::Skyline => {
                // Departure blue -> arrival gold
                let hue = 210.0 - (position * 165.0);
                (hue, 0.85, 0.35 + intensity * 0.3)
            }
            ColorScheme::Sunset => {
                // Magenta -> orange
                let hue = (310.0 + position * 80.0) % 360.0;
                (hue, 0.9, 0.35 + intensity * 0.3)
            }
            ColorScheme::Ocean => {
                // Deep blue -> cyan -> teal
                let hue = 180.0 + position * 60.0;
                (hue, 0.8, 0.3 + intensity * 0.35)
            }
            ColorScheme::Aurora => {
                // Green -> teal -> violet
                let hue = 120.0 + position * 160.0;
                (hue, 0.75, 0.3 + intensity * 0.35)
            }
            ColorScheme::Ember => {
                // Red -> orange -> yellow
                let hue = position * 60.0;
                (hue, 0.95, 0.3 + intensity * 0.4)
            }
            ColorScheme::Monochrome => {
                // White/gray based on intensity
                (0.0, 0.0, 0.25 + intensity * 0.6)
            }
        };

        let hsl = Hsl::new(h, s, l);
        let rgb: Srgb = hsl.into_color();

        (
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    /// Get a pulsing color for the moving marker
    pub fn marker_color(&self, progress: f32, time: f32) -> (u8, u8, u8) {
        // Time-based pulse so the marker stands out over the trail
        let pulse = (time * 4.0).sin() * 0.15 + 0.85;
        self.get_color(progress, pulse.clamp(0.0, 1.0))
    }

    /// Gradient colors for a polyline of `len` segments, dimming the part
    /// the marker has not reached yet
    pub fn route_gradient(&self, len: usize, travelled: usize) -> Vec<(u8, u8, u8)> {
        (0..len)
            .map(|i| {
                let pos = i as f32 / len.max(1) as f32;
                let intensity = if i <= travelled { 0.9 } else { 0.35 };
                self.get_color(pos, intensity)
            })
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Skyline => "skyline",
            ColorScheme::Sunset => "sunset",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Aurora => "aurora",
            ColorScheme::Ember => "ember",
            ColorScheme::Monochrome => "monochrome",
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Skyline,
            ColorScheme::Sunset,
            ColorScheme::Ocean,
            ColorScheme::Aurora,
            ColorScheme::Ember,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}
