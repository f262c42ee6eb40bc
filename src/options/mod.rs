//! Centralized gallery options with TOML preset support.
//!
//! All tweakable settings (camera path, cathedral dimensions, picture
//! metadata, glyph texture, fog, lights) are consolidated here. Options
//! serialize to/from TOML so a gallery can be re-dressed without a rebuild.

mod atmosphere;
mod camera;
mod church;
mod glyph_rain;
mod lighting;
mod pictures;

use std::path::Path;

pub use atmosphere::AtmosphereOptions;
pub use camera::CameraOptions;
pub use church::ChurchOptions;
pub use glyph_rain::{GlyphRainOptions, DEFAULT_ALPHABET};
pub use lighting::{LightingOptions, PointLightOptions, MAX_POINT_LIGHTS};
pub use pictures::{PictureEntry, PictureOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::NaveError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Fly-through path and projection parameters.
    pub camera: CameraOptions,
    /// Cathedral shell dimensions.
    pub church: ChurchOptions,
    /// Picture arc layout and metadata.
    #[schemars(skip)]
    pub pictures: PictureOptions,
    /// Falling-glyph wall texture.
    pub glyph_rain: GlyphRainOptions,
    /// Background and fog.
    pub atmosphere: AtmosphereOptions,
    /// Light rig.
    pub lighting: LightingOptions,
}

impl Options {
    /// Generate JSON Schema describing the tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, NaveError> {
        let content = std::fs::read_to_string(path).map_err(NaveError::Io)?;
        toml::from_str(&content)
            .map_err(|e| NaveError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), NaveError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NaveError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(NaveError::Io)?;
        }
        std::fs::write(path, content).map_err(NaveError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
smooth_factor = 0.1
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.smooth_factor, 0.1);
        // Everything else should be default
        assert_eq!(opts.camera.zoomed_radius, 1.5);
        assert_eq!(opts.glyph_rain.columns, 32);
        assert_eq!(opts.pictures.count(), 5);
    }

    #[test]
    fn picture_table_overrides_replace_defaults() {
        let toml_str = r#"
[[pictures.entries]]
file = "a.png"
title = "A"
description = "first"

[[pictures.entries]]
file = "b.png"
title = "B"
description = "second"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.pictures.count(), 2);
        assert_eq!(opts.pictures.entries[1].title, "B");
        assert_eq!(opts.pictures.radius, 8.0);
    }

    #[test]
    fn derived_church_constants() {
        let church = ChurchOptions::default();
        assert_eq!(church.entrance_z(), 20.0);
        assert_eq!(church.arc_center_z(), 10.0);
        assert_eq!(church.pillar_offset(), 6.0);
        assert!((church.pillar_spacing() - 50.0 / 7.0).abs() < 1e-6);
        assert_eq!(GlyphRainOptions::default().font_size(), 16);
    }

    #[test]
    fn save_and_load_preset() {
        let dir = std::env::temp_dir().join("nave-options-test");
        let path = dir.join("dim.toml");
        let mut opts = Options::default();
        opts.atmosphere.fog_density = 0.05;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert!(Options::list_presets(&dir).contains(&"dim".to_owned()));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("glyph_rain"));
        assert!(props.contains_key("atmosphere"));
        assert!(props.contains_key("lighting"));

        // Picture metadata is content, not a tunable
        assert!(!props.contains_key("pictures"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("smooth_factor").is_some());
        assert!(camera.get("orbit_radius").is_none());
    }
}
