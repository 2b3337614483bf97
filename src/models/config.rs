use halftone_core::{
    Axis, BandOptions, SquareOptions, TileOptions, TileShape, VasarelyOptions,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::RenderError;

/// Preset file loaded from YAML. Every field is optional; missing values
/// fall back to the built-in defaults of each mode.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    #[serde(default)]
    pub bands: BandPreset,

    #[serde(default)]
    pub squares: SquarePreset,

    #[serde(default)]
    pub tiles: TilePreset,

    #[serde(default)]
    pub vasarely: VasarelyPreset,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BandPreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_bands: Option<usize>,
    /// "vertical" or "horizontal"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_thick: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_space: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SquarePreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells_h: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells_v: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_thick: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_square_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TilePreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells_h: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cells_v: Option<usize>,
    /// "circle" or "square"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_thick: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_tile_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VasarelyPreset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_bands: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_space: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_band: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_size: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
}

/// Grid counts are resolved as a pair: if any layer names one of them, the
/// defaults for both are ignored.
fn resolve_cells(
    cells_h: Option<usize>,
    cells_v: Option<usize>,
    defaults: (Option<usize>, Option<usize>),
) -> (Option<usize>, Option<usize>) {
    if cells_h.is_none() && cells_v.is_none() {
        defaults
    } else {
        (cells_h, cells_v)
    }
}

impl BandPreset {
    /// Fill every unset field of `self` from `lower`.
    pub fn or(self, lower: &Self) -> Self {
        Self {
            n_bands: self.n_bands.or(lower.n_bands),
            axis: self.axis.or_else(|| lower.axis.clone()),
            min_thick: self.min_thick.or(lower.min_thick),
            min_space: self.min_space.or(lower.min_space),
            border: self.border.or(lower.border),
            resolution: self.resolution.or(lower.resolution),
            invert: self.invert.or(lower.invert),
        }
    }

    pub fn resolve(&self) -> Result<BandOptions, RenderError> {
        let defaults = BandOptions::default();
        let axis = match &self.axis {
            Some(name) => name.parse::<Axis>()?,
            None => defaults.axis,
        };
        let options = BandOptions {
            n_bands: self.n_bands.unwrap_or(defaults.n_bands),
            axis,
            min_thick: self.min_thick.unwrap_or(defaults.min_thick),
            min_space: self.min_space.unwrap_or(defaults.min_space),
            border: self.border.unwrap_or(defaults.border),
            resolution: self.resolution.or(defaults.resolution),
            invert: self.invert.unwrap_or(defaults.invert),
        };
        options.validate()?;
        Ok(options)
    }
}

impl SquarePreset {
    pub fn or(self, lower: &Self) -> Self {
        Self {
            cells_h: self.cells_h.or(lower.cells_h),
            cells_v: self.cells_v.or(lower.cells_v),
            min_thick: self.min_thick.or(lower.min_thick),
            min_square_size: self.min_square_size.or(lower.min_square_size),
            border: self.border.or(lower.border),
            invert: self.invert.or(lower.invert),
        }
    }

    pub fn resolve(&self) -> Result<SquareOptions, RenderError> {
        let defaults = SquareOptions::default();
        let (cells_h, cells_v) =
            resolve_cells(self.cells_h, self.cells_v, (defaults.cells_h, defaults.cells_v));
        let options = SquareOptions {
            cells_h,
            cells_v,
            min_thick: self.min_thick.unwrap_or(defaults.min_thick),
            min_square_size: self.min_square_size.unwrap_or(defaults.min_square_size),
            border: self.border.unwrap_or(defaults.border),
            invert: self.invert.unwrap_or(defaults.invert),
        };
        options.validate()?;
        Ok(options)
    }
}

impl TilePreset {
    pub fn or(self, lower: &Self) -> Self {
        Self {
            cells_h: self.cells_h.or(lower.cells_h),
            cells_v: self.cells_v.or(lower.cells_v),
            tile_type: self.tile_type.or_else(|| lower.tile_type.clone()),
            min_thick: self.min_thick.or(lower.min_thick),
            min_tile_size: self.min_tile_size.or(lower.min_tile_size),
            border: self.border.or(lower.border),
            invert: self.invert.or(lower.invert),
        }
    }

    pub fn resolve(&self) -> Result<TileOptions, RenderError> {
        let defaults = TileOptions::default();
        let shape = match &self.tile_type {
            Some(name) => name.parse::<TileShape>()?,
            None => defaults.shape,
        };
        let (cells_h, cells_v) =
            resolve_cells(self.cells_h, self.cells_v, (defaults.cells_h, defaults.cells_v));
        let options = TileOptions {
            cells_h,
            cells_v,
            shape,
            min_thick: self.min_thick.unwrap_or(defaults.min_thick),
            min_tile_size: self.min_tile_size.unwrap_or(defaults.min_tile_size),
            border: self.border.unwrap_or(defaults.border),
            invert: self.invert.unwrap_or(defaults.invert),
        };
        options.validate()?;
        Ok(options)
    }
}

impl VasarelyPreset {
    pub fn or(self, lower: &Self) -> Self {
        Self {
            n_bands: self.n_bands.or(lower.n_bands),
            axis: self.axis.or_else(|| lower.axis.clone()),
            min_space: self.min_space.or(lower.min_space),
            min_band: self.min_band.or(lower.min_band),
            restore_size: self.restore_size.or(lower.restore_size),
            invert: self.invert.or(lower.invert),
        }
    }

    pub fn resolve(&self) -> Result<VasarelyOptions, RenderError> {
        let defaults = VasarelyOptions::default();
        let axis = match &self.axis {
            Some(name) => name.parse::<Axis>()?,
            None => defaults.axis,
        };
        let options = VasarelyOptions {
            n_bands: self.n_bands.unwrap_or(defaults.n_bands),
            axis,
            min_space: self.min_space.unwrap_or(defaults.min_space),
            min_band: self.min_band.unwrap_or(defaults.min_band),
            restore_size: self.restore_size.unwrap_or(defaults.restore_size),
            invert: self.invert.unwrap_or(defaults.invert),
        };
        options.validate()?;
        Ok(options)
    }
}

impl PresetConfig {
    /// Load a preset file. Unknown keys are rejected so typos surface early.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(path = %path.display(), "Loaded preset");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, RenderError> {
        // An empty file parses as null; treat it as an empty preset
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| RenderError::Config(e.to_string()))
    }

    /// The built-in defaults of every mode, written out in full.
    pub fn builtin() -> Self {
        let bands = BandOptions::default();
        let squares = SquareOptions::default();
        let tiles = TileOptions::default();
        let vasarely = VasarelyOptions::default();
        Self {
            bands: BandPreset {
                n_bands: Some(bands.n_bands),
                axis: Some(bands.axis.to_string()),
                min_thick: Some(bands.min_thick),
                min_space: Some(bands.min_space),
                border: Some(bands.border),
                resolution: bands.resolution,
                invert: Some(bands.invert),
            },
            squares: SquarePreset {
                cells_h: squares.cells_h,
                cells_v: squares.cells_v,
                min_thick: Some(squares.min_thick),
                min_square_size: Some(squares.min_square_size),
                border: Some(squares.border),
                invert: Some(squares.invert),
            },
            tiles: TilePreset {
                cells_h: tiles.cells_h,
                cells_v: tiles.cells_v,
                tile_type: Some(tiles.shape.to_string()),
                min_thick: Some(tiles.min_thick),
                min_tile_size: Some(tiles.min_tile_size),
                border: Some(tiles.border),
                invert: Some(tiles.invert),
            },
            vasarely: VasarelyPreset {
                n_bands: Some(vasarely.n_bands),
                axis: Some(vasarely.axis.to_string()),
                min_space: Some(vasarely.min_space),
                min_band: Some(vasarely.min_band),
                restore_size: Some(vasarely.restore_size),
                invert: Some(vasarely.invert),
            },
        }
    }

    pub fn to_yaml(&self) -> Result<String, RenderError> {
        serde_yaml::to_string(self).map_err(|e| RenderError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_preset_resolves_to_defaults() {
        let config = PresetConfig::from_yaml("").unwrap();
        assert_eq!(config, PresetConfig::default());
        assert_eq!(config.bands.resolve().unwrap(), BandOptions::default());
        assert_eq!(config.squares.resolve().unwrap(), SquareOptions::default());
        assert_eq!(
            config.vasarely.resolve().unwrap(),
            VasarelyOptions::default()
        );
    }

    #[test]
    fn test_deserialize_preset() {
        let yaml = r#"
bands:
  n_bands: 12
  axis: horizontal
  border: 0
tiles:
  cells_h: 40
  tile_type: square
  min_thick: 0.2
"#;
        let config = PresetConfig::from_yaml(yaml).unwrap();

        let bands = config.bands.resolve().unwrap();
        assert_eq!(bands.n_bands, 12);
        assert_eq!(bands.axis, Axis::Horizontal);
        assert_eq!(bands.border, 0.0);
        assert_eq!(bands.min_thick, 3.0);

        let tiles = config.tiles.resolve().unwrap();
        assert_eq!(tiles.cells_h, Some(40));
        assert_eq!(tiles.shape, TileShape::Square);
        assert_eq!(tiles.min_thick, 0.2);
        assert_eq!(tiles.border, 1.0);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = PresetConfig::from_yaml("bands:\n  n_bandz: 3\n").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
        assert!(err.to_string().contains("n_bandz"));
    }

    #[test]
    fn test_cli_layer_wins_over_preset() {
        let preset = BandPreset {
            n_bands: Some(10),
            border: Some(5.0),
            ..Default::default()
        };
        let cli = BandPreset {
            n_bands: Some(20),
            ..Default::default()
        };
        let options = cli.or(&preset).resolve().unwrap();
        assert_eq!(options.n_bands, 20);
        assert_eq!(options.border, 5.0);
        assert_eq!(options.min_space, 3.0);
    }

    #[test]
    fn test_explicit_cell_count_replaces_default_pair() {
        let cli = SquarePreset {
            cells_v: Some(8),
            ..Default::default()
        };
        let options = cli.resolve().unwrap();
        assert_eq!((options.cells_h, options.cells_v), (None, Some(8)));
    }

    #[test]
    fn test_tiles_without_counts_fail_validation() {
        let err = TilePreset::default().resolve().unwrap_err();
        assert!(matches!(
            err,
            RenderError::Halftone(halftone_core::HalftoneError::MissingCellCount)
        ));
    }

    #[test]
    fn test_unknown_tile_type() {
        let preset = TilePreset {
            cells_h: Some(4),
            tile_type: Some("hexagon".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            preset.resolve().unwrap_err(),
            RenderError::Halftone(halftone_core::HalftoneError::UnsupportedMode(_))
        ));
    }

    #[test]
    fn test_builtin_round_trips_through_yaml() {
        let yaml = PresetConfig::builtin().to_yaml().unwrap();
        assert!(yaml.contains("n_bands: 32"));
        assert!(yaml.contains("tile_type: circle"));
        let parsed = PresetConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, PresetConfig::builtin());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preset.yaml");
        std::fs::write(&path, "vasarely:\n  n_bands: 30\n  restore_size: false\n").unwrap();

        let config = PresetConfig::load(&path).unwrap();
        let options = config.vasarely.resolve().unwrap();
        assert_eq!(options.n_bands, 30);
        assert!(!options.restore_size);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = PresetConfig::load(Path::new("/nonexistent/preset.yaml")).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
