pub mod config;

pub use config::{BandPreset, PresetConfig, SquarePreset, TilePreset, VasarelyPreset};
