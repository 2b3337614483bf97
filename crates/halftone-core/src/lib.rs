//! halftone-core: raster brightness to halftone geometry
//!
//! This library turns a grayscale sample buffer into a halftone-style
//! illustration. It does no I/O: callers decode images into a
//! [`SampleBuffer`] and replay the resulting [`Drawing`] into a
//! [`DrawingSink`] of their choice.
//!
//! # Quick Start
//!
//! ```
//! use halftone_core::{bands, BandOptions, Bilinear, RecordingSink, SampleBuffer};
//!
//! let buffer = SampleBuffer::from_fn(64, 48, |x, _| (x * 4) as f32);
//! let options = BandOptions::new().n_bands(8);
//!
//! let drawing = bands::render(&buffer, &options, &Bilinear).unwrap();
//! assert_eq!(drawing.shapes.len(), 8);
//!
//! let mut sink = RecordingSink::default();
//! drawing.draw_into(&mut sink);
//! assert_eq!(sink.calls.len(), 9); // 8 bands + frame
//! ```
//!
//! # Modes
//!
//! | Mode                   | Output        | Shape                         |
//! |------------------------|---------------|-------------------------------|
//! | [`bands`]              | [`Drawing`]   | one polygon per band          |
//! | [`squares`]            | [`Drawing`]   | one rectangle per cell        |
//! | [`tiles`]              | [`Drawing`]   | one circle or square per cell |
//! | [`vasarely`]           | [`RasterImage`] | black/white pixels          |
//!
//! All modes share the same front half: contrast normalization to
//! `[0, 255]`, an exact grid partition, resampling and per-cell means.
//! Darker cells always produce larger dark shapes.
//!
//! # Coordinates
//!
//! Geometry is computed for vertical bands in original image coordinates.
//! The border is then added with [`Drawing::translate`], and horizontal
//! layouts are produced by [`Drawing::transposed`]. Nothing else moves
//! between coordinate spaces.
//!
//! # Rounding
//!
//! Cell sizes and derived counts use round-half-to-even
//! ([`grid::round_half_even`]) on both axes.

pub mod aggregate;
pub mod buffer;
pub mod contrast;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod mapping;
pub mod modes;
pub mod options;
pub mod params;
pub mod raster;
pub mod resample;
pub mod sink;


pub use buffer::SampleBuffer;
pub use contrast::{normalize, Normalized};
pub use error::HalftoneError;
pub use geometry::{Drawing, Frame, Point, Shape};
pub use grid::{BandGrid, GridSpec, VasarelyGrid};
pub use mapping::{map_value, ValueMap};
pub use modes::{bands, squares, tiles, vasarely};
pub use options::{Axis, BandOptions, SquareOptions, TileOptions, TileShape, VasarelyOptions};
pub use raster::RasterImage;
pub use resample::{Bilinear, Resample};
pub use sink::{DrawingSink, Recorded, RecordingSink, Style};
