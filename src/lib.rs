//! Halftone - raster images to halftone illustrations
//!
//! Image decoding, preset configuration and output encoding around the
//! `halftone-core` algorithms. This library exposes modules for integration
//! testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
