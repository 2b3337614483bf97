pub mod image_loader;
pub mod pipeline;

pub use image_loader::{load_luma, load_samples};
pub use pipeline::{
    ensure_svg_extension, write_atomic, Artifact, Job, RenderPipeline, RunPaths, RunReport,
};
