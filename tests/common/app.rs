//! Scratch workspace for integration tests.

use image::GrayImage;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use halftone::services::{Job, RenderPipeline, RunPaths, RunReport};

/// Temporary directory holding inputs and outputs of one test.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Save `image` as a PNG named `name` and return its path.
    pub fn write_image(&self, name: &str, image: &GrayImage) -> PathBuf {
        let path = self.join(name);
        image.save(&path).expect("Failed to save fixture image");
        path
    }

    pub fn write_text(&self, name: &str, content: &str) -> PathBuf {
        let path = self.join(name);
        std::fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// Run the library pipeline with default output naming.
    pub fn run(&self, job: &Job, input: &Path) -> RunReport {
        self.try_run(job, input, None).expect("Render failed")
    }

    pub fn try_run(
        &self,
        job: &Job,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<RunReport, halftone::error::RenderError> {
        RenderPipeline::new().run(
            job,
            &RunPaths {
                input: input.to_path_buf(),
                output: output.map(Path::to_path_buf),
                preview: None,
                preview_scale: 1.0,
            },
        )
    }

    /// Run the compiled binary inside the workspace.
    pub fn cli(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_halftone"))
            .args(args)
            .current_dir(self.path())
            .env("RUST_LOG", "off")
            .output()
            .expect("Failed to run halftone binary")
    }
}
