use std::ffi::OsString;
use std::path::{Path, PathBuf};

use halftone_core::{
    bands, squares, tiles, vasarely, BandOptions, Bilinear, Drawing, RasterImage, Resample,
    SampleBuffer, SquareOptions, TileOptions, VasarelyOptions,
};

use crate::error::RenderError;
use crate::rendering::{encode_gray_png, render_preview, SvgDocument};
use crate::services::image_loader::load_samples;

/// One resolved render request.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Bands(BandOptions),
    Squares(SquareOptions),
    Tiles(TileOptions),
    Vasarely(VasarelyOptions),
}

impl Job {
    pub fn name(&self) -> &'static str {
        match self {
            Job::Bands(_) => "bands",
            Job::Squares(_) => "squares",
            Job::Tiles(_) => "tiles",
            Job::Vasarely(_) => "vasarely",
        }
    }

    pub fn is_vector(&self) -> bool {
        !matches!(self, Job::Vasarely(_))
    }

    /// Output path used when none is given on the command line.
    pub fn default_output(&self, input: &Path) -> PathBuf {
        let suffix = match self {
            Job::Bands(_) | Job::Squares(_) => ".svg",
            Job::Tiles(_) => "_tiles.svg",
            Job::Vasarely(_) => "_vasarely.png",
        };
        let mut name: OsString = input.with_extension("").into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Resolve the output path: explicit vector outputs always end in `.svg`.
    pub fn output_path(&self, input: &Path, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            None => self.default_output(input),
            Some(path) if self.is_vector() => ensure_svg_extension(path),
            Some(path) => path.to_path_buf(),
        }
    }
}

/// Append `.svg` unless the path already ends with it.
pub fn ensure_svg_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "svg") {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".svg");
    PathBuf::from(name)
}

/// Result of rendering one job.
#[derive(Debug, Clone)]
pub enum Artifact {
    Vector(Drawing),
    Raster(RasterImage),
}

impl Artifact {
    /// Bytes written to the output file.
    pub fn encode(&self) -> Result<Vec<u8>, RenderError> {
        match self {
            Artifact::Vector(drawing) => {
                Ok(SvgDocument::from_drawing(drawing).to_svg_string().into_bytes())
            }
            Artifact::Raster(image) => encode_gray_png(image),
        }
    }
}

/// Paths of one run.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// PNG preview of a vector output.
    pub preview: Option<PathBuf>,
    pub preview_scale: f32,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub output: PathBuf,
    pub bytes: usize,
    /// Number of shapes, for vector outputs.
    pub shapes: Option<usize>,
    pub preview: Option<PathBuf>,
}

/// Load, render, encode and write one image.
pub struct RenderPipeline {
    resampler: Box<dyn Resample>,
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self::with_resampler(Box::new(Bilinear))
    }

    pub fn with_resampler(resampler: Box<dyn Resample>) -> Self {
        Self { resampler }
    }

    /// Run the core for `job` on an already decoded buffer.
    pub fn render(&self, job: &Job, buffer: &SampleBuffer) -> Result<Artifact, RenderError> {
        let resampler = self.resampler.as_ref();
        let artifact = match job {
            Job::Bands(options) => Artifact::Vector(bands::render(buffer, options, resampler)?),
            Job::Squares(options) => Artifact::Vector(squares::render(buffer, options, resampler)?),
            Job::Tiles(options) => Artifact::Vector(tiles::render(buffer, options, resampler)?),
            Job::Vasarely(options) => {
                Artifact::Raster(vasarely::render(buffer, options, resampler)?)
            }
        };
        Ok(artifact)
    }

    /// Every artifact is built before anything is written, so a failed run
    /// leaves no output behind.
    pub fn run(&self, job: &Job, paths: &RunPaths) -> Result<RunReport, RenderError> {
        let output = job.output_path(&paths.input, paths.output.as_deref());
        tracing::info!(
            mode = job.name(),
            input = %paths.input.display(),
            output = %output.display(),
            "Rendering"
        );

        let preview_path = match &paths.preview {
            Some(_) if !job.is_vector() => {
                tracing::warn!("Preview ignored: raster output is already a PNG");
                None
            }
            Some(path) => {
                check_preview_scale(paths.preview_scale)?;
                Some(path.clone())
            }
            None => None,
        };

        let buffer = load_samples(&paths.input)?;
        let artifact = self.render(job, &buffer)?;
        let bytes = artifact.encode()?;
        let preview = match &preview_path {
            Some(path) => Some((path, render_preview(&bytes, paths.preview_scale)?)),
            None => None,
        };

        write_atomic(&output, &bytes)?;
        if let Some((path, png)) = &preview {
            if let Err(e) = write_atomic(path, png) {
                let _ = std::fs::remove_file(&output);
                return Err(e);
            }
            tracing::info!(path = %path.display(), bytes = png.len(), "Wrote preview");
        }

        let shapes = match &artifact {
            Artifact::Vector(drawing) => Some(drawing.shapes.len()),
            Artifact::Raster(_) => None,
        };

        Ok(RunReport {
            output,
            bytes: bytes.len(),
            shapes,
            preview: preview_path,
        })
    }
}

fn check_preview_scale(scale: f32) -> Result<(), RenderError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(RenderError::Config(format!(
            "preview scale must be > 0, got {scale}"
        )))
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
///
/// A failed write leaves no partial output behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| RenderError::Config(format!("output path {} has no file name", path.display())))?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(".{}.tmp", std::process::id()));
    let tmp_path = path.with_file_name(tmp_name);

    if let Err(e) = std::fs::write(&tmp_path, bytes) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_output_names() {
        let input = Path::new("/data/photo.jpg");
        assert_eq!(
            Job::Bands(BandOptions::default()).default_output(input),
            PathBuf::from("/data/photo.svg")
        );
        assert_eq!(
            Job::Squares(SquareOptions::default()).default_output(input),
            PathBuf::from("/data/photo.svg")
        );
        assert_eq!(
            Job::Tiles(TileOptions::default()).default_output(input),
            PathBuf::from("/data/photo_tiles.svg")
        );
        assert_eq!(
            Job::Vasarely(VasarelyOptions::default()).default_output(input),
            PathBuf::from("/data/photo_vasarely.png")
        );
    }

    #[test]
    fn test_explicit_vector_output_gets_svg_extension() {
        let job = Job::Bands(BandOptions::default());
        let input = Path::new("in.png");
        assert_eq!(
            job.output_path(input, Some(Path::new("out"))),
            PathBuf::from("out.svg")
        );
        assert_eq!(
            job.output_path(input, Some(Path::new("out.svg"))),
            PathBuf::from("out.svg")
        );
        assert_eq!(
            job.output_path(input, Some(Path::new("out.png"))),
            PathBuf::from("out.png.svg")
        );
    }

    #[test]
    fn test_explicit_raster_output_is_kept() {
        let job = Job::Vasarely(VasarelyOptions::default());
        assert_eq!(
            job.output_path(Path::new("in.png"), Some(Path::new("pattern.png"))),
            PathBuf::from("pattern.png")
        );
    }

    #[test]
    fn test_render_dispatches_by_mode() {
        let buffer = SampleBuffer::from_fn(40, 40, |x, y| ((x + y) * 3) as f32);
        let pipeline = RenderPipeline::new();

        let job = Job::Bands(BandOptions::new().n_bands(4));
        assert!(matches!(pipeline.render(&job, &buffer).unwrap(), Artifact::Vector(_)));

        let job = Job::Vasarely(VasarelyOptions::new().n_bands(4));
        assert!(matches!(pipeline.render(&job, &buffer).unwrap(), Artifact::Raster(_)));
    }

    #[test]
    fn test_write_atomic_replaces_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "temp file left behind");
    }

    #[test]
    fn test_write_atomic_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.svg");
        assert!(matches!(
            write_atomic(&path, b"x").unwrap_err(),
            RenderError::Io(_)
        ));
        assert!(!path.exists());
    }
}
