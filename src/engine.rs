//! Masking engine: mode selection, file decode/encode, batch processing.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbImage, RgbaImage};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fill;
use crate::predicate::BackgroundPredicate;

/// How background pixels are selected for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskMode {
    /// Only background pixels connected to an image corner become transparent.
    /// Enclosed whites (eyes, letter counters) stay opaque.
    #[default]
    BorderConnected,
    /// Every background pixel becomes transparent, wherever it is.
    Global,
}

/// Options controlling background removal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaskOptions {
    /// Pixel selection strategy.
    pub mode: MaskMode,
    /// Background classifier and its tolerance.
    pub predicate: BackgroundPredicate,
}

/// Result of processing a single image file.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Number of pixels made transparent.
    pub transparent: u64,
    /// Total number of pixels in the image.
    pub total: u64,
    /// Human-readable status message.
    pub message: String,
}

impl ProcessResult {
    fn failed(path: &Path, message: String) -> Self {
        Self {
            path: path.to_path_buf(),
            success: false,
            transparent: 0,
            total: 0,
            message,
        }
    }
}

/// Remove the background of `image` according to `opts`.
///
/// The output has the same dimensions and RGB values as the input; only the
/// alpha channel carries the mask (0 for removed pixels, 255 otherwise).
///
/// # Errors
///
/// Returns [`Error::InvalidImage`] if the image has zero width or height.
pub fn mask(image: &RgbImage, opts: &MaskOptions) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidImage(format!(
            "image has zero area ({width}x{height})"
        )));
    }

    let predicate = &opts.predicate;
    let out = match opts.mode {
        MaskMode::BorderConnected => {
            let visited = fill::flood_fill(image, predicate, &fill::corner_seeds(width, height));
            RgbaImage::from_fn(width, height, |x, y| {
                let [r, g, b] = image.get_pixel(x, y).0;
                let idx = y as usize * width as usize + x as usize;
                Rgba([r, g, b, if visited[idx] { 0 } else { 255 }])
            })
        }
        MaskMode::Global => RgbaImage::from_fn(width, height, |x, y| {
            let px = *image.get_pixel(x, y);
            let [r, g, b] = px.0;
            Rgba([r, g, b, if predicate.is_background(px) { 0 } else { 255 }])
        }),
    };

    debug!(
        width,
        height,
        mode = ?opts.mode,
        tolerance = predicate.tolerance(),
        transparent = count_transparent(&out),
        "masked image"
    );
    Ok(out)
}

/// Count pixels whose alpha is zero.
#[must_use]
pub fn count_transparent(image: &RgbaImage) -> u64 {
    image.pixels().filter(|p| p[3] == 0).count() as u64
}

/// Decode an in-memory image and convert it to RGB.
///
/// # Errors
///
/// Returns [`Error::InvalidImage`] if the bytes cannot be decoded or the
/// decoded image has zero area.
pub fn decode(bytes: &[u8]) -> Result<RgbImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| Error::InvalidImage(e.to_string()))?
        .to_rgb8();
    ensure_area(img)
}

/// Open an image file and convert it to RGB.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, and
/// [`Error::InvalidImage`] if it cannot be decoded or has zero area.
pub fn open(path: &Path) -> Result<RgbImage> {
    let bytes = std::fs::read(path)?;
    decode(&bytes)
}

fn ensure_area(img: RgbImage) -> Result<RgbImage> {
    if img.width() == 0 || img.height() == 0 {
        return Err(Error::InvalidImage(format!(
            "image has zero area ({}x{})",
            img.width(),
            img.height()
        )));
    }
    Ok(img)
}

/// Reusable masker bound to a fixed set of options.
///
/// Create once with [`MaskEngine::new()`] and reuse for many files.
#[derive(Debug, Clone, Default)]
pub struct MaskEngine {
    opts: MaskOptions,
}

impl MaskEngine {
    /// Create an engine with the given options.
    #[must_use]
    pub fn new(opts: MaskOptions) -> Self {
        Self { opts }
    }

    /// The options this engine was built with.
    #[must_use]
    pub fn options(&self) -> &MaskOptions {
        &self.opts
    }

    /// Mask an in-memory image. See [`mask`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidImage`] for zero-area input.
    pub fn mask(&self, image: &RgbImage) -> Result<RgbaImage> {
        mask(image, &self.opts)
    }

    /// Process a single image file: load, mask, save.
    ///
    /// Never fails outright; errors are reported in the returned [`ProcessResult`].
    #[must_use]
    pub fn process_file(&self, input: &Path, output: &Path) -> ProcessResult {
        match self.try_process_file(input, output) {
            Ok((transparent, total)) => ProcessResult {
                path: input.to_path_buf(),
                success: true,
                transparent,
                total,
                message: format!("Background removed ({transparent}/{total} pixels transparent)"),
            },
            Err(e) => {
                warn!(path = %input.display(), error = %e, "failed to process image");
                ProcessResult::failed(input, e.to_string())
            }
        }
    }

    fn try_process_file(&self, input: &Path, output: &Path) -> Result<(u64, u64)> {
        if is_same_file(input, output) {
            return Err(Error::OverwritesInput(output.to_path_buf()));
        }
        let rgb = open(input)?;
        let out = self.mask(&rgb)?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        save_rgba(&out, output)?;

        let total = u64::from(out.width()) * u64::from(out.height());
        Ok((count_transparent(&out), total))
    }

    /// Process all supported images in a directory.
    ///
    /// Each input is written to `output_dir` as `{stem}.png`. Inputs sharing a
    /// stem keep their extension (`{stem}.{ext}.png`), and when `output_dir` is
    /// `input_dir` outputs get a `_transparent` suffix. An output that would
    /// replace one of the inputs is reported as a failure instead of written.
    ///
    /// Uses parallel iteration across files when the `cli` feature is enabled
    /// (via rayon).
    #[must_use]
    pub fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Vec<ProcessResult> {
        let mut entries: Vec<PathBuf> = match std::fs::read_dir(input_dir) {
            Ok(rd) => rd
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
                .map(|e| e.path())
                .filter(|p| is_supported_image(p))
                .collect(),
            Err(e) => {
                return vec![ProcessResult::failed(
                    input_dir,
                    format!("Failed to read directory: {e}"),
                )];
            }
        };
        entries.sort();

        if !output_dir.exists() {
            if let Err(e) = std::fs::create_dir_all(output_dir) {
                return vec![ProcessResult::failed(
                    output_dir,
                    format!("Failed to create output directory: {e}"),
                )];
            }
        }

        let in_place = is_same_file(input_dir, output_dir);
        let jobs: Vec<(PathBuf, Option<PathBuf>)> = entries
            .iter()
            .cloned()
            .zip(plan_output_names(&entries, in_place))
            .map(|(input, name)| (input, name.map(|n| output_dir.join(n))))
            .collect();

        let run = |(input_path, output_path): &(PathBuf, Option<PathBuf>)| match output_path {
            Some(output_path) => self.process_file(input_path, output_path),
            None => {
                warn!(path = %input_path.display(), "output name collides with another file");
                ProcessResult::failed(
                    input_path,
                    "Output would overwrite another input or output".to_string(),
                )
            }
        };

        #[cfg(feature = "cli")]
        {
            use rayon::prelude::*;
            jobs.par_iter().map(run).collect()
        }

        #[cfg(not(feature = "cli"))]
        {
            jobs.iter().map(run).collect()
        }
    }
}

/// Choose an output file name for each input of a directory run.
///
/// `None` marks an input whose output name would clash with an input file
/// (in place) or with an output already assigned to an earlier entry.
fn plan_output_names(entries: &[PathBuf], in_place: bool) -> Vec<Option<String>> {
    let stem_of = |p: &Path| p.file_stem().unwrap_or_default().to_string_lossy().into_owned();
    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for p in entries {
        *stem_counts.entry(stem_of(p.as_path())).or_default() += 1;
    }

    let input_names: HashSet<String> = entries
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    let mut taken: HashSet<String> = HashSet::new();

    entries
        .iter()
        .map(|p| {
            let stem = stem_of(p.as_path());
            let base = if stem_counts[&stem] > 1 {
                let ext = p.extension().unwrap_or_default().to_string_lossy();
                format!("{stem}.{ext}")
            } else {
                stem
            };
            let name = if in_place {
                format!("{base}_transparent.png")
            } else {
                format!("{base}.png")
            };
            let clashes = (in_place && input_names.contains(&name)) || !taken.insert(name.clone());
            (!clashes).then_some(name)
        })
        .collect()
}

/// Whether two paths resolve to the same existing file or directory.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Check if a file has a supported input image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp" | "bmp"
        ),
        None => false,
    }
}

/// Save an RGBA image to a format that keeps transparency.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] unless `path` ends in `.png`, or an
/// error if encoding or writing fails.
pub fn save_rgba(img: &RgbaImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Png => img.save_with_format(path, ImageFormat::Png)?,
        _ => return Err(Error::UnsupportedFormat(format!("{format:?}"))),
    }

    Ok(())
}

/// Generate a default output path from an input path.
///
/// Example: `"logo.jpg"` becomes `"logo_transparent.png"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("{stem}_transparent.png"))
}
