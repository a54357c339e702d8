//! Error types for the logo-background-removal crate.

/// Errors that can occur while loading, masking, or saving an image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be decoded, or it has zero width or height.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The output path resolves to the input file, which would be replaced.
    #[error("output would overwrite input: {}", .0.display())]
    OverwritesInput(std::path::PathBuf),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output format cannot carry an alpha channel.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// An error occurred while encoding the output image.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
