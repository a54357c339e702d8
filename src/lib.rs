//! Make white logo backgrounds transparent.
//!
//! Near-white pixels connected to an image corner are treated as background
//! and get alpha 0. White regions enclosed by the logo itself (the whites of
//! eyes, the inside of an "O") are not reachable from a corner and stay
//! opaque. A simpler global mode clears every near-white pixel instead.
//!
//! # Quick Start
//!
//! ```no_run
//! use logo_background_removal::{mask, open, save_rgba, MaskOptions};
//!
//! let img = open("logo.jpg".as_ref()).expect("failed to load logo");
//! let out = mask(&img, &MaskOptions::default()).expect("empty image");
//! save_rgba(&out, "logo.png".as_ref()).expect("failed to save");
//! ```
//!
//! # Tolerance
//!
//! Background classification is driven by one numeric knob. A larger
//! tolerance never removes a pixel from the background set.
//!
//! ```
//! use image::Rgb;
//! use logo_background_removal::BackgroundPredicate;
//!
//! let strict = BackgroundPredicate::brightness(5);
//! let loose = BackgroundPredicate::brightness(20);
//! let px = Rgb([240, 242, 245]);
//! assert!(!strict.is_background(px));
//! assert!(loose.is_background(px));
//! ```

#![deny(missing_docs)]

mod engine;
pub mod error;
pub mod fill;
pub mod predicate;

pub use engine::{
    count_transparent, decode, default_output_path, is_supported_image, mask, open, save_rgba,
    MaskEngine, MaskMode, MaskOptions, ProcessResult,
};
pub use error::{Error, Result};
pub use predicate::BackgroundPredicate;
