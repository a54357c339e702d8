//! Background classification for logo pixels.
//!
//! A pixel is background when it is close enough to pure white. Two
//! parameterizations are supported, each driven by a single tolerance knob:
//!
//! - **Brightness**: every channel is at least `255 - tolerance`.
//! - **Distance**: the Euclidean distance to `(255, 255, 255)` is below `tolerance`.
//!
//! In both cases a larger tolerance classifies a superset of pixels as background.

use image::Rgb;

/// Default brightness tolerance (channels `>= 245`).
pub const DEFAULT_BRIGHTNESS_TOLERANCE: u8 = 10;

/// Default distance tolerance, in RGB units from pure white.
pub const DEFAULT_DISTANCE_TOLERANCE: f32 = 40.0;

/// Pure per-pixel background classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundPredicate {
    /// Near-white by per-channel brightness.
    Brightness {
        /// How far below 255 each channel may fall.
        tolerance: u8,
    },
    /// Near-white by Euclidean distance from pure white.
    Distance {
        /// Exclusive upper bound on the distance to white.
        tolerance: f32,
    },
}

impl Default for BackgroundPredicate {
    fn default() -> Self {
        Self::brightness(DEFAULT_BRIGHTNESS_TOLERANCE)
    }
}

impl BackgroundPredicate {
    /// Brightness predicate with the given tolerance.
    #[must_use]
    pub const fn brightness(tolerance: u8) -> Self {
        Self::Brightness { tolerance }
    }

    /// Distance predicate with the given tolerance.
    #[must_use]
    pub const fn distance(tolerance: f32) -> Self {
        Self::Distance { tolerance }
    }

    /// Returns the numeric tolerance knob as `f32`.
    #[must_use]
    pub fn tolerance(&self) -> f32 {
        match *self {
            Self::Brightness { tolerance } => f32::from(tolerance),
            Self::Distance { tolerance } => tolerance,
        }
    }

    /// Classify a pixel by its colour alone.
    #[must_use]
    pub fn is_background(&self, px: Rgb<u8>) -> bool {
        match *self {
            Self::Brightness { tolerance } => {
                let floor = 255 - tolerance;
                px.0.iter().all(|&c| c >= floor)
            }
            Self::Distance { tolerance } => distance_to_white(px) < tolerance,
        }
    }
}

/// Euclidean distance from `px` to pure white.
#[must_use]
pub fn distance_to_white(px: Rgb<u8>) -> f32 {
    let sq: f32 = px
        .0
        .iter()
        .map(|&c| {
            let d = 255.0 - f32::from(c);
            d * d
        })
        .sum();
    sq.sqrt()
}
